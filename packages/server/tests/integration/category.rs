use serde_json::json;

use crate::common::{TestApp, routes};

mod category_creation {
    use super::*;

    #[tokio::test]
    async fn create_returns_201_with_location_and_envelope() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::CATEGORIES,
                &json!({ "name": "Tech", "url_handle": "tech" }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["statusCode"], 201);
        assert_eq!(res.body["message"], "Category created successfully");
        assert_eq!(res.body["data"]["name"], "Tech");
        assert_eq!(res.body["data"]["url_handle"], "tech");
        assert!(res.body["data"].get("blog_posts").is_none());

        let id = res.id();
        assert_eq!(res.location.as_deref(), Some(routes::category(&id).as_str()));
    }

    #[tokio::test]
    async fn client_supplied_id_is_ignored() {
        let app = TestApp::spawn().await;
        let submitted = "00000000-0000-0000-0000-000000000001";

        let res = app
            .post(
                routes::CATEGORIES,
                &json!({ "id": submitted, "name": "Tech", "url_handle": "tech" }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_ne!(res.id(), submitted);
    }

    #[tokio::test]
    async fn missing_fields_are_reported_per_field() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::CATEGORIES, &json!({ "name": "  " })).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "Validation failed");
        assert!(res.body["data"]["name"].is_array());
        assert!(res.body["data"]["url_handle"].is_array());
    }

    #[tokio::test]
    async fn malformed_json_is_reported_under_body() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .post(app.url(routes::CATEGORIES))
            .header("Content-Type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        let res = crate::common::TestResponse::from_response(res).await;

        assert_eq!(res.status, 400);
        assert!(res.body["data"]["body"].is_array());
    }
}

mod category_lookup {
    use super::*;

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let app = TestApp::spawn().await;
        app.create_category("Zebra", "zebra").await;
        app.create_category("Apple", "apple").await;

        let res = app.get(routes::CATEGORIES).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Success");
        let names: Vec<&str> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Apple", "Zebra"]);
    }

    #[tokio::test]
    async fn get_by_id_and_by_handle() {
        let app = TestApp::spawn().await;
        let id = app.create_category("Tech", "tech").await;

        let res = app.get(&routes::category(&id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Category retrieved successfully");
        assert_eq!(res.body["data"]["id"], id.as_str());

        let res = app.get(&routes::category_by_handle("tech")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["id"], id.as_str());
    }

    #[tokio::test]
    async fn unknown_id_and_handle_are_404() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&routes::category("6f1c1a0e-2b1d-4e57-9a51-2c8f2f6f8a10"))
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["message"], "Category not found");

        let res = app.get(&routes::category_by_handle("missing")).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn malformed_id_is_400_on_id() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::category("not-a-uuid")).await;

        assert_eq!(res.status, 400);
        assert!(res.body["data"]["id"].is_array());
    }
}

mod category_update_and_delete {
    use super::*;

    #[tokio::test]
    async fn update_overwrites_name_and_handle() {
        let app = TestApp::spawn().await;
        let id = app.create_category("Tech", "tech").await;

        let res = app
            .put(
                &routes::category(&id),
                &json!({ "name": "Technology", "url_handle": "technology" }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Category updated successfully");
        assert_eq!(res.body["data"]["name"], "Technology");
        assert_eq!(res.body["data"]["url_handle"], "technology");
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_404_and_creates_nothing() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::category("6f1c1a0e-2b1d-4e57-9a51-2c8f2f6f8a10"),
                &json!({ "name": "Tech", "url_handle": "tech" }),
            )
            .await;

        assert_eq!(res.status, 404);
        let list = app.get(routes::CATEGORIES).await;
        assert_eq!(list.body["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn delete_detaches_category_from_posts() {
        let app = TestApp::spawn().await;
        let tech = app.create_category("Tech", "tech").await;
        let post = app.create_blog_post("hi", &[&tech]).await;

        let res = app.delete(&routes::category(&tech)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Category deleted successfully");
        assert_eq!(res.body["data"]["id"], tech.as_str());

        let res = app.get(&routes::blog_post(&post)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["categories"], json!([]));
        assert_eq!(app.blog_post_link_count().await, 0);

        let res = app.get(&routes::category(&tech)).await;
        assert_eq!(res.status, 404);
    }
}
