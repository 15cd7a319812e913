use reqwest::multipart::{Form, Part};

use crate::common::{TestApp, routes};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake image data";

fn image_form(original_name: &str, bytes: &[u8]) -> Form {
    let part = Part::bytes(bytes.to_vec())
        .file_name(original_name.to_string())
        .mime_str("application/octet-stream")
        .expect("Failed to set MIME type");
    Form::new().part("file", part)
}

mod image_upload {
    use super::*;

    #[tokio::test]
    async fn stores_file_and_returns_absolute_url() {
        let app = TestApp::spawn().await;
        let form = image_form("Cover.PNG", PNG_BYTES)
            .text("file_name", "cover")
            .text("title", "Cover image");

        let res = app.upload(form).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["statusCode"], 201);
        assert_eq!(res.body["message"], "Image uploaded successfully");
        let data = &res.body["data"];
        assert_eq!(data["file_name"], "cover");
        assert_eq!(data["file_extension"], ".png");
        assert_eq!(data["title"], "Cover image");
        assert_eq!(data["created_at"], "2024-05-17");
        assert_eq!(
            data["url"],
            format!("http://{}/Images/cover.png", app.addr).as_str()
        );

        let on_disk = std::fs::read(app.images_root.join("cover.png")).unwrap();
        assert_eq!(on_disk, PNG_BYTES);
        assert_eq!(app.image_count().await, 1);
    }

    #[tokio::test]
    async fn uploaded_file_is_served_back() {
        let app = TestApp::spawn().await;
        let res = app
            .upload(image_form("photo.jpg", PNG_BYTES).text("file_name", "photo"))
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let served = app
            .client
            .get(app.url("/Images/photo.jpg"))
            .send()
            .await
            .unwrap();
        assert_eq!(served.status().as_u16(), 200);
        assert_eq!(served.bytes().await.unwrap().as_ref(), PNG_BYTES);
    }

    #[tokio::test]
    async fn generates_a_name_when_none_is_given() {
        let app = TestApp::spawn().await;

        let res = app.upload(image_form("photo.jpeg", PNG_BYTES)).await;

        assert_eq!(res.status, 201, "{}", res.text);
        let name = res.body["data"]["file_name"].as_str().unwrap().to_string();
        assert_eq!(name.len(), 32);
        assert!(name.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(app.images_root.join(format!("{name}.jpeg")).exists());
        assert_eq!(res.body["data"]["title"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn same_name_overwrites_existing_file() {
        let app = TestApp::spawn().await;
        let first = app
            .upload(image_form("a.png", b"first").text("file_name", "banner"))
            .await;
        assert_eq!(first.status, 201);

        let second = app
            .upload(image_form("b.png", b"second").text("file_name", "banner"))
            .await;
        assert_eq!(second.status, 201);

        let on_disk = std::fs::read(app.images_root.join("banner.png")).unwrap();
        assert_eq!(on_disk, b"second");
    }

    #[tokio::test]
    async fn forwarded_host_and_proto_shape_the_url() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .post(app.url(routes::IMAGES))
            .header("X-Forwarded-Host", "blog.example.com")
            .header("X-Forwarded-Proto", "https")
            .multipart(image_form("x.png", PNG_BYTES).text("file_name", "x"))
            .send()
            .await
            .unwrap();
        let res = crate::common::TestResponse::from_response(res).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["data"]["url"], "https://blog.example.com/Images/x.png");
    }
}

mod image_serving {
    use super::*;

    #[tokio::test]
    async fn staging_area_is_not_reachable() {
        let app = TestApp::spawn().await;
        let res = app
            .upload(image_form("a.png", PNG_BYTES).text("file_name", "a"))
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        for path in ["/Images/.tmp/", "/Images/../Images.tmp/"] {
            let res = app.get(path).await;
            assert_eq!(res.status, 404, "{path} should not be served");
        }

        let mut entries = std::fs::read_dir(&app.images_root)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        entries.sort();
        assert_eq!(entries, ["a.png"]);
    }
}

mod image_validation {
    use super::*;

    #[tokio::test]
    async fn disallowed_extension_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(image_form("anim.gif", PNG_BYTES).text("file_name", "anim"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.body["data"]["file"].is_array());
        assert!(!app.images_root.join("anim.gif").exists());
        assert_eq!(app.image_count().await, 0);
    }

    #[tokio::test]
    async fn missing_file_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.upload(Form::new().text("title", "No file")).await;

        assert_eq!(res.status, 400);
        assert!(res.body["data"]["file"].is_array());
    }

    #[tokio::test]
    async fn path_like_file_name_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(image_form("x.png", PNG_BYTES).text("file_name", "../escape"))
            .await;

        assert_eq!(res.status, 400);
        assert!(res.body["data"]["file_name"].is_array());
        assert_eq!(app.image_count().await, 0);
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let app = TestApp::spawn_with_max_image_size(8).await;

        let res = app.upload(image_form("big.png", PNG_BYTES)).await;

        assert_eq!(res.status, 400);
        assert!(res.body["data"]["file"].is_array());
        assert_eq!(app.image_count().await, 0);
    }
}

mod image_listing {
    use super::*;

    #[tokio::test]
    async fn lists_uploaded_images() {
        let app = TestApp::spawn().await;
        app.upload(image_form("a.png", PNG_BYTES).text("file_name", "a"))
            .await;
        app.upload(image_form("b.jpg", PNG_BYTES).text("file_name", "b"))
            .await;

        let res = app.get(routes::IMAGES).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Success");
        let mut names: Vec<&str> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["file_name"].as_str().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, ["a", "b"]);
    }
}
