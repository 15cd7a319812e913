use crate::common::TestApp;

#[tokio::test]
async fn openapi_document_lists_every_resource() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    let paths: Vec<&str> = res.body["paths"]
        .as_object()
        .expect("paths should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    for expected in [
        "/api/BlogPost",
        "/api/BlogPost/{id}",
        "/api/Category",
        "/api/Category/{id}",
        "/api/Category/by-handle/{url_handle}",
        "/api/Image",
    ] {
        assert!(
            paths
                .iter()
                .any(|p| p.trim_end_matches('/') == expected),
            "missing {expected} in {paths:?}"
        );
    }
    assert!(res.body["components"]["securitySchemes"]["jwt"].is_object());
}

#[tokio::test]
async fn scalar_ui_is_served() {
    let app = TestApp::spawn().await;

    let res = app.get("/scalar").await;

    assert_eq!(res.status, 200);
    assert!(res.text.contains("<html"));
}
