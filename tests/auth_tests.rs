mod common;

use axum::http::StatusCode;
use common::{ADMIN_PASSWORD, ADMIN_USERNAME, body_text, location, spawn_app};
use quillpad::models::article::NewArticle;

#[tokio::test]
async fn test_login_success_unlocks_controls() {
    let mut app = spawn_app().await;
    app.seed_admin().await;
    let article = app
        .store
        .insert_article(NewArticle::new("first", "body", "me"))
        .await
        .unwrap();

    let response = app.login().await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(app.has_session());

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Login success."));
    assert!(html.contains(&format!("/ariticle/edit/{}", article.id)));
    assert!(html.contains("/logout"));
    assert!(html.contains("Ada's Articles"));

    let response = app.get(&format!("/ariticle/edit/{}", article.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Flashes are shown once
    let html = body_text(app.get("/").await).await;
    assert!(!html.contains("Login success."));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let mut app = spawn_app().await;
    app.seed_admin().await;

    let response = app
        .post_form("/", &[("username", ADMIN_USERNAME), ("password", "nope")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let wrong_password = body_text(app.get("/").await).await;

    let response = app
        .post_form("/", &[("username", "mallory"), ("password", ADMIN_PASSWORD)])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let unknown_user = body_text(app.get("/").await).await;

    assert!(wrong_password.contains("Invalid username or password."));
    assert!(unknown_user.contains("Invalid username or password."));
    assert!(!unknown_user.contains("/logout"));

    let response = app.get("/ariticle/edit/1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_empty_login_fields_are_rejected() {
    let mut app = spawn_app().await;
    app.seed_admin().await;

    let response = app
        .post_form("/", &[("username", ""), ("password", ADMIN_PASSWORD)])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let html = body_text(app.get("/").await).await;
    assert!(html.contains("Invalid input."));
    assert!(!html.contains("/logout"));

    let response = app
        .post_form("/", &[("username", "   "), ("password", ADMIN_PASSWORD)])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let html = body_text(app.get("/").await).await;
    assert!(html.contains("Invalid input."));
    assert!(!html.contains("Invalid username or password."));

    // Missing fields entirely
    let response = app.post_form("/", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let html = body_text(app.get("/").await).await;
    assert!(html.contains("Invalid input."));
}

#[tokio::test]
async fn test_login_fails_without_admin() {
    let mut app = spawn_app().await;

    app.login().await;
    let html = body_text(app.get("/").await).await;
    assert!(html.contains("Invalid username or password."));
    assert!(html.contains("name=\"password\""));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let mut app = spawn_app().await;
    app.seed_admin().await;
    app.login().await;

    let response = app.get("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let html = body_text(app.get("/").await).await;
    assert!(html.contains("Goodbye."));
    assert!(!html.contains("/logout"));

    let response = app.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_protected_routes_redirect_with_notice() {
    let mut app = spawn_app().await;

    for uri in ["/ariticle/edit/1", "/metrics"] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/");
    }

    let response = app.post_form("/ariticle/delete/1", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let html = body_text(app.get("/").await).await;
    assert!(html.contains("Please log in first."));
}

#[tokio::test]
async fn test_forged_cookie_is_ignored() {
    let mut app = spawn_app().await;
    app.seed_admin().await;

    let response = app
        .send(
            axum::http::Request::builder()
                .uri("/ariticle/edit/1")
                .header("cookie", "id=not-a-real-session")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}
