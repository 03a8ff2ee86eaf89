mod common;

use common::test_config;
use quillpad::cli::{OWNER_NAME, SAMPLE_ARTICLES, forge};
use quillpad::db::{AdminCredentials, AdminUpsert, Store};
use quillpad::models::article::NewArticle;

async fn open_store() -> (Store, quillpad::config::Config, std::path::PathBuf) {
    let (config, db_path) = test_config();
    let store = Store::from_config(&config.general).await.unwrap();
    (store, config, db_path)
}

#[tokio::test]
async fn test_forge_is_idempotent() {
    let (store, _config, db_path) = open_store().await;

    let first = forge(&store).await.unwrap();
    assert_eq!(first.inserted, SAMPLE_ARTICLES.len());
    assert_eq!(first.skipped, 0);

    let second = forge(&store).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, SAMPLE_ARTICLES.len());

    assert_eq!(
        store.article_count().await.unwrap(),
        SAMPLE_ARTICLES.len() as u64
    );

    let admin = store.get_admin().await.unwrap().unwrap();
    assert_eq!(admin.name, OWNER_NAME);
    assert_eq!(admin.username, None);

    let _ = std::fs::remove_file(db_path);
}

#[tokio::test]
async fn test_forge_keeps_existing_credentials() {
    let (store, config, db_path) = open_store().await;

    store
        .upsert_admin(
            &AdminCredentials {
                username: "admin",
                password: "secret",
                name: None,
            },
            &config.security,
        )
        .await
        .unwrap();
    forge(&store).await.unwrap();

    let admin = store
        .verify_admin_credentials("admin", "secret")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.name, OWNER_NAME);

    let _ = std::fs::remove_file(db_path);
}

#[tokio::test]
async fn test_admin_create_then_update() {
    let (store, config, db_path) = open_store().await;

    let created = store
        .upsert_admin(
            &AdminCredentials {
                username: "first",
                password: "one",
                name: None,
            },
            &config.security,
        )
        .await
        .unwrap();
    assert_eq!(created, AdminUpsert::Created);
    assert_eq!(store.get_admin().await.unwrap().unwrap().name, "root");

    let updated = store
        .upsert_admin(
            &AdminCredentials {
                username: "second",
                password: "two",
                name: Some("Bo"),
            },
            &config.security,
        )
        .await
        .unwrap();
    assert_eq!(updated, AdminUpsert::Updated);

    assert!(
        store
            .verify_admin_credentials("first", "one")
            .await
            .unwrap()
            .is_none()
    );
    let admin = store
        .verify_admin_credentials("second", "two")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.name, "Bo");
    assert_eq!(admin.username.as_deref(), Some("second"));

    let _ = std::fs::remove_file(db_path);
}

#[tokio::test]
async fn test_reset_schema_drops_data() {
    let (store, _config, db_path) = open_store().await;

    store
        .insert_article(NewArticle::new("gone", "soon", "me"))
        .await
        .unwrap();
    store.set_admin_name("X").await.unwrap();

    store.reset_schema().await.unwrap();

    assert_eq!(store.article_count().await.unwrap(), 0);
    assert!(store.get_admin().await.unwrap().is_none());

    let _ = std::fs::remove_file(db_path);
}

#[tokio::test]
async fn test_reset_schema_keeps_running_server_usable() {
    let mut app = common::spawn_app().await;
    app.seed_admin().await;
    app.login().await;
    app.store
        .insert_article(NewArticle::new("before", "x", "me"))
        .await
        .unwrap();

    app.store.reset_schema().await.unwrap();

    let response = app.get("/").await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let html = common::body_text(response).await;
    assert!(!html.contains("before"));
    assert!(html.contains("0 articles"));

    // The session survives but its user row is gone
    assert!(html.contains("name=\"password\""));
}
