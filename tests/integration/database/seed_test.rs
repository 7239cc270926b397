//! Demo data seeding

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use taskboard::backend::reindex::Scope;
use taskboard::backend::seed::{seed_demo_data, SeedError, DEMO_EMAIL, DEMO_PASSWORD};

use crate::assert_dense;
use crate::common::{id_of, titles, TestApp};

#[tokio::test]
async fn test_seed_creates_demo_boards() {
    let app = TestApp::new().await;

    let summary = seed_demo_data(&app.state).await.unwrap();

    assert_eq!(summary.boards, 2);
    assert_eq!(summary.lists, 6);
    assert_eq!(summary.cards, 7);

    let login = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": DEMO_EMAIL, "password": DEMO_PASSWORD })),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.body["token"].as_str().unwrap().to_string();

    let boards = app.get("/api/boards", &token).await;
    let mut names = titles(&boards.body);
    names.sort();
    assert_eq!(names, vec!["Personal Tasks", "Project Alpha"]);

    for board in boards.body.as_array().unwrap() {
        let board_id = id_of(board);
        assert_dense!(app.state.reindexer.positions(Scope::Lists, board_id).await.unwrap());

        let detail = app.get(&format!("/api/boards/{board_id}"), &token).await;
        for list in detail.body["lists"].as_array().unwrap() {
            let list_id = id_of(list);
            assert_dense!(app.state.reindexer.positions(Scope::Cards, list_id).await.unwrap());
        }
    }
}

#[tokio::test]
async fn test_seed_keeps_card_order() {
    let app = TestApp::new().await;
    seed_demo_data(&app.state).await.unwrap();

    let (list_id,): (uuid::Uuid,) = sqlx::query_as("SELECT id FROM lists WHERE title = 'To Do'")
        .fetch_one(app.pool())
        .await
        .unwrap();

    let cards = taskboard::backend::cards::db::cards_for_list(app.pool(), list_id)
        .await
        .unwrap();
    let order: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(order, vec!["Setup Development Environment", "Create Database Schema"]);
}

#[tokio::test]
async fn test_seed_refuses_second_run() {
    let app = TestApp::new().await;
    seed_demo_data(&app.state).await.unwrap();

    let result = seed_demo_data(&app.state).await;

    assert_matches!(result, Err(SeedError::AlreadySeeded { .. }));
    let (boards,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boards")
        .fetch_one(app.pool())
        .await
        .unwrap();
    assert_eq!(boards, 2);
}
