//! Card API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{positions, TestApp};

struct Board {
    app: TestApp,
    token: String,
    board_id: Uuid,
}

async fn board() -> Board {
    let app = TestApp::new().await;
    let owner = app.user("Owner").await;
    let board_id = app.board(&owner.token, "Cards").await;
    Board {
        app,
        token: owner.token,
        board_id,
    }
}

impl Board {
    async fn list_with(&self, title: &str, cards: &[&str]) -> (Uuid, Vec<Uuid>) {
        let list_id = self.app.list(&self.token, self.board_id, title).await;
        let mut ids = Vec::new();
        for card in cards {
            ids.push(self.app.card(&self.token, list_id, card).await);
        }
        (list_id, ids)
    }

    async fn titles(&self, list_id: Uuid) -> Vec<String> {
        self.app.card_titles(&self.token, list_id).await
    }

    async fn positions(&self, list_id: Uuid) -> Vec<i64> {
        let res = self.app.get(&format!("/api/lists/{list_id}/cards"), &self.token).await;
        positions(&res.body)
    }
}

#[tokio::test]
async fn test_create_card() {
    let b = board().await;
    let (list_id, _) = b.list_with("L", &[]).await;

    let res = b
        .app
        .post(
            &format!("/api/lists/{list_id}/cards"),
            &b.token,
            json!({ "title": "Write tests", "description": "all of them" }),
        )
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["title"], "Write tests");
    assert_eq!(res.body["description"], "all of them");
    assert_eq!(res.body["list_id"], list_id.to_string());
    assert_eq!(res.body["position"], 0);
    assert_eq!(res.body["labels"], json!([]));
    assert!(res.body["due_date"].is_null());
}

#[tokio::test]
async fn test_create_card_on_unknown_list() {
    let b = board().await;

    let res = b
        .app
        .post(&format!("/api/lists/{}/cards", Uuid::new_v4()), &b.token, json!({ "title": "X" }))
        .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_card_fields() {
    let b = board().await;
    let (_, ids) = b.list_with("L", &["Before"]).await;
    let uri = format!("/api/cards/{}", ids[0]);

    let res = b.app.put(&uri, &b.token, json!({ "title": "After" })).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["title"], "After");
    assert_eq!(res.body["description"], "");

    let res = b.app.put(&uri, &b.token, json!({ "description": "details" })).await;
    assert_eq!(res.body["title"], "After");
    assert_eq!(res.body["description"], "details");

    let fetched = b.app.get(&uri, &b.token).await;
    assert_eq!(fetched.body["description"], "details");
}

#[tokio::test]
async fn test_move_card_within_list() {
    let b = board().await;
    let (list_id, ids) = b.list_with("L", &["A", "B", "C"]).await;

    let res = b
        .app
        .put(
            &format!("/api/cards/{}/move", ids[2]),
            &b.token,
            json!({ "list_id": list_id, "position": 0 }),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["position"], 0);
    assert_eq!(b.titles(list_id).await, vec!["C", "A", "B"]);
    assert_eq!(b.positions(list_id).await, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_move_card_between_lists() {
    let b = board().await;
    let (l1, ids) = b.list_with("L1", &["P", "Q"]).await;
    let (l2, _) = b.list_with("L2", &["X", "Y", "Z"]).await;

    let res = b
        .app
        .put(
            &format!("/api/cards/{}/move", ids[0]),
            &b.token,
            json!({ "list_id": l2, "position": 1 }),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["list_id"], l2.to_string());
    assert_eq!(res.body["position"], 1);
    assert_eq!(b.titles(l1).await, vec!["Q"]);
    assert_eq!(b.positions(l1).await, vec![0]);
    assert_eq!(b.titles(l2).await, vec!["X", "P", "Y", "Z"]);
    assert_eq!(b.positions(l2).await, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_move_card_to_unknown_list() {
    let b = board().await;
    let (list_id, ids) = b.list_with("L", &["A"]).await;

    let res = b
        .app
        .put(
            &format!("/api/cards/{}/move", ids[0]),
            &b.token,
            json!({ "list_id": Uuid::new_v4(), "position": 0 }),
        )
        .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(b.titles(list_id).await, vec!["A"]);
}

#[tokio::test]
async fn test_move_card_to_foreign_list_is_forbidden() {
    let b = board().await;
    let (_, ids) = b.list_with("L", &["A"]).await;
    let other = b.app.user("Other").await;
    let foreign_board = b.app.board(&other.token, "Theirs").await;
    let foreign_list = b.app.list(&other.token, foreign_board, "Inbox").await;

    let res = b
        .app
        .put(
            &format!("/api/cards/{}/move", ids[0]),
            &b.token,
            json!({ "list_id": foreign_list, "position": 0 }),
        )
        .await;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert!(b.app.card_titles(&other.token, foreign_list).await.is_empty());
}

#[tokio::test]
async fn test_delete_card_closes_gap() {
    let b = board().await;
    let (list_id, ids) = b.list_with("L", &["A", "B", "C"]).await;

    let res = b.app.delete(&format!("/api/cards/{}", ids[1]), &b.token).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    assert_eq!(b.titles(list_id).await, vec!["A", "C"]);
    assert_eq!(b.positions(list_id).await, vec![0, 1]);

    let gone = b.app.get(&format!("/api/cards/{}", ids[1]), &b.token).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_labels_are_normalized() {
    let b = board().await;
    let (_, ids) = b.list_with("L", &["A"]).await;

    let res = b
        .app
        .put(
            &format!("/api/cards/{}/labels", ids[0]),
            &b.token,
            json!({ "labels": ["urgent", " bug ", "", "urgent"] }),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["labels"], json!(["urgent", "bug"]));
}

#[tokio::test]
async fn test_due_date_set_and_clear() {
    let b = board().await;
    let (_, ids) = b.list_with("L", &["A"]).await;
    let uri = format!("/api/cards/{}/due-date", ids[0]);

    let set = b
        .app
        .put(&uri, &b.token, json!({ "due_date": "2030-01-15T12:00:00Z" }))
        .await;
    assert_eq!(set.status, StatusCode::OK);
    let due = set.body["due_date"].as_str().unwrap();
    assert!(due.starts_with("2030-01-15T12:00:00"), "{due}");

    let cleared = b.app.put(&uri, &b.token, json!({ "due_date": null })).await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body["due_date"].is_null());
}

#[tokio::test]
async fn test_card_activity_is_recorded() {
    let b = board().await;
    let (l1, ids) = b.list_with("L1", &["A"]).await;
    let (l2, _) = b.list_with("L2", &[]).await;
    b.app
        .put(
            &format!("/api/cards/{}/move", ids[0]),
            &b.token,
            json!({ "list_id": l2, "position": 0 }),
        )
        .await;
    assert!(b.titles(l1).await.is_empty());

    let res = b
        .app
        .get(&format!("/api/boards/{}/activity", b.board_id), &b.token)
        .await;

    assert_eq!(res.body[0]["action"], "moved_card");
    assert_eq!(res.body[1]["action"], "created_list");
    assert_eq!(res.body[2]["action"], "created_card");
}
