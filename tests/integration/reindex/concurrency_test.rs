//! Concurrent operations on shared parents
//!
//! Many tasks append, reorder and transfer at once; afterwards every parent
//! must still hold exactly `0..count`.

use std::collections::HashSet;

use taskboard::backend::reindex::Scope;
use tokio::task::JoinSet;

use super::Fixture;
use crate::assert_dense;
use crate::common::TestDatabase;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_get_distinct_positions() {
    let fx = Fixture::new().await;
    let list_id = fx.list("L").await;

    let mut tasks = JoinSet::new();
    for i in 0..20 {
        let reindexer = fx.reindexer.clone();
        tasks.spawn(async move {
            let title = format!("Card {i}");
            reindexer
                .append(Scope::Cards, list_id, move |conn, position| {
                    Box::pin(async move {
                        taskboard::backend::cards::db::insert_card(conn, list_id, &title, "", position).await
                    })
                })
                .await
                .map(|card| card.position)
        });
    }

    let mut seen = HashSet::new();
    while let Some(result) = tasks.join_next().await {
        let position = result.expect("task panicked").expect("append failed");
        assert!(seen.insert(position), "position {position} assigned twice");
    }

    assert_dense!(fx.positions(Scope::Cards, list_id).await);
    assert_eq!(seen.len(), 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_moves_keep_lists_dense() {
    let fx = Fixture::new().await;
    let titles: Vec<String> = (0..8).map(|i| format!("C{i}")).collect();
    let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    let l1 = fx.list_with("L1", &refs).await;
    let l2 = fx.list_with("L2", &refs).await;

    let mut ids = Vec::new();
    for title in &titles {
        ids.push(fx.card_id(l1, title).await);
        ids.push(fx.card_id(l2, title).await);
    }

    let mut tasks = JoinSet::new();
    for (i, id) in ids.into_iter().enumerate() {
        let reindexer = fx.reindexer.clone();
        tasks.spawn(async move {
            let dest = if i % 3 == 0 { l1 } else { l2 };
            let position = (i as i64 * 7) % 11;
            if i % 2 == 0 {
                reindexer.transfer(Scope::Cards, id, dest, position).await
            } else {
                reindexer.reorder(Scope::Cards, id, position).await
            }
        });
    }

    while let Some(result) = tasks.join_next().await {
        result.expect("task panicked").expect("move failed");
    }

    let first = fx.positions(Scope::Cards, l1).await;
    let second = fx.positions(Scope::Cards, l2).await;
    assert_eq!(first.len() + second.len(), 16);
    assert_dense!(first);
    assert_dense!(second);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_list_moves_and_removals() {
    let fx = Fixture::new().await;
    let mut lists = Vec::new();
    for i in 0..10 {
        lists.push(fx.list(&format!("List {i}")).await);
    }

    let mut tasks = JoinSet::new();
    for (i, id) in lists.into_iter().enumerate() {
        let reindexer = fx.reindexer.clone();
        tasks.spawn(async move {
            if i % 4 == 0 {
                reindexer.remove(Scope::Lists, id).await.map(|_| ())
            } else {
                reindexer.reorder(Scope::Lists, id, (9 - i) as i64).await.map(|_| ())
            }
        });
    }

    while let Some(result) = tasks.join_next().await {
        result.expect("task panicked").expect("list operation failed");
    }

    let positions = fx.positions(Scope::Lists, fx.board_id).await;
    assert_eq!(positions.len(), 7);
    assert_dense!(positions);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_appends_to_separate_lists_on_shared_file_database() {
    let fx = Fixture::with_database(TestDatabase::on_disk(4).await).await;
    let mut lists = Vec::new();
    for i in 0..4 {
        lists.push(fx.list(&format!("List {i}")).await);
    }

    let mut tasks = JoinSet::new();
    for i in 0..80 {
        let reindexer = fx.reindexer.clone();
        let list_id = lists[i % lists.len()];
        tasks.spawn(async move {
            let title = format!("Card {i}");
            reindexer
                .append(Scope::Cards, list_id, move |conn, position| {
                    Box::pin(async move {
                        taskboard::backend::cards::db::insert_card(conn, list_id, &title, "", position).await
                    })
                })
                .await
        });
    }

    while let Some(result) = tasks.join_next().await {
        result.expect("task panicked").expect("append failed");
    }

    for list_id in lists {
        let positions = fx.positions(Scope::Cards, list_id).await;
        assert_eq!(positions.len(), 20);
        assert_dense!(positions);
    }
}
