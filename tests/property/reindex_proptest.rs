//! Property-based tests for the reindexer against SQLite
//!
//! Random operation sequences run both on the database and on a plain
//! `Vec` model; the stored order must match the model and stay dense.

use proptest::prelude::*;
use taskboard::backend::reindex::Scope;
use uuid::Uuid;

use crate::integration::reindex::Fixture;

#[derive(Debug, Clone)]
enum Op {
    Append(usize),
    Remove(usize, usize),
    Reorder(usize, usize, i64),
    Transfer(usize, usize, usize, i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..2usize).prop_map(Op::Append),
        1 => (0..2usize, 0..8usize).prop_map(|(l, i)| Op::Remove(l, i)),
        2 => (0..2usize, 0..8usize, -2..10i64).prop_map(|(l, i, p)| Op::Reorder(l, i, p)),
        2 => (0..2usize, 0..8usize, 0..2usize, -2..10i64)
            .prop_map(|(l, i, d, p)| Op::Transfer(l, i, d, p)),
    ]
}

fn clamp(position: i64, max: usize) -> usize {
    position.clamp(0, max as i64) as usize
}

async fn run(ops: Vec<Op>) {
    let fx = Fixture::new().await;
    let lists = [fx.list("L0").await, fx.list("L1").await];
    let mut model: [Vec<Uuid>; 2] = [Vec::new(), Vec::new()];

    for op in ops {
        match op {
            Op::Append(l) => {
                let id = fx.card(lists[l], "card").await;
                model[l].push(id);
            }
            Op::Remove(l, i) => {
                if model[l].is_empty() {
                    continue;
                }
                let id = model[l].remove(i % model[l].len());
                fx.reindexer.remove(Scope::Cards, id).await.unwrap();
            }
            Op::Reorder(l, i, p) => {
                if model[l].is_empty() {
                    continue;
                }
                let id = model[l].remove(i % model[l].len());
                let target = clamp(p, model[l].len());
                model[l].insert(target, id);
                let placement = fx.reindexer.reorder(Scope::Cards, id, p).await.unwrap();
                assert_eq!(placement.position, target as i64);
            }
            Op::Transfer(l, i, d, p) => {
                if model[l].is_empty() {
                    continue;
                }
                let id = model[l].remove(i % model[l].len());
                let target = clamp(p, model[d].len());
                model[d].insert(target, id);
                let placement = fx.reindexer.transfer(Scope::Cards, id, lists[d], p).await.unwrap();
                assert_eq!(placement.parent_id, lists[d]);
                assert_eq!(placement.position, target as i64);
            }
        }
    }

    for (l, list_id) in lists.iter().enumerate() {
        let stored: Vec<Uuid> = taskboard::backend::cards::db::cards_for_list(fx.db.pool(), *list_id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(stored, model[l]);
        crate::assert_dense!(fx.positions(Scope::Cards, *list_id).await);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_operations_match_model(ops in prop::collection::vec(op(), 1..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(run(ops));
    }
}
