//! Demo Data
//!
//! Creates a demo user who owns two boards, each with three lists and a few
//! cards. Lists and cards are placed through [`Reindexer::append`], so the
//! seeded positions are dense like everything else.
//!
//! Seeding is refused when the demo user already exists.

use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::boards::activity;
use crate::backend::boards::db::{create_board, NewBoard};
use crate::backend::cards::db::insert_card;
use crate::backend::lists::db::insert_list;
use crate::backend::reindex::{ReindexError, Reindexer, Scope};
use crate::backend::server::state::AppState;
use crate::shared::Visibility;

pub const DEMO_NAME: &str = "Test User";
pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "password123";

struct DemoBoard {
    title: &'static str,
    description: &'static str,
    background: &'static str,
    lists: &'static [DemoList],
}

struct DemoList {
    title: &'static str,
    /// (title, description)
    cards: &'static [(&'static str, &'static str)],
}

const DEMO_BOARDS: &[DemoBoard] = &[
    DemoBoard {
        title: "Project Alpha",
        description: "Main development board for Project Alpha",
        background: "#0079bf",
        lists: &[
            DemoList {
                title: "To Do",
                cards: &[
                    ("Setup Development Environment", "Install all necessary tools and dependencies"),
                    ("Create Database Schema", "Design and implement database structure"),
                ],
            },
            DemoList {
                title: "In Progress",
                cards: &[("Implement Authentication", "Working on user authentication system")],
            },
            DemoList {
                title: "Done",
                cards: &[("Basic API Setup", "Completed basic API structure")],
            },
        ],
    },
    DemoBoard {
        title: "Personal Tasks",
        description: "Personal task tracking",
        background: "#519839",
        lists: &[
            DemoList {
                title: "Backlog",
                cards: &[("Grocery Shopping", "Buy weekly groceries")],
            },
            DemoList {
                title: "This Week",
                cards: &[
                    ("Gym Session", "Monday and Wednesday workouts"),
                    ("Read Documentation", "Complete chapter 1 and 2"),
                ],
            },
            DemoList {
                title: "Completed",
                cards: &[],
            },
        ],
    },
];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("demo user {email} already exists")]
    AlreadySeeded { email: String },

    #[error("failed to hash demo password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("reindex error: {0}")]
    Reindex(#[from] ReindexError),
}

/// What a seeding run created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub user_id: Uuid,
    pub boards: usize,
    pub lists: usize,
    pub cards: usize,
}

/// Create the demo user and their boards
pub async fn seed_demo_data(state: &AppState) -> Result<SeedSummary, SeedError> {
    let pool = &state.db_pool;

    if get_user_by_email(pool, DEMO_EMAIL).await?.is_some() {
        return Err(SeedError::AlreadySeeded {
            email: DEMO_EMAIL.to_string(),
        });
    }

    let password_hash = bcrypt::hash(DEMO_PASSWORD, state.auth.bcrypt_cost)?;
    let user = create_user(pool, DEMO_NAME.to_string(), DEMO_EMAIL.to_string(), password_hash).await?;
    tracing::info!(user_id = %user.id, email = DEMO_EMAIL, "Created demo user");

    let mut summary = SeedSummary {
        user_id: user.id,
        boards: 0,
        lists: 0,
        cards: 0,
    };

    for demo in DEMO_BOARDS {
        let board = create_board(
            pool,
            user.id,
            NewBoard {
                title: demo.title.to_string(),
                description: demo.description.to_string(),
                background: Some(demo.background.to_string()),
                visibility: Visibility::Private,
            },
        )
        .await?;
        activity::log(pool, board.id, user.id, "created_board", Some(demo.title)).await;
        summary.boards += 1;

        for list in demo.lists {
            let list_id = seed_list(&state.reindexer, board.id, list).await?;
            summary.lists += 1;
            summary.cards += list.cards.len();
            tracing::debug!(board = demo.title, list = list.title, %list_id, "Seeded list");
        }
    }

    Ok(summary)
}

async fn seed_list(reindexer: &Reindexer, board_id: Uuid, list: &DemoList) -> Result<Uuid, SeedError> {
    let title = list.title;
    let row = reindexer
        .append(Scope::Lists, board_id, move |conn, position| {
            Box::pin(async move { insert_list(conn, board_id, title, position).await })
        })
        .await?;

    for &(title, description) in list.cards {
        let list_id = row.id;
        reindexer
            .append(Scope::Cards, list_id, move |conn, position| {
                Box::pin(async move { insert_card(conn, list_id, title, description, position).await })
            })
            .await?;
    }

    Ok(row.id)
}
