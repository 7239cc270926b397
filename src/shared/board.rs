//! Board Data Structures
//!
//! Boards, lists, cards and the board activity log as they travel over the
//! REST API. Lists and cards carry a `position` that is dense and zero-based
//! within their parent (lists within a board, cards within a list).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Default board background (Trello blue)
pub const DEFAULT_BACKGROUND: &str = "#0079bf";

/// Maximum number of activity entries kept per board
pub const ACTIVITY_LIMIT: usize = 50;

/// Who can see a board
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Owner and members only
    #[default]
    Private,
    /// Anyone in the workspace
    Workspace,
    /// Anyone with the link
    Public,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Workspace => "workspace",
            Visibility::Public => "public",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "private" => Some(Visibility::Private),
            "workspace" => Some(Visibility::Workspace),
            "public" => Some(Visibility::Public),
            _ => None,
        }
    }
}

/// Public view of a user (never includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A board and, when loaded in detail, its lists and cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    /// Unique board ID
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Board owner (always also a member)
    pub owner_id: Uuid,
    /// Members including the owner
    #[serde(default)]
    pub members: Vec<UserSummary>,
    pub background: String,
    pub is_starred: bool,
    #[serde(default)]
    pub visibility: Visibility,
    /// Lists ordered by position; empty for summary listings
    #[serde(default)]
    pub lists: Vec<BoardList>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Whether `user_id` owns the board
    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Whether `user_id` is the owner or a member
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.is_owner(user_id) || self.members.iter().any(|m| m.id == user_id)
    }
}

/// A list (column) on a board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardList {
    pub id: Uuid,
    pub title: String,
    pub board_id: Uuid,
    /// Dense, zero-based position within the board
    pub position: i64,
    pub archived: bool,
    /// Cards ordered by position; empty unless loaded with cards
    #[serde(default)]
    pub cards: Vec<Card>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A card inside a list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub list_id: Uuid,
    /// Dense, zero-based position within the list
    pub position: i64,
    #[serde(default)]
    pub labels: Vec<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry of a board's activity log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    pub user_id: Uuid,
    pub action: String,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Request to create a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

/// Request to update a board; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBoardRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub background: Option<String>,
    pub is_starred: Option<bool>,
    pub visibility: Option<Visibility>,
}

/// Request to add a member to a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
}

/// Request to create a list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListRequest {
    pub title: String,
}

/// Request to rename a list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateListRequest {
    pub title: String,
}

/// Request to move a list, within its board or onto another board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveListRequest {
    pub position: i64,
    /// Destination board; absent means the list's current board
    #[serde(default)]
    pub board_id: Option<Uuid>,
}

/// Request to create a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to update a card's text fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCardRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Request to move a card to a list (possibly the same one) at a position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCardRequest {
    pub list_id: Uuid,
    pub position: i64,
}

/// Request to replace a card's labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLabelsRequest {
    pub labels: Vec<String>,
}

/// Request to set or clear a card's due date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDueDateRequest {
    pub due_date: Option<DateTime<Utc>>,
}

/// Trim a title and reject it if empty
pub fn validate_title(field: &str, title: &str) -> Result<String, SharedError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Trim labels, drop empty ones and duplicates while keeping first-seen order
pub fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim();
        if !label.is_empty() && !out.iter().any(|l| l == label) {
            out.push(label.to_string());
        }
    }
    out
}
