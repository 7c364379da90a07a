//! Trello entity type definitions.

use serde::{Deserialize, Serialize};

/// Trello member (the identity on whose behalf boards are queried).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique identifier
    pub id: String,
    /// Member username
    pub username: String,
    /// Display name
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Trello board (a named container of lists).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique identifier
    pub id: String,
    /// Board name
    pub name: String,
    /// Whether the board is archived
    #[serde(default)]
    pub closed: bool,
    /// URL to the board
    #[serde(default)]
    pub url: Option<String>,
}

/// Trello list (a named container of cards within a board).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardList {
    /// Unique identifier
    pub id: String,
    /// List name
    pub name: String,
    /// Whether the list is archived
    #[serde(default)]
    pub closed: bool,
}

/// Trello card as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier
    pub id: String,
    /// Card title
    pub name: String,
    /// Card description (markdown)
    #[serde(default)]
    pub desc: Option<String>,
    /// List the card belongs to
    #[serde(default)]
    pub id_list: String,
    /// Board the card belongs to
    #[serde(default)]
    pub id_board: String,
    /// Short URL to the card
    #[serde(default)]
    pub short_url: Option<String>,
}

/// Input for the card-creation call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCreateInput {
    /// Card title
    pub name: String,
    /// Card description
    pub desc: String,
    /// Target list identifier
    pub id_list: String,
    /// Target board identifier
    pub id_board: String,
}
