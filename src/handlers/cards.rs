//! Card creation flow.
//!
//! One invocation runs four sequential steps: validate the request, fetch
//! the Trello credentials, resolve board/list names to identifiers, create
//! the card. The first failure aborts the rest.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::{info, warn};

use crate::client::TrelloClient;
use crate::config::Config;
use crate::error::IntakeError;
use crate::models::{Board, BoardList, CardCreateInput};
use crate::server::AppState;

/// Response body returned on success.
pub const CARD_CREATED_BODY: &str = "card successfully created";

/// Inbound card-creation request.
///
/// Unknown fields are rejected rather than ignored, so a misspelled field
/// fails loudly instead of silently producing an empty card.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardRequest {
    /// Card title
    #[serde(default)]
    pub title: String,
    /// Card description
    #[serde(default)]
    pub description: String,
    /// Target board name
    #[serde(default)]
    pub board: Option<String>,
    /// Target list name
    #[serde(default)]
    pub list: Option<String>,
    /// Nested board/list override
    #[serde(default)]
    pub config: Option<TargetOverride>,
}

/// Board/list override nested under `config`; takes precedence over the
/// top-level fields.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetOverride {
    /// Target board name
    #[serde(default)]
    pub board: Option<String>,
    /// Target list name
    #[serde(default)]
    pub list: Option<String>,
}

/// Merge the request's target fields with the configured defaults.
///
/// Precedence: `config.board` > `board` > configured default (same for the
/// list). Missing everywhere resolves to an empty string and fails
/// validation.
fn resolve_targets(request: &CardRequest, config: &Config) -> (String, String) {
    let board = request
        .config
        .as_ref()
        .and_then(|c| c.board.clone())
        .or_else(|| request.board.clone())
        .or_else(|| config.default_board.clone())
        .unwrap_or_default();

    let list = request
        .config
        .as_ref()
        .and_then(|c| c.list.clone())
        .or_else(|| request.list.clone())
        .or_else(|| config.default_list.clone())
        .unwrap_or_default();

    (board, list)
}

/// Find a board identifier by exact name; first match wins.
///
/// No match resolves to an empty identifier, not an error. The card call is
/// still attempted and Trello's own validation decides the outcome.
fn find_board_id(boards: &[Board], name: &str) -> String {
    boards
        .iter()
        .find(|board| board.name == name)
        .map(|board| board.id.clone())
        .unwrap_or_default()
}

/// Find a list identifier by exact name; same policy as [`find_board_id`].
fn find_list_id(lists: &[BoardList], name: &str) -> String {
    lists
        .iter()
        .find(|list| list.name == name)
        .map(|list| list.id.clone())
        .unwrap_or_default()
}

fn api_error(err: anyhow::Error) -> IntakeError {
    IntakeError::Api(format!("{err:#}"))
}

/// Handle a card-creation request.
pub async fn create_card(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, &'static str), IntakeError> {
    let request: CardRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Failed to parse card request");
        IntakeError::InvalidBody(e.to_string())
    })?;

    let (board_name, list_name) = resolve_targets(&request, &state.config);

    if request.title.is_empty()
        || request.description.is_empty()
        || board_name.is_empty()
        || list_name.is_empty()
    {
        return Err(IntakeError::MissingFields);
    }

    info!(
        title = %request.title,
        board = %board_name,
        list = %list_name,
        "Processing card creation request"
    );

    let secrets = state.secrets.fetch().await?;

    let client = TrelloClient::with_url(&secrets.api_key, &secrets.api_token, &state.config.api_url)
        .map_err(api_error)?;

    let member = client.get_member(&secrets.member).await.map_err(api_error)?;

    let boards = client.member_boards(&member.id).await.map_err(api_error)?;
    let board_id = find_board_id(&boards, &board_name);
    if board_id.is_empty() {
        warn!(board = %board_name, "No board with that name; proceeding with empty identifier");
    }

    let board = client.get_board(&board_id).await.map_err(api_error)?;

    let lists = client.board_lists(&board.id).await.map_err(api_error)?;
    let list_id = find_list_id(&lists, &list_name);
    if list_id.is_empty() {
        warn!(list = %list_name, "No list with that name; proceeding with empty identifier");
    }

    let card = client
        .create_card(&CardCreateInput {
            name: request.title.clone(),
            desc: request.description.clone(),
            id_list: list_id,
            id_board: board_id,
        })
        .await
        .map_err(api_error)?;

    info!(card_id = %card.id, "Card created");

    Ok((StatusCode::OK, CARD_CREATED_BODY))
}
