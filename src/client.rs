//! REST client for the Trello API.

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::models::{Board, BoardList, Card, CardCreateInput, Member};

/// Trello API endpoint
pub const TRELLO_API_URL: &str = "https://api.trello.com";

/// Trello REST client.
///
/// Authenticates every call with the `key`/`token` query parameter pair.
#[derive(Debug, Clone)]
pub struct TrelloClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    api_token: String,
}

impl TrelloClient {
    /// Create a new Trello client with an API key and token.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be constructed
    pub fn new(api_key: &str, api_token: &str) -> Result<Self> {
        Self::with_url(api_key, api_token, TRELLO_API_URL)
    }

    /// Create a client against a custom API base URL (mock servers, staging).
    pub fn with_url(api_key: &str, api_token: &str, api_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            api_token: api_token.to_string(),
        })
    }

    fn auth_params(&self) -> [(&'static str, &str); 2] {
        [("key", self.api_key.as_str()), ("token", self.api_token.as_str())]
    }

    /// Execute a GET request and deserialize the response body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.api_url);

        let response = self
            .client
            .get(&url)
            .query(&self.auth_params())
            .send()
            .await
            .context("Failed to send request to Trello API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Trello API returned error status {status}: {body}"));
        }

        response
            .json()
            .await
            .context("Failed to parse Trello API response")
    }

    /// Get a member by username or ID.
    #[instrument(skip(self))]
    pub async fn get_member(&self, username: &str) -> Result<Member> {
        let member: Member = self.get_json(&format!("/1/members/{username}")).await?;
        debug!(member_id = %member.id, "Retrieved member");
        Ok(member)
    }

    /// List the boards a member belongs to.
    #[instrument(skip(self))]
    pub async fn member_boards(&self, member_id: &str) -> Result<Vec<Board>> {
        let boards: Vec<Board> = self
            .get_json(&format!("/1/members/{member_id}/boards"))
            .await?;
        debug!(count = boards.len(), "Retrieved member boards");
        Ok(boards)
    }

    /// Get a board by ID.
    #[instrument(skip(self))]
    pub async fn get_board(&self, board_id: &str) -> Result<Board> {
        self.get_json(&format!("/1/boards/{board_id}")).await
    }

    /// List the lists on a board.
    #[instrument(skip(self))]
    pub async fn board_lists(&self, board_id: &str) -> Result<Vec<BoardList>> {
        let lists: Vec<BoardList> = self
            .get_json(&format!("/1/boards/{board_id}/lists"))
            .await?;
        debug!(count = lists.len(), "Retrieved board lists");
        Ok(lists)
    }

    /// Create a card.
    #[instrument(skip(self, input), fields(title = %input.name))]
    pub async fn create_card(&self, input: &CardCreateInput) -> Result<Card> {
        let url = format!("{}/1/cards", self.api_url);

        let response = self
            .client
            .post(&url)
            .query(&self.auth_params())
            .json(input)
            .send()
            .await
            .context("Failed to send request to Trello API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Trello API returned error status {status}: {body}"));
        }

        let card: Card = response
            .json()
            .await
            .context("Failed to parse Trello API response")?;
        debug!(card_id = %card.id, "Created card");
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let result = TrelloClient::new("test-key", "test-token");
        assert!(result.is_ok());
    }

    #[test]
    fn test_with_url_strips_trailing_slash() {
        let client = TrelloClient::with_url("k", "t", "http://localhost:1234/").unwrap();
        assert_eq!(client.api_url, "http://localhost:1234");
    }

    #[test]
    fn test_auth_params() {
        let client = TrelloClient::new("test-key", "test-token").unwrap();
        assert_eq!(
            client.auth_params(),
            [("key", "test-key"), ("token", "test-token")]
        );
    }
}
