/**
 * REST API Client
 *
 * Thin typed wrapper over the sync server's HTTP surface. Every request
 * carries the bearer token; mutations additionally carry the socket's
 * connection id in `X-Connection-Id` so the server excludes this client
 * from the broadcast of its own mutation (the REST response already
 * reflects it).
 */

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use uuid::Uuid;

use crate::client::ClientError;
use crate::shared::{
    Activity, Board, Card, CreateBoard, CreateCard, MoveCard, Note, UpdateCard, UpsertNote,
};

#[derive(Deserialize)]
struct BoardEnvelope {
    board: Board,
}

#[derive(Deserialize)]
struct BoardsEnvelope {
    boards: Vec<Board>,
}

#[derive(Deserialize)]
struct CardEnvelope {
    card: Card,
}

#[derive(Deserialize)]
struct CardsEnvelope {
    cards: Vec<Card>,
}

#[derive(Deserialize)]
struct DeletedEnvelope {
    id: Uuid,
}

#[derive(Deserialize)]
struct NoteEnvelope {
    note: Note,
}

#[derive(Deserialize)]
struct ActivitiesEnvelope {
    activities: Vec<Activity>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// Authenticated HTTP client for the sync server
pub struct BoardApiClient {
    base_url: String,
    token: String,
    connection_id: Option<Uuid>,
    client: Client,
}

impl BoardApiClient {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            token: token.into(),
            connection_id: None,
            client: Client::new(),
        }
    }

    /// Tag mutations with the socket connection id for origin exclusion
    pub fn with_connection_id(mut self, connection_id: Uuid) -> Self {
        self.connection_id = Some(connection_id);
        self
    }

    pub async fn create_board(&self, payload: &CreateBoard) -> Result<Board, ClientError> {
        let response = self
            .mutation(self.client.post(self.url("/api/boards")))
            .json(payload)
            .send()
            .await?;
        Ok(parse::<BoardEnvelope>(response).await?.board)
    }

    pub async fn list_boards(&self) -> Result<Vec<Board>, ClientError> {
        let response = self.get(self.url("/api/boards")).send().await?;
        Ok(parse::<BoardsEnvelope>(response).await?.boards)
    }

    pub async fn get_board(&self, board_id: Uuid) -> Result<Board, ClientError> {
        let response = self
            .get(self.url(&format!("/api/boards/{}", board_id)))
            .send()
            .await?;
        Ok(parse::<BoardEnvelope>(response).await?.board)
    }

    pub async fn list_cards(&self, board_id: Uuid) -> Result<Vec<Card>, ClientError> {
        let response = self
            .get(self.url(&format!("/api/boards/{}/cards", board_id)))
            .send()
            .await?;
        Ok(parse::<CardsEnvelope>(response).await?.cards)
    }

    pub async fn create_card(
        &self,
        board_id: Uuid,
        payload: &CreateCard,
    ) -> Result<Card, ClientError> {
        let response = self
            .mutation(
                self.client
                    .post(self.url(&format!("/api/boards/{}/cards", board_id))),
            )
            .json(payload)
            .send()
            .await?;
        Ok(parse::<CardEnvelope>(response).await?.card)
    }

    pub async fn update_card(
        &self,
        card_id: Uuid,
        payload: &UpdateCard,
    ) -> Result<Card, ClientError> {
        let response = self
            .mutation(
                self.client
                    .patch(self.url(&format!("/api/cards/{}", card_id))),
            )
            .json(payload)
            .send()
            .await?;
        Ok(parse::<CardEnvelope>(response).await?.card)
    }

    pub async fn delete_card(&self, card_id: Uuid) -> Result<Uuid, ClientError> {
        let response = self
            .mutation(
                self.client
                    .delete(self.url(&format!("/api/cards/{}", card_id))),
            )
            .send()
            .await?;
        Ok(parse::<DeletedEnvelope>(response).await?.id)
    }

    pub async fn move_card(
        &self,
        card_id: Uuid,
        payload: &MoveCard,
    ) -> Result<Card, ClientError> {
        let response = self
            .mutation(
                self.client
                    .post(self.url(&format!("/api/cards/{}/move", card_id))),
            )
            .json(payload)
            .send()
            .await?;
        Ok(parse::<CardEnvelope>(response).await?.card)
    }

    pub async fn get_note(&self, board_id: Uuid) -> Result<Note, ClientError> {
        let response = self
            .get(self.url(&format!("/api/boards/{}/note", board_id)))
            .send()
            .await?;
        Ok(parse::<NoteEnvelope>(response).await?.note)
    }

    pub async fn put_note(
        &self,
        board_id: Uuid,
        payload: &UpsertNote,
    ) -> Result<Note, ClientError> {
        let response = self
            .mutation(
                self.client
                    .put(self.url(&format!("/api/boards/{}/note", board_id))),
            )
            .json(payload)
            .send()
            .await?;
        Ok(parse::<NoteEnvelope>(response).await?.note)
    }

    pub async fn recent_activities(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<Activity>, ClientError> {
        let mut request = self.get(self.url("/api/activity"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request.send().await?;
        Ok(parse::<ActivitiesEnvelope>(response).await?.activities)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, url: String) -> RequestBuilder {
        self.client.get(url).bearer_auth(&self.token)
    }

    fn mutation(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.bearer_auth(&self.token);
        match self.connection_id {
            Some(id) => builder.header("X-Connection-Id", id.to_string()),
            None => builder,
        }
    }
}

/// Decode a success envelope or surface the server's error body
async fn parse<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ErrorEnvelope>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
