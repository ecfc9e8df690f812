//! HTTP client for the kitchen server API

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{ConflictBody, ErrorBody, ErrorCode};
use shared::request::{ReservationItemInput, ReservationItemsRequest, TtlUpdateRequest};
use shared::response::{
    IngredientView, MenuItemView, ReservationActionResponse, ReservationCreated, ReservationView,
    TtlSnapshot,
};
use shared::types::ReservationId;

use crate::{ClientConfig, ClientError, ClientResult};

/// Typed HTTP client
///
/// Error responses are decoded into [`ClientError`] variants; in particular
/// the insufficient-ingredients conflict keeps its per-ingredient shortfall
/// list.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self.client.patch(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(Into::into);
        }

        let text = response.text().await?;
        Err(Self::decode_error(status, &text))
    }

    fn decode_error(status: StatusCode, body: &str) -> ClientError {
        if let Ok(conflict) = serde_json::from_str::<ConflictBody>(body)
            && conflict.code == ErrorCode::InsufficientIngredients
        {
            return ClientError::InsufficientIngredients(conflict.errors);
        }
        if let Ok(error) = serde_json::from_str::<ErrorBody>(body) {
            return match error.code {
                ErrorCode::ReservationNotActive | ErrorCode::ReservationExpired => {
                    ClientError::ReservationEnded { code: error.code }
                }
                ErrorCode::NotFound => ClientError::NotFound(error.error),
                ErrorCode::Unauthorized => ClientError::Unauthorized,
                ErrorCode::BadRequest
                | ErrorCode::TtlMinutesOutOfRange
                | ErrorCode::WarningThresholdOutOfRange
                | ErrorCode::TtlPayloadRequired => ClientError::Validation(error.error),
                _ => ClientError::Internal(error.error),
            };
        }

        // body was not a known payload, fall back to the status line
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(body.to_string()),
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::BAD_REQUEST => ClientError::Validation(body.to_string()),
            _ => ClientError::Internal(body.to_string()),
        }
    }

    // ========== Reservations ==========

    pub async fn create_reservation(
        &self,
        items: Vec<ReservationItemInput>,
    ) -> ClientResult<ReservationCreated> {
        self.post("/api/reservations", &ReservationItemsRequest { items })
            .await
    }

    pub async fn get_reservation(&self, id: ReservationId) -> ClientResult<ReservationView> {
        self.get(&format!("/api/reservations/{id}")).await
    }

    pub async fn update_reservation(
        &self,
        id: ReservationId,
        items: Vec<ReservationItemInput>,
    ) -> ClientResult<ReservationView> {
        self.patch(
            &format!("/api/reservations/{id}"),
            &ReservationItemsRequest { items },
        )
        .await
    }

    pub async fn commit_reservation(
        &self,
        id: ReservationId,
    ) -> ClientResult<ReservationActionResponse> {
        self.post_empty(&format!("/api/reservations/{id}/commit"))
            .await
    }

    pub async fn release_reservation(
        &self,
        id: ReservationId,
    ) -> ClientResult<ReservationActionResponse> {
        self.post_empty(&format!("/api/reservations/{id}/release"))
            .await
    }

    // ========== Views ==========

    pub async fn list_menu(&self) -> ClientResult<Vec<MenuItemView>> {
        self.get("/api/menu").await
    }

    pub async fn list_ingredients(&self) -> ClientResult<Vec<IngredientView>> {
        self.get("/api/ingredients").await
    }

    // ========== TTL policy ==========

    pub async fn ttl_policy(&self) -> ClientResult<TtlSnapshot> {
        self.get("/api/admin/reservation-ttl").await
    }

    pub async fn update_ttl_policy(&self, update: &TtlUpdateRequest) -> ClientResult<TtlSnapshot> {
        self.patch("/api/admin/reservation-ttl", update).await
    }
}
