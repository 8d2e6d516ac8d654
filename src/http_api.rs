// HTTP implementation of the booking API
// Talks to the upstream service, which answers every endpoint with a shared
// envelope carrying `statusCode`/`message` plus the payload field for that
// endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::api::{ApiError, BookingApi, BookingRequest, BookingResponse, Room, User};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub auth_token: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            auth_token: String::new(),
            timeout_ms: 10_000,
        }
    }
}

pub struct HttpBookingApi {
    client: reqwest::Client,
    config: ClientConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    status_code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    room: Option<Room>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    booking_confirmation_code: Option<String>,
}

impl HttpBookingApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.base_url.is_empty() {
            return Err(ClientError::ConfigError("base_url is required".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ClientError::InitError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn read_envelope(&self, response: reqwest::Response) -> Result<Envelope, ApiError> {
        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;
        debug!(status_code = envelope.status_code, "upstream envelope");
        Ok(envelope)
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn get_room_by_id(&self, room_id: &str) -> Result<Room, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/rooms/room-by-id/{room_id}")))
            .bearer_auth(&self.config.auth_token)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        let envelope = self.read_envelope(response).await?;
        match envelope.status_code {
            200 => envelope.room.ok_or_else(|| {
                ApiError::NetworkError("response missing room payload".to_string())
            }),
            404 => Err(ApiError::NotFound(room_id.to_string())),
            status_code => Err(ApiError::ApiResponseError {
                status_code,
                message: envelope.message,
            }),
        }
    }

    async fn get_user_profile(&self) -> Result<User, ApiError> {
        let response = self
            .client
            .get(self.url("/users/get-logged-in-profile-info"))
            .bearer_auth(&self.config.auth_token)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        let envelope = self.read_envelope(response).await?;
        match envelope.status_code {
            200 => envelope.user.ok_or_else(|| {
                ApiError::NetworkError("response missing user payload".to_string())
            }),
            401 | 403 => Err(ApiError::Unauthenticated),
            status_code => Err(ApiError::ApiResponseError {
                status_code,
                message: envelope.message,
            }),
        }
    }

    async fn book_room(
        &self,
        room_id: &str,
        user_id: &str,
        request: BookingRequest,
    ) -> Result<BookingResponse, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/bookings/book-room/{room_id}/{user_id}")))
            .bearer_auth(&self.config.auth_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        let envelope = self.read_envelope(response).await?;
        match envelope.status_code {
            200 => Ok(BookingResponse {
                status_code: envelope.status_code,
                message: envelope.message,
                booking_confirmation_code: envelope.booking_confirmation_code,
            }),
            status_code => Err(ApiError::ApiResponseError {
                status_code,
                message: envelope.message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = HttpBookingApi::new(ClientConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();

        assert_eq!(
            api.url("/rooms/room-by-id/12"),
            "http://localhost:8080/rooms/room-by-id/12"
        );
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let result = HttpBookingApi::new(ClientConfig {
            base_url: String::new(),
            ..ClientConfig::default()
        });
        assert!(matches!(result, Err(ClientError::ConfigError(_))));
    }

    #[test]
    fn test_envelope_parses_booking_response() {
        let json = r#"{
            "statusCode": 200,
            "message": "successful",
            "bookingConfirmationCode": "ABC123"
        }"#;

        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.message, "successful");
        assert_eq!(envelope.booking_confirmation_code.as_deref(), Some("ABC123"));
        assert!(envelope.room.is_none());
        assert!(envelope.user.is_none());
    }

    #[test]
    fn test_envelope_parses_room_payload() {
        let json = r#"{
            "statusCode": 200,
            "room": {
                "id": 12,
                "roomType": "Deluxe King",
                "roomPrice": 100.0,
                "roomPhotoUrl": "https://cdn.example.com/rooms/12.jpg",
                "description": "Spacious room with king bed"
            }
        }"#;

        let envelope: Envelope = serde_json::from_str(json).unwrap();
        let room = envelope.room.unwrap();
        assert_eq!(room.id, 12);
        assert_eq!(room.room_price, 100.0);
        assert!(room.bookings.is_empty());
    }
}
