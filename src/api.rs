// External booking API contract
// The remote room/user/booking service is an external collaborator; this module
// defines the operations the workflow consumes and the wire payloads it builds.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Error types for API operations
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Room not found: {0}")]
    NotFound(String),

    #[error("No valid session")]
    Unauthenticated,

    #[error("API error: {status_code} - {message}")]
    ApiResponseError { status_code: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ApiError {
    /// Text shown to the user, preferring the server-provided message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::ApiResponseError { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: u64,
    pub room_type: String,
    pub room_price: f64,
    pub room_photo_url: String,
    pub description: String,
    #[serde(default)]
    pub bookings: Vec<ExistingBooking>,
}

// Bookings already held against the room, listed on the details page
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingBooking {
    pub id: u64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

// Reservation payload; field names follow the upstream JSON contract
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub check_in_date: String,
    pub check_out_date: String,
    pub num_of_adults: u32,
    pub num_of_children: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub booking_confirmation_code: Option<String>,
}

// Operations the booking workflow consumes
#[async_trait]
pub trait BookingApi: Send + Sync + 'static {
    // Room details for the page the workflow is mounted on
    async fn get_room_by_id(&self, room_id: &str) -> Result<Room, ApiError>;

    // Identity of the signed-in user
    async fn get_user_profile(&self) -> Result<User, ApiError>;

    // Submit a reservation for the given room and user
    async fn book_room(
        &self,
        room_id: &str,
        user_id: &str,
        request: BookingRequest,
    ) -> Result<BookingResponse, ApiError>;
}

// Scriptable in-memory API for testing
#[cfg(test)]
pub mod mock_api {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    pub fn sample_room() -> Room {
        Room {
            id: 12,
            room_type: "Deluxe King".to_string(),
            room_price: 100.0,
            room_photo_url: "https://cdn.example.com/rooms/12.jpg".to_string(),
            description: "Spacious room with king bed".to_string(),
            bookings: Vec::new(),
        }
    }

    pub fn sample_user() -> User {
        User {
            id: 7,
            name: "Linh Tran".to_string(),
        }
    }

    pub struct MockBookingApi {
        room: Mutex<Option<Room>>,
        user: Mutex<Option<User>>,
        confirmation_code: Mutex<String>,
        delay_ms: AtomicUsize,
        fail_next_bookings: AtomicUsize,
        failure_message: Mutex<String>,
        booking_requests: Mutex<Vec<BookingRequest>>,
    }

    impl MockBookingApi {
        pub fn new() -> Self {
            Self {
                room: Mutex::new(Some(sample_room())),
                user: Mutex::new(Some(sample_user())),
                confirmation_code: Mutex::new(format!("CONF{}", rand::random::<u16>())),
                delay_ms: AtomicUsize::new(0),
                fail_next_bookings: AtomicUsize::new(0),
                failure_message: Mutex::new("Internal Server Error".to_string()),
                booking_requests: Mutex::new(Vec::new()),
            }
        }

        pub fn remove_room(&self) {
            *self.room.lock() = None;
        }

        pub fn remove_user(&self) {
            *self.user.lock() = None;
        }

        pub fn set_room_price(&self, price: f64) {
            if let Some(room) = self.room.lock().as_mut() {
                room.room_price = price;
            }
        }

        pub fn set_confirmation_code(&self, code: &str) {
            *self.confirmation_code.lock() = code.to_string();
        }

        pub fn set_delay(&self, delay_ms: usize) {
            self.delay_ms.store(delay_ms, Ordering::SeqCst);
        }

        pub fn fail_next_bookings(&self, count: usize, message: &str) {
            self.fail_next_bookings.store(count, Ordering::SeqCst);
            *self.failure_message.lock() = message.to_string();
        }

        pub fn booking_count(&self) -> usize {
            self.booking_requests.lock().len()
        }

        pub fn last_request(&self) -> Option<BookingRequest> {
            self.booking_requests.lock().last().cloned()
        }
    }

    #[async_trait]
    impl BookingApi for MockBookingApi {
        async fn get_room_by_id(&self, room_id: &str) -> Result<Room, ApiError> {
            self.room
                .lock()
                .clone()
                .ok_or_else(|| ApiError::NotFound(room_id.to_string()))
        }

        async fn get_user_profile(&self) -> Result<User, ApiError> {
            self.user.lock().clone().ok_or(ApiError::Unauthenticated)
        }

        async fn book_room(
            &self,
            _room_id: &str,
            _user_id: &str,
            request: BookingRequest,
        ) -> Result<BookingResponse, ApiError> {
            self.booking_requests.lock().push(request);

            let delay = self.delay_ms.load(Ordering::SeqCst);
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay as u64)).await;
            }

            let fail_count = self.fail_next_bookings.load(Ordering::SeqCst);
            if fail_count > 0 {
                self.fail_next_bookings
                    .store(fail_count - 1, Ordering::SeqCst);
                return Err(ApiError::ApiResponseError {
                    status_code: 500,
                    message: self.failure_message.lock().clone(),
                });
            }

            Ok(BookingResponse {
                status_code: 200,
                message: "successful".to_string(),
                booking_confirmation_code: Some(self.confirmation_code.lock().clone()),
            })
        }
    }
}
