// Booking workflow state machine
// One instance per room-details page view. All mutations happen as reactions
// to discrete UI actions; the reservation call and the dismiss timers are the
// only suspending operations.

use chrono::{DateTime, FixedOffset};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{BookingApi, Room};
use crate::feedback::{messages, FeedbackCell, FeedbackState, WorkflowConfig};
use crate::quote::{compute_quote, Quote};
use crate::stay::StayInput;

// Initial-load failures block the page; they are not transient feedback
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to load room details: {0}")]
    Room(crate::api::ApiError),

    #[error("failed to load user profile: {0}")]
    Profile(crate::api::ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    RoomDetails,
    RoomListing,
}

pub struct BookingWorkflow {
    api: Arc<dyn BookingApi>,
    config: WorkflowConfig,
    room: Room,
    user_id: String,
    stay: StayInput,
    quote: Option<Quote>,
    feedback: FeedbackCell,
    view: Arc<Mutex<PageView>>,
    submitting: Arc<AtomicBool>,
}

impl BookingWorkflow {
    /// Fetches the room and the signed-in user, then builds an empty workflow.
    /// Either fetch failing is a blocking page-level error.
    pub async fn load(api: Arc<dyn BookingApi>, room_id: &str) -> Result<Self, FetchError> {
        Self::load_with_config(api, room_id, WorkflowConfig::default()).await
    }

    pub async fn load_with_config(
        api: Arc<dyn BookingApi>,
        room_id: &str,
        config: WorkflowConfig,
    ) -> Result<Self, FetchError> {
        let room = api.get_room_by_id(room_id).await.map_err(FetchError::Room)?;
        let user = api.get_user_profile().await.map_err(FetchError::Profile)?;
        info!(room_id, user_id = user.id, "booking workflow ready");

        Ok(Self {
            api,
            config,
            room,
            user_id: user.id.to_string(),
            stay: StayInput::default(),
            quote: None,
            feedback: FeedbackCell::default(),
            view: Arc::new(Mutex::new(PageView::RoomDetails)),
            submitting: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn stay(&self) -> &StayInput {
        &self.stay
    }

    pub fn quote(&self) -> Option<Quote> {
        self.quote
    }

    pub fn feedback(&self) -> FeedbackState {
        self.feedback.get()
    }

    pub fn view(&self) -> PageView {
        *self.view.lock()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn on_dates_changed(
        &mut self,
        check_in: Option<DateTime<FixedOffset>>,
        check_out: Option<DateTime<FixedOffset>>,
    ) {
        self.stay.check_in = check_in;
        self.stay.check_out = check_out;
        // Any edit makes a previously confirmed quote stale
        self.quote = None;
    }

    pub fn on_guests_changed(&mut self, adults: &str, children: &str) {
        self.stay.adults = adults.to_string();
        self.stay.children = children.to_string();
        self.quote = None;
    }

    /// Validates the stay and prices it at the room's nightly rate. On a
    /// validation failure the quote stays cleared and a transient error
    /// message is shown instead.
    pub fn on_quote_confirmed(&mut self) -> Option<Quote> {
        match self.stay.validate() {
            Ok(stay) => {
                let quote = compute_quote(&stay, self.room.room_price);
                debug!(
                    nights = quote.nights,
                    total_price = quote.total_price,
                    total_guests = quote.total_guests,
                    "quote computed"
                );
                self.quote = Some(quote);
                Some(quote)
            }
            Err(err) => {
                warn!(%err, "stay input rejected");
                self.show_error(err.user_message().to_string());
                None
            }
        }
    }

    /// Submits the reservation for the confirmed quote. Ignored when no quote
    /// is current (a stale quote is never submitted) or while a previous
    /// submission is still in flight. The returned handle resolves once the
    /// submission and its feedback cycle have finished.
    pub fn on_submit(&mut self) -> Option<JoinHandle<()>> {
        if self.quote.is_none() {
            debug!("no confirmed quote; ignoring submit");
            return None;
        }
        let stay = match self.stay.validate() {
            Ok(stay) => stay,
            Err(err) => {
                warn!(%err, "stay input rejected at submit");
                self.show_error(err.user_message().to_string());
                return None;
            }
        };
        if self.submitting.swap(true, Ordering::SeqCst) {
            debug!("reservation already in flight; ignoring submit");
            return None;
        }

        let request = stay.to_booking_request();
        info!(
            room_id = self.room.id,
            check_in = %request.check_in_date,
            check_out = %request.check_out_date,
            "submitting reservation"
        );

        let api = Arc::clone(&self.api);
        let room_id = self.room.id.to_string();
        let user_id = self.user_id.clone();
        let feedback = self.feedback.clone();
        let view = Arc::clone(&self.view);
        let submitting = Arc::clone(&self.submitting);
        let config = self.config.clone();

        Some(tokio::spawn(async move {
            let result = api.book_room(&room_id, &user_id, request).await;
            submitting.store(false, Ordering::SeqCst);

            match result {
                Ok(response) if response.status_code == 200 => {
                    let code = response.booking_confirmation_code.unwrap_or_default();
                    info!(confirmation_code = %code, "reservation confirmed");
                    let dismissed = feedback.show_for(
                        FeedbackState::Success {
                            confirmation_code: code,
                        },
                        config.success_dismiss,
                    );
                    // Navigate away only if the success message ran its course
                    if dismissed.await.unwrap_or(false) {
                        *view.lock() = PageView::RoomListing;
                    }
                }
                Ok(response) => {
                    warn!(status_code = response.status_code, "reservation rejected");
                    let message = if response.message.is_empty() {
                        messages::BOOKING_FAILED.to_string()
                    } else {
                        response.message
                    };
                    feedback.show_for(FeedbackState::Error { message }, config.error_dismiss);
                }
                Err(err) => {
                    warn!(%err, "reservation failed");
                    feedback.show_for(
                        FeedbackState::Error {
                            message: err.user_message(),
                        },
                        config.error_dismiss,
                    );
                }
            }
        }))
    }

    /// Returns the workflow to its initial empty state, cancelling any
    /// pending feedback dismiss.
    pub fn reset(&mut self) {
        self.stay = StayInput::default();
        self.quote = None;
        self.feedback.set(FeedbackState::None);
        *self.view.lock() = PageView::RoomDetails;
    }

    fn show_error(&self, message: String) {
        self.feedback
            .show_for(FeedbackState::Error { message }, self.config.error_dismiss);
    }
}
