// Client-side booking workflow for the hotel reservation product

// Export modules for each part of the booking flow
pub mod api;
pub mod feedback;
pub mod http_api;
pub mod quote;
pub mod stay;
pub mod workflow;

// Re-export key types for convenience
pub use api::{ApiError, BookingApi, BookingRequest, BookingResponse, Room, User};
pub use feedback::{messages, FeedbackCell, FeedbackState, WorkflowConfig};
pub use http_api::{ClientConfig, ClientError, HttpBookingApi};
pub use quote::{compute_quote, Quote};
pub use stay::{calendar_date, StayInput, ValidatedStay, ValidationError};
pub use workflow::{BookingWorkflow, FetchError, PageView};
