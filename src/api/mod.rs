//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for managing users, recording
//! clock punches, editing payroll extras and producing payroll reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ClockRequest, UserRequest};
pub use response::{ApiError, ApiErrorResponse, MessageResponse, ThirtyPercentResponse};
pub use state::AppState;
