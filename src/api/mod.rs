//! HTTP API module for the paystub service.
//!
//! `POST /process` accepts a multipart upload (`country`, `credentials`,
//! `company`, `file`) and issues one paystub per CSV row. `GET /health`
//! reports liveness.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::credentials_match;
pub use handlers::{MAX_UPLOAD_BYTES, create_router};
pub use request::ProcessForm;
pub use response::{ApiError, ApiErrorResponse, CountryError, HealthResponse, ProcessResponse};
pub use state::{AppState, PaystubProcessor};
