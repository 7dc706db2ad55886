//! REST API module.
//!
//! One handler module per component; all share the persistence repository
//! and the upload store through `AppState`.

mod admins;
mod contacts;
mod events;
mod system_data;
mod team;

pub use admins::*;
pub use contacts::*;
pub use events::*;
pub use system_data::*;
pub use team::*;

use serde::Serialize;

use crate::errors::AppError;

/// Result type for all handlers; errors render through `AppError`.
pub type ApiResult<T> = Result<T, AppError>;

/// Plain confirmation body for deletes and other message-only responses.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
