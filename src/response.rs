//! Response bodies shared by several handlers.

use serde::Serialize;

/// Confirmation returned by delete endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageBody {
    #[schema(example = "Comparison deleted successfully")]
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        MessageBody {
            message: message.into(),
        }
    }
}
