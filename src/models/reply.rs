//! Terminal reply envelope returned to the caller

use crate::error::{ErrorKind, WeatherError};
use serde::{Deserialize, Serialize};

/// What the dispatcher hands back for every request, success or not
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherReply {
    /// Human-readable answer or user-facing error message
    pub text: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl WeatherReply {
    #[must_use]
    pub fn success(text: String) -> Self {
        Self {
            text,
            ok: true,
            error_kind: None,
        }
    }

    #[must_use]
    pub fn failure(error: &WeatherError) -> Self {
        Self {
            text: error.user_message(),
            ok: false,
            error_kind: Some(error.kind()),
        }
    }
}
