//! HTTP request and response bodies for the Warpmap API.

use serde::{Deserialize, Serialize};
use warpmap_core::{MapError, MapRequest};

/// One error entry in an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: u16,
    pub detail: String,
}

/// Body returned for every rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `"error"`
    pub status: String,
    pub errors: Vec<ErrorObject>,
}

impl ErrorResponse {
    pub fn new(code: u16, detail: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            errors: vec![ErrorObject {
                code,
                detail: detail.into(),
            }],
        }
    }
}

/// Fields of a form-encoded map submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormInput {
    /// CSV star list, one star per line
    #[serde(default)]
    pub data: Option<String>,
    /// `mono` selects the monochrome palette
    #[serde(rename = "fill-type", default)]
    pub fill_type: Option<String>,
}

impl FormInput {
    pub fn into_map_request(self) -> Result<MapRequest, MapError> {
        let mono = self.fill_type.as_deref() == Some("mono");
        MapRequest::from_csv(self.data.as_deref().unwrap_or_default(), mono)
    }
}

/// Query string of the standard map endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StandardMapQuery {
    #[serde(default)]
    pub mono: bool,
}
