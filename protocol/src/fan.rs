use serde::{Deserialize, Serialize};

/// Reply to a fan toggle request, carrying the status the fan was switched to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanToggleResponse {
    pub fan_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
