use crate::types::format_reading;
use serde::{Deserialize, Serialize};

/// A telemetry reading as reported by the fan controller.
///
/// Replaced wholesale on every poll, nothing here is ever modified locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub fan_status: String,
    pub current_fan_output: f64,
    pub set_fan_output: f64,
    pub current_temp: f64,
}

impl StatusSnapshot {
    pub fn fan_status_text(&self) -> String {
        self.fan_status.clone()
    }

    pub fn current_fan_output_text(&self) -> String {
        format_reading(self.current_fan_output)
    }

    pub fn set_fan_output_text(&self) -> String {
        format_reading(self.set_fan_output)
    }

    pub fn current_temp_text(&self) -> String {
        format_reading(self.current_temp)
    }
}
