pub mod fan;
pub mod setpoint;
pub mod status;
pub mod types;

pub use self::{
    fan::FanToggleResponse,
    setpoint::{Adjustment, Clamped, InputError, Setpoint, SetpointRequest, SetpointResponse},
    status::StatusSnapshot,
    types::ErrorResponse,
};

/// Path of the telemetry snapshot endpoint (`GET`).
pub const STATUS_PATH: &str = "/data";

/// Path of the setpoint endpoint (`POST`, body is a [`SetpointRequest`]).
pub const SET_FAN_OUTPUT_PATH: &str = "/set_fan_output";

/// Path of the fan toggle endpoint (`POST`, no body).
pub const FAN_TOGGLE_PATH: &str = "/fan_toggle";
