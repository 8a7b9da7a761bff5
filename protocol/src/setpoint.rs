use crate::types::format_reading;
use core::num::IntErrorKind;
use serde::{Deserialize, Serialize};

/// A requested fan output, as a percentage.
///
/// Only values in `0..=100` can be constructed, anything the user types goes through
/// [`Setpoint::clamp`] or [`Setpoint::parse`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Setpoint(u8);

impl Setpoint {
    pub const MIN: Setpoint = Setpoint(0);
    pub const MAX: Setpoint = Setpoint(100);

    pub fn value(self) -> u8 {
        self.0
    }

    /// Limits a raw value to the valid range, noting which bound (if any) was applied.
    pub fn clamp(raw: i64) -> Clamped {
        if raw < i64::from(Self::MIN.0) {
            Clamped {
                setpoint: Self::MIN,
                adjustment: Some(Adjustment::TooLow),
            }
        } else if raw > i64::from(Self::MAX.0) {
            Clamped {
                setpoint: Self::MAX,
                adjustment: Some(Adjustment::TooHigh),
            }
        } else {
            Clamped {
                setpoint: Self(raw as u8),
                adjustment: None,
            }
        }
    }

    /// Parses user input as an integer and clamps it.
    ///
    /// Surrounding whitespace is ignored. Integers too large to represent still clamp to the
    /// bound matching their sign, anything else that is not an integer is rejected.
    pub fn parse(input: &str) -> Result<Clamped, InputError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(InputError::Empty);
        }

        match input.parse::<i64>() {
            Ok(raw) => Ok(Self::clamp(raw)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(Self::clamp(i64::MAX)),
                IntErrorKind::NegOverflow => Ok(Self::clamp(i64::MIN)),
                _ => Err(InputError::NotANumber(input.to_string())),
            },
        }
    }
}

impl TryFrom<u8> for Setpoint {
    type Error = InputError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX.0 {
            Err(InputError::OutOfRange(value))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Setpoint> for u8 {
    fn from(setpoint: Setpoint) -> Self {
        setpoint.0
    }
}

impl core::fmt::Display for Setpoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which bound was applied when clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    TooLow,
    TooHigh,
}

impl Adjustment {
    /// Warning shown to the user when their value was changed.
    pub fn message(self) -> &'static str {
        match self {
            Self::TooLow => "Value too low! Setting to 0.",
            Self::TooHigh => "Value too high! Setting to 100.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clamped {
    pub setpoint: Setpoint,
    pub adjustment: Option<Adjustment>,
}

impl Clamped {
    pub fn warning(&self) -> Option<&'static str> {
        self.adjustment.map(Adjustment::message)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("No value entered")]
    Empty,

    #[error("Not a number: {0}")]
    NotANumber(String),

    #[error("Setpoint {0} is outside 0..=100")]
    OutOfRange(u8),
}

/// Body of a setpoint request.
///
/// The field is called `rpm` on the wire even though it carries a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetpointRequest {
    pub rpm: Setpoint,
}

impl From<Setpoint> for SetpointRequest {
    fn from(rpm: Setpoint) -> Self {
        Self { rpm }
    }
}

/// Reply to a setpoint request, carrying the value the server actually applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetpointResponse {
    pub set_fan_output: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SetpointResponse {
    pub fn set_fan_output_text(&self) -> String {
        format_reading(self.set_fan_output)
    }
}
