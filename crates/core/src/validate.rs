//! Pure input validation shared by the store and any frontend.
//!
//! Nothing here touches I/O, so a console loop can call these repeatedly
//! and re-prompt on failure.

use std::fmt;

use thiserror::Error;

use crate::models::SeatClass;

/// Lower bound applied to a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Zero or more.
    NonNegative,
    /// Strictly greater than zero.
    Positive,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::NonNegative => f.write_str("greater than or equal to 0"),
            Bound::Positive => f.write_str("greater than 0"),
        }
    }
}

/// Reasons a single field is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Blank text where a value is required.
    #[error("input cannot be empty.")]
    Empty,
    /// Text that does not parse as a finite number.
    #[error("enter a valid number.")]
    NotANumber(String),
    /// A number under the field's minimum.
    #[error("value must be {bound}.")]
    BelowMinimum {
        /// The bound that was violated.
        bound: Bound,
    },
    /// Seat class outside Economy/Business/First.
    #[error("choose from Economy, Business, First.")]
    UnknownSeatClass(String),
    /// Identifier not of the form `TXN-0001`.
    #[error("invalid transaction ID format.")]
    MalformedId(String),
}

/// Trim `raw` and reject it if nothing is left.
pub fn non_empty(raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(value.to_string())
}

/// Parse a decimal amount and check it against `bound`.
pub fn parse_amount(raw: &str, bound: Bound) -> Result<f64, ValidationError> {
    let text = raw.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| ValidationError::NotANumber(text.to_string()))?;
    check_amount(value, bound)
}

/// Check an already-parsed amount: finite and within `bound`.
pub fn check_amount(value: f64, bound: Bound) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber(value.to_string()));
    }

    let accepted = match bound {
        Bound::NonNegative => value >= 0.0,
        Bound::Positive => value > 0.0,
    };
    if accepted {
        Ok(value)
    } else {
        Err(ValidationError::BelowMinimum { bound })
    }
}

/// Case-insensitive seat class lookup.
pub fn parse_seat_class(raw: &str) -> Result<SeatClass, ValidationError> {
    raw.parse()
}
