//! Shared domain models.

use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validate::{self, Bound, ValidationError};

/// Identifier of a check-in transaction, always of the form `TXN-0001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId(String);

impl TransactionId {
    /// Parse an identifier, rejecting anything other than `TXN-` plus four digits.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        static ID_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^TXN-[0-9]{4}$").expect("invalid transaction id regex"));

        let candidate = raw.trim();
        if ID_RE.is_match(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(ValidationError::MalformedId(candidate.to_string()))
        }
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl TryFrom<String> for TransactionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TransactionId> for String {
    fn from(value: TransactionId) -> Self {
        value.0
    }
}

/// Cabin the passenger is checked into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatClass {
    /// Economy cabin.
    Economy,
    /// Business cabin.
    Business,
    /// First class cabin.
    First,
}

impl SeatClass {
    /// Every seat class in menu order.
    pub const ALL: [SeatClass; 3] = [SeatClass::Economy, SeatClass::Business, SeatClass::First];

    /// Canonical label, e.g. `Business`.
    pub fn label(self) -> &'static str {
        match self {
            SeatClass::Economy => "Economy",
            SeatClass::Business => "Business",
            SeatClass::First => "First",
        }
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for SeatClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        SeatClass::ALL
            .into_iter()
            .find(|class| class.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownSeatClass(needle.to_string()))
    }
}

/// User-entered fields of a transaction. Everything except the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetails {
    /// Passenger full name.
    pub passenger_name: String,
    /// Flight number, e.g. `PR123`.
    pub flight_no: String,
    /// Destination city or airport.
    pub destination: String,
    /// Cabin class.
    pub seat_class: SeatClass,
    /// Base fare, strictly positive.
    pub base_fare: f64,
    /// Checked baggage weight in kilograms.
    pub baggage_kg: f64,
}

impl TransactionDetails {
    /// Build details from raw text fields, reporting the first invalid one.
    pub fn new(
        passenger_name: &str,
        flight_no: &str,
        destination: &str,
        seat_class: &str,
        base_fare: &str,
        baggage_kg: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            passenger_name: validate::non_empty(passenger_name)?,
            flight_no: validate::non_empty(flight_no)?,
            destination: validate::non_empty(destination)?,
            seat_class: validate::parse_seat_class(seat_class)?,
            base_fare: validate::parse_amount(base_fare, Bound::Positive)?,
            baggage_kg: validate::parse_amount(baggage_kg, Bound::NonNegative)?,
        })
    }

    /// Re-check every field of details that may have been built directly.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for text in [&self.passenger_name, &self.flight_no, &self.destination] {
            validate::non_empty(text)?;
        }
        validate::check_amount(self.base_fare, Bound::Positive)?;
        validate::check_amount(self.baggage_kg, Bound::NonNegative)?;
        Ok(())
    }
}

/// Amounts derived from the fare and baggage weight.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Charges {
    /// Fee for baggage above the free allowance.
    pub baggage_fee: f64,
    /// Taxes on fare plus baggage fee.
    pub taxes: f64,
    /// Fare, baggage fee and taxes combined.
    pub total_amount: f64,
}

/// A check-in transaction held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Immutable identifier.
    pub id: TransactionId,
    /// User-entered fields.
    pub details: TransactionDetails,
    /// Derived amounts, recomputed whenever details change.
    pub charges: Charges,
}

impl Transaction {
    /// Whether `needle` (already lowercased) occurs in any searchable field.
    pub fn matches_keyword(&self, needle: &str) -> bool {
        let details = &self.details;
        details.passenger_name.to_lowercase().contains(needle)
            || details.destination.to_lowercase().contains(needle)
            || details.flight_no.to_lowercase().contains(needle)
            || details.seat_class.label().to_lowercase().contains(needle)
    }
}
