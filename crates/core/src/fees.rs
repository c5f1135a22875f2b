//! Derived charge computation.

use crate::models::{Charges, TransactionDetails};

/// Free checked baggage allowance in kilograms.
pub const FREE_BAGGAGE_KG: f64 = 10.0;
/// Fee charged per kilogram above the allowance.
pub const EXCESS_RATE_PER_KG: f64 = 200.0;
/// Tax applied to fare plus baggage fee.
pub const TAX_RATE: f64 = 0.12;

/// Fee for the weight above the free allowance.
pub fn baggage_fee(baggage_kg: f64) -> f64 {
    (baggage_kg - FREE_BAGGAGE_KG).max(0.0) * EXCESS_RATE_PER_KG
}

/// Taxes on the fare plus baggage fee.
pub fn taxes(base_fare: f64, baggage_fee: f64) -> f64 {
    TAX_RATE * (base_fare + baggage_fee)
}

/// Sum of fare, baggage fee and taxes.
pub fn total(base_fare: f64, baggage_fee: f64, taxes: f64) -> f64 {
    base_fare + baggage_fee + taxes
}

/// Derive every charge for `details`.
pub fn charges_for(details: &TransactionDetails) -> Charges {
    let baggage_fee = baggage_fee(details.baggage_kg);
    let taxes = taxes(details.base_fare, baggage_fee);
    Charges {
        baggage_fee,
        taxes,
        total_amount: total(details.base_fare, baggage_fee, taxes),
    }
}
