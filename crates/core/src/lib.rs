#![warn(clippy::all, missing_docs)]

//! Core domain logic for SkyPort TPS.
//!
//! This crate hosts the transaction model, input validation, fee
//! computation, the indexed in-memory store and configuration handling
//! used by the console frontend.

pub mod config;
pub mod fees;
pub mod models;
pub mod store;
pub mod validate;

pub use config::AppConfig;
pub use models::{Charges, SeatClass, Transaction, TransactionDetails, TransactionId};
pub use store::{StoreError, TransactionStore};
pub use validate::{Bound, ValidationError};
