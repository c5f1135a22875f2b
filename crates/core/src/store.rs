//! In-memory transaction store with an id → position index.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    fees,
    models::{Transaction, TransactionDetails, TransactionId},
    validate::ValidationError,
};

/// Failures of store operations. None of them modify the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Identifier not of the form `TXN-0001`.
    #[error("invalid transaction ID format.")]
    MalformedId(String),
    /// Identifier already present.
    #[error("transaction ID already exists.")]
    DuplicateId(TransactionId),
    /// Identifier not present.
    #[error("transaction not found.")]
    NotFound(String),
    /// A detail field failed validation.
    #[error(transparent)]
    InvalidField(#[from] ValidationError),
}

/// Owns every transaction in insertion order plus a lookup index.
///
/// `index[id]` is always the position of the record with that id in
/// `records`, and the index holds exactly one entry per record.
#[derive(Debug, Default)]
pub struct TransactionStore {
    records: Vec<Transaction>,
    index: HashMap<TransactionId, usize>,
}

impl TransactionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored transactions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Transactions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.records.iter()
    }

    /// Whether a transaction with this exact identifier exists.
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Validate an identifier for a new transaction without inserting anything.
    pub fn check_new_id(&self, raw: &str) -> Result<TransactionId, StoreError> {
        let id =
            TransactionId::parse(raw).map_err(|_| StoreError::MalformedId(raw.trim().to_string()))?;
        if self.index.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        Ok(id)
    }

    /// Append a new transaction and index it.
    pub fn insert(
        &mut self,
        raw_id: &str,
        details: TransactionDetails,
    ) -> Result<&Transaction, StoreError> {
        let id = self.check_new_id(raw_id).inspect_err(|err| {
            debug!("rejected insert of {}: {err}", raw_id.trim());
        })?;
        details.validate().inspect_err(|err| {
            debug!("rejected insert of {id}: {err:?}");
        })?;

        let charges = fees::charges_for(&details);
        let position = self.records.len();
        self.index.insert(id.clone(), position);
        self.records.push(Transaction {
            id,
            details,
            charges,
        });

        let record = &self.records[position];
        info!(id = %record.id, total = record.charges.total_amount, "transaction inserted");
        Ok(record)
    }

    /// Overwrite every mutable field of an existing transaction.
    pub fn update(
        &mut self,
        id: &str,
        details: TransactionDetails,
    ) -> Result<&Transaction, StoreError> {
        let position = self.require(id)?;
        details.validate().inspect_err(|err| {
            debug!("rejected update of {}: {err:?}", id.trim());
        })?;
        let charges = fees::charges_for(&details);

        let record = &mut self.records[position];
        record.details = details;
        record.charges = charges;
        info!(id = %record.id, total = record.charges.total_amount, "transaction updated");
        Ok(&self.records[position])
    }

    /// Remove a transaction, shifting the index of every later record.
    pub fn remove(&mut self, id: &str) -> Result<Transaction, StoreError> {
        let position = self.require(id)?;
        let removed = self.records.remove(position);
        self.index.remove(&removed.id);

        for (offset, record) in self.records[position..].iter().enumerate() {
            self.index.insert(record.id.clone(), position + offset);
        }

        info!(id = %removed.id, reindexed = self.records.len() - position, "transaction removed");
        Ok(removed)
    }

    /// Exact lookup through the index.
    pub fn find_exact(&self, id: &str) -> Result<&Transaction, StoreError> {
        let position = self.require(id)?;
        Ok(&self.records[position])
    }

    /// Case-insensitive substring search over name, destination, flight and seat class.
    pub fn find_keyword(&self, keyword: &str) -> Vec<&Transaction> {
        let needle = keyword.trim().to_lowercase();
        self.records
            .iter()
            .filter(|record| record.matches_keyword(&needle))
            .collect()
    }

    /// All transactions ordered by identifier ascending.
    pub fn list_sorted(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<_> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));
        sorted
    }

    fn position(&self, id: &str) -> Option<usize> {
        let id = TransactionId::parse(id).ok()?;
        self.index.get(&id).copied()
    }

    fn require(&self, id: &str) -> Result<usize, StoreError> {
        self.position(id).ok_or_else(|| {
            debug!("transaction {} not found", id.trim());
            StoreError::NotFound(id.trim().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::SeatClass, validate::Bound};

    fn details(name: &str, flight: &str, destination: &str, class: SeatClass) -> TransactionDetails {
        TransactionDetails {
            passenger_name: name.to_string(),
            flight_no: flight.to_string(),
            destination: destination.to_string(),
            seat_class: class,
            base_fare: 3200.0,
            baggage_kg: 8.0,
        }
    }

    fn sample_store() -> Result<TransactionStore, StoreError> {
        let mut store = TransactionStore::new();
        store.insert(
            "TXN-0010",
            details("Maria Santos", "PR456", "Cebu", SeatClass::Economy),
        )?;
        store.insert(
            "TXN-0002",
            details("John Reyes", "5J560", "Davao", SeatClass::Business),
        )?;
        store.insert(
            "TXN-0100",
            details("Ana Cruz", "PR101", "Tokyo", SeatClass::First),
        )?;
        Ok(store)
    }

    fn assert_index_consistent(store: &TransactionStore) {
        assert_eq!(store.index.len(), store.records.len());
        for (position, record) in store.records.iter().enumerate() {
            assert_eq!(store.index.get(&record.id), Some(&position));
        }
    }

    #[test]
    fn insert_then_find_returns_record() -> Result<(), StoreError> {
        let mut store = TransactionStore::new();
        let input = details("Maria Santos", "PR456", "Cebu", SeatClass::Economy);
        store.insert("TXN-0003", input.clone())?;

        let found = store.find_exact("TXN-0003")?;
        assert_eq!(found.id.as_str(), "TXN-0003");
        assert_eq!(found.details, input);
        assert_eq!(found.charges.baggage_fee, 0.0);
        assert_index_consistent(&store);
        Ok(())
    }

    #[test]
    fn duplicate_insert_is_rejected() -> Result<(), StoreError> {
        let mut store = sample_store()?;
        let err = store
            .insert(
                "TXN-0002",
                details("Other", "X1", "Nowhere", SeatClass::Economy),
            )
            .expect_err("duplicate id");
        assert!(matches!(err, StoreError::DuplicateId(_)));
        assert_eq!(store.len(), 3);
        assert_eq!(store.find_exact("TXN-0002")?.details.passenger_name, "John Reyes");
        Ok(())
    }

    #[test]
    fn malformed_ids_are_rejected() {
        let mut store = TransactionStore::new();
        for raw in ["TXN-12", "ABC-0001", "TXN-12345"] {
            let err = store
                .insert(raw, details("A", "B", "C", SeatClass::First))
                .expect_err("malformed id");
            assert!(matches!(err, StoreError::MalformedId(_)));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn remove_reindexes_survivors() -> Result<(), StoreError> {
        let mut store = sample_store()?;
        store.insert(
            "TXN-0004",
            details("Lea Gomez", "Z2", "Iloilo", SeatClass::Economy),
        )?;

        let removed = store.remove("TXN-0002")?;
        assert_eq!(removed.id.as_str(), "TXN-0002");
        assert_eq!(
            store.find_exact("TXN-0002"),
            Err(StoreError::NotFound("TXN-0002".to_string()))
        );

        assert_eq!(store.len(), 3);
        for id in ["TXN-0010", "TXN-0100", "TXN-0004"] {
            assert_eq!(store.find_exact(id)?.id.as_str(), id);
        }
        assert_index_consistent(&store);

        store.remove("TXN-0010")?;
        store.remove("TXN-0004")?;
        assert_index_consistent(&store);
        assert_eq!(store.find_exact("TXN-0100")?.details.destination, "Tokyo");
        Ok(())
    }

    #[test]
    fn remove_unknown_id_fails() -> Result<(), StoreError> {
        let mut store = sample_store()?;
        assert!(matches!(store.remove("TXN-9999"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.remove("garbage"), Err(StoreError::NotFound(_))));
        assert_eq!(store.len(), 3);
        Ok(())
    }

    #[test]
    fn list_sorted_orders_by_id() -> Result<(), StoreError> {
        let store = sample_store()?;
        let ids: Vec<_> = store.list_sorted().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["TXN-0002", "TXN-0010", "TXN-0100"]);

        let insertion: Vec<_> = store.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(insertion, ["TXN-0010", "TXN-0002", "TXN-0100"]);
        Ok(())
    }

    #[test]
    fn keyword_search_is_case_insensitive_across_fields() -> Result<(), StoreError> {
        let store = sample_store()?;
        let ids = |keyword: &str| -> Vec<String> {
            store
                .find_keyword(keyword)
                .iter()
                .map(|t| t.id.to_string())
                .collect()
        };

        assert_eq!(ids("maria"), ["TXN-0010"]);
        assert_eq!(ids("DAVAO"), ["TXN-0002"]);
        assert_eq!(ids("pr"), ["TXN-0010", "TXN-0100"]);
        assert_eq!(ids("first"), ["TXN-0100"]);
        assert!(ids("manila").is_empty());
        Ok(())
    }

    #[test]
    fn keyword_search_on_empty_store() {
        let store = TransactionStore::new();
        assert!(store.find_keyword("anything").is_empty());
        assert!(store.list_sorted().is_empty());
    }

    #[test]
    fn update_recomputes_charges_and_keeps_id() -> Result<(), StoreError> {
        let mut store = sample_store()?;
        let mut changed = details("Maria S. Santos", "PR457", "Bohol", SeatClass::Business);
        changed.baggage_kg = 14.0;

        let updated = store.update("TXN-0010", changed.clone())?;
        assert_eq!(updated.id.as_str(), "TXN-0010");
        assert_eq!(updated.details, changed);
        assert!((updated.charges.baggage_fee - 800.0).abs() < 1e-9);
        assert!((updated.charges.taxes - 480.0).abs() < 1e-9);
        assert!((updated.charges.total_amount - 4480.0).abs() < 1e-9);

        assert_eq!(store.iter().next().map(|t| t.id.as_str()), Some("TXN-0010"));
        assert_index_consistent(&store);
        Ok(())
    }

    #[test]
    fn update_unknown_id_fails() -> Result<(), StoreError> {
        let mut store = sample_store()?;
        let err = store
            .update("TXN-0001", details("A", "B", "C", SeatClass::First))
            .expect_err("unknown id");
        assert_eq!(err, StoreError::NotFound("TXN-0001".to_string()));
        Ok(())
    }

    #[test]
    fn insert_rejects_invalid_details() {
        let mut store = TransactionStore::new();
        let valid = details("Maria Santos", "PR456", "Cebu", SeatClass::Economy);

        let blank_name = TransactionDetails {
            passenger_name: "   ".to_string(),
            ..valid.clone()
        };
        let empty_flight = TransactionDetails {
            flight_no: String::new(),
            ..valid.clone()
        };
        let zero_fare = TransactionDetails {
            base_fare: 0.0,
            ..valid.clone()
        };
        let negative_weight = TransactionDetails {
            baggage_kg: -1.0,
            ..valid.clone()
        };
        let nan_weight = TransactionDetails {
            baggage_kg: f64::NAN,
            ..valid.clone()
        };

        let cases = [
            (blank_name, ValidationError::Empty),
            (empty_flight, ValidationError::Empty),
            (
                zero_fare,
                ValidationError::BelowMinimum {
                    bound: Bound::Positive,
                },
            ),
            (
                negative_weight,
                ValidationError::BelowMinimum {
                    bound: Bound::NonNegative,
                },
            ),
        ];
        for (invalid, expected) in cases {
            assert_eq!(
                store.insert("TXN-0001", invalid).map(|_| ()),
                Err(StoreError::InvalidField(expected))
            );
        }
        assert!(matches!(
            store.insert("TXN-0001", nan_weight),
            Err(StoreError::InvalidField(ValidationError::NotANumber(_)))
        ));

        assert!(store.is_empty());
        assert!(!store.contains("TXN-0001"));
    }

    #[test]
    fn update_rejects_invalid_details_and_keeps_record() -> Result<(), StoreError> {
        let mut store = sample_store()?;
        let before = store.find_exact("TXN-0002")?.clone();

        let zero_fare = TransactionDetails {
            base_fare: 0.0,
            ..before.details.clone()
        };
        assert!(matches!(
            store.update("TXN-0002", zero_fare),
            Err(StoreError::InvalidField(ValidationError::BelowMinimum { .. }))
        ));

        let blank_destination = TransactionDetails {
            destination: " ".to_string(),
            ..before.details.clone()
        };
        assert_eq!(
            store.update("TXN-0002", blank_destination).map(|_| ()),
            Err(StoreError::InvalidField(ValidationError::Empty))
        );

        assert_eq!(store.find_exact("TXN-0002")?, &before);
        Ok(())
    }
}
