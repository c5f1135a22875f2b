//! Text rendering for single records and the sorted table.

use std::io::{self, Write};

use skyport_core::Transaction;

/// Write the `key: value` dump of one record.
pub fn write_record(out: &mut impl Write, record: &Transaction) -> io::Result<()> {
    let details = &record.details;
    let charges = &record.charges;

    writeln!(out, "\n--- Transaction Record ---")?;
    writeln!(out, "transaction_id: {}", record.id)?;
    writeln!(out, "passenger_name: {}", details.passenger_name)?;
    writeln!(out, "flight_no: {}", details.flight_no)?;
    writeln!(out, "destination: {}", details.destination)?;
    writeln!(out, "seat_class: {}", details.seat_class)?;
    writeln!(out, "base_fare: {:.2}", details.base_fare)?;
    writeln!(out, "baggage_kg: {:.1}", details.baggage_kg)?;
    writeln!(out, "baggage_fee: {:.2}", charges.baggage_fee)?;
    writeln!(out, "taxes: {:.2}", charges.taxes)?;
    writeln!(out, "total_amount: {:.2}", charges.total_amount)
}

/// Column titles of the transaction table.
pub fn table_header() -> String {
    format!(
        "{:<10} | {:<15} | {:<8} | {:<12} | {:<8} | {:>8} | {:>7} | {:>8} | {:>8} | {:>8}",
        "TXN ID",
        "Passenger",
        "Flight",
        "Destination",
        "Class",
        "Base",
        "Bag(kg)",
        "Bag Fee",
        "Taxes",
        "Total"
    )
}

/// One aligned table row.
pub fn table_row(record: &Transaction) -> String {
    let details = &record.details;
    let charges = &record.charges;
    format!(
        "{:<10} | {:<15} | {:<8} | {:<12} | {:<8} | {:>8.2} | {:>7.1} | {:>8.2} | {:>8.2} | {:>8.2}",
        record.id,
        details.passenger_name,
        details.flight_no,
        details.destination,
        details.seat_class,
        details.base_fare,
        details.baggage_kg,
        charges.baggage_fee,
        charges.taxes,
        charges.total_amount
    )
}

/// Header, dashed rule and one row per record, in the order given.
pub fn write_table(out: &mut impl Write, records: &[&Transaction]) -> io::Result<()> {
    let header = table_header();
    writeln!(out, "{header}")?;
    writeln!(out, "{}", "-".repeat(header.chars().count()))?;
    for record in records {
        writeln!(out, "{}", table_row(record))?;
    }
    Ok(())
}
