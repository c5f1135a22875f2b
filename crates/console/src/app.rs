use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use skyport_core::{
    validate::{self, Bound, ValidationError},
    TransactionDetails, TransactionStore,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{palette::Palette, render};

const MENU: [&str; 7] = [
    "[1] Insert Transaction (New Ticket/Check-in)",
    "[2] Update Transaction",
    "[3] Remove Transaction",
    "[4] Search (Exact by ID)",
    "[5] Search (Keyword)",
    "[6] Display All Transactions (Sorted Ascending by ID)",
    "[0] Exit",
];

/// Standard input reached end of file while a prompt was waiting.
#[derive(Debug, Error)]
#[error("standard input closed")]
struct InputClosed;

enum Flow {
    Continue,
    Exit,
}

/// Menu-driven console over a transaction store.
pub struct SkyportApp<R, W> {
    input: R,
    output: W,
    store: TransactionStore,
    palette: Palette,
}

impl<R: BufRead, W: Write> SkyportApp<R, W> {
    pub fn new(input: R, output: W, store: TransactionStore, palette: Palette) -> Self {
        Self {
            input,
            output,
            store,
            palette,
        }
    }

    #[cfg(test)]
    pub fn into_store(self) -> TransactionStore {
        self.store
    }

    /// Show the menu and dispatch selections until `0` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(err) if err.is::<InputClosed>() => {
                    info!("input closed, leaving with {} transactions", self.store.len());
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn step(&mut self) -> Result<Flow> {
        self.show_menu()?;
        let choice = self.prompt("Select an option: ")?;
        debug!("menu choice {choice:?}");
        match choice.trim() {
            "1" => self.insert()?,
            "2" => self.update()?,
            "3" => self.remove()?,
            "4" => self.search_exact()?,
            "5" => self.search_keyword()?,
            "6" => self.display_sorted()?,
            "0" => {
                self.line("Exiting SkyPort TPS. Goodbye!")?;
                info!("session ended with {} transactions", self.store.len());
                return Ok(Flow::Exit);
            }
            _ => self.error("invalid option. Please try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn show_menu(&mut self) -> Result<()> {
        let title = self.palette.heading("=== SkyPort TPS ===");
        writeln!(self.output, "\n{title}")?;
        for entry in MENU {
            writeln!(self.output, "{entry}")?;
        }
        Ok(())
    }

    fn insert(&mut self) -> Result<()> {
        let raw_id = self.prompt_valid("Transaction ID (format TXN-0001): ", validate::non_empty)?;
        if let Err(err) = self.store.check_new_id(&raw_id) {
            return self.error(&err.to_string());
        }

        let details = self.prompt_details()?;
        let outcome = self.store.insert(&raw_id, details).map(|_| ());
        match outcome {
            Ok(()) => self.success("Transaction inserted successfully."),
            Err(err) => self.error(&err.to_string()),
        }
    }

    fn update(&mut self) -> Result<()> {
        let id = self.prompt_valid("Enter Transaction ID to update: ", validate::non_empty)?;
        if !self.store.contains(&id) {
            return self.error("transaction not found.");
        }

        let details = self.prompt_details()?;
        let outcome = self.store.update(&id, details).map(|_| ());
        match outcome {
            Ok(()) => self.success("Transaction updated successfully."),
            Err(err) => self.error(&err.to_string()),
        }
    }

    fn remove(&mut self) -> Result<()> {
        let id = self.prompt_valid("Enter Transaction ID to remove: ", validate::non_empty)?;
        match self.store.remove(&id) {
            Ok(_) => self.success("Transaction removed successfully."),
            Err(err) => self.error(&err.to_string()),
        }
    }

    fn search_exact(&mut self) -> Result<()> {
        let id = self.prompt_valid("Enter Transaction ID to search: ", validate::non_empty)?;
        match self.store.find_exact(&id).cloned() {
            Ok(record) => Ok(render::write_record(&mut self.output, &record)?),
            Err(err) => self.error(&err.to_string()),
        }
    }

    fn search_keyword(&mut self) -> Result<()> {
        let keyword = self.prompt_valid(
            "Enter keyword (name/destination/flight/seat class): ",
            validate::non_empty,
        )?;
        let matches = self.store.find_keyword(&keyword);
        debug!("keyword {keyword:?} matched {} transactions", matches.len());
        if matches.is_empty() {
            return self.line("No matches found.");
        }

        for record in matches {
            render::write_record(&mut self.output, record)?;
        }
        Ok(())
    }

    fn display_sorted(&mut self) -> Result<()> {
        if self.store.is_empty() {
            return self.line("No transactions to display.");
        }
        let sorted = self.store.list_sorted();
        render::write_table(&mut self.output, &sorted)?;
        Ok(())
    }

    fn prompt_details(&mut self) -> Result<TransactionDetails> {
        Ok(TransactionDetails {
            passenger_name: self.prompt_valid("Passenger Name: ", validate::non_empty)?,
            flight_no: self.prompt_valid("Flight No (e.g., PR123): ", validate::non_empty)?,
            destination: self.prompt_valid("Destination: ", validate::non_empty)?,
            seat_class: self.prompt_valid(
                "Seat Class (Economy/Business/First): ",
                validate::parse_seat_class,
            )?,
            base_fare: self.prompt_valid("Base Fare: ", |raw| {
                validate::parse_amount(raw, Bound::Positive)
            })?,
            baggage_kg: self.prompt_valid("Baggage (kg): ", |raw| {
                validate::parse_amount(raw, Bound::NonNegative)
            })?,
        })
    }

    /// Re-prompt until `parse` accepts the input.
    fn prompt_valid<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<T> {
        loop {
            let raw = self.prompt(label)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    debug!("rejected input for {label:?}: {err:?}");
                    self.error(&err.to_string())?;
                }
            }
        }
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from standard input")?;
        if read == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        let text = self.palette.error(&format!("Error: {message}"));
        self.line(&text)
    }

    fn success(&mut self, message: &str) -> Result<()> {
        let text = self.palette.success(message);
        self.line(&text)
    }
}
