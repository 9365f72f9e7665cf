// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use costsplit_rs::{Engine, Payment, Transfer};
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

/// Display precision for transfer amounts; the engine itself never rounds.
const DISPLAY_PRECISION: u32 = 2;

/// Costsplit - Settle a shared expense from a CSV of payments
///
/// Reads one payment per person from a CSV file and outputs the transfers
/// that square the group up to stdout.
#[derive(Parser, Debug)]
#[command(name = "costsplit-rs")]
#[command(about = "Computes who pays whom to settle a shared expense", long_about = None)]
struct Args {
    /// Path to CSV file with payments
    ///
    /// Expected format: name,paid
    /// Example: cargo run -- payments.csv > transfers.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Open input file
    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    // Read all payments; a single bad row aborts, because a dropped
    // participant would shift the equal share for everyone else.
    let payments = match read_payments(BufReader::new(file)) {
        Ok(payments) => payments,
        Err(e) => {
            eprintln!("Error reading payments: {}", e);
            process::exit(1);
        }
    };

    let engine = Engine::new();
    if let Err(e) = engine.calculate(&payments) {
        eprintln!("Error settling payments: {}", e);
        process::exit(1);
    }

    // The ledger exists right after a successful calculate.
    let share = engine.equal_share().unwrap_or(Decimal::ZERO);
    let transfers = engine.transfers().unwrap_or_default();
    eprintln!(
        "equal share: {:.prec$}",
        share.round_dp(DISPLAY_PRECISION),
        prec = DISPLAY_PRECISION as usize
    );

    if let Err(e) = write_transfers(&transfers, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `name, paid`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    name: String,
    paid: Decimal,
}

/// Reads the payment list from a CSV reader.
///
/// # CSV Format
///
/// Expected columns: `name, paid`
/// - `name`: Participant name (unique, case-sensitive)
/// - `paid`: Decimal amount paid toward the pool (non-negative)
///
/// # Example
///
/// ```csv
/// name,paid
/// Anna,55.00
/// Bob,36.00
/// Carol,0
/// Dave,25.00
/// ```
///
/// # Errors
///
/// Returns a CSV error for malformed rows. Unlike ledgers that can skip a
/// bad transaction, settlement needs the complete roster, so nothing is
/// silently dropped.
pub fn read_payments<R: Read>(reader: R) -> Result<Vec<Payment>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All) // Handle whitespace in fields like " Anna "
        .has_headers(true)
        .from_reader(reader);

    let mut payments = Vec::new();
    for result in rdr.deserialize::<CsvRecord>() {
        let record = result?;
        payments.push(Payment::new(record.name, record.paid));
    }
    Ok(payments)
}

/// Writes transfers to a CSV writer with display precision.
///
/// # CSV Format
///
/// Columns: `debtor, creditor, amount`
///
/// # Example
///
/// ```csv
/// debtor,creditor,amount
/// Carol,Anna,22.00
/// Carol,Bob,7.00
/// Dave,Anna,4.00
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_transfers<W: Write>(transfers: &[Transfer], writer: W) -> Result<(), csv::Error> {
    /// Output row with the amount padded to display precision.
    #[derive(serde::Serialize)]
    struct OutRecord<'a> {
        debtor: &'a str,
        creditor: &'a str,
        amount: String,
    }

    let mut wtr = Writer::from_writer(writer);

    for transfer in transfers {
        let amount = transfer.amount.round_dp(DISPLAY_PRECISION);
        wtr.serialize(OutRecord {
            debtor: transfer.debtor.as_str(),
            creditor: transfer.creditor.as_str(),
            amount: format!("{:.prec$}", amount, prec = DISPLAY_PRECISION as usize),
        })?;
    }

    // Flush to ensure all data is written
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    #[test]
    fn parse_simple_payments() {
        let csv = "name,paid\nAnna,10.0\nBob,0\n";
        let payments = read_payments(Cursor::new(csv)).unwrap();

        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0], Payment::new("Anna", dec!(10.0)));
        assert_eq!(payments[1], Payment::new("Bob", dec!(0)));
    }

    #[test]
    fn parse_with_whitespace() {
        let csv = "name,paid\n Anna , 10.0 \n";
        let payments = read_payments(Cursor::new(csv)).unwrap();

        assert_eq!(payments[0], Payment::new("Anna", dec!(10.0)));
    }

    #[test]
    fn malformed_row_is_an_error() {
        let csv = "name,paid\nAnna,10.0\nBob,not-a-number\n";
        assert!(read_payments(Cursor::new(csv)).is_err());
    }

    #[test]
    fn end_to_end_csv_settlement() {
        let csv = "name,paid\nAnna,55\nBob,36\nCarol,0\nDave,25\n";
        let payments = read_payments(Cursor::new(csv)).unwrap();

        let engine = Engine::new();
        engine.calculate(&payments).unwrap();

        let mut output = Vec::new();
        write_transfers(&engine.transfers().unwrap(), &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("debtor,creditor,amount"));
        assert!(output_str.contains("Carol,Anna,22.00"));
        assert!(output_str.contains("Carol,Bob,7.00"));
        assert!(output_str.contains("Dave,Anna,4.00"));
    }

    #[test]
    fn even_group_writes_header_only() {
        let csv = "name,paid\nAnna,5\nBob,5\n";
        let payments = read_payments(Cursor::new(csv)).unwrap();

        let engine = Engine::new();
        engine.calculate(&payments).unwrap();

        let mut output = Vec::new();
        write_transfers(&engine.transfers().unwrap(), &mut output).unwrap();

        assert!(output.is_empty() || output == b"debtor,creditor,amount\n");
    }
}
