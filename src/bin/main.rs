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

use cinema_tickets_rs::{
    DuplicatePolicy, InMemoryPaymentGateway, InMemorySeatBooking, PurchaseRequest, ServiceConfig,
    TicketService,
};
use clap::{Parser, ValueEnum};
use csv::{ReaderBuilder, Trim, Writer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

type BoxOffice = TicketService<InMemoryPaymentGateway, InMemorySeatBooking>;

/// Cinema Tickets - Process ticket purchase CSV files
///
/// Reads purchase line items from a CSV file, validates every purchase, and
/// outputs the amount paid and seats reserved per account to stdout.
#[derive(Parser, Debug)]
#[command(name = "cinema-tickets")]
#[command(about = "Validates cinema ticket purchases from a CSV file", long_about = None)]
struct Args {
    /// Path to CSV file with purchase line items
    ///
    /// Expected format: purchase,account,type,count
    /// Example: cargo run -- purchases.csv > accounts.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Maximum number of tickets in a single purchase
    #[arg(long, default_value_t = ServiceConfig::DEFAULT_MAX_TICKETS)]
    max_tickets: u32,

    /// How repeated ticket types within one purchase are combined
    #[arg(long, value_enum, default_value_t = DuplicateArg::Sum)]
    duplicates: DuplicateArg,

    /// Log every accepted and rejected purchase (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

/// Command-line names for [`DuplicatePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DuplicateArg {
    /// Counts for the same type add up
    Sum,
    /// The last line item for a type replaces earlier ones
    LastWins,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(arg: DuplicateArg) -> Self {
        match arg {
            DuplicateArg::Sum => DuplicatePolicy::Sum,
            DuplicateArg::LastWins => DuplicatePolicy::LastWins,
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = ServiceConfig {
        max_tickets: args.max_tickets,
        duplicates: args.duplicates.into(),
    };

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let service = match process_purchases(BufReader::new(file), config) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error processing purchases: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_accounts(&service, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Raw CSV record matching the input format.
///
/// Fields: `purchase, account, type, count`. The account is kept as text so
/// that non-numeric IDs are rejected by the purchase rules rather than
/// dropped as malformed rows.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    purchase: u32,
    account: String,
    #[serde(rename = "type")]
    ticket_type: String,
    count: u32,
}

/// Line items of one purchase, gathered from every row sharing its ID.
#[derive(Debug)]
struct PendingPurchase {
    id: u32,
    account: String,
    items: Vec<(String, u32)>,
}

impl PendingPurchase {
    /// Adds a line item. Returns `false` if the row names a different
    /// account than the purchase's first row; the item is kept either way.
    fn add_item(&mut self, account: &str, ticket_type: String, count: u32) -> bool {
        self.items.push((ticket_type, count));
        self.account == account
    }
}

/// Process purchases from a CSV reader.
///
/// Rows with the same `purchase` ID form one purchase; purchases are run in
/// the order their first row appears. The account of a purchase is taken
/// from its first row. Malformed rows are skipped and rejected purchases are
/// logged, neither stops processing.
///
/// # CSV Format
///
/// ```csv
/// purchase,account,type,count
/// 1,42,ADULT,3
/// 1,42,CHILD,4
/// 2,7,adult,1
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the CSV structure is invalid.
fn process_purchases<R: Read>(reader: R, config: ServiceConfig) -> Result<BoxOffice, csv::Error> {
    let service = TicketService::with_config(
        InMemoryPaymentGateway::new(),
        InMemorySeatBooking::new(),
        config,
    );

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(reader);

    let mut pending: Vec<PendingPurchase> = Vec::new();
    let mut index: HashMap<u32, usize> = HashMap::new();

    for result in rdr.deserialize::<CsvRecord>() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping malformed row: {}", e);
                continue;
            }
        };

        let slot = *index.entry(record.purchase).or_insert_with(|| {
            pending.push(PendingPurchase {
                id: record.purchase,
                account: record.account.clone(),
                items: Vec::new(),
            });
            pending.len() - 1
        });
        let purchase = &mut pending[slot];
        if !purchase.add_item(&record.account, record.ticket_type, record.count) {
            warn!(
                purchase = purchase.id,
                expected = %purchase.account,
                found = %record.account,
                "account differs from the purchase's first row, using the first"
            );
        }
    }

    for purchase in &pending {
        let items = purchase
            .items
            .iter()
            .map(|(ticket_type, count)| (ticket_type.as_str(), *count));

        match PurchaseRequest::parse(&purchase.account, items)
            .and_then(|request| service.purchase(&request))
        {
            Ok(done) => debug!(
                purchase = purchase.id,
                account = %done.account_id,
                total_cost = done.total_cost,
                "purchase processed"
            ),
            Err(e) => warn!(purchase = purchase.id, error = %e, "purchase rejected"),
        }
    }

    Ok(service)
}

#[derive(Debug, Serialize)]
struct AccountRow {
    account: u64,
    paid: u64,
    seats: u64,
}

/// Write per-account totals to a CSV writer, ordered by account ID.
///
/// # CSV Format
///
/// ```csv
/// account,paid,seats
/// 7,20,1
/// 42,100,7
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
fn write_accounts<W: Write>(service: &BoxOffice, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    let seats = service.seat_reservation_service();

    for (account_id, paid) in service.payment_service().accounts() {
        wtr.serialize(AccountRow {
            account: account_id.get(),
            paid,
            seats: seats.total_for(account_id),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
