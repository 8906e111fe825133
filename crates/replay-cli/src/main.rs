//! Replay console demo CLI.
//!
//! Drives the console view-models against a seeded in-memory backend: page
//! through replay requests, run the recompute handshake, and apply profile
//! overrides. Configuration comes from `REPLAY_*` environment variables.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use replay_cli::{parse_date, seed_records};
use replay_console::{OverrideForm, ReplayFilterForm, ReplayResultsTable};
use replay_core::models::{DateFilter, PageRequest};
use replay_core::ConsoleConfig;
use replay_services::{init_telemetry, InMemoryReplayStore, ReplayQueryService};

const SEED_RECORD_COUNT: usize = 45;

#[derive(Parser)]
#[command(name = "replay", about = "Replay console demo CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the application info card
    Info,
    /// List a page of replay requests
    List {
        /// Page index (zero-based)
        #[arg(long, default_value = "0")]
        page: i64,
        /// Page size (one of the configured options)
        #[arg(long)]
        page_size: Option<i64>,
    },
    /// Count messages in a date range
    Count {
        /// Range start (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Range end (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },
    /// Submit a replay, recomputing first when the range drifts
    Submit {
        /// Range start; defaults to the seeded baseline start
        #[arg(long)]
        start: Option<String>,
        /// Range end; defaults to the seeded baseline end
        #[arg(long)]
        end: Option<String>,
        /// Destination (one of the configured options)
        #[arg(long)]
        destination: String,
    },
    /// Apply a UID profile override
    OverrideUid {
        /// Replacement UID
        uid: String,
    },
    /// Apply an entitlements profile override
    OverrideEntitlements {
        /// Comma-separated entitlement list
        entitlements: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry().map_err(|err| anyhow::anyhow!("Failed to initialize telemetry: {}", err))?;

    let cli = Cli::parse();
    let config = ConsoleConfig::from_env();
    let store = Arc::new(InMemoryReplayStore::with_records(seed_records(
        SEED_RECORD_COUNT,
        &config.destination_options,
    )));

    match cli.command {
        Commands::Info => {
            let info = config.app_info();
            println!("Version:     {}", info.version);
            println!("User UID:    {}", info.user_uid);
            println!("Environment: {}", info.environment);
        }
        Commands::List { page, page_size } => {
            let page_size = page_size.unwrap_or(config.default_page_size);
            let table = ReplayResultsTable::with_page(
                store.clone(),
                store.clone(),
                PageRequest::new(page, page_size),
            );
            table
                .load_page()
                .await
                .context("Failed to load replay request page")?;

            println!(
                "Page {} (size {}), {} total results",
                page,
                page_size,
                table.total_results()
            );
            for record in table.records() {
                println!(
                    "{}  {:10} {:10} {:8} {}",
                    record.creation_date.format("%Y-%m-%d %H:%M"),
                    record.requester_uid,
                    record.starter_uid,
                    record.flow_type,
                    record.destination
                );
            }
        }
        Commands::Count { start, end } => {
            let filter = DateFilter::new(parse_date(&start)?, parse_date(&end)?);
            let count = store
                .count_messages(&filter)
                .await
                .context("Failed to count messages")?;
            println!("{} messages in range", count);
        }
        Commands::Submit {
            start,
            end,
            destination,
        } => {
            let baseline = seeded_baseline();
            let initial_count = store
                .count_messages(&baseline)
                .await
                .context("Failed to count messages")?;
            let mut form = ReplayFilterForm::new(
                baseline,
                initial_count,
                config.destination_options.clone(),
                store.clone(),
                store.clone(),
            );
            form.set_destination(destination)
                .context("Destination is not in the configured catalogue")?;

            if let Some(raw) = start {
                form.set_start_date(parse_date(&raw)?);
            }
            if let Some(raw) = end {
                form.set_end_date(parse_date(&raw)?);
            }

            if form.show_recompute() {
                form.recompute()
                    .await
                    .context("Recompute was not accepted")?;
                let refreshed = store
                    .count_messages(&DateFilter::new(form.start_date(), form.end_date()))
                    .await
                    .context("Failed to recount messages")?;
                form.update_message_count(refreshed);
                println!("Recomputed: {} messages in the new range", refreshed);
            }

            let submission = form
                .submit()
                .await
                .context("Submission declined (form not clean)")?;
            println!("{}", serde_json::to_string_pretty(&submission)?);
        }
        Commands::OverrideUid { uid } => {
            let mut form = OverrideForm::new(config.app_info(), store.clone());
            form.toggle_uid();
            form.set_uid_value(uid);
            let payload = form
                .submit()
                .await
                .context("Override submission declined")?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Commands::OverrideEntitlements { entitlements } => {
            let mut form = OverrideForm::new(config.app_info(), store.clone());
            form.toggle_entitlements();
            form.set_entitlements_value(entitlements);
            let payload = form
                .submit()
                .await
                .context("Override submission declined")?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

/// Date range covering the seeded demo records.
fn seeded_baseline() -> DateFilter {
    let records = seed_records(SEED_RECORD_COUNT, &[]);
    let newest = records[0].start_date;
    let oldest = records[records.len() - 1].start_date;
    DateFilter::new(oldest, newest)
}
