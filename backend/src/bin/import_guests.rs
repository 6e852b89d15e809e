//! Bulk-load guests from a spreadsheet export into the database.
//!
//! Lines follow the same format as the `/guests/import` endpoint. The
//! operator must be an existing account allowed to manage front-desk records.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use frontdesk::domain::GuestLedgerService;
use frontdesk::domain::ports::{GuestLedger, NoOpChangeNotifier, UserRepository};
use frontdesk::outbound::persistence::{
    DbPool, DieselGuestRepository, DieselTransactionRepository, DieselUserRepository, PoolConfig,
};
use mockable::DefaultClock;
use tokio::runtime::Builder;

/// `import-guests` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "import-guests",
    about = "Import tab, comma or space separated guest rows",
    version
)]
struct CliArgs {
    /// Input file; reads standard input when omitted.
    #[arg(long = "file", value_name = "path")]
    file: Option<PathBuf>,
    /// Email of the account recorded as performing the import.
    #[arg(long = "operator", value_name = "email")]
    operator: String,
    /// Database connection URL. Falls back to `FRONTDESK_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let text = read_input(args.file.as_ref())?;

    let database_url = match args.database_url {
        Some(url) => url,
        None => env::var("FRONTDESK_DATABASE_URL").map_err(|_| {
            io::Error::other("missing --database-url and FRONTDESK_DATABASE_URL is not set")
        })?,
    };
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let users = DieselUserRepository::new(pool.clone());
    let operator = users
        .list()
        .await
        .map_err(|error| io::Error::other(format!("load accounts: {error}")))?
        .into_iter()
        .find(|user| user.email.as_ref().eq_ignore_ascii_case(args.operator.trim()))
        .ok_or_else(|| io::Error::other(format!("no account for {}", args.operator)))?;

    let ledger = GuestLedgerService::new(
        Arc::new(DieselGuestRepository::new(pool.clone())),
        Arc::new(DieselTransactionRepository::new(pool)),
        Arc::new(NoOpChangeNotifier),
        Arc::new(DefaultClock),
    );
    let summary = ledger
        .import_guests(&operator, &text)
        .await
        .map_err(|error| io::Error::other(format!("import failed: {error}")))?;

    println!("imported={}", summary.imported);
    println!("skipped={}", summary.skipped);
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
