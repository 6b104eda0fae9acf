//! # Seed Data Generator
//!
//! Populates the database with test clients and debts for development.
//!
//! ## Usage
//! ```bash
//! # Seed with defaults
//! cargo run -p debtbook-db --bin seed
//!
//! # Specify database path
//! cargo run -p debtbook-db --bin seed -- --db ./data/debtbook.db
//! ```
//!
//! ## Generated Data
//! One debt per client/description pair, with varied installment counts.
//! Every debt starts Pending with a due date 15 days out.

use std::env;

use chrono::{Days, Utc};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use debtbook_core::repository::DebtRepository;
use debtbook_core::{Debt, DebtStatus, Money};
use debtbook_db::{Database, DbConfig};

/// Client names for realistic test data
const CLIENTS: &[&str] = &[
    "Maria Souza",
    "João Pereira",
    "Ana Lima",
    "Carlos Santos",
    "Fernanda Alves",
];

/// Debt descriptions with value (cents) and installment count
const DEBTS: &[(&str, i64, i32)] = &[
    ("Notebook purchase", 350_000, 12),
    ("Guitar lessons - March", 48_000, 2),
    ("Sofa and delivery", 189_990, 6),
    ("Phone screen repair", 35_000, 1),
    ("Catering service", 120_000, 3),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./debtbook_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("debtbook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./debtbook_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(database = %db_path, "Seeding development data");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let clients = db.clients();
    let debts = db.debts();

    let mut seeded = 0;

    for (client_name, (description, total_cents, installments_quantity)) in
        CLIENTS.iter().zip(DEBTS.iter())
    {
        let client_id = Uuid::now_v7();
        clients.insert(client_id, client_name).await?;

        let mut debt = Debt {
            id: Uuid::now_v7(),
            description: description.to_string(),
            total_value: Money::from_cents(*total_cents),
            due_date: Some(Utc::now().date_naive() + Days::new(15)),
            installments_quantity: *installments_quantity,
            debt_date: Utc::now(),
            status: DebtStatus::Pending,
            user_client_id: client_id,
            product_ids: vec![Uuid::now_v7()],
            service_ids: vec![],
            installments: Vec::new(),
            cancel_info: None,
            reversal_info: None,
            finished_at: None,
        };
        debt.generate_installments();
        debts.save(&debt).await?;

        seeded += 1;
        info!(client = %client_name, debt = %debt.id, "Seeded client with debt");
    }

    info!(clients = seeded, debts = seeded, "Seed complete");

    Ok(())
}
