//! Database seeder for Tillgate development and testing.
//!
//! Seeds one account per role with fixed ids and well-known secrets for
//! local development. Never run this against a production database.
//!
//! Usage: cargo run --bin seeder

use tillgate_core::auth::hash_secret;
use tillgate_db::repositories::{AccountError, AccountRepository, NewAccount};
use tillgate_shared::config::DatabaseConfig;
use tillgate_shared::types::AccountRole;
use uuid::Uuid;

/// Fixed ids so seeded data is addressable from scripts and curl.
const ADMIN_ID: &str = "00000000-0000-0000-0000-000000000001";
const TERMINAL_ID: &str = "00000000-0000-0000-0000-000000000002";
const MERCHANT_ID: &str = "00000000-0000-0000-0000-000000000003";
const CUSTOMER_ID: &str = "00000000-0000-0000-0000-000000000004";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = tillgate_db::connect(&DatabaseConfig {
        url: database_url,
        max_connections: 2,
        min_connections: 1,
        acquire_timeout_secs: 5,
        connect_timeout_secs: 5,
    })
    .await
    .expect("Failed to connect to database");

    let repo = AccountRepository::new(db);

    seed(&repo, ADMIN_ID, AccountRole::Admin, "Dev Admin", "admin-dev-secret").await;
    seed(
        &repo,
        TERMINAL_ID,
        AccountRole::Terminal,
        "Till 1",
        "terminal-dev-secret",
    )
    .await;
    seed(
        &repo,
        MERCHANT_ID,
        AccountRole::Merchant,
        "Demo Shop",
        "merchant-dev-secret",
    )
    .await;
    seed(
        &repo,
        CUSTOMER_ID,
        AccountRole::Customer,
        "Demo Customer",
        "customer-dev-secret",
    )
    .await;

    println!("Seeding complete!");
}

async fn seed(repo: &AccountRepository, id: &str, role: AccountRole, name: &str, secret: &str) {
    let id = Uuid::parse_str(id).expect("bad seed id");
    let credential_hash = hash_secret(secret).expect("hashing failed");

    match repo
        .create(NewAccount {
            id: Some(id),
            role,
            display_name: name.to_string(),
            credential_hash,
        })
        .await
    {
        Ok(account) => println!("Seeded {role} account {}", account.id),
        Err(AccountError::AlreadyExists) => println!("{role} account {id} already seeded"),
        Err(e) => panic!("Failed to seed {role} account: {e}"),
    }
}
