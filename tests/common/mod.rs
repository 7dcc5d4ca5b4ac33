//! Shared fixtures for database-backed tests
//!
//! Tests connect with the usual `POSTGRES_*` variables, defaulting the database
//! name to `graphqldemo_test`, which is created on first use. All tests share one
//! `leads` table, so fixtures are serialized and clear the table on the way in and
//! out.

#![allow(dead_code)]

use std::time::Duration;

use leads::config::Config;
use leads::db::{CreateLead, Database, LeadService, ensure_database_exists};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::{Mutex, MutexGuard};

static LEADS_TABLE_LOCK: Mutex<()> = Mutex::const_new(());

pub struct TestContext {
    pub db: Database,
    _guard: MutexGuard<'static, ()>,
}

pub async fn setup() -> TestContext {
    let guard = LEADS_TABLE_LOCK.lock().await;

    let mut config = Config::from_env().expect("valid test configuration");
    if std::env::var("POSTGRES_DB").is_err() {
        config.database_name = "graphqldemo_test".to_string();
    }

    ensure_database_exists(&config.admin_connect_options(), &config.database_name)
        .await
        .expect("test database available");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(1))
        .connect_with(config.connect_options())
        .await
        .expect("connect to test database");

    let db = Database::new(pool).expect("bind repositories");
    db.leads()
        .ensure_table_exists()
        .await
        .expect("leads table available");
    clear_leads(&db).await;

    TestContext { db, _guard: guard }
}

impl TestContext {
    pub async fn teardown(self) {
        clear_leads(&self.db).await;
        self.db.pool().close().await;
    }
}

async fn clear_leads(db: &Database) {
    sqlx::query("DELETE FROM leads")
        .execute(db.pool())
        .await
        .expect("clear leads table");
}

/// A valid lead whose fields vary with `n`
pub fn sample_lead(n: usize) -> CreateLead {
    CreateLead {
        name: format!("Test Lead {}", n),
        email: format!("lead{}@example.com", n),
        mobile: format!("+1555000{:04}", n),
        postcode: format!("{:05}", 10000 + n),
        service: LeadService::ALL[n % LeadService::ALL.len()],
    }
}

pub fn john_doe() -> CreateLead {
    CreateLead {
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        mobile: "+1234567890".to_string(),
        postcode: "12345".to_string(),
        service: LeadService::Delivery,
    }
}
