//! Database connection and repositories

pub mod bootstrap;
pub mod leads;
pub mod repository;
pub mod value;

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub use bootstrap::{ensure_database_exists, validate_identifier};
pub use leads::{CreateLead, LeadRecord, LeadRepository, LeadService, UpdateLead};
pub use repository::{Record, Repository, RepositoryError, RepositoryResult};
pub use value::{SqlValue, ToSqlValue};

/// Database wrapper owning the process-wide pool and the repositories bound to it
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    leads: LeadRepository,
}

impl Database {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Result<Self> {
        let leads = leads::lead_repository(pool.clone()).context("Failed to bind leads table")?;
        Ok(Self { pool, leads })
    }

    /// Create a new database connection pool
    pub async fn connect(options: PgConnectOptions, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .context("Failed to connect to PostgreSQL")?;

        Self::new(pool)
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the leads repository
    pub fn leads(&self) -> &LeadRepository {
        &self.leads
    }
}
