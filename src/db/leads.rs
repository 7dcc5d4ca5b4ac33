//! Lead table binding

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use leads_macros::Record;
use sqlx::PgPool;

use super::repository::{Repository, RepositoryResult};
use super::value::{SqlValue, ToSqlValue};

pub const LEADS_TABLE: &str = "leads";

pub const LEADS_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS leads (id SERIAL PRIMARY KEY, name VARCHAR(255) NOT NULL, email VARCHAR(255) NOT NULL, mobile VARCHAR(50) NOT NULL, postcode VARCHAR(20) NOT NULL, service VARCHAR(50) NOT NULL, created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP)";

pub type LeadRepository = Repository<LeadRecord>;

/// Bind the generic repository to the `leads` table on `pool`.
pub fn lead_repository(pool: PgPool) -> RepositoryResult<LeadRepository> {
    Repository::new(LEADS_TABLE, LEADS_SCHEMA, pool)
}

/// Service a lead is interested in, stored as its upper-case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, async_graphql::Enum)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum LeadService {
    Delivery,
    PickUp,
    Payment,
}

impl LeadService {
    pub const ALL: [LeadService; 3] = [Self::Delivery, Self::PickUp, Self::Payment];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadService::Delivery => "DELIVERY",
            LeadService::PickUp => "PICK_UP",
            LeadService::Payment => "PAYMENT",
        }
    }
}

impl fmt::Display for LeadService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadService {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DELIVERY" => Ok(LeadService::Delivery),
            "PICK_UP" => Ok(LeadService::PickUp),
            "PAYMENT" => Ok(LeadService::Payment),
            other => Err(format!("Unknown lead service: {}", other)),
        }
    }
}

impl ToSqlValue for LeadService {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::String(self.as_str().to_string())
    }
}

/// A lead row
#[derive(Debug, Clone, PartialEq)]
pub struct LeadRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub postcode: String,
    pub service: LeadService,
    pub created_at: Option<NaiveDateTime>,
}

impl sqlx::FromRow<'_, sqlx::postgres::PgRow> for LeadRecord {
    fn from_row(row: &sqlx::postgres::PgRow) -> sqlx::Result<Self> {
        use sqlx::Row;

        let service: String = row.try_get("service")?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            mobile: row.try_get("mobile")?,
            postcode: row.try_get("postcode")?,
            service: service
                .parse()
                .map_err(|e: String| sqlx::Error::Decode(e.into()))?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Fields supplied when registering a lead; id and created_at come from the table
#[derive(Debug, Clone, Record)]
pub struct CreateLead {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub postcode: String,
    pub service: LeadService,
}

/// Partial lead for updates; `None` fields are left untouched
#[derive(Debug, Clone, Default, Record)]
pub struct UpdateLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub postcode: Option<String>,
    pub service: Option<LeadService>,
}
