//! Generic repository over a single PostgreSQL table
//!
//! A [Repository] is bound to one table name and the DDL that creates it. Rows are
//! decoded into any `sqlx::FromRow` type; writes take anything implementing
//! [Record], usually via `#[derive(Record)]`.
//!
//! ```rust,ignore
//! let repo: Repository<LeadRecord> = Repository::new("leads", LEADS_SCHEMA, pool)?;
//! repo.ensure_table_exists().await?;
//! repo.create(&CreateLead { name: "John Doe".into(), .. }).await?;
//! let leads = repo.find().await?;
//! ```

use std::marker::PhantomData;

use sqlx::PgPool;
use sqlx::postgres::PgRow;
use tracing::{debug, info};

use super::bootstrap::validate_identifier;
use super::value::SqlValue;

/// Primary key column every bound table is expected to have
pub const PRIMARY_KEY: &str = "id";

/// Errors raised by repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A table or database name that is not a plain SQL identifier
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Any failure reported by the driver or the database, passed through as-is
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// A record (or partial record) that can be written to a table.
///
/// Fields are returned in declaration order. A field left out of the list is left
/// to the table default on insert and untouched on update.
pub trait Record {
    fn fields(&self) -> Vec<(&'static str, SqlValue)>;
}

/// Generic CRUD access to one table.
pub struct Repository<T> {
    table_name: String,
    schema: String,
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            table_name: self.table_name.clone(),
            schema: self.schema.clone(),
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("table_name", &self.table_name)
            .finish_non_exhaustive()
    }
}

impl<T> Repository<T>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    /// Bind a repository to `table_name`, using `schema` as the DDL for
    /// [create_table](Self::create_table).
    pub fn new(
        table_name: impl Into<String>,
        schema: impl Into<String>,
        pool: PgPool,
    ) -> RepositoryResult<Self> {
        let table_name = table_name.into();
        validate_identifier(&table_name)?;

        Ok(Self {
            table_name,
            schema: schema.into(),
            pool,
            _marker: PhantomData,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Run the bound DDL verbatim.
    pub async fn create_table(&self) -> RepositoryResult<()> {
        debug!(sql = %self.schema, "Creating table");
        sqlx::query(&self.schema).execute(&self.pool).await?;
        Ok(())
    }

    /// Whether the bound table exists in the `public` schema.
    pub async fn table_exists(&self) -> RepositoryResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT FROM information_schema.tables
                WHERE table_schema = 'public'
                AND table_name = $1
            )",
        )
        .bind(&self.table_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create the table unless it already exists in the `public` schema.
    pub async fn ensure_table_exists(&self) -> RepositoryResult<()> {
        if !self.table_exists().await? {
            self.create_table().await?;
            info!(table = %self.table_name, "Table created");
        }

        Ok(())
    }

    /// Every row in the table, in whatever order the database returns them.
    pub async fn find(&self) -> RepositoryResult<Vec<T>> {
        let sql = format!("SELECT * FROM {}", self.table_name);
        debug!(sql = %sql, "Executing find");

        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// The row whose primary key matches `id`, if any.
    ///
    /// An id that cannot be read as the key's type matches nothing.
    pub async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<T>> {
        let sql = format!("SELECT * FROM {} WHERE {}", self.table_name, id_predicate(id));
        debug!(sql = %sql, "Executing find_by_id");

        match sqlx::query_as::<_, T>(&sql).fetch_optional(&self.pool).await {
            Err(e) if is_key_mismatch(&e) => Ok(None),
            result => Ok(result?),
        }
    }

    /// Insert a row with exactly the columns present in `entity`.
    ///
    /// Returns whether a row was written.
    pub async fn create<R: Record + ?Sized>(&self, entity: &R) -> RepositoryResult<bool> {
        let sql = insert_sql(&self.table_name, &entity.fields());
        debug!(sql = %sql, "Executing create");

        let result = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set every column present in `entity` on the row matching `id`.
    ///
    /// Returns `false` when no row has that id.
    pub async fn update<R: Record + ?Sized>(&self, id: &str, entity: &R) -> RepositoryResult<bool> {
        let Some(sql) = update_sql(&self.table_name, id, &entity.fields()) else {
            return self.exists(id).await;
        };
        debug!(sql = %sql, "Executing update");

        match sqlx::query(&sql).execute(&self.pool).await {
            Err(e) if is_key_mismatch(&e) => Ok(false),
            result => Ok(result?.rows_affected() > 0),
        }
    }

    /// Remove the row matching `id`. A missing row is not an error.
    pub async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let sql = format!("DELETE FROM {} WHERE {}", self.table_name, id_predicate(id));
        debug!(sql = %sql, "Executing delete");

        match sqlx::query(&sql).execute(&self.pool).await {
            Err(e) if is_key_mismatch(&e) => Ok(()),
            result => result.map(|_| ()).map_err(Into::into),
        }
    }

    async fn exists(&self, id: &str) -> RepositoryResult<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {})",
            self.table_name,
            id_predicate(id)
        );

        match sqlx::query_scalar::<_, bool>(&sql).fetch_one(&self.pool).await {
            Err(e) if is_key_mismatch(&e) => Ok(false),
            result => Ok(result?),
        }
    }
}

/// `id = '<id>'` with the id as an untyped literal, so PostgreSQL reads it as the
/// key column's own type and the primary key index applies.
fn id_predicate(id: &str) -> String {
    format!(
        "{} = {}",
        PRIMARY_KEY,
        SqlValue::String(id.to_string()).to_literal()
    )
}

/// The id could not be converted to the key type (`'abc'` or an out-of-range
/// number for an integer key), which means no row can match.
fn is_key_mismatch(err: &sqlx::Error) -> bool {
    // 22P02 invalid_text_representation, 22003 numeric_value_out_of_range
    err.as_database_error()
        .and_then(|e| e.code())
        .is_some_and(|code| code == "22P02" || code == "22003")
}

/// Build the INSERT for the supplied fields. No fields means all defaults.
pub fn insert_sql(table_name: &str, fields: &[(&'static str, SqlValue)]) -> String {
    if fields.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", table_name);
    }

    let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
    let values: Vec<String> = fields.iter().map(|(_, value)| value.to_literal()).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table_name,
        columns.join(", "),
        values.join(", ")
    )
}

/// Build the UPDATE for the supplied fields, or `None` when there is nothing to set.
pub fn update_sql(
    table_name: &str,
    id: &str,
    fields: &[(&'static str, SqlValue)],
) -> Option<String> {
    if fields.is_empty() {
        return None;
    }

    let set_clause = fields
        .iter()
        .map(|(column, value)| format!("{} = {}", column, value.to_literal()))
        .collect::<Vec<_>>()
        .join(", ");

    Some(format!(
        "UPDATE {} SET {} WHERE {}",
        table_name,
        set_clause,
        id_predicate(id)
    ))
}
