//! Lead queries

use async_graphql::{Context, ID, Object, Result};

use crate::db::Database;

use super::types::Lead;

#[derive(Default)]
pub struct LeadQueries;

#[Object]
impl LeadQueries {
    /// Get a lead by ID, or null when it does not exist
    async fn lead(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Lead>> {
        let db = ctx.data_unchecked::<Database>();

        let record = db.leads().find_by_id(&id).await.map_err(|e| {
            tracing::error!(lead_id = %id.as_str(), error = %e, "Failed to fetch lead");
            async_graphql::Error::new(e.to_string())
        })?;

        Ok(record.map(Lead::from))
    }

    /// Get all leads
    async fn leads(&self, ctx: &Context<'_>) -> Result<Vec<Lead>> {
        let db = ctx.data_unchecked::<Database>();

        let records = db.leads().find().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list leads");
            async_graphql::Error::new(e.to_string())
        })?;

        Ok(records.into_iter().map(Lead::from).collect())
    }
}
