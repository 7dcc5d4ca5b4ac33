//! Lead mutations

use async_graphql::{Context, ID, Object, Result};

use crate::db::{CreateLead, Database, UpdateLead};

use super::types::{RegisterInput, UpdateLeadInput};

#[derive(Default)]
pub struct LeadMutations;

#[Object]
impl LeadMutations {
    /// Register a new lead
    async fn register(&self, ctx: &Context<'_>, input: RegisterInput) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();

        db.leads()
            .create(&CreateLead::from(input))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to register lead");
                async_graphql::Error::new(e.to_string())
            })?;

        tracing::info!("Lead registered");
        Ok(true)
    }

    /// Update the supplied fields of a lead. Returns false when the lead does not exist.
    async fn update_lead(&self, ctx: &Context<'_>, id: ID, input: UpdateLeadInput) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();

        let updated = db
            .leads()
            .update(&id, &UpdateLead::from(input))
            .await
            .map_err(|e| {
                tracing::error!(lead_id = %id.as_str(), error = %e, "Failed to update lead");
                async_graphql::Error::new(e.to_string())
            })?;

        Ok(updated)
    }

    /// Delete a lead. Deleting an unknown lead succeeds.
    async fn delete_lead(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();

        db.leads().delete(&id).await.map_err(|e| {
            tracing::error!(lead_id = %id.as_str(), error = %e, "Failed to delete lead");
            async_graphql::Error::new(e.to_string())
        })?;

        Ok(true)
    }
}
