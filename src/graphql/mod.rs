//! GraphQL API
//!
//! Queries and mutations over the leads table, built with async-graphql and
//! served by axum at `/graphql`.

pub mod mutations;
pub mod queries;
pub mod scalars;
mod schema;
pub mod types;

pub use scalars::{EmailAddress, PhoneNumber};
pub use schema::{LeadsSchema, MutationRoot, QueryRoot, build_schema};
pub use types::{Lead, RegisterInput, UpdateLeadInput};
