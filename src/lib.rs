//! Leads - GraphQL API over a single PostgreSQL table
//!
//! The interesting part lives in [db]: a generic [Repository](db::Repository) that
//! turns any `#[derive(Record)]` struct into INSERT/UPDATE statements and decodes
//! rows back out. [graphql] and [app] are the HTTP surface on top of it.

// Lets `#[derive(Record)]` refer to `::leads::db` from inside this crate too.
extern crate self as leads;

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod graphql;

pub use leads_macros::Record;
