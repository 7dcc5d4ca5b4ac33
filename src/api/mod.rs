//! REST endpoints served next to GraphQL

pub mod health;
