//! Shared types and models for the Inventory Management Platform
//!
//! This crate contains the domain models and pure business rules shared
//! between the backend and other components of the system: catalog entities,
//! price arithmetic, stock-movement application and input validation.

pub mod models;
pub mod pricing;
pub mod validation;

pub use models::*;
pub use pricing::*;
pub use validation::*;
