//! Domain models for the Inventory Management Platform

mod catalog;
mod stock;
mod user;

pub use catalog::*;
pub use stock::*;
pub use user::*;
