//! HTTP handlers for the Inventory Management Platform

pub mod auth;
pub mod cart;
pub mod category;
pub mod health;
pub mod image;
pub mod product;
pub mod stock;
pub mod supplier;

pub use auth::*;
pub use cart::*;
pub use category::*;
pub use health::*;
pub use image::*;
pub use product::*;
pub use stock::*;
pub use supplier::*;
