//! API Routes
//!
//! Route handlers organized by functionality.

pub mod assistant;
pub mod content;
pub mod health;
pub mod site;
