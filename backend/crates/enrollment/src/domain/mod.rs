//! Domain Layer
//!
//! Entities, repository traits and peer service contracts.

pub mod entities;
pub mod peers;
pub mod repository;
