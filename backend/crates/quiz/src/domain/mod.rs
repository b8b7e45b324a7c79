//! Domain Layer
//!
//! Entities, scoring, repository traits and peer service contracts.

pub mod entities;
pub mod peers;
pub mod repository;
pub mod saga;
pub mod services;
