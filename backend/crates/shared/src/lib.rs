//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every service agrees on:
//! - Common error types and result aliases
//! - Typed integer identifiers for entities owned by the three services
//!
//! Only things with the same meaning in the course, enrollment and user
//! services belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
