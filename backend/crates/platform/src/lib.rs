//! Platform Crate - Technical Infrastructure
//!
//! This crate provides the plumbing shared by every service:
//! - Bearer credential extraction and delegation (`client`)
//! - Resilient calls to peer services with retry and tri-state
//!   classification (`remote`)
//! - The HTTP transport those calls run over (`transport`)

pub mod client;
pub mod remote;
pub mod transport;
