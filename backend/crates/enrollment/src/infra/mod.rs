//! Infrastructure Layer

pub mod peers;
pub mod postgres;
