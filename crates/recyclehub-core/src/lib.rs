//! # RecycleHub Core
//!
//! The domain layer of the RecycleHub marketplace.
//! Entities, validation rules, ports and the services built on top of them.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
