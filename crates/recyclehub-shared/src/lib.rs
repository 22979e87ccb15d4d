//! # RecycleHub Shared
//!
//! Wire types for the marketplace HTTP API.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
