//! SeaORM entities for the `users` and `listings` tables.

pub mod listing;
pub mod user;
