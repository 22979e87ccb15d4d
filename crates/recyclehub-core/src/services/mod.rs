//! Application services - the operations the HTTP layer exposes,
//! expressed over the ports.

mod actor;
mod listing;
mod user;

pub use actor::ActorResolution;
pub use listing::{ListingService, ListingSubmission, ListingView};
pub use user::{IssuedToken, SignupInput, UserService};
