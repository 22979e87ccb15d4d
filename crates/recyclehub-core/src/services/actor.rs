//! How the acting user and listing owner are determined.

use std::fmt;
use std::str::FromStr;

use crate::domain::Listing;
use crate::error::DomainError;

/// Policy for deciding who is acting on a listing. Chosen once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActorResolution {
    /// The owner is the user behind a verified bearer token, and only the
    /// owner may update or delete a listing.
    #[default]
    Token,
    /// The owner is whatever `user_id` the client sends and mutations are
    /// not checked. Anyone can impersonate anyone.
    ClientSupplied,
}

impl FromStr for ActorResolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "token" => Ok(ActorResolution::Token),
            "client" | "client_supplied" => Ok(ActorResolution::ClientSupplied),
            other => Err(format!("unknown actor resolution '{other}'")),
        }
    }
}

impl fmt::Display for ActorResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorResolution::Token => write!(f, "token"),
            ActorResolution::ClientSupplied => write!(f, "client"),
        }
    }
}

impl ActorResolution {
    /// Gate for every listing mutation. Under the token policy an
    /// authenticated user is mandatory.
    pub fn authenticate(&self, actor: Option<i32>) -> Result<Option<i32>, DomainError> {
        match self {
            ActorResolution::Token => actor.map(Some).ok_or(DomainError::Unauthorized),
            ActorResolution::ClientSupplied => Ok(actor),
        }
    }

    /// The owner ID for a new listing.
    pub fn resolve_owner(
        &self,
        actor: Option<i32>,
        claimed_owner: Option<&str>,
    ) -> Result<i32, DomainError> {
        match self {
            ActorResolution::Token => actor.ok_or(DomainError::Unauthorized),
            ActorResolution::ClientSupplied => {
                let raw = claimed_owner
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| DomainError::missing_fields(&["user_id"]))?;

                raw.parse::<i32>().map_err(|_| {
                    DomainError::Validation(format!("user_id must be an integer, got '{raw}'"))
                })
            }
        }
    }

    /// Whether `actor` may modify `listing`.
    pub fn authorize(&self, actor: Option<i32>, listing: &Listing) -> Result<(), DomainError> {
        match self {
            ActorResolution::Token => match (actor, listing.owner_id) {
                (Some(actor), Some(owner)) if actor == owner => Ok(()),
                (None, _) => Err(DomainError::Unauthorized),
                _ => Err(DomainError::Forbidden),
            },
            ActorResolution::ClientSupplied => Ok(()),
        }
    }
}
