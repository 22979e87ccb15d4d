use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Listing, ListingQuery, NewUser, User};
use crate::error::RepoError;

/// Generic repository trait defining the shared read operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities, in storage order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;
}

/// Listing repository.
#[async_trait]
pub trait ListingRepository: BaseRepository<Listing, Uuid> {
    /// Store a new listing.
    async fn insert(&self, listing: Listing) -> Result<Listing, RepoError>;

    /// Overwrite the mutable fields of an existing listing.
    async fn update(&self, listing: Listing) -> Result<Listing, RepoError>;

    /// Listings matching the query's filters, ordered as requested.
    async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, RepoError>;

    /// Delete a listing. `RepoError::NotFound` if it does not exist.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// User repository with lookups on the unique columns.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Store a new user; the repository assigns the ID.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Usernames for a set of user IDs. Unknown IDs are absent from the map.
    async fn usernames(&self, ids: &[i32]) -> Result<HashMap<i32, String>, RepoError>;
}
