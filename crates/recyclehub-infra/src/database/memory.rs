//! In-memory repositories - used when no database is configured.
//!
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use recyclehub_core::domain::{Listing, ListingQuery, NewUser, User};
use recyclehub_core::error::RepoError;
use recyclehub_core::ports::{BaseRepository, ListingRepository, UserRepository};

/// Listings kept in insertion order behind an async RwLock.
#[derive(Default)]
pub struct InMemoryListingRepository {
    store: RwLock<Vec<Listing>>,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Listing, Uuid> for InMemoryListingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|l| l.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Listing>, RepoError> {
        Ok(self.store.read().await.clone())
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn insert(&self, listing: Listing) -> Result<Listing, RepoError> {
        let mut store = self.store.write().await;
        if store.iter().any(|l| l.id == listing.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.push(listing.clone());
        Ok(listing)
    }

    async fn update(&self, listing: Listing) -> Result<Listing, RepoError> {
        let mut store = self.store.write().await;
        let slot = store
            .iter_mut()
            .find(|l| l.id == listing.id)
            .ok_or(RepoError::NotFound)?;
        *slot = listing.clone();
        Ok(listing)
    }

    async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, RepoError> {
        let store = self.store.read().await;
        Ok(query.apply(store.iter().cloned()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let index = store
            .iter()
            .position(|l| l.id == id)
            .ok_or(RepoError::NotFound)?;
        store.remove(index);
        Ok(())
    }
}

#[derive(Default)]
struct UserTable {
    rows: Vec<User>,
    last_id: i32,
}

/// Users with store-assigned sequential IDs and unique username/email.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.table.read().await.rows.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut table = self.table.write().await;

        // Same guarantee the unique indexes give the database.
        let taken = table
            .rows
            .iter()
            .any(|u| u.username == new_user.username || u.email == new_user.email);
        if taken {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        table.last_id += 1;
        let user = new_user.with_id(table.last_id);
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn usernames(&self, ids: &[i32]) -> Result<HashMap<i32, String>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|u| ids.contains(&u.id))
            .map(|u| (u.id, u.username.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use recyclehub_core::domain::ListingDraft;

    use super::*;

    fn listing(material: &str) -> Listing {
        let content = ListingDraft {
            title: Some("Scrap".into()),
            description: Some("Leftovers".into()),
            location: Some("Austin".into()),
            action: Some("sell".into()),
            material: Some(material.into()),
        }
        .into_content()
        .unwrap();
        Listing::new(content, Some(1), None)
    }

    #[tokio::test]
    async fn test_listing_crud() {
        let repo = InMemoryListingRepository::new();
        let saved = repo.insert(listing("glass")).await.unwrap();

        let mut changed = saved.clone();
        changed.material = "steel".into();
        repo.update(changed).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.material, "steel");

        repo.delete(saved.id).await.unwrap();
        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(saved.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_listing() {
        let repo = InMemoryListingRepository::new();
        assert!(matches!(
            repo.update(listing("glass")).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_user_ids_are_sequential_and_unique() {
        let repo = InMemoryUserRepository::new();
        let a = repo
            .create(NewUser::new("ann".into(), "ann@example.com".into(), "h".into()))
            .await
            .unwrap();
        let b = repo
            .create(NewUser::new("ben".into(), "ben@example.com".into(), "h".into()))
            .await
            .unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        let dup = repo
            .create(NewUser::new("ann".into(), "other@example.com".into(), "h".into()))
            .await;
        assert!(matches!(dup, Err(RepoError::Constraint(_))));

        let names = repo.usernames(&[2, 99]).await.unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[&2], "ben");
    }
}
