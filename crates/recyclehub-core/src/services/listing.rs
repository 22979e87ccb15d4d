use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{ImageUpload, Listing, ListingDraft, ListingQuery};
use crate::error::{DomainError, RepoError};
use crate::ports::{ListingRepository, MediaStore, UserRepository};
use crate::services::ActorResolution;

/// A listing together with its owner's username, ready for serialization.
#[derive(Debug, Clone)]
pub struct ListingView {
    pub listing: Listing,
    pub owner_username: Option<String>,
}

/// What a client sends to create or update a listing.
#[derive(Debug, Clone, Default)]
pub struct ListingSubmission {
    pub fields: ListingDraft,
    /// Raw `user_id` field, only honoured under [`ActorResolution::ClientSupplied`].
    pub claimed_owner: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Listing CRUD with ownership checks and image intake.
pub struct ListingService {
    listings: Arc<dyn ListingRepository>,
    users: Arc<dyn UserRepository>,
    media: Arc<dyn MediaStore>,
    policy: ActorResolution,
}

fn parse_id(id: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(id).map_err(|_| DomainError::listing_not_found(id))
}

impl ListingService {
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        users: Arc<dyn UserRepository>,
        media: Arc<dyn MediaStore>,
        policy: ActorResolution,
    ) -> Self {
        Self {
            listings,
            users,
            media,
            policy,
        }
    }

    pub async fn list(&self, query: &ListingQuery) -> Result<Vec<ListingView>, DomainError> {
        let listings = self.listings.search(query).await?;

        let mut owner_ids: Vec<i32> = listings.iter().filter_map(|l| l.owner_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let usernames = self.users.usernames(&owner_ids).await?;

        tracing::debug!(count = listings.len(), ?query, "Listings fetched");

        Ok(listings
            .into_iter()
            .map(|listing| {
                let owner_username = listing
                    .owner_id
                    .and_then(|id| usernames.get(&id).cloned());
                ListingView {
                    listing,
                    owner_username,
                }
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<ListingView, DomainError> {
        let listing = self.find(id).await?;
        self.view(listing).await
    }

    /// Create a listing. Every check runs before the image or the record is written.
    pub async fn create(
        &self,
        actor: Option<i32>,
        submission: ListingSubmission,
    ) -> Result<ListingView, DomainError> {
        let owner_id = self
            .policy
            .resolve_owner(actor, submission.claimed_owner.as_deref())?;
        let content = submission.fields.into_content()?;
        let image = Self::checked_image(submission.image)?;

        let owner = self
            .users
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(owner_id.to_string()))?;

        let image_reference = self.store_image(image).await?;
        let listing = self
            .listings
            .insert(Listing::new(content, Some(owner.id), image_reference))
            .await?;

        tracing::info!(listing_id = %listing.id, owner_id = owner.id, "Listing created");

        Ok(ListingView {
            listing,
            owner_username: Some(owner.username),
        })
    }

    /// Replace the supplied fields of a listing, keeping the rest.
    pub async fn update(
        &self,
        actor: Option<i32>,
        id: &str,
        submission: ListingSubmission,
    ) -> Result<ListingView, DomainError> {
        let actor = self.policy.authenticate(actor)?;
        let mut listing = self.find(id).await?;
        self.policy.authorize(actor, &listing)?;

        listing.apply(submission.fields)?;
        let image = Self::checked_image(submission.image)?;
        if let Some(reference) = self.store_image(image).await? {
            listing.image_reference = Some(reference);
        }

        let listing = self.listings.update(listing).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::listing_not_found(id),
            other => other.into(),
        })?;

        tracing::info!(listing_id = %listing.id, "Listing updated");
        self.view(listing).await
    }

    pub async fn delete(&self, actor: Option<i32>, id: &str) -> Result<(), DomainError> {
        let actor = self.policy.authenticate(actor)?;
        let listing = self.find(id).await?;
        self.policy.authorize(actor, &listing)?;

        self.listings.delete(listing.id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::listing_not_found(id),
            other => other.into(),
        })?;

        tracing::info!(listing_id = %listing.id, "Listing deleted");
        Ok(())
    }

    /// Bytes of a stored image, by its media reference.
    pub async fn image(&self, name: &str) -> Result<Vec<u8>, DomainError> {
        self.media
            .load(name)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "File",
                id: name.to_string(),
            })
    }

    async fn find(&self, id: &str) -> Result<Listing, DomainError> {
        self.listings
            .find_by_id(parse_id(id)?)
            .await?
            .ok_or_else(|| DomainError::listing_not_found(id))
    }

    async fn view(&self, listing: Listing) -> Result<ListingView, DomainError> {
        let owner_username = match listing.owner_id {
            Some(owner_id) => self
                .users
                .find_by_id(owner_id)
                .await?
                .map(|user| user.username),
            None => None,
        };

        Ok(ListingView {
            listing,
            owner_username,
        })
    }

    fn checked_image(
        image: Option<ImageUpload>,
    ) -> Result<Option<(String, ImageUpload)>, DomainError> {
        image
            .map(|upload| upload.storage_name().map(|name| (name, upload)))
            .transpose()
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected listing image"))
    }

    async fn store_image(
        &self,
        image: Option<(String, ImageUpload)>,
    ) -> Result<Option<String>, DomainError> {
        match image {
            Some((name, upload)) => {
                self.media.save(&name, &upload.bytes).await?;
                tracing::debug!(file = %name, size = upload.bytes.len(), "Stored listing image");
                Ok(Some(name))
            }
            None => Ok(None),
        }
    }
}
