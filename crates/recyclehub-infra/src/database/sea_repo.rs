//! SeaORM repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use recyclehub_core::domain::{Listing, ListingQuery, NewUser, User};
use recyclehub_core::error::RepoError;
use recyclehub_core::ports::{ListingRepository, UserRepository};

use super::entity::listing::{self, Entity as ListingEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::sea_base::{SeaBaseRepository, map_db_err};

/// SeaORM user repository.
pub type SeaUserRepository = SeaBaseRepository<UserEntity>;

/// SeaORM listing repository.
pub type SeaListingRepository = SeaBaseRepository<ListingEntity>;

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            if local.chars().count() > 1 {
                format!("{first}***@{domain}")
            } else {
                format!("***@{domain}")
            }
        }
        None => "***".to_string(),
    }
}

/// Escape the LIKE metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `LOWER(column) LIKE '%needle%' ESCAPE '\'`, portable across PostgreSQL and SQLite.
///
/// SQLite's `LOWER()` only folds ASCII, so non-ASCII needles are not pushed
/// down; `ListingQuery::apply` does the exact match on the fetched rows.
fn contains_ignore_case(column: listing::Column, needle: &str) -> Option<SimpleExpr> {
    if !needle.is_ascii() {
        return None;
    }

    let pattern = format!("%{}%", escape_like(&needle.to_ascii_lowercase()));
    Some(
        Expr::expr(Func::lower(Expr::col((ListingEntity, column))))
            .like(LikeExpr::new(pattern).escape('\\')),
    )
}

#[async_trait]
impl ListingRepository for SeaListingRepository {
    async fn insert(&self, listing: Listing) -> Result<Listing, RepoError> {
        let model = listing::ActiveModel::from(listing)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, listing: Listing) -> Result<Listing, RepoError> {
        let model = listing::ActiveModel::from(listing)
            .update(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, RepoError> {
        let mut select = ListingEntity::find();

        let filters = [
            (listing::Column::Material, &query.material),
            (listing::Column::Action, &query.action),
        ];
        for (column, needle) in filters {
            if let Some(expr) = needle
                .as_deref()
                .and_then(|needle| contains_ignore_case(column, needle))
            {
                select = select.filter(expr);
            }
        }

        let rows = select
            .order_by_asc(listing::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        // Exact match and material order come from `apply`, not the collation.
        Ok(query.apply(rows.into_iter().map(Listing::from)))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = ListingEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for SeaUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(new_user)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn usernames(&self, ids: &[i32]) -> Result<HashMap<i32, String>, RepoError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, String)> = UserEntity::find()
            .select_only()
            .column(user::Column::Id)
            .column(user::Column::Username)
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_like, mask_email};

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("g_ass"), "g\\_ass");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("glass"), "glass");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
