//! Listing and user services wired to the in-memory repositories.
#![cfg(feature = "auth")]

use std::sync::Arc;

use recyclehub_core::DomainError;
use recyclehub_core::domain::{ImageUpload, ListingDraft, ListingQuery};
use recyclehub_core::ports::{MediaStore, UserRepository};
use recyclehub_core::services::{
    ActorResolution, ListingService, ListingSubmission, SignupInput, UserService,
};
use recyclehub_infra::{
    Argon2PasswordService, InMemoryListingRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenService, LocalMediaStore,
};

struct Harness {
    users: Arc<InMemoryUserRepository>,
    media: Arc<LocalMediaStore>,
    listings: ListingService,
    accounts: UserService,
    _dir: tempfile::TempDir,
}

fn harness(policy: ActorResolution) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let users = Arc::new(InMemoryUserRepository::new());
    let media = Arc::new(LocalMediaStore::new(dir.path()));
    let tokens = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "services-test".into(),
        ..JwtConfig::default()
    }));

    Harness {
        listings: ListingService::new(
            Arc::new(InMemoryListingRepository::new()),
            users.clone(),
            media.clone(),
            policy,
        ),
        accounts: UserService::new(users.clone(), Arc::new(Argon2PasswordService::new()), tokens),
        users,
        media,
        _dir: dir,
    }
}

fn signup(name: &str) -> SignupInput {
    SignupInput {
        username: Some(name.into()),
        email: Some(format!("{name}@example.com")),
        password: Some("hunter22".into()),
    }
}

fn fridge() -> ListingDraft {
    ListingDraft {
        title: Some("Old Fridge".into()),
        description: Some("Works fine".into()),
        location: Some("Austin".into()),
        action: Some("donate".into()),
        material: Some("aluminum".into()),
    }
}

fn submission(fields: ListingDraft) -> ListingSubmission {
    ListingSubmission {
        fields,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_signup_hashes_and_rejects_duplicates() {
    let h = harness(ActorResolution::Token);

    let user = h.accounts.signup(signup("ann")).await.unwrap();
    let stored = h.users.find_by_username("ann").await.unwrap().unwrap();
    assert_eq!(stored.id, user.id);
    assert_ne!(stored.password_hash, "hunter22");

    let same_name = SignupInput {
        email: Some("other@example.com".into()),
        ..signup("ann")
    };
    assert!(matches!(
        h.accounts.signup(same_name).await,
        Err(DomainError::Conflict(_))
    ));

    let same_email = SignupInput {
        username: Some("annie".into()),
        ..signup("ann")
    };
    assert!(matches!(
        h.accounts.signup(same_email).await,
        Err(DomainError::Conflict(_))
    ));

    assert_eq!(h.accounts.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_signup_requires_fields() {
    let h = harness(ActorResolution::Token);
    let err = h
        .accounts
        .signup(SignupInput {
            username: Some("ann".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Missing required fields: email, password");

    let err = h
        .accounts
        .signup(SignupInput {
            username: Some("a".repeat(81)),
            email: Some("ann@example.com".into()),
            password: Some("pw".into()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = h
        .accounts
        .signup(SignupInput {
            username: Some("ann".into()),
            email: Some(format!("{}@example.com", "a".repeat(120))),
            password: Some("pw".into()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(h.users.find_by_username("ann").await.unwrap().is_none());
}

#[tokio::test]
async fn test_login() {
    let h = harness(ActorResolution::Token);
    h.accounts.signup(signup("ann")).await.unwrap();

    let token = h
        .accounts
        .login(Some("ann".into()), Some("hunter22".into()))
        .await
        .unwrap();
    assert!(!token.access_token.is_empty());
    assert_eq!(token.expires_in, 24 * 3600);

    assert!(matches!(
        h.accounts
            .login(Some("ann".into()), Some("wrong".into()))
            .await,
        Err(DomainError::InvalidCredentials)
    ));
    assert!(matches!(
        h.accounts
            .login(Some("ghost".into()), Some("hunter22".into()))
            .await,
        Err(DomainError::InvalidCredentials)
    ));
    assert!(matches!(
        h.accounts.login(None, Some("hunter22".into())).await,
        Err(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn test_listing_scenario_with_token_policy() {
    let h = harness(ActorResolution::Token);
    let owner = h.accounts.signup(signup("ann")).await.unwrap();

    let created = h
        .listings
        .create(Some(owner.id), submission(fridge()))
        .await
        .unwrap();
    assert_eq!(created.owner_username.as_deref(), Some("ann"));
    let id = created.listing.id.to_string();

    let fetched = h.listings.get(&id).await.unwrap();
    assert_eq!(fetched.listing, created.listing);

    let updated = h
        .listings
        .update(
            Some(owner.id),
            &id,
            submission(ListingDraft {
                material: Some("steel".into()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
    assert_eq!(updated.listing.material, "steel");
    assert_eq!(updated.listing.id, created.listing.id);
    assert_eq!(updated.listing.title, "Old Fridge");
    assert_eq!(updated.listing.created_at, created.listing.created_at);

    h.listings.delete(Some(owner.id), &id).await.unwrap();
    assert!(matches!(
        h.listings.get(&id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_non_owner_is_forbidden() {
    let h = harness(ActorResolution::Token);
    let ann = h.accounts.signup(signup("ann")).await.unwrap();
    let ben = h.accounts.signup(signup("ben")).await.unwrap();

    let created = h
        .listings
        .create(Some(ann.id), submission(fridge()))
        .await
        .unwrap();
    let id = created.listing.id.to_string();

    assert!(matches!(
        h.listings
            .update(Some(ben.id), &id, submission(ListingDraft::default()))
            .await,
        Err(DomainError::Forbidden)
    ));
    assert!(matches!(
        h.listings.delete(Some(ben.id), &id).await,
        Err(DomainError::Forbidden)
    ));
    assert!(matches!(
        h.listings.delete(None, &id).await,
        Err(DomainError::Unauthorized)
    ));
    assert!(h.listings.get(&id).await.is_ok());
}

#[tokio::test]
async fn test_create_validation_happens_before_writes() {
    let h = harness(ActorResolution::Token);
    let ann = h.accounts.signup(signup("ann")).await.unwrap();

    let mut missing = fridge();
    missing.title = None;
    assert!(matches!(
        h.listings.create(Some(ann.id), submission(missing)).await,
        Err(DomainError::Validation(_))
    ));

    let bad_image = ListingSubmission {
        fields: fridge(),
        image: Some(ImageUpload::new("photo.exe", b"MZ".to_vec())),
        ..Default::default()
    };
    assert!(matches!(
        h.listings.create(Some(ann.id), bad_image).await,
        Err(DomainError::FileType(_))
    ));
    assert!(h.media.load("photo.exe").await.unwrap().is_none());

    let mut wide = fridge();
    wide.action = Some("a".repeat(21));
    let too_wide = ListingSubmission {
        fields: wide,
        image: Some(ImageUpload::new("wide.png", vec![1, 2, 3])),
        ..Default::default()
    };
    assert!(matches!(
        h.listings.create(Some(ann.id), too_wide).await,
        Err(DomainError::Validation(_))
    ));
    assert!(h.media.load("wide.png").await.unwrap().is_none());

    assert!(matches!(
        h.listings.create(None, submission(fridge())).await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        h.listings.create(Some(999), submission(fridge())).await,
        Err(DomainError::UserNotFound(_))
    ));

    assert!(h.listings.list(&ListingQuery::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_image() {
    let h = harness(ActorResolution::Token);
    let ann = h.accounts.signup(signup("ann")).await.unwrap();

    let created = h
        .listings
        .create(
            Some(ann.id),
            ListingSubmission {
                fields: fridge(),
                image: Some(ImageUpload::new("photo.png", vec![1, 2, 3, 4])),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(
        created.listing.image_reference.as_deref(),
        Some("photo.png")
    );
    assert_eq!(h.listings.image("photo.png").await.unwrap(), vec![1, 2, 3, 4]);
    assert!(matches!(
        h.listings.image("missing.png").await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_client_supplied_policy() {
    let h = harness(ActorResolution::ClientSupplied);
    let ann = h.accounts.signup(signup("ann")).await.unwrap();

    let created = h
        .listings
        .create(
            None,
            ListingSubmission {
                fields: fridge(),
                claimed_owner: Some(ann.id.to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.listing.owner_id, Some(ann.id));

    let unknown = ListingSubmission {
        fields: fridge(),
        claimed_owner: Some("404".into()),
        ..Default::default()
    };
    assert!(matches!(
        h.listings.create(None, unknown).await,
        Err(DomainError::UserNotFound(_))
    ));

    // No ownership checks under this policy.
    let id = created.listing.id.to_string();
    h.listings.delete(None, &id).await.unwrap();
}

#[tokio::test]
async fn test_list_filters_and_owner_names() {
    let h = harness(ActorResolution::Token);
    let ann = h.accounts.signup(signup("ann")).await.unwrap();

    for material in ["glass", "aluminum", "Glassware"] {
        h.listings
            .create(
                Some(ann.id),
                submission(ListingDraft {
                    material: Some(material.into()),
                    ..fridge()
                }),
            )
            .await
            .unwrap();
    }

    let query = ListingQuery::from_params(Some("glass"), None, Some("material"), Some("desc"))
        .unwrap();
    let views = h.listings.list(&query).await.unwrap();

    let materials: Vec<&str> = views.iter().map(|v| v.listing.material.as_str()).collect();
    assert_eq!(materials, vec!["glass", "Glassware"]);
    assert!(views.iter().all(|v| v.owner_username.as_deref() == Some("ann")));
}

#[tokio::test]
async fn test_unknown_or_malformed_ids_are_not_found() {
    let h = harness(ActorResolution::Token);
    let ann = h.accounts.signup(signup("ann")).await.unwrap();

    for id in ["not-a-uuid", "6f1c1c1e-8a45-4a8e-9d0a-2b8c1f1d2e3f"] {
        assert!(matches!(
            h.listings.get(id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            h.listings.delete(Some(ann.id), id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
