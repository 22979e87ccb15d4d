//! Domain entities - the core business objects.

mod listing;
mod media;
mod query;
mod user;

pub use listing::{
    ACTION_MAX_LEN, LOCATION_MAX_LEN, Listing, ListingContent, ListingDraft, MATERIAL_MAX_LEN,
    TITLE_MAX_LEN,
};
pub use media::{
    ALLOWED_IMAGE_EXTENSIONS, IMAGE_NAME_MAX_LEN, ImageUpload, content_type_for,
    sanitize_filename,
};
pub use query::{ListingQuery, SortField, SortOrder};
pub use user::{EMAIL_MAX_LEN, NewUser, USERNAME_MAX_LEN, User};
