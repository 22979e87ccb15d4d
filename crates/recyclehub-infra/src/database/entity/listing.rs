//! Listing entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub action: String,
    pub material: String,
    pub image_reference: Option<String>,
    pub owner_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Listing.
impl From<Model> for recyclehub_core::domain::Listing {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            location: model.location,
            action: model.action,
            material: model.material,
            image_reference: model.image_reference,
            owner_id: model.owner_id,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain Listing to SeaORM ActiveModel.
impl From<recyclehub_core::domain::Listing> for ActiveModel {
    fn from(listing: recyclehub_core::domain::Listing) -> Self {
        Self {
            id: Set(listing.id),
            title: Set(listing.title),
            description: Set(listing.description),
            location: Set(listing.location),
            action: Set(listing.action),
            material: Set(listing.material),
            image_reference: Set(listing.image_reference),
            owner_id: Set(listing.owner_id),
            created_at: Set(listing.created_at.into()),
        }
    }
}
