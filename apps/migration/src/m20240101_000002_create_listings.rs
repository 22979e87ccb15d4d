use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listings::Table)
                    .if_not_exists()
                    .col(pk_uuid(Listings::Id))
                    .col(string_len(Listings::Title, 200))
                    .col(text(Listings::Description))
                    .col(string_len(Listings::Location, 100))
                    .col(string_len(Listings::Action, 20))
                    .col(string_len(Listings::Material, 50))
                    .col(string_len_null(Listings::ImageReference, 255))
                    .col(integer_null(Listings::OwnerId))
                    .col(timestamp_with_time_zone(Listings::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listings_owner_id")
                            .from(Listings::Table, Listings::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_owner_id")
                    .table(Listings::Table)
                    .col(Listings::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Listings {
    Table,
    Id,
    Title,
    Description,
    Location,
    Action,
    Material,
    ImageReference,
    OwnerId,
    CreatedAt,
}
