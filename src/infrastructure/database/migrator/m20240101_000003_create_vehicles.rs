//! Migration to create vehicles table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_branches::Branches;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Brand).string_len(50).not_null())
                    .col(ColumnDef::new(Vehicles::Model).string_len(80).not_null())
                    .col(ColumnDef::new(Vehicles::Year).integer().not_null())
                    .col(
                        ColumnDef::new(Vehicles::Plate)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Vehicles::BranchId).integer().not_null())
                    .col(ColumnDef::new(Vehicles::Color).string_len(30).null())
                    .col(ColumnDef::new(Vehicles::Mileage).big_integer().null())
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_branch")
                            .from(Vehicles::Table, Vehicles::BranchId)
                            .to(Branches::Table, Branches::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_branch_id")
                    .table(Vehicles::Table)
                    .col(Vehicles::BranchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_brand_year")
                    .table(Vehicles::Table)
                    .col(Vehicles::Brand)
                    .col(Vehicles::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
    Brand,
    Model,
    Year,
    Plate,
    BranchId,
    Color,
    Mileage,
    CreatedAt,
    UpdatedAt,
}
