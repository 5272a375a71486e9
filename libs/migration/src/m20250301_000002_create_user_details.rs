use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One details row per user, removed together with the user
        manager
            .create_table(
                Table::create()
                    .table(UserDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserDetails::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(text(UserDetails::Address))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_details_user_id")
                            .from(UserDetails::Table, UserDetails::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserDetails::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum UserDetails {
    Table,
    UserId,
    Address,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
