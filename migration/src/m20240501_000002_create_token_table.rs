use sea_orm_migration::{prelude::*, schema::*};

use super::m20240501_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Token::Table)
                    .if_not_exists()
                    .col(string(Token::Hash).primary_key())
                    .col(integer(Token::UserId))
                    .col(string(Token::Scope))
                    .col(timestamp_with_time_zone(Token::Expiry))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_token_user_id")
                            .from(Token::Table, Token::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_token_user_id_scope")
                    .table(Token::Table)
                    .col(Token::UserId)
                    .col(Token::Scope)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Token::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Token {
    Table,
    Hash,
    UserId,
    Scope,
    Expiry,
}
