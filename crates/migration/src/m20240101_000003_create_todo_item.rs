use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TodoItems::Table)
                    .if_not_exists()
                    .col(big_integer(TodoItems::Id).auto_increment().primary_key())
                    .col(string_len_null(TodoItems::Title, 256))
                    .col(boolean(TodoItems::IsComplete).default(false))
                    .col(big_integer_null(TodoItems::WorkspaceId))
                    .col(integer(TodoItems::Version).default(1))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_todo_items_workspace")
                            .from(TodoItems::Table, TodoItems::WorkspaceId)
                            .to(Workspaces::Table, Workspaces::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TodoItems::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TodoItems {
    Table,
    Id,
    Title,
    IsComplete,
    WorkspaceId,
    Version,
}

#[derive(DeriveIden)]
enum Workspaces { Table, Id }
