use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // TodoItems: membership lookups by owning workspace
        manager
            .create_index(
                Index::create()
                    .name("idx_todo_items_workspace")
                    .table(TodoItems::Table)
                    .col(TodoItems::WorkspaceId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // AuthorTodoitem: reverse direction of the composite primary key
        manager
            .create_index(
                Index::create()
                    .name("idx_author_todoitem_todo_item")
                    .table(AuthorTodoitem::Table)
                    .col(AuthorTodoitem::TodoItemId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_author_todoitem_todo_item").table(AuthorTodoitem::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_todo_items_workspace").table(TodoItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TodoItems { Table, WorkspaceId }

#[derive(DeriveIden)]
enum AuthorTodoitem { Table, TodoItemId }
