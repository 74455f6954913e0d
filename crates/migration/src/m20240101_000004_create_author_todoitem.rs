use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthorTodoitem::Table)
                    .if_not_exists()
                    .col(big_integer(AuthorTodoitem::AuthorId))
                    .col(big_integer(AuthorTodoitem::TodoItemId))
                    // one row per edge; duplicate connects cannot create a second row
                    .primary_key(
                        Index::create()
                            .name("pk_author_todoitem")
                            .col(AuthorTodoitem::AuthorId)
                            .col(AuthorTodoitem::TodoItemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_author_todoitem_author")
                            .from(AuthorTodoitem::Table, AuthorTodoitem::AuthorId)
                            .to(Authors::Table, Authors::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_author_todoitem_todo_item")
                            .from(AuthorTodoitem::Table, AuthorTodoitem::TodoItemId)
                            .to(TodoItems::Table, TodoItems::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AuthorTodoitem::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AuthorTodoitem {
    Table,
    AuthorId,
    TodoItemId,
}

#[derive(DeriveIden)]
enum Authors { Table, Id }

#[derive(DeriveIden)]
enum TodoItems { Table, Id }
