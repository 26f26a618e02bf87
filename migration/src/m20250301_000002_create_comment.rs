use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // (movie_id, comment) is the primary key so repeated comments collapse
        // into one row. movie_id is not a foreign key.
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(integer(Comment::MovieId))
                    .col(string(Comment::Comment))
                    .primary_key(Index::create().col(Comment::MovieId).col(Comment::Comment))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Comment::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Comment {
    Table,
    MovieId,
    Comment,
}
