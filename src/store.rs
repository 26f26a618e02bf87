use sea_orm::{
    ActiveValue::Set,
    ColumnTrait, DatabaseBackend, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, SqlErr, Statement,
    sea_query::{Expr, LikeExpr},
};
use tracing::{debug, info};

use crate::{
    db::{Db, DbError, DbResult, LIKE_ESCAPE, escape_like},
    entities::{comment, movie},
    models::{CommentOutcome, Ranking, Rating, SearchHit, SearchResults},
};

/// Statements behind the movie pages, built per request over the shared `Db`.
pub struct MovieStore<'a> {
    db: &'a Db,
}

impl<'a> MovieStore<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub async fn movie_count(&self) -> DbResult<i64> {
        let stmt = movie::Entity::find()
            .select_only()
            .column_as(Expr::col(movie::Column::Id).count(), "count")
            .build(self.db.backend());
        Ok(self.db.fetch_scalar::<i64>(stmt).await?.unwrap_or(0))
    }

    pub async fn all_movies(&self) -> DbResult<Vec<movie::Model>> {
        let stmt = movie::Entity::find()
            .order_by_asc(movie::Column::Title)
            .order_by_asc(movie::Column::Id)
            .build(self.db.backend());
        self.db.fetch_models(stmt).await
    }

    pub async fn movie(&self, id: i32) -> DbResult<Option<movie::Model>> {
        let stmt = movie::Entity::find_by_id(id).build(self.db.backend());
        self.db.fetch_row(stmt).await
    }

    /// Adds one vote in a single UPDATE. Returns false when no movie has `id`.
    pub async fn rate(&self, id: i32, rating: Rating) -> DbResult<bool> {
        let stmt = movie::Entity::update_many()
            .col_expr(
                movie::Column::RatingSum,
                Expr::col(movie::Column::RatingSum).add(rating.value()),
            )
            .col_expr(movie::Column::RatingCount, Expr::col(movie::Column::RatingCount).add(1))
            .filter(movie::Column::Id.eq(id))
            .build(self.db.backend());

        let updated = self.db.execute(stmt).await?.rows_affected() > 0;
        if updated {
            info!(movie_id = id, rating = rating.value(), "rating recorded");
        }
        Ok(updated)
    }

    /// Stores a comment once per movie. The `(movie_id, comment)` primary key
    /// rejects a repeat, which is reported as `Duplicate` on every backend.
    pub async fn add_comment(&self, movie_id: i32, text: &str) -> DbResult<CommentOutcome> {
        let stmt = insert_comment(self.db.backend(), movie_id, text);

        match self.db.execute(stmt).await {
            Ok(_) => {
                info!(movie_id = movie_id, len = text.len(), "comment added");
                Ok(CommentOutcome::Added)
            }
            Err(DbError::Query(err))
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                debug!(movie_id = movie_id, "duplicate comment ignored");
                Ok(CommentOutcome::Duplicate)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn comments(&self, movie_id: i32) -> DbResult<Vec<comment::Model>> {
        let stmt = comment::Entity::find()
            .filter(comment::Column::MovieId.eq(movie_id))
            .build(self.db.backend());
        self.db.fetch_models(stmt).await
    }

    /// Titles containing `needle` literally; an empty needle matches everything.
    pub async fn search(&self, needle: &str) -> DbResult<SearchResults> {
        let pattern = format!("%{}%", escape_like(needle));
        let stmt = movie::Entity::find()
            .select_only()
            .columns([movie::Column::Id, movie::Column::Title])
            .filter(movie::Column::Title.like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)))
            .order_by_asc(movie::Column::Id)
            .build(self.db.backend());

        let statement = stmt.to_string();
        let hits: Vec<SearchHit> = self.db.fetch_models(stmt).await?;
        debug!(needle = %needle, hits = hits.len(), "search");

        Ok(SearchResults { statement, hits })
    }

    /// Rated movies ordered by average rating, at most `limit` of them.
    pub async fn ranked(&self, ranking: Ranking, limit: u64) -> DbResult<Vec<movie::Model>> {
        let average = Expr::expr(Expr::col(movie::Column::RatingSum).mul(1.0))
            .div(Expr::col(movie::Column::RatingCount));
        let order = match ranking {
            Ranking::Best => Order::Desc,
            Ranking::Worst => Order::Asc,
        };

        let stmt = movie::Entity::find()
            .filter(movie::Column::RatingCount.gt(0))
            .order_by(average, order)
            .order_by_asc(movie::Column::Id)
            .limit(limit)
            .build(self.db.backend());
        self.db.fetch_models(stmt).await
    }
}

fn insert_comment(backend: DatabaseBackend, movie_id: i32, text: &str) -> Statement {
    let model = comment::ActiveModel { movie_id: Set(movie_id), comment: Set(text.to_string()) };
    comment::Entity::insert(model).build(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{memory_db, seed_movie};

    #[tokio::test]
    async fn rating_increments_sum_and_count() {
        let db = memory_db().await;
        let id = seed_movie(&db, "Alien", 1979, 15, 2).await;
        let store = MovieStore::new(&db);

        assert!(store.rate(id, Rating::parse("7").unwrap()).await.unwrap());

        let movie = store.movie(id).await.unwrap().unwrap();
        assert_eq!(movie.rating_sum, 22);
        assert_eq!(movie.rating_count, 3);
    }

    #[tokio::test]
    async fn rating_unknown_movie_changes_nothing() {
        let db = memory_db().await;
        let id = seed_movie(&db, "Alien", 1979, 0, 0).await;
        let store = MovieStore::new(&db);

        assert!(!store.rate(id + 1, Rating::parse("5").unwrap()).await.unwrap());
        assert_eq!(store.movie(id).await.unwrap().unwrap().rating_count, 0);
    }

    #[tokio::test]
    async fn same_comment_is_stored_once() {
        let db = memory_db().await;
        let id = seed_movie(&db, "Alien", 1979, 0, 0).await;
        let store = MovieStore::new(&db);

        assert_eq!(store.add_comment(id, "in space").await.unwrap(), CommentOutcome::Added);
        assert_eq!(store.add_comment(id, "in space").await.unwrap(), CommentOutcome::Duplicate);
        assert_eq!(store.add_comment(id, "no one").await.unwrap(), CommentOutcome::Added);

        let mut texts: Vec<String> =
            store.comments(id).await.unwrap().into_iter().map(|c| c.comment).collect();
        texts.sort();
        assert_eq!(texts, ["in space", "no one"]);
    }

    #[test]
    fn comment_insert_is_portable_sql() {
        let mysql = insert_comment(DatabaseBackend::MySql, 1, "x").to_string();
        assert_eq!(mysql, "INSERT INTO `comment` (`movie_id`, `comment`) VALUES (1, 'x')");

        let sqlite = insert_comment(DatabaseBackend::Sqlite, 1, "x").to_string();
        assert_eq!(sqlite, r#"INSERT INTO "comment" ("movie_id", "comment") VALUES (1, 'x')"#);
    }

    #[tokio::test]
    async fn same_comment_on_different_movies_is_kept() {
        let db = memory_db().await;
        let alien = seed_movie(&db, "Alien", 1979, 0, 0).await;
        let brazil = seed_movie(&db, "Brazil", 1985, 0, 0).await;
        let store = MovieStore::new(&db);

        store.add_comment(alien, "great").await.unwrap();
        assert_eq!(store.add_comment(brazil, "great").await.unwrap(), CommentOutcome::Added);
        assert_eq!(store.comments(brazil).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_needle_matches_every_movie() {
        let db = memory_db().await;
        seed_movie(&db, "Alien", 1979, 0, 0).await;
        seed_movie(&db, "Brazil", 1985, 0, 0).await;
        let store = MovieStore::new(&db);

        let results = store.search("").await.unwrap();
        assert_eq!(results.hits.len(), 2);
        assert_eq!(store.movie_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn search_is_a_literal_substring_match() {
        let db = memory_db().await;
        seed_movie(&db, "Alien", 1979, 0, 0).await;
        seed_movie(&db, "Aliens", 1986, 0, 0).await;
        seed_movie(&db, "100% Wolf", 2020, 0, 0).await;
        let store = MovieStore::new(&db);

        let titles = |r: SearchResults| r.hits.into_iter().map(|h| h.title).collect::<Vec<_>>();

        assert_eq!(titles(store.search("lien").await.unwrap()), ["Alien", "Aliens"]);
        assert_eq!(titles(store.search("%").await.unwrap()), ["100% Wolf"]);
        assert!(store.search("_lien").await.unwrap().hits.is_empty());
    }

    #[tokio::test]
    async fn search_reports_statement_text() {
        let db = memory_db().await;
        let store = MovieStore::new(&db);

        let results = store.search("alien").await.unwrap();
        assert!(results.hits.is_empty());
        assert!(results.statement.contains("LIKE '%alien%'"), "{}", results.statement);
    }

    #[tokio::test]
    async fn ranking_skips_unrated_and_caps_results() {
        let db = memory_db().await;
        seed_movie(&db, "Unrated", 2001, 0, 0).await;
        seed_movie(&db, "Good", 2002, 16, 2).await;
        seed_movie(&db, "Great", 2003, 19, 2).await;
        seed_movie(&db, "Poor", 2004, 3, 1).await;
        seed_movie(&db, "Fine", 2005, 13, 2).await;
        let store = MovieStore::new(&db);

        let titles = |movies: Vec<movie::Model>| {
            movies.into_iter().map(|m| m.title).collect::<Vec<_>>()
        };

        let best = store.ranked(Ranking::Best, 3).await.unwrap();
        assert_eq!(titles(best), ["Great", "Good", "Fine"]);

        let worst = store.ranked(Ranking::Worst, 3).await.unwrap();
        assert_eq!(titles(worst), ["Poor", "Fine", "Good"]);
    }

    #[tokio::test]
    async fn ranking_returns_fewer_when_few_are_rated() {
        let db = memory_db().await;
        seed_movie(&db, "Unrated", 2001, 0, 0).await;
        seed_movie(&db, "Only", 2002, 4, 1).await;
        let store = MovieStore::new(&db);

        let best = store.ranked(Ranking::Best, 3).await.unwrap();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].average_rating(), Some(4.0));
    }
}
