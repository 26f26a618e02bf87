use sea_orm::{
    ActiveValue::{NotSet, Set},
    EntityTrait, QueryTrait,
};

use crate::{db::Db, entities::movie};

pub async fn memory_db() -> Db {
    let db = Db::open("sqlite::memory:", 1).await.unwrap();
    db.migrate().await.unwrap();
    db
}

pub async fn seed_movie(
    db: &Db,
    title: &str,
    year: i32,
    rating_sum: i32,
    rating_count: i32,
) -> i32 {
    insert(db, title, year, None, rating_sum, rating_count).await
}

pub async fn seed_movie_with_webpage(db: &Db, title: &str, webpage: &str) -> i32 {
    insert(db, title, 2000, Some(webpage.to_string()), 0, 0).await
}

async fn insert(
    db: &Db,
    title: &str,
    year: i32,
    webpage: Option<String>,
    rating_sum: i32,
    rating_count: i32,
) -> i32 {
    let model = movie::ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        year: Set(year),
        director: Set("Jane Doe".to_string()),
        stars: Set("John Roe, Mary Major".to_string()),
        webpage: Set(webpage),
        rating_sum: Set(rating_sum),
        rating_count: Set(rating_count),
    };
    let stmt = movie::Entity::insert(model).build(db.backend());
    db.execute(stmt).await.unwrap().last_insert_id() as i32
}
