use std::sync::Arc;

use axum::{Router, extract::State, response::Html, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::debug;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{CommentOutcome, Ranking, Rating, SearchQuery},
    params::Params,
    store::MovieStore,
    templates,
};

const RANKING_SIZE: u64 = 3;
const COMMENT_MAX_CHARS: usize = 255;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index).post(index))
        .route("/movie", get(movie).post(movie))
        .route("/search", get(search).post(search))
        .route("/top", get(top).post(top))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let store = MovieStore::new(&state.db);
    let total = store.movie_count().await?;
    let movies = store.all_movies().await?;
    Ok(Html(templates::index_page(&movies, total)))
}

pub async fn movie(State(state): State<Arc<AppState>>, params: Params) -> AppResult<Html<String>> {
    let id = movie_id(&params)?;
    let store = MovieStore::new(&state.db);

    let mut movie = store.movie(id).await?.ok_or_else(|| no_such_movie(id))?;

    let rating = params
        .non_empty("rate")
        .map(|raw| {
            Rating::parse(raw).ok_or_else(|| {
                AppError::bad_request(format!(
                    "rating must be a whole number from {} to {}",
                    Rating::MIN,
                    Rating::MAX
                ))
            })
        })
        .transpose()?;
    let comment = comment_text(&params)?;

    // Nothing is written until every input has been accepted.
    let mut notices = Vec::new();
    if let Some(rating) = rating {
        if store.rate(id, rating).await? {
            notices.push(format!("(your rating of {rating} was added!)"));
        }
    }
    if let Some(text) = comment {
        if store.add_comment(id, text).await? == CommentOutcome::Duplicate {
            notices.push("(this comment was already posted)".to_string());
        }
    }

    if !notices.is_empty() {
        movie = store.movie(id).await?.ok_or_else(|| no_such_movie(id))?;
    }
    let comments = store.comments(id).await?;

    Ok(Html(templates::movie_page(&movie, &comments, &notices)))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    params: Params,
) -> AppResult<Html<String>> {
    let query = SearchQuery::from_param(params.get("q"));

    let results = match query.needle() {
        Some(needle) => Some(MovieStore::new(&state.db).search(needle).await?),
        None => None,
    };

    Ok(Html(templates::search_page(&query, results.as_ref())))
}

pub async fn top(State(state): State<Arc<AppState>>, params: Params) -> AppResult<Html<String>> {
    let ranking = Ranking::from_param(params.get("q"));
    debug!(ranking = ranking.label(), "ranking");

    let movies = MovieStore::new(&state.db).ranked(ranking, RANKING_SIZE).await?;
    Ok(Html(templates::top_page(ranking, &movies)))
}

fn no_such_movie(id: i32) -> AppError {
    AppError::not_found(format!("no movie with id {id}"))
}

fn comment_text(params: &Params) -> AppResult<Option<&str>> {
    let Some(text) = params.get("comment").map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    if text.chars().count() > COMMENT_MAX_CHARS {
        return Err(AppError::bad_request(format!(
            "comments are limited to {COMMENT_MAX_CHARS} characters"
        )));
    }
    Ok(Some(text))
}

fn movie_id(params: &Params) -> AppResult<i32> {
    let raw =
        params.non_empty("id").ok_or_else(|| AppError::bad_request("movie id is required"))?;
    raw.trim().parse().map_err(|_| AppError::bad_request(format!("invalid movie id '{raw}'")))
}
