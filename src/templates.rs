use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::{comment, movie},
    models::{Rating, Ranking, SearchQuery, SearchResults},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(movies: &[movie::Model], total: i64) -> String {
    page(
        "Movies",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Movies" }
            p class="mt-2 text-gray-600" { (total) " movies in the catalogue." }

            (search_form(""))

            @if movies.is_empty() {
                p class="mt-6 text-gray-600" { "The catalogue is empty." }
            } @else {
                ul class="mt-6 space-y-1" {
                    @for m in movies {
                        li { (movie_link(m.id, &m.title)) span class="text-gray-500" { " (" (m.year) ")" } }
                    }
                }
            }
        },
    )
}

pub fn movie_page(movie: &movie::Model, comments: &[comment::Model], notices: &[String]) -> String {
    page(
        &movie.title,
        html! {
            @for notice in notices {
                p class="mb-4 text-sm text-green-700" { (notice) }
            }

            h1 class="text-3xl font-bold text-gray-900" {
                (movie.title)
                span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
            }
            p class="mt-4 text-gray-700" { "Director: " (movie.director) }
            p class="text-gray-700" { "Starring: " (movie.stars) }

            @if let Some(url) = movie.webpage() {
                p class="mt-2 text-gray-700" {
                    "Webpage: "
                    a class="text-blue-600 hover:text-blue-800" href=(url) { (url) }
                }
            }

            p class="mt-4 text-gray-900" {
                @match movie.average_rating() {
                    Some(average) => {
                        "Rating: " (format_rating(average)) " / 10"
                        span class="ml-3 text-gray-500" { "(" (movie.rating_count) " people voted)" }
                    },
                    None => "not rated yet",
                }
            }

            div class="mt-6" {
                p class="text-sm text-gray-700" { "Give your rating for this movie:" }
                p class="mt-1 space-x-3" {
                    span class="text-gray-500" { "(horrible)" }
                    @for value in Rating::MIN..=Rating::MAX {
                        a class="text-blue-600 hover:text-blue-800" href=(format!("/movie?id={}&rate={}", movie.id, value)) { (value) }
                    }
                    span class="text-gray-500" { "(great)" }
                }
            }

            hr class="my-6 w-72";

            form method="post" action="/movie" {
                input type="hidden" name="id" value=(movie.id);
                label class="block text-sm font-medium text-gray-700" for="comment" { "Add your comment:" }
                textarea class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="comment" id="comment" cols="50" {}
                button class="mt-2 rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Add this comment" }
            }

            h2 class="mt-8 text-xl font-semibold text-gray-900" { "Comments:" }
            @if comments.is_empty() {
                p class="mt-2 text-gray-600" { "No comments entered for this movie" }
            } @else {
                ul class="mt-2 list-disc pl-6 space-y-1" {
                    @for c in comments {
                        li class="text-gray-700" { (c.comment) }
                    }
                }
            }
        },
    )
}

pub fn search_page(query: &SearchQuery, results: Option<&SearchResults>) -> String {
    let shown = match query {
        SearchQuery::Title(text) => text.as_str(),
        SearchQuery::Idle | SearchQuery::Everything => "",
    };

    page(
        "Search",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Search" }
            (search_form(shown))

            @if let Some(results) = results {
                pre class="mt-6 whitespace-pre-wrap text-xs text-gray-500" { (results.statement) }
                p class="mt-4 text-gray-900" { "Search results:" }
                @if results.hits.is_empty() {
                    p class="mt-2 text-gray-600" { "nothing found for '" (shown) "'" }
                } @else {
                    ul class="mt-2 list-disc pl-6 space-y-1" {
                        @for hit in &results.hits {
                            li { (movie_link(hit.id, &hit.title)) }
                        }
                    }
                }
            }
        },
    )
}

pub fn top_page(ranking: Ranking, movies: &[movie::Model]) -> String {
    page(
        "Rankings",
        html! {
            h1 class="text-2xl font-bold text-gray-900" {
                (ranking.label()) " movies (top 3) as ranked by users:"
            }
            ul class="mt-4 list-disc pl-6 space-y-1" {
                @for m in movies {
                    li {
                        (movie_link(m.id, &m.title))
                        " (" (m.year) ")"
                        @if let Some(average) = m.average_rating() {
                            " - " (format_rating(average)) " / 10"
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        html! {
            h1 class="text-2xl font-bold text-gray-900" { "Error " (status.as_u16()) }
            p class="mt-4 text-gray-700" { (message) }
            a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-10" {
                    (nav())
                    div class="mt-6 bg-white shadow rounded-lg p-8" { (body) }
                }
            }
        }
    }
    .into_string()
}

fn nav() -> Markup {
    html! {
        nav class="flex gap-6 text-sm text-blue-600" {
            a class="hover:text-blue-800" href="/" { "All movies" }
            a class="hover:text-blue-800" href="/search" { "Search" }
            a class="hover:text-blue-800" href="/top?q=best" { "Best" }
            a class="hover:text-blue-800" href="/top?q=worst" { "Worst" }
        }
    }
}

fn search_form(value: &str) -> Markup {
    html! {
        form class="mt-6 flex gap-2" method="get" action="/search" {
            input class="flex-1 rounded-md border border-gray-300 px-3 py-2" type="text" name="q" value=(value) placeholder="Title, or \"all\"";
            button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
        }
    }
}

fn movie_link(id: i32, title: &str) -> Markup {
    html! {
        a class="text-blue-600 hover:text-blue-800" href=(format!("/movie?id={}", id)) { (title) }
    }
}

fn format_rating(average: f64) -> String {
    format!("{:.1}", average)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(webpage: Option<&str>, rating_sum: i32, rating_count: i32) -> movie::Model {
        movie::Model {
            id: 1,
            title: "Alien".to_string(),
            year: 1979,
            director: "Ridley Scott".to_string(),
            stars: "Sigourney Weaver".to_string(),
            webpage: webpage.map(str::to_string),
            rating_sum,
            rating_count,
        }
    }

    #[test]
    fn unrated_movie_says_so() {
        let html = movie_page(&movie(None, 0, 0), &[], &[]);
        assert!(html.contains("not rated yet"));
        assert!(!html.contains("people voted"));
        assert!(html.contains("No comments entered for this movie"));
    }

    #[test]
    fn rated_movie_shows_average_and_votes() {
        let html = movie_page(&movie(None, 15, 2), &[], &[]);
        assert!(html.contains("Rating: 7.5 / 10"));
        assert!(html.contains("(2 people voted)"));
        assert!(!html.contains("not rated yet"));
    }

    #[test]
    fn webpage_link_only_when_present() {
        let html = movie_page(&movie(Some("https://alien.example"), 0, 0), &[], &[]);
        assert!(html.contains(r#"href="https://alien.example""#));

        let html = movie_page(&movie(Some(""), 0, 0), &[], &[]);
        assert!(!html.contains("Webpage:"));
    }

    #[test]
    fn user_text_is_escaped() {
        let comments = [comment::Model { movie_id: 1, comment: "<script>x</script>".to_string() }];
        let html = movie_page(&movie(None, 0, 0), &comments, &[]);
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>x"));
    }

    #[test]
    fn idle_search_shows_only_the_form() {
        let html = search_page(&SearchQuery::Idle, None);
        assert!(html.contains(r#"name="q""#));
        assert!(!html.contains("Search results:"));
    }

    #[test]
    fn empty_search_names_the_query() {
        let results = SearchResults { statement: "SELECT 1".to_string(), hits: Vec::new() };
        let query = SearchQuery::Title("zardoz".to_string());
        let html = search_page(&query, Some(&results));
        assert!(html.contains("SELECT 1"));
        assert!(html.contains("nothing found for 'zardoz'"));
    }
}
