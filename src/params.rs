use std::collections::HashMap;

use axum::{
    extract::{Form, FromRequest, FromRequestParts, Query, Request},
    http::{Method, header::CONTENT_TYPE, request::Parts},
};
use axum_extra::extract::CookieJar;

use crate::error::AppError;

/// Request parameters resolved the way the pages expect: a form field wins
/// over a query-string parameter, which wins over a cookie.
#[derive(Debug)]
pub struct Params {
    form: HashMap<String, String>,
    query: HashMap<String, String>,
    cookies: CookieJar,
}

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.form
            .get(name)
            .or_else(|| self.query.get(name))
            .map(String::as_str)
            .or_else(|| self.cookies.get(name).map(|c| c.value()))
    }

    /// Like [`Params::get`] but treats an empty value as absent.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }
}

impl<S> FromRequest<S> for Params
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let Query(query) =
            Query::<Vec<(String, String)>>::from_request_parts(&mut parts, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
        let cookies = CookieJar::from_headers(&parts.headers);

        let form = if carries_form(&parts) {
            let req = Request::from_parts(parts, body);
            let Form(form) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            form
        } else {
            Vec::new()
        };

        Ok(Self { form: form.into_iter().collect(), query: query.into_iter().collect(), cookies })
    }
}

// `Form` falls back to the query string on GET/HEAD, which would hide the
// precedence between the two sources.
fn carries_form(parts: &Parts) -> bool {
    if parts.method == Method::GET || parts.method == Method::HEAD {
        return false;
    }
    parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}
