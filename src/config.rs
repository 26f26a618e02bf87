use std::net::SocketAddr;

use anyhow::Context;

use crate::db;

const DEFAULT_DATABASE_URL: &str = "sqlite://movies.db?mode=rwc";

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 =
            var("PORT").unwrap_or_else(|| "3000".to_string()).parse().context("PORT")?;

        // An explicit URL wins; discrete MySQL credentials come next.
        let database_url = match (var("DATABASE_URL"), var("DB_HOST")) {
            (Some(url), _) => url,
            (None, Some(db_host)) => db::credentials_url(
                &db_host,
                &var("DB_USER").unwrap_or_default(),
                &var("DB_PASSWORD").unwrap_or_default(),
                &var("DB_NAME").unwrap_or_else(|| "movies".to_string()),
            ),
            (None, None) => DEFAULT_DATABASE_URL.to_string(),
        };

        let max_connections: u32 =
            var("DB_MAX_CONNECTIONS").and_then(|s| s.parse().ok()).unwrap_or(1);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            max_connections,
        })
    }
}
