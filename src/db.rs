use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
    ExecResult, FromQueryResult, QueryResult, Statement, TryGetable,
};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("could not connect to database: {0}")]
    Connect(#[source] DbErr),
    #[error("migration failed: {0}")]
    Migrate(#[source] DbErr),
    #[error("query failed: {0}")]
    Query(#[source] DbErr),
    #[error("unexpected row shape: {0}")]
    Decode(#[source] DbErr),
    #[error("could not close database: {0}")]
    Close(#[source] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Handle to the movie database.
///
/// Cloning is cheap and every clone talks to the same pool, which is capped
/// at `max_connections` (one by default).
#[derive(Clone)]
pub struct Db {
    conn: DatabaseConnection,
}

impl Db {
    pub async fn open(database_url: &str, max_connections: u32) -> DbResult<Self> {
        let mut options = ConnectOptions::new(database_url.to_string());
        options.max_connections(max_connections.max(1)).min_connections(1);

        let conn = Database::connect(options).await.map_err(DbError::Connect)?;
        let db = Self { conn };

        if db.backend() == DatabaseBackend::Sqlite {
            db.pragma("PRAGMA journal_mode=WAL").await?;
            db.pragma("PRAGMA synchronous=NORMAL").await?;
        }

        Ok(db)
    }

    pub async fn migrate(&self) -> DbResult<()> {
        Migrator::up(&self.conn, None).await.map_err(DbError::Migrate)
    }

    pub async fn close(self) -> DbResult<()> {
        self.conn.close().await.map_err(DbError::Close)
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.conn.get_database_backend()
    }

    /// Runs a statement that returns no rows.
    pub async fn execute(&self, stmt: Statement) -> DbResult<ExecResult> {
        debug!(sql = %stmt.sql, "execute");
        self.conn.execute(stmt).await.map_err(DbError::Query)
    }

    /// Every row of the result set, in the order the database produced them.
    pub async fn fetch_all(&self, stmt: Statement) -> DbResult<Vec<QueryResult>> {
        debug!(sql = %stmt.sql, "fetch");
        self.conn.query_all(stmt).await.map_err(DbError::Query)
    }

    pub async fn fetch_models<T: FromQueryResult>(&self, stmt: Statement) -> DbResult<Vec<T>> {
        self.fetch_all(stmt)
            .await?
            .iter()
            .map(|row| T::from_query_result(row, "").map_err(DbError::Decode))
            .collect()
    }

    /// First column of the first row, or `None` when nothing matched.
    pub async fn fetch_scalar<V: TryGetable>(&self, stmt: Statement) -> DbResult<Option<V>> {
        let rows = self.fetch_all(stmt).await?;
        rows.first().map(|row| row.try_get_by_index::<V>(0)).transpose().map_err(DbError::Decode)
    }

    /// First row, or `None` when nothing matched.
    pub async fn fetch_row<T: FromQueryResult>(&self, stmt: Statement) -> DbResult<Option<T>> {
        Ok(self.fetch_models(stmt).await?.into_iter().next())
    }

    async fn pragma(&self, sql: &str) -> DbResult<()> {
        self.execute(Statement::from_string(self.backend(), sql.to_string())).await?;
        Ok(())
    }
}

/// Builds a MySQL URL from discrete credentials.
pub fn credentials_url(host: &str, user: &str, password: &str, database: &str) -> String {
    format!(
        "mysql://{}:{}@{}/{}",
        urlencoding::encode(user),
        urlencoding::encode(password),
        host,
        urlencoding::encode(database)
    )
}

/// Escape character paired with [`escape_like`] in `LIKE ... ESCAPE` clauses.
pub const LIKE_ESCAPE: char = '!';

/// Escapes LIKE metacharacters so `value` matches literally.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}
