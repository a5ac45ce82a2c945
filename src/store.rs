use async_trait::async_trait;

use crate::{
    db::{is_unique_violation, SqliteStore},
    error::StoreError,
    models::{LinkId, ResolvedLink, ShortLink},
};

/// Persistent alias → target mapping.
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Insert a new link. Fails with [`StoreError::AliasConflict`] when the
    /// alias is already taken, whatever its target.
    async fn create(&self, target: &str, alias: &str) -> Result<LinkId, StoreError>;

    /// Look up the target and id for `alias`.
    async fn resolve(&self, alias: &str) -> Result<ResolvedLink, StoreError>;
}

#[async_trait]
impl UrlStore for SqliteStore {
    async fn create(&self, target: &str, alias: &str) -> Result<LinkId, StoreError> {
        // A single INSERT: the unique index on `alias` is the only collision check.
        let result = sqlx::query("INSERT INTO links (alias, target) VALUES (?1, ?2)")
            .bind(alias)
            .bind(target)
            .execute(self.pool())
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(err) if is_unique_violation(&err) => {
                Err(StoreError::AliasConflict(alias.to_owned()))
            }
            Err(err) => Err(StoreError::Unavailable(err)),
        }
    }

    async fn resolve(&self, alias: &str) -> Result<ResolvedLink, StoreError> {
        let link: Option<ShortLink> = sqlx::query_as(
            "SELECT id, alias, target, created_at FROM links WHERE alias = ?1",
        )
        .bind(alias)
        .fetch_optional(self.pool())
        .await?;

        link.map(|l| ResolvedLink {
            id: l.id,
            target: l.target,
        })
        .ok_or(StoreError::NotFound)
    }
}
