use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use crate::{
    db::{is_foreign_key_violation, SqliteStore},
    error::StoreError,
    models::LinkId,
};

#[cfg(test)]
use crate::models::ClickEvent;

/// Append-only log of redirects.
#[async_trait]
pub trait ClickRecorder: Send + Sync + 'static {
    /// Record one click on `link_id`, stamped with the current UTC time.
    ///
    /// Fails with [`StoreError::NotFound`] if no link has that id.
    async fn record(&self, link_id: LinkId, user_agent: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl ClickRecorder for SqliteStore {
    async fn record(&self, link_id: LinkId, user_agent: &str) -> Result<(), StoreError> {
        self.record_at(link_id, user_agent, Utc::now().naive_utc())
            .await
    }
}

impl SqliteStore {
    pub(crate) async fn record_at(
        &self,
        link_id: LinkId,
        user_agent: &str,
        occurred_at: NaiveDateTime,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO clicks (link_id, user_agent, occurred_at) VALUES (?1, ?2, ?3)",
        )
        .bind(link_id)
        .bind(user_agent)
        .bind(occurred_at)
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_foreign_key_violation(&err) => Err(StoreError::NotFound),
            Err(err) => Err(StoreError::Unavailable(err)),
        }
    }

    /// Every click recorded for `link_id`, oldest first.
    #[cfg(test)]
    pub(crate) async fn click_events(
        &self,
        link_id: LinkId,
    ) -> Result<Vec<ClickEvent>, StoreError> {
        let events = sqlx::query_as(
            "SELECT id, link_id, user_agent, occurred_at
             FROM clicks
             WHERE link_id = ?1
             ORDER BY occurred_at, id",
        )
        .bind(link_id)
        .fetch_all(self.pool())
        .await?;

        Ok(events)
    }
}
