use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{
    db::SqliteStore,
    error::StoreError,
    models::{AnalyticsSnapshot, LinkId},
    store::UrlStore,
};

/// Click analytics for a single alias.
#[async_trait]
pub trait AnalyticsAggregator: Send + Sync + 'static {
    /// Aggregate every click recorded for `alias`.
    ///
    /// Fails with [`StoreError::NotFound`] for unknown aliases rather than
    /// returning an empty snapshot.
    async fn compute(&self, alias: &str) -> Result<AnalyticsSnapshot, StoreError>;
}

const BY_USER_AGENT: &str = "SELECT user_agent, COUNT(*) FROM clicks
     WHERE link_id = ?1 GROUP BY user_agent";

const BY_DAY: &str = "SELECT strftime('%Y-%m-%d', occurred_at) AS day, COUNT(*) FROM clicks
     WHERE link_id = ?1 GROUP BY day";

const BY_MONTH: &str = "SELECT strftime('%Y-%m', occurred_at) AS month, COUNT(*) FROM clicks
     WHERE link_id = ?1 GROUP BY month";

// TODO: every request scans all clicks of the link; high-volume aliases will
// need a date window or pre-aggregated counters.
#[async_trait]
impl AnalyticsAggregator for SqliteStore {
    async fn compute(&self, alias: &str) -> Result<AnalyticsSnapshot, StoreError> {
        let link = self.resolve(alias).await?;

        let total_clicks: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE link_id = ?1")
                .bind(link.id)
                .fetch_one(self.pool())
                .await?;

        Ok(AnalyticsSnapshot {
            total_clicks,
            by_user_agent: self.grouped_counts(BY_USER_AGENT, link.id).await?,
            by_day: self.grouped_counts(BY_DAY, link.id).await?,
            by_month: self.grouped_counts(BY_MONTH, link.id).await?,
        })
    }
}

impl SqliteStore {
    async fn grouped_counts(
        &self,
        sql: &'static str,
        link_id: LinkId,
    ) -> Result<BTreeMap<String, i64>, StoreError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(sql)
            .bind(link_id)
            .fetch_all(self.pool())
            .await?;

        Ok(rows.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clicks::ClickRecorder, db::connect_in_memory};
    use chrono::NaiveDate;

    async fn store() -> SqliteStore {
        SqliteStore::new(connect_in_memory().await.unwrap())
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 15, 30))
            .unwrap()
    }

    #[tokio::test]
    async fn fresh_alias_has_empty_snapshot() {
        let store = store().await;
        store.create("https://example.com", "fresh").await.unwrap();

        let snapshot = store.compute("fresh").await.unwrap();

        assert_eq!(snapshot, AnalyticsSnapshot::default());
        assert_eq!(snapshot.total_clicks, 0);
        assert!(snapshot.by_user_agent.is_empty());
        assert!(snapshot.by_day.is_empty());
        assert!(snapshot.by_month.is_empty());
    }

    #[tokio::test]
    async fn unknown_alias_is_not_found() {
        let store = store().await;

        let err = store.compute("never-created").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn groups_by_user_agent_including_empty() {
        let store = store().await;
        let id = store.create("https://example.com", "ua").await.unwrap();

        for ua in ["firefox", "firefox", "curl", "", ""] {
            store.record(id, ua).await.unwrap();
        }

        let snapshot = store.compute("ua").await.unwrap();

        assert_eq!(snapshot.total_clicks, 5);
        assert_eq!(snapshot.by_user_agent.get("firefox"), Some(&2));
        assert_eq!(snapshot.by_user_agent.get("curl"), Some(&1));
        assert_eq!(snapshot.by_user_agent.get(""), Some(&2));
    }

    #[tokio::test]
    async fn groups_by_day_and_month() {
        let store = store().await;
        let id = store.create("https://example.com", "cal").await.unwrap();

        store.record_at(id, "a", at(2024, 1, 30, 9)).await.unwrap();
        store.record_at(id, "a", at(2024, 1, 30, 23)).await.unwrap();
        store.record_at(id, "b", at(2024, 1, 31, 0)).await.unwrap();
        store.record_at(id, "b", at(2024, 2, 1, 12)).await.unwrap();
        store.record_at(id, "c", at(2025, 2, 1, 12)).await.unwrap();

        let snapshot = store.compute("cal").await.unwrap();

        let days: Vec<(&str, i64)> = snapshot
            .by_day
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(
            days,
            vec![
                ("2024-01-30", 2),
                ("2024-01-31", 1),
                ("2024-02-01", 1),
                ("2025-02-01", 1),
            ]
        );

        let months: Vec<(&str, i64)> = snapshot
            .by_month
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(months, vec![("2024-01", 3), ("2024-02", 1), ("2025-02", 1)]);
    }

    #[tokio::test]
    async fn every_grouping_sums_to_total() {
        let store = store().await;
        let id = store.create("https://example.com", "sums").await.unwrap();

        let agents = ["a", "b", "c", "", "a", "b", "a"];
        for (i, ua) in agents.iter().enumerate() {
            store
                .record_at(id, ua, at(2024, 3 + (i as u32 % 3), 1 + i as u32, 10))
                .await
                .unwrap();
        }

        let snapshot = store.compute("sums").await.unwrap();
        let n = agents.len() as i64;

        assert_eq!(snapshot.total_clicks, n);
        assert_eq!(snapshot.by_user_agent.values().sum::<i64>(), n);
        assert_eq!(snapshot.by_day.values().sum::<i64>(), n);
        assert_eq!(snapshot.by_month.values().sum::<i64>(), n);
    }

    #[tokio::test]
    async fn clicks_of_other_links_are_excluded() {
        let store = store().await;
        let mine = store.create("https://mine.com", "mine").await.unwrap();
        let other = store.create("https://other.com", "other").await.unwrap();

        store.record(mine, "x").await.unwrap();
        store.record(other, "x").await.unwrap();
        store.record(other, "y").await.unwrap();

        let snapshot = store.compute("mine").await.unwrap();
        assert_eq!(snapshot.total_clicks, 1);
        assert_eq!(snapshot.by_user_agent.len(), 1);
    }

    #[tokio::test]
    async fn closed_pool_is_unavailable() {
        let store = store().await;
        store.create("https://example.com", "gone").await.unwrap();
        store.pool().close().await;

        let err = store.compute("gone").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
