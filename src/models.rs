use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Primary key of a row in the `links` table.
pub type LinkId = i64;

/// A short link record from the `links` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShortLink {
    pub id: LinkId,
    pub alias: String,
    pub target: String,
    pub created_at: NaiveDateTime,
}

/// A single click event from the `clicks` table. Only read back in tests;
/// the service itself consumes clicks through aggregate queries.
#[cfg(test)]
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ClickEvent {
    pub id: i64,
    pub link_id: LinkId,
    pub user_agent: String,
    pub occurred_at: NaiveDateTime,
}

/// What a successful alias lookup yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub id: LinkId,
    pub target: String,
}

/// Click counts for one link, recomputed from raw events on every request.
///
/// Field names on the wire follow the public analytics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalyticsSnapshot {
    pub total_clicks: i64,
    /// User-agent string → count. The empty user-agent is its own bucket.
    #[serde(rename = "user_agents")]
    pub by_user_agent: BTreeMap<String, i64>,
    /// `YYYY-MM-DD` → count.
    #[serde(rename = "daily_clicks")]
    pub by_day: BTreeMap<String, i64>,
    /// `YYYY-MM` → count.
    #[serde(rename = "monthly_clicks")]
    pub by_month: BTreeMap<String, i64>,
}
