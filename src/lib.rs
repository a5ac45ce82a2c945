//! Short aliases for URLs, with per-redirect click analytics.
//!
//! The engine is split into three storage-facing components, each a trait
//! implemented by [`db::SqliteStore`]:
//!
//! - [`store::UrlStore`] keeps the alias → target mapping,
//! - [`clicks::ClickRecorder`] appends one event per redirect,
//! - [`analytics::AnalyticsAggregator`] counts events by user-agent, day and month,
//!
//! and [`redirect::RedirectService`] composes the first two into the
//! redirect-and-track operation. [`app::router`] exposes all of it over HTTP.

use std::sync::Arc;

pub mod alias;
pub mod analytics;
pub mod app;
pub mod clicks;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod redirect;
pub mod store;

use alias::AliasGenerator;
use analytics::AnalyticsAggregator;
use db::SqliteStore;
use redirect::RedirectService;
use store::UrlStore;

// ── Shared application state ───────────────────────────────────────────────

pub struct AppState {
    pub store: Arc<dyn UrlStore>,
    pub analytics: Arc<dyn AnalyticsAggregator>,
    pub redirects: RedirectService,
    /// Seeded once at startup and shared by every save request.
    pub aliases: AliasGenerator,
    pub alias_length: usize,
}

impl AppState {
    pub fn new(store: SqliteStore, aliases: AliasGenerator, alias_length: usize) -> Self {
        let store = Arc::new(store);
        Self {
            store: store.clone(),
            analytics: store.clone(),
            redirects: RedirectService::new(store.clone(), store),
            aliases,
            alias_length,
        }
    }
}
