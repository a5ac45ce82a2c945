use std::sync::Arc;

use crate::{
    clicks::ClickRecorder,
    error::StoreError,
    models::LinkId,
    store::UrlStore,
};

/// Receives click-recording failures that the redirect path swallows.
pub trait RecordFailureReporter: Send + Sync + 'static {
    fn report(&self, alias: &str, link_id: LinkId, err: &StoreError);
}

/// Logs swallowed failures at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl RecordFailureReporter for TracingReporter {
    fn report(&self, alias: &str, link_id: LinkId, err: &StoreError) {
        tracing::error!(alias, link_id, error = %err, "failed to save analytics");
    }
}

/// Resolve-and-track: looks up an alias and records the click.
///
/// A failed click write never changes the outcome of the redirect; it is
/// handed to the [`RecordFailureReporter`] instead.
#[derive(Clone)]
pub struct RedirectService {
    store: Arc<dyn UrlStore>,
    recorder: Arc<dyn ClickRecorder>,
    reporter: Arc<dyn RecordFailureReporter>,
}

impl RedirectService {
    pub fn new(store: Arc<dyn UrlStore>, recorder: Arc<dyn ClickRecorder>) -> Self {
        Self::with_reporter(store, recorder, Arc::new(TracingReporter))
    }

    pub fn with_reporter(
        store: Arc<dyn UrlStore>,
        recorder: Arc<dyn ClickRecorder>,
        reporter: Arc<dyn RecordFailureReporter>,
    ) -> Self {
        Self {
            store,
            recorder,
            reporter,
        }
    }

    /// Return the target of `alias`, recording one click on the way.
    pub async fn redirect(&self, alias: &str, user_agent: &str) -> Result<String, StoreError> {
        let link = self.store.resolve(alias).await?;

        if let Err(err) = self.recorder.record(link.id, user_agent).await {
            self.reporter.report(alias, link.id, &err);
        }

        Ok(link.target)
    }
}
