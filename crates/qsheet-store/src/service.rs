//! Sheet state container.
//!
//! `SheetService` owns the live [`Sheet`], load status, and the one-slot undo
//! buffer. Tree actions are implemented as `impl SheetService` blocks in
//! [`crate::actions`].

use std::borrow::Cow;
use std::sync::Arc;
use std::time::{Duration, Instant};

use qsheet_config::SheetConfig;
use qsheet_core::entities::DEFAULT_SLUG;
use qsheet_core::{LoadSource, Sheet, Topic};
use qsheet_storage::LocalStore;
use qsheet_tree::{DeletedRecord, UndoBuffer, filter_topics};

use crate::error::StoreError;
use crate::gateway::{LoadOptions, LoadOutcome, PersistenceGateway};

/// Default time a deletion stays undoable.
pub const DEFAULT_UNDO_TTL: Duration = Duration::from_secs(5);

/// Owns the live sheet and applies every action to it.
///
/// The gateway is shared behind an `Arc` so a load can run against it while
/// the service state stays readable; see [`Self::begin_load`].
///
/// Every mutating action follows this protocol:
/// 1. Compute the new tree with the matching `qsheet-tree` function
/// 2. Replace the in-memory sheet
/// 3. Persist the full sheet (best effort: a failed write is logged and the
///    in-memory change is kept)
#[derive(Debug)]
pub struct SheetService {
    sheet: Sheet,
    is_loading: bool,
    load_error: Option<String>,
    load_source: LoadSource,
    undo: UndoBuffer,
    undo_deadline: Option<Instant>,
    undo_ttl: Duration,
    default_slug: String,
    gateway: Arc<PersistenceGateway>,
}

impl SheetService {
    /// Create a service around `gateway`, starting from an empty sheet.
    #[must_use]
    pub fn new(gateway: PersistenceGateway, undo_ttl: Duration) -> Self {
        Self {
            sheet: Sheet::default(),
            is_loading: false,
            load_error: None,
            load_source: LoadSource::Idle,
            undo: UndoBuffer::new(),
            undo_deadline: None,
            undo_ttl,
            default_slug: DEFAULT_SLUG.to_string(),
            gateway: Arc::new(gateway),
        }
    }

    /// Build a service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the remote client cannot be built.
    pub fn from_config(config: &SheetConfig) -> Result<Self, StoreError> {
        let gateway = PersistenceGateway::from_config(config)?;
        let mut service = Self::new(gateway, config.general.undo_ttl());
        service.default_slug.clone_from(&config.general.default_slug);
        Ok(service)
    }

    /// A service with no remote endpoint, persisting into `local`.
    #[must_use]
    pub fn offline(local: LocalStore) -> Self {
        let namespace = qsheet_config::StorageConfig::default().namespace;
        Self::new(PersistenceGateway::new(None, local, namespace), DEFAULT_UNDO_TTL)
    }

    // ── State ──────────────────────────────────────────────────────

    #[must_use]
    pub const fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    #[must_use]
    pub fn topics(&self) -> &[Arc<Topic>] {
        &self.sheet.topics
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Advisory message from the last load, if the remote fetch failed.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    #[must_use]
    pub const fn load_source(&self) -> LoadSource {
        self.load_source
    }

    /// User-facing status line for the last load.
    #[must_use]
    pub const fn status_message(&self) -> Option<&'static str> {
        self.load_source.status_message()
    }

    #[must_use]
    pub const fn last_deleted(&self) -> Option<&DeletedRecord> {
        self.undo.last_deleted()
    }

    /// When the current undo record expires.
    #[must_use]
    pub const fn undo_deadline(&self) -> Option<Instant> {
        self.undo_deadline
    }

    #[must_use]
    pub const fn gateway(&self) -> &Arc<PersistenceGateway> {
        &self.gateway
    }

    // ── Loading ────────────────────────────────────────────────────

    /// Replace the live sheet with the one for `slug`.
    ///
    /// Never fails: remote problems are reported through [`Self::load_error`].
    /// Concurrent loads are not deduplicated. Callers that need to read the
    /// state while the fetch is in flight drive [`Self::begin_load`] and
    /// [`Self::finish_load`] themselves.
    pub async fn load(&mut self, slug: &str, force_refresh: bool) -> LoadSource {
        let gateway = self.begin_load();
        let outcome = gateway.load(slug, LoadOptions { force_refresh }).await;
        self.finish_load(outcome)
    }

    /// Mark a load as in flight and hand out the gateway to run it against.
    pub fn begin_load(&mut self) -> Arc<PersistenceGateway> {
        self.is_loading = true;
        self.load_error = None;
        Arc::clone(&self.gateway)
    }

    /// Install the result of a load started with [`Self::begin_load`].
    ///
    /// The undo buffer is cleared since its record belongs to the old tree.
    pub fn finish_load(&mut self, outcome: LoadOutcome) -> LoadSource {
        self.is_loading = false;
        self.sheet = outcome.sheet;
        self.load_source = outcome.source;
        self.load_error = outcome.warning;
        self.clear_undo();
        tracing::debug!(
            slug = %self.sheet.slug,
            source = %self.load_source,
            topics = self.sheet.topics.len(),
            "sheet loaded"
        );
        self.load_source
    }

    /// Load the configured default sheet.
    pub async fn load_default(&mut self) -> LoadSource {
        let slug = self.default_slug.clone();
        self.load(&slug, false).await
    }

    /// Re-fetch the current sheet from the remote endpoint.
    pub async fn refresh(&mut self) -> LoadSource {
        let slug = self.sheet.slug.clone();
        self.load(&slug, true).await
    }

    /// Remove the durable copy of the current sheet. The in-memory sheet stays.
    pub fn clear_local(&self) -> bool {
        self.gateway.clear(&self.sheet.slug).unwrap_or_else(|error| {
            tracing::warn!(slug = %self.sheet.slug, %error, "failed to clear local copy");
            false
        })
    }

    // ── Search ─────────────────────────────────────────────────────

    /// Read-only view of the questions matching `query`.
    #[must_use]
    pub fn filtered(&self, query: &str, exact_match_only: bool) -> Cow<'_, [Arc<Topic>]> {
        filter_topics(&self.sheet.topics, query, exact_match_only)
    }

    /// Whether `query` narrows the view. Reorder and move actions take
    /// unfiltered indices, so callers should disable them while this holds.
    #[must_use]
    pub fn is_filter_active(query: &str) -> bool {
        qsheet_tree::is_filter_active(query)
    }

    // ── Undo ───────────────────────────────────────────────────────

    /// Restore the last deleted item. Returns whether the tree changed.
    pub fn undo_delete(&mut self) -> bool {
        self.undo_deadline = None;
        let next = owned(self.undo.restore(&self.sheet.topics));
        self.apply(next)
    }

    /// Drop the undo record without restoring it.
    pub fn clear_undo(&mut self) {
        self.undo.clear();
        self.undo_deadline = None;
    }

    /// Drop the undo record if its deadline has passed at `now`.
    ///
    /// The deadline travels with the record, so a newer deletion is never
    /// cleared by an older one's expiry.
    pub fn expire_undo(&mut self, now: Instant) -> bool {
        if self.undo_deadline.is_some_and(|deadline| now >= deadline) {
            self.clear_undo();
            return true;
        }
        false
    }

    pub(crate) fn record_deletion(&mut self, record: DeletedRecord) {
        tracing::debug!(kind = %record.kind(), id = record.id(), "deletion recorded for undo");
        self.undo.record_deletion(record);
        self.undo_deadline = Some(Instant::now() + self.undo_ttl);
    }

    // ── Commit ─────────────────────────────────────────────────────

    /// Replace the whole topic list.
    pub fn set_topics(&mut self, topics: Vec<Arc<Topic>>) {
        self.commit(topics);
    }

    /// Commit `next` when it holds a changed tree. Returns whether it did.
    pub(crate) fn apply(&mut self, next: Option<Vec<Arc<Topic>>>) -> bool {
        match next {
            Some(topics) => {
                self.commit(topics);
                true
            }
            None => false,
        }
    }

    pub(crate) fn commit(&mut self, topics: Vec<Arc<Topic>>) {
        self.sheet.topics = topics;
        self.persist();
    }

    fn persist(&self) {
        if let Err(error) = self.gateway.save(&self.sheet) {
            tracing::warn!(
                slug = %self.sheet.slug,
                %error,
                "failed to persist sheet; keeping in-memory state"
            );
        }
    }
}

/// The changed tree, or `None` when the operation left it untouched.
pub(crate) fn owned<T: Clone>(next: Cow<'_, [T]>) -> Option<Vec<T>> {
    match next {
        Cow::Owned(items) => Some(items),
        Cow::Borrowed(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seeded_service, test_service};
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_idle_and_empty() {
        let svc = test_service();
        assert_eq!(svc.load_source(), LoadSource::Idle);
        assert!(svc.topics().is_empty());
        assert!(!svc.is_loading());
        assert_eq!(svc.status_message(), None);
    }

    #[test]
    fn set_topics_persists_full_sheet() {
        let mut svc = test_service();
        let source = seeded_service();
        svc.set_topics(source.topics().to_vec());

        let stored = svc.gateway().read_local(&svc.sheet().slug).unwrap().unwrap();
        assert_eq!(stored, *svc.sheet());
    }

    #[test]
    fn expiry_only_after_deadline() {
        let mut svc = seeded_service();
        let topic_id = svc.topics()[0].id.clone();
        assert!(svc.delete_topic(&topic_id));
        let deadline = svc.undo_deadline().unwrap();

        assert!(!svc.expire_undo(Instant::now()));
        assert!(svc.last_deleted().is_some());

        assert!(svc.expire_undo(deadline));
        assert!(svc.last_deleted().is_none());
        assert!(svc.undo_deadline().is_none());
        assert!(!svc.undo_delete());
    }

    #[test]
    fn newer_deletion_outlives_older_deadline() {
        let mut svc = seeded_service();
        let first = svc.topics()[0].id.clone();
        let second = svc.topics()[1].id.clone();

        assert!(svc.delete_topic(&first));
        let first_deadline = svc.undo_deadline().unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert!(svc.delete_topic(&second));
        let second_deadline = svc.undo_deadline().unwrap();
        assert!(second_deadline > first_deadline);

        // The timer armed for the first deletion fires.
        assert!(!svc.expire_undo(first_deadline));
        assert_eq!(svc.last_deleted().map(DeletedRecord::id), Some(second.as_str()));
    }

    #[tokio::test]
    async fn loading_flag_is_visible_while_fetch_runs() {
        let mut svc = seeded_service();
        assert!(!svc.is_loading());

        let gateway = svc.begin_load();
        assert!(svc.is_loading());
        assert_eq!(svc.load_error(), None);
        // State stays readable while the fetch is pending.
        assert_eq!(svc.topics().len(), 2);

        let outcome = gateway.load("local-sheet", LoadOptions::default()).await;
        assert!(svc.is_loading());

        assert_eq!(svc.finish_load(outcome), LoadSource::Local);
        assert!(!svc.is_loading());
        assert_eq!(svc.topics().len(), 2);
    }

    #[test]
    fn filtered_view_leaves_state_alone() {
        let svc = seeded_service();
        let before = svc.topics().to_vec();
        let view = svc.filtered("binary search", true);
        assert_eq!(qsheet_tree::filter::count_questions(&view), 1);
        assert!(matches!(svc.filtered("  ", false), Cow::Borrowed(_)));
        assert_eq!(svc.topics(), before.as_slice());
        assert!(SheetService::is_filter_active("sum"));
    }

    #[test]
    fn clear_local_removes_only_durable_copy() {
        let mut svc = seeded_service();
        let id = svc.topics()[0].id.clone();
        svc.edit_topic(&id, "Renamed");
        assert!(svc.clear_local());
        assert!(svc.gateway().read_local(&svc.sheet().slug).unwrap().is_none());
        assert_eq!(svc.topics()[0].title, "Renamed");
        assert!(!svc.clear_local());
    }
}
