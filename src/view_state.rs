//! Mutable view state and its synchronization seams.
//!
//! `ViewState` owns everything the user can change: the collapsed flag,
//! both filters, the commit-message toggle and the pagination offset. It
//! talks to the outside world through two injected capabilities instead of
//! platform globals — a [`PrefStore`] for durable preferences and a
//! [`UrlState`] for query-parameter round-tripping — so the whole component
//! unit-tests against in-memory fakes.

use crate::model::Snapshot;
use crate::query::QueryParams;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Durable-preference key for the collapsed/expanded default.
pub const COLLAPSED_PREF_KEY: &str = "collapsed";

/// Durable string-keyed preference storage (the localStorage seam).
/// Persistence is best-effort; a failing backend degrades to in-memory.
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// URL query-parameter synchronization (the location/history seam).
pub trait UrlState {
    fn read(&self) -> QueryParams;
    fn write(&mut self, params: &QueryParams);
}

/// In-memory preference store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryPrefStore {
    values: HashMap<String, String>,
}

impl MemoryPrefStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryPrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// File-backed preference store: a flat JSON map in the config directory.
/// A missing or malformed file starts empty; writes flush the whole map.
#[derive(Debug)]
pub struct FilePrefStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FilePrefStore {
    pub fn load(path: PathBuf) -> Self {
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    fn flush(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(content) = serde_json::to_string_pretty(&self.values) {
            let _ = fs::write(&self.path, content);
        }
    }
}

impl PrefStore for FilePrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.flush();
    }
}

/// In-memory URL state holding a base path and the current parameters.
/// The TUI uses this to surface the would-be URL in its footer; tests use
/// it to observe writes.
#[derive(Debug, Default)]
pub struct MemoryUrlState {
    base_url: String,
    params: QueryParams,
}

impl MemoryUrlState {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            params: QueryParams::default(),
        }
    }

    pub fn with_params(base_url: &str, params: QueryParams) -> Self {
        Self {
            base_url: base_url.to_string(),
            params,
        }
    }

    /// The full URL for the current parameters.
    pub fn current_url(&self) -> String {
        self.params.href(&self.base_url)
    }
}

impl UrlState for MemoryUrlState {
    fn read(&self) -> QueryParams {
        self.params.clone()
    }

    fn write(&mut self, params: &QueryParams) {
        self.params = params.clone();
    }
}

/// Pagination controls recomputed on every data load — never persisted.
///
/// Both filters are preserved on both navigation URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControls {
    pub prev_skip: i64,
    pub next_skip: i64,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub prev_params: QueryParams,
    pub next_params: QueryParams,
}

/// The UI state for one mounted waterfall view.
pub struct ViewState {
    collapsed: bool,
    build_variant_filter: String,
    task_filter: String,
    shorten_commit_message: bool,
    current_skip: i64,
    store: Box<dyn PrefStore>,
    url: Box<dyn UrlState>,
}

impl ViewState {
    /// Mount the view state: restore the collapsed flag from durable
    /// storage and the filters/skip from the URL.
    pub fn new(store: Box<dyn PrefStore>, url: Box<dyn UrlState>) -> Self {
        let collapsed = store.get(COLLAPSED_PREF_KEY).as_deref() == Some("true");
        let params = url.read();
        Self {
            collapsed,
            build_variant_filter: params.bv_filter,
            task_filter: params.task_filter,
            shorten_commit_message: true,
            current_skip: params.skip,
            store,
            url,
        }
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn build_variant_filter(&self) -> &str {
        &self.build_variant_filter
    }

    pub fn task_filter(&self) -> &str {
        &self.task_filter
    }

    pub fn shorten_commit_message(&self) -> bool {
        self.shorten_commit_message
    }

    pub fn current_skip(&self) -> i64 {
        self.current_skip
    }

    /// Set the collapsed flag and persist it.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
        self.store
            .set(COLLAPSED_PREF_KEY, if collapsed { "true" } else { "false" });
    }

    pub fn toggle_collapsed(&mut self) {
        self.set_collapsed(!self.collapsed);
    }

    pub fn set_build_variant_filter(&mut self, filter: &str) {
        self.build_variant_filter = filter.to_string();
        self.sync_url();
    }

    pub fn set_task_filter(&mut self, filter: &str) {
        self.task_filter = filter.to_string();
        self.sync_url();
    }

    /// Change the pagination offset from a user action; synced to the URL.
    pub fn set_skip(&mut self, skip: i64) {
        self.current_skip = skip;
        self.sync_url();
    }

    /// Adopt the server-reported offset on a data load, without treating
    /// it as a user navigation (no URL write).
    pub fn set_skip_from_data(&mut self, skip: i64) {
        self.current_skip = skip;
    }

    pub fn toggle_shorten_commit_message(&mut self) {
        self.shorten_commit_message = !self.shorten_commit_message;
    }

    /// Current URL parameters for this state.
    pub fn query_params(&self) -> QueryParams {
        QueryParams::new(
            &self.build_variant_filter,
            &self.task_filter,
            self.current_skip,
        )
    }

    fn sync_url(&mut self) {
        let params = self.query_params();
        self.url.write(&params);
    }

    /// Recompute pagination controls against a freshly loaded snapshot.
    pub fn page_controls(&self, snapshot: &Snapshot) -> PageControls {
        let prev_skip = self.current_skip - snapshot.previous_page_count;
        let next_skip = self.current_skip + snapshot.versions_on_page();

        PageControls {
            prev_skip,
            next_skip,
            prev_enabled: self.current_skip > 0,
            next_enabled: next_skip < snapshot.total_versions,
            prev_params: QueryParams::new(
                &self.build_variant_filter,
                &self.task_filter,
                prev_skip.max(0),
            ),
            next_params: QueryParams::new(
                &self.build_variant_filter,
                &self.task_filter,
                next_skip,
            ),
        }
    }
}
