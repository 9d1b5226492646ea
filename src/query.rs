//! URL query-string round-tripping and outbound link construction.
//!
//! The grid itself never follows links; it only produces them as strings
//! for display adapters to surface.

use urlencoding::{decode, encode};

/// The view-state parameters carried in the page URL.
///
/// Empty filters and a zero skip are "no value" and are omitted when
/// encoding, so a default view keeps a clean URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub bv_filter: String,
    pub task_filter: String,
    pub skip: i64,
}

impl QueryParams {
    pub fn new(bv_filter: &str, task_filter: &str, skip: i64) -> Self {
        QueryParams {
            bv_filter: bv_filter.to_string(),
            task_filter: task_filter.to_string(),
            skip,
        }
    }

    /// Parse parameters out of a query string. Accepts a bare query
    /// ("a=b&c=d"), a leading '?', or a full URL; fragments are ignored.
    /// Unknown keys are skipped, `+` reads as an encoded space and a
    /// malformed skip value falls back to 0.
    pub fn parse(input: &str) -> QueryParams {
        let query = match input.split_once('?') {
            Some((_, query)) => query,
            None => input,
        };
        let query = query.split('#').next().unwrap_or("");

        let mut params = QueryParams::default();
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = value.replace('+', " ");
            let value = decode(&value).map(|v| v.into_owned()).unwrap_or(value);
            match key {
                "bv_filter" => params.bv_filter = value,
                "task_filter" => params.task_filter = value,
                "skip" => params.skip = value.parse().unwrap_or(0),
                _ => {}
            }
        }
        params
    }

    /// Encode as a query string, omitting empty/default values.
    pub fn encode(&self) -> String {
        let mut parts = Vec::new();
        if !self.bv_filter.is_empty() {
            parts.push(format!("bv_filter={}", encode(&self.bv_filter)));
        }
        if !self.task_filter.is_empty() {
            parts.push(format!("task_filter={}", encode(&self.task_filter)));
        }
        if self.skip != 0 {
            parts.push(format!("skip={}", self.skip));
        }
        parts.join("&")
    }

    /// Full href for these parameters against a base path. A default view
    /// yields the bare base path with no '?'.
    pub fn href(&self, base_url: &str) -> String {
        let query = self.encode();
        if query.is_empty() {
            base_url.to_string()
        } else {
            format!("{}?{}", base_url, query)
        }
    }
}

/// `/waterfall/<project>` — the grid's own base path.
pub fn waterfall_base(project: &str) -> String {
    format!("/waterfall/{}", project)
}

/// `/version/<id>`
pub fn version_link(version_id: &str) -> String {
    format!("/version/{}", version_id)
}

/// `/task/<id>`
pub fn task_link(task_id: &str) -> String {
    format!("/task/{}", task_id)
}

/// `/build/<id>`
pub fn build_link(build_id: &str) -> String {
    format!("/build/{}", build_id)
}

/// `/build_variant/<project>/<variantId>`
pub fn build_variant_link(project: &str, variant_id: &str) -> String {
    format!("/build_variant/{}/{}", project, variant_id)
}
