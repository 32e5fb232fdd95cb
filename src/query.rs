//! Query-string synchronization for filter state.
//!
//! The URL query string is a shared channel: this store owns a fixed set of
//! keys and must leave every other key untouched, because independently
//! developed features on the same page write their own. Decoding is purely
//! defensive; malformed or stale content is dropped, never surfaced as an
//! error. All access goes through an explicit store object rather than an
//! ambient global.

use crate::catalog::CdkType;
use crate::filter::FilterState;
use crate::language::Language;

pub const KEY_LANGUAGE: &str = "language";
pub const KEY_SUBMODULE: &str = "submodule";
pub const KEY_CDK_TYPE: &str = "cdkType";
pub const KEY_CDK_MAJOR: &str = "cdkMajor";
pub const KEY_FREE_TEXT: &str = "q";

/// Keys this store owns, in canonical serialization order. Case-sensitive.
pub const OWNED_KEYS: [&str; 5] = [
    KEY_LANGUAGE,
    KEY_SUBMODULE,
    KEY_CDK_TYPE,
    KEY_CDK_MAJOR,
    KEY_FREE_TEXT,
];

fn is_owned_key(key: &str) -> bool {
    OWNED_KEYS.contains(&key)
}

/// Parse the owned keys out of a query string.
///
/// Unknown keys are ignored; recognized keys with values that fail to parse
/// are dropped silently so a partially stale URL still yields a usable
/// state. A `cdkMajor` without a `cdkType` is dropped here too; membership
/// of the major in the type's version set needs catalog data and is the
/// controller's normalization step. A leading `?` is tolerated.
pub fn decode(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = FilterState::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            KEY_LANGUAGE => state.language = Language::try_from(value.as_ref()).ok(),
            KEY_SUBMODULE => state.submodule = Some(value.into_owned()),
            KEY_CDK_TYPE => state.cdk_type = CdkType::try_from(value.as_ref()).ok(),
            KEY_CDK_MAJOR => state.cdk_major = value.parse::<u32>().ok(),
            KEY_FREE_TEXT => state.free_text = Some(value.into_owned()),
            _ => {}
        }
    }
    if state.cdk_type.is_none() {
        state.cdk_major = None;
    }
    state
}

/// Serialize `state` into `existing`, rewriting only the owned keys.
///
/// Unrelated keys keep their relative order and encoding; owned keys are
/// re-emitted in canonical order, and absent fields are omitted entirely so
/// shared URLs stay minimal. The result carries no leading `?`.
pub fn encode(state: &FilterState, existing: &str) -> String {
    let existing = existing.strip_prefix('?').unwrap_or(existing);
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
        if !is_owned_key(key.as_ref()) {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
    }
    if let Some(language) = state.language {
        serializer.append_pair(KEY_LANGUAGE, language.as_str());
    }
    if let Some(submodule) = &state.submodule {
        serializer.append_pair(KEY_SUBMODULE, submodule);
    }
    if let Some(cdk_type) = state.cdk_type {
        serializer.append_pair(KEY_CDK_TYPE, cdk_type.as_str());
    }
    if let Some(major) = state.cdk_major {
        serializer.append_pair(KEY_CDK_MAJOR, &major.to_string());
    }
    if let Some(free_text) = &state.free_text {
        serializer.append_pair(KEY_FREE_TEXT, free_text);
    }
    serializer.finish()
}

/// How a query-string write should appear in browser history.
///
/// Filter refinements replace the current entry so back/forward moves over
/// navigation, not over every facet toggle; navigational actions push.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replace,
}

/// Seam to the external router/history mechanism. The engine only ever emits
/// whole query strings plus the mode they should be applied with.
pub trait History {
    fn navigate(&mut self, query: &str, mode: HistoryMode);
}

/// History double that records every navigation; useful for hosts without a
/// real router (tooling, tests, server-side rendering).
#[derive(Clone, Debug, Default)]
pub struct RecordingHistory {
    pub entries: Vec<(HistoryMode, String)>,
}

impl History for RecordingHistory {
    fn navigate(&mut self, query: &str, mode: HistoryMode) {
        self.entries.push((mode, query.to_string()));
    }
}

/// Process-scoped holder of the current query string.
///
/// Single-threaded, synchronous writes; last writer wins per key, which is
/// sufficient because every write is serialized on the one execution thread.
#[derive(Clone, Debug, Default)]
pub struct UrlState {
    query: String,
}

impl UrlState {
    pub fn new(initial: &str) -> Self {
        Self {
            query: initial.strip_prefix('?').unwrap_or(initial).to_string(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Merge-write the owned keys for `state` and report the write to the
    /// history seam. Nothing is emitted when the query is already current.
    /// Returns whether a write happened.
    pub fn sync(
        &mut self,
        state: &FilterState,
        mode: HistoryMode,
        history: &mut dyn History,
    ) -> bool {
        let next = encode(state, &self.query);
        if next == self.query {
            return false;
        }
        self.query = next;
        history.navigate(&self.query, mode);
        true
    }
}
