pub mod catalog;
pub mod filter;
pub mod language;
pub mod nav;
pub mod query;
pub mod session;

pub use catalog::{
    ALL_CDK_TYPES, CatalogDocument, CatalogMetadata, CdkType, FacetIndex, FacetOption,
    FrameworkMeta, load_catalog_from_path,
};
pub use filter::{
    FilterAction, FilterController, FilterState, ValidationContext, match_submodules, normalize,
    reduce,
};
pub use language::{ALL_LANGUAGES, Language, LanguageSpec, resolve};
pub use nav::{NavState, NavigationContext, NavigationStack};
pub use query::{History, HistoryMode, OWNED_KEYS, RecordingHistory, UrlState, decode, encode};
pub use session::Session;

/// Split a comma- or whitespace-separated list into trimmed entries.
///
/// Accepts the mixed separators tooling tends to produce; empty entries are
/// dropped.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
