//! Catalog metadata wiring.
//!
//! This module wraps externally supplied catalog metadata (in-memory from the
//! search backend, or a document on disk such as `catalogs/hub_catalog_v1.json`)
//! so the rest of the engine consumes one validated snapshot. Types here
//! mirror the document fields; callers use [`FacetIndex`] for facet queries.

pub mod facets;
pub mod model;

pub use facets::{FacetIndex, FacetOption};
pub use model::{
    ALL_CDK_TYPES, CATALOG_SCHEMA_PATH, CATALOG_SCHEMA_VERSION, CatalogDocument, CatalogInfo,
    CatalogMetadata, CdkType, DEFAULT_CATALOG_PATH, FrameworkMeta, load_catalog_from_path,
    validate_against_schema,
};
