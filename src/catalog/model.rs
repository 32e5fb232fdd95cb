//! Catalog document model and loader.
//!
//! Catalog metadata normally arrives in-memory from the search backend; for
//! tooling and tests it can also be loaded from a JSON document on disk (for
//! example `catalogs/hub_catalog_v1.json`). Disk documents are validated
//! against the bundled JSON Schema and an allowed `schema_version` set so
//! helper binaries cannot silently consume a mismatched catalog.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Version marker for catalog documents on disk.
pub const CATALOG_SCHEMA_VERSION: &str = "hub_catalog_v1";

/// Default relative path to the bundled sample catalog.
pub const DEFAULT_CATALOG_PATH: &str = "catalogs/hub_catalog_v1.json";

/// Relative path to the JSON Schema enforced on catalog documents.
pub const CATALOG_SCHEMA_PATH: &str = "schema/hub_catalog.schema.json";

/// The construct frameworks a package can target; the primary facet.
///
/// Declaration order is the canonical facet order and is deliberately not
/// alphabetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CdkType {
    Awscdk,
    Cdk8s,
    Cdktf,
}

/// Canonical declaration order of the type facet.
pub const ALL_CDK_TYPES: [CdkType; 3] = [CdkType::Awscdk, CdkType::Cdk8s, CdkType::Cdktf];

impl CdkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CdkType::Awscdk => "awscdk",
            CdkType::Cdk8s => "cdk8s",
            CdkType::Cdktf => "cdktf",
        }
    }

    /// Human-facing facet label.
    pub fn display_name(&self) -> &'static str {
        match self {
            CdkType::Awscdk => "AWS CDK",
            CdkType::Cdk8s => "CDK8s",
            CdkType::Cdktf => "CDKTF",
        }
    }
}

impl TryFrom<&str> for CdkType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "awscdk" => Ok(CdkType::Awscdk),
            "cdk8s" => Ok(CdkType::Cdk8s),
            "cdktf" => Ok(CdkType::Cdktf),
            _ => Err(()),
        }
    }
}

/// Aggregate counts and version families for one framework, as supplied.
///
/// Fields are signed on purpose: a defective producer may emit negative
/// counts or bogus version numbers, and the document should still parse so
/// the defect can be logged and degraded instead of surfacing an error.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FrameworkMeta {
    pub pkg_count: i64,
    #[serde(default)]
    pub major_versions: Vec<i64>,
}

/// Raw catalog metadata: framework key to aggregate meta.
///
/// Keys are strings rather than [`CdkType`] so unrecognized entries survive
/// parsing and can be reported during sanitization.
pub type CatalogMetadata = BTreeMap<String, FrameworkMeta>;

#[derive(Clone, Debug, Deserialize)]
/// Identity block of a catalog document.
pub struct CatalogInfo {
    pub key: String,
    pub title: String,
}

#[derive(Clone, Debug, Deserialize)]
/// A full catalog document as stored under `catalogs/`.
pub struct CatalogDocument {
    pub schema_version: String,
    pub catalog: CatalogInfo,
    #[serde(default)]
    pub construct_frameworks: CatalogMetadata,
}

/// Parse a catalog document from disk and verify its version marker.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogDocument> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let document: CatalogDocument = serde_json::from_str(&data)
        .with_context(|| format!("parsing catalog {}", path.display()))?;

    if !allowed_schema_versions().contains(&document.schema_version) {
        bail!(
            "catalog schema_version '{}' not in allowed set {:?}",
            document.schema_version,
            allowed_schema_versions()
        );
    }
    validate_catalog_info(&document.catalog)?;
    Ok(document)
}

/// Validate a raw JSON catalog document against the bundled schema.
///
/// Used by the CLI before deserializing; schema failures are fatal there,
/// unlike data-level defects which sanitization absorbs.
pub fn validate_against_schema(document: &Value, schema_path: &Path) -> Result<()> {
    let schema: Value = serde_json::from_str(
        &fs::read_to_string(schema_path)
            .with_context(|| format!("reading catalog schema {}", schema_path.display()))?,
    )
    .with_context(|| format!("parsing catalog schema {}", schema_path.display()))?;

    // Compiled validators borrow the schema document; the handful of loads a
    // process performs makes leaking the value the simplest sound lifetime.
    let schema_static: &'static Value = Box::leak(Box::new(schema));
    let compiled = jsonschema::JSONSchema::compile(schema_static)
        .with_context(|| format!("compiling catalog schema {}", schema_path.display()))?;
    if let Err(errors) = compiled.validate(document) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!("catalog failed schema validation:\n{}", details);
    }
    Ok(())
}

pub fn allowed_schema_versions() -> BTreeSet<String> {
    let mut versions = BTreeSet::new();
    versions.insert(CATALOG_SCHEMA_VERSION.to_string());
    versions
}

fn validate_catalog_info(info: &CatalogInfo) -> Result<()> {
    if info.key.is_empty() {
        bail!("catalog.key must not be empty");
    }
    if !info
        .key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!("catalog.key must match ^[A-Za-z0-9_.-]+$, got {}", info.key);
    }
    if info.title.trim().is_empty() {
        bail!("catalog.title must not be empty");
    }
    Ok(())
}
