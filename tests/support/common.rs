#![allow(dead_code)]

use hubstate::catalog::{CatalogMetadata, FrameworkMeta};
use hubstate::nav::{NavigationContext, NavigationStack};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

pub fn catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("catalogs/hub_catalog_v1.json")
}

pub fn schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/hub_catalog.schema.json")
}

// Metadata mirroring the bundled sample: two awscdk majors, one cdk8s major,
// an empty cdktf entry.
pub fn sample_metadata() -> CatalogMetadata {
    [
        (
            "awscdk".to_string(),
            FrameworkMeta {
                pkg_count: 1284,
                major_versions: vec![1, 2],
            },
        ),
        (
            "cdk8s".to_string(),
            FrameworkMeta {
                pkg_count: 97,
                major_versions: vec![2],
            },
        ),
        (
            "cdktf".to_string(),
            FrameworkMeta {
                pkg_count: 0,
                major_versions: vec![],
            },
        ),
    ]
    .into_iter()
    .collect()
}

pub fn sample_nav() -> NavigationStack {
    NavigationStack::new(
        NavigationContext {
            package_id: "aws-cdk-lib".to_string(),
            scope: None,
            version: "2.189.1".to_string(),
        },
        vec![
            "aws_s3".to_string(),
            "aws_ec2".to_string(),
            "aws_s3_deployment".to_string(),
        ],
    )
}

// Writes a catalog document to a temp file the loader can consume.
pub fn write_catalog(document: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp catalog file");
    file.write_all(document.to_string().as_bytes())
        .expect("write temp catalog");
    file.flush().expect("flush temp catalog");
    file
}
