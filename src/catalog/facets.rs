//! Sanitized facet index over catalog metadata.
//!
//! The index is built once per metadata snapshot and answers every facet
//! question from sanitized data: defective entries (negative counts, bogus
//! major versions, unknown framework keys) are logged as defects and degraded
//! to zero/absent rather than propagated, per the defensive posture of the
//! whole engine.

use crate::catalog::model::{ALL_CDK_TYPES, CatalogMetadata, CdkType};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// One selectable value of a facet, ready for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct FrameworkFacets {
    pkg_count: u64,
    major_versions: BTreeSet<u32>,
}

/// Facet data derived from one catalog metadata snapshot.
#[derive(Clone, Debug, Default)]
pub struct FacetIndex {
    frameworks: BTreeMap<CdkType, FrameworkFacets>,
}

impl FacetIndex {
    /// Sanitize raw metadata into a servable index.
    ///
    /// Missing entries mean zero facets; they are not defects. Entries that
    /// are structurally present but violate the data contract are.
    pub fn new(metadata: &CatalogMetadata) -> Self {
        let mut frameworks = BTreeMap::new();
        for (key, meta) in metadata {
            let Ok(cdk_type) = CdkType::try_from(key.as_str()) else {
                warn!(framework = %key, "skipping unrecognized framework key in catalog metadata");
                continue;
            };
            let pkg_count = if meta.pkg_count < 0 {
                warn!(
                    framework = %key,
                    pkg_count = meta.pkg_count,
                    "negative package count in catalog metadata, treating as zero"
                );
                0
            } else {
                meta.pkg_count as u64
            };
            let mut major_versions = BTreeSet::new();
            for &major in &meta.major_versions {
                match u32::try_from(major) {
                    Ok(value) if value > 0 => {
                        major_versions.insert(value);
                    }
                    _ => {
                        warn!(
                            framework = %key,
                            major_version = major,
                            "dropping non-positive major version from catalog metadata"
                        );
                    }
                }
            }
            frameworks.insert(
                cdk_type,
                FrameworkFacets {
                    pkg_count,
                    major_versions,
                },
            );
        }
        Self { frameworks }
    }

    /// Type facet options in canonical declaration order.
    ///
    /// Frameworks with no packages are omitted entirely; the "any" sentinel
    /// is the caller's to prepend.
    pub fn type_facets(&self) -> Vec<FacetOption> {
        ALL_CDK_TYPES
            .iter()
            .filter_map(|cdk_type| {
                let facets = self.frameworks.get(cdk_type)?;
                if facets.pkg_count < 1 {
                    return None;
                }
                Some(FacetOption {
                    value: cdk_type.as_str().to_string(),
                    display: cdk_type.display_name().to_string(),
                    count: Some(facets.pkg_count),
                })
            })
            .collect()
    }

    /// Major-version facet options for the selected type, ascending.
    ///
    /// Absent (not empty) when the type is unknown or the candidate set has
    /// fewer than two members; a single redundant choice is suppressed
    /// entirely rather than shown disabled.
    pub fn major_facets(&self, selected_type: CdkType) -> Option<Vec<FacetOption>> {
        let facets = self.frameworks.get(&selected_type)?;
        if facets.major_versions.len() < 2 {
            return None;
        }
        Some(
            facets
                .major_versions
                .iter()
                .map(|major| FacetOption {
                    value: major.to_string(),
                    display: format!("{} v{}", selected_type.display_name(), major),
                    count: None,
                })
                .collect(),
        )
    }

    /// Whether the type is offered as a facet at all.
    pub fn is_selectable_type(&self, cdk_type: CdkType) -> bool {
        self.frameworks
            .get(&cdk_type)
            .is_some_and(|facets| facets.pkg_count >= 1)
    }

    /// Whether `major` belongs to the type's known major-version set.
    ///
    /// Membership is checked against the full sanitized set, not the
    /// displayed facet list: suppression of single-member sets is a
    /// presentation rule and does not invalidate the value itself.
    pub fn is_valid_major(&self, cdk_type: CdkType, major: u32) -> bool {
        self.frameworks
            .get(&cdk_type)
            .is_some_and(|facets| facets.major_versions.contains(&major))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::FrameworkMeta;

    fn metadata(entries: &[(&str, i64, &[i64])]) -> CatalogMetadata {
        entries
            .iter()
            .map(|(key, count, majors)| {
                (
                    key.to_string(),
                    FrameworkMeta {
                        pkg_count: *count,
                        major_versions: majors.to_vec(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn empty_frameworks_are_omitted() {
        let index = FacetIndex::new(&metadata(&[
            ("awscdk", 5, &[1, 2]),
            ("cdk8s", 0, &[]),
        ]));
        let types = index.type_facets();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].value, "awscdk");
        assert_eq!(types[0].count, Some(5));
    }

    #[test]
    fn type_facets_follow_declaration_order() {
        // BTreeMap iteration would yield awscdk, cdk8s, cdktf anyway; feed
        // counts that differ so a sort-by-count bug would also show up.
        let index = FacetIndex::new(&metadata(&[
            ("cdktf", 9, &[]),
            ("awscdk", 1, &[]),
            ("cdk8s", 4, &[]),
        ]));
        let order: Vec<_> = index.type_facets().into_iter().map(|o| o.value).collect();
        assert_eq!(order, vec!["awscdk", "cdk8s", "cdktf"]);
    }

    #[test]
    fn single_major_version_is_suppressed() {
        let index = FacetIndex::new(&metadata(&[("awscdk", 5, &[1])]));
        assert_eq!(index.major_facets(CdkType::Awscdk), None);
    }

    #[test]
    fn two_major_versions_are_offered_ascending() {
        let index = FacetIndex::new(&metadata(&[("awscdk", 5, &[2, 1])]));
        let majors = index.major_facets(CdkType::Awscdk).expect("two majors");
        assert_eq!(majors.len(), 2);
        assert_eq!(majors[0].value, "1");
        assert_eq!(majors[0].display, "AWS CDK v1");
        assert_eq!(majors[1].value, "2");
    }

    #[test]
    fn unknown_type_degrades_to_absent() {
        let index = FacetIndex::new(&metadata(&[("awscdk", 5, &[1, 2])]));
        assert_eq!(index.major_facets(CdkType::Cdktf), None);
        assert!(!index.is_selectable_type(CdkType::Cdktf));
    }

    #[test]
    fn defective_metadata_degrades_instead_of_erroring() {
        let index = FacetIndex::new(&metadata(&[
            ("awscdk", -3, &[1, 2]),
            ("cdk8s", 7, &[0, -1, 2, 3]),
            ("terraform", 4, &[1]),
        ]));
        // Negative count treated as zero, so the framework is not offered.
        assert!(!index.is_selectable_type(CdkType::Awscdk));
        // Its majors survive independently of the count defect.
        assert!(index.is_valid_major(CdkType::Awscdk, 2));
        // Non-positive majors dropped, valid ones kept.
        let majors = index.major_facets(CdkType::Cdk8s).expect("two valid majors");
        assert_eq!(
            majors.iter().map(|o| o.value.as_str()).collect::<Vec<_>>(),
            vec!["2", "3"]
        );
        // Unrecognized framework key skipped entirely.
        assert_eq!(index.type_facets().len(), 1);
    }

    #[test]
    fn validity_ignores_presentation_suppression() {
        let index = FacetIndex::new(&metadata(&[("cdktf", 2, &[1])]));
        assert_eq!(index.major_facets(CdkType::Cdktf), None);
        assert!(index.is_valid_major(CdkType::Cdktf, 1));
        assert!(!index.is_valid_major(CdkType::Cdktf, 2));
    }
}
