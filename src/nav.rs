//! Scoped documentation navigation.
//!
//! A package's docs are browsed either at the root or inside exactly one
//! submodule; there is no deeper nesting. The effective position is derived
//! from the validated filter state against the package's known submodule
//! set, so a stale or foreign submodule key in the URL degrades to root
//! instead of erroring.

use crate::catalog::FacetOption;
use crate::filter::{FilterState, match_submodules};
use serde::Serialize;

/// Identity of the package whose documentation is being browsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationContext {
    pub package_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub version: String,
}

/// Where the session currently is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavState {
    Root,
    Submodule(String),
}

impl NavState {
    pub fn submodule(&self) -> Option<&str> {
        match self {
            NavState::Root => None,
            NavState::Submodule(name) => Some(name),
        }
    }
}

/// Navigation rules for one package: its identity plus the ordered submodule
/// names the assembly/reflection provider reported. Consumed read-only.
#[derive(Clone, Debug)]
pub struct NavigationStack {
    context: NavigationContext,
    submodules: Vec<String>,
}

impl NavigationStack {
    pub fn new(context: NavigationContext, submodules: Vec<String>) -> Self {
        Self {
            context,
            submodules,
        }
    }

    pub fn context(&self) -> &NavigationContext {
        &self.context
    }

    /// The ordered submodule names, as supplied.
    pub fn submodules(&self) -> &[String] {
        &self.submodules
    }

    pub fn knows(&self, name: &str) -> bool {
        self.submodules.iter().any(|known| known == name)
    }

    /// Derive the effective position from a validated state. An unknown
    /// submodule is treated as root.
    pub fn state_of(&self, filters: &FilterState) -> NavState {
        match &filters.submodule {
            Some(name) if self.knows(name) => NavState::Submodule(name.clone()),
            _ => NavState::Root,
        }
    }

    /// Whether the back affordance applies; hosts hide it at root.
    pub fn can_go_back(&self, filters: &FilterState) -> bool {
        matches!(self.state_of(filters), NavState::Submodule(_))
    }

    /// Submodule search results for an in-progress filter string.
    pub fn submodule_options(&self, filter: &str) -> Vec<FacetOption> {
        match_submodules(filter, &self.submodules)
            .into_iter()
            .map(|name| FacetOption {
                value: name.to_string(),
                display: name.to_string(),
                count: None,
            })
            .collect()
    }
}
