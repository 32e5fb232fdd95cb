//! Filter state, actions, and the controller that owns them.
//!
//! All mutation funnels through a pure reducer so cascading invalidation is
//! unit-testable without a UI harness: `(state, action, context) -> state`,
//! no rendering concern, no hidden inputs. The controller wraps the reducer
//! with a commit-then-notify contract; subscribers only ever see validated
//! snapshots, never an intermediate state where a dependent facet violates
//! its invariant.

use crate::catalog::{CdkType, FacetIndex};
use crate::language::{Language, LanguageSpec};
use crate::query;
use serde::Serialize;

/// The validated selection snapshot. Absent fields mean "no constraint".
///
/// Invariant: `cdk_major` is only ever set alongside a `cdk_type` whose
/// major-version set contains it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdk_type: Option<CdkType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdk_major: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submodule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

/// One atomic state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterAction {
    SetCdkType(Option<CdkType>),
    SetCdkMajor(Option<u32>),
    SetLanguage(Option<Language>),
    SetFreeText(Option<String>),
    SelectSubmodule(String),
    ReturnToRoot,
}

/// Everything a transition validates against: the facet index derived from
/// catalog metadata, the package's known submodule set, and the language
/// spec. Snapshot-consistent for the duration of a render cycle.
#[derive(Clone, Copy, Debug)]
pub struct ValidationContext<'a> {
    pub facets: &'a FacetIndex,
    pub submodules: &'a [String],
    pub languages: &'a LanguageSpec,
}

impl<'a> ValidationContext<'a> {
    fn knows_submodule(&self, name: &str) -> bool {
        self.submodules.iter().any(|known| known == name)
    }
}

/// Apply one action, returning the resulting state.
///
/// An action carrying a value the context does not recognize returns the
/// input unchanged; callers detect rejection only by observing that nothing
/// changed. Cascades (clearing a major that the newly selected type does not
/// offer) happen inside the same call.
pub fn reduce(
    state: &FilterState,
    action: &FilterAction,
    ctx: &ValidationContext<'_>,
) -> FilterState {
    let mut next = state.clone();
    match action {
        FilterAction::SetCdkType(Some(cdk_type)) => {
            if !ctx.facets.is_selectable_type(*cdk_type) {
                return next;
            }
            next.cdk_type = Some(*cdk_type);
            next.cdk_major = next
                .cdk_major
                .filter(|major| ctx.facets.is_valid_major(*cdk_type, *major));
        }
        FilterAction::SetCdkType(None) => {
            next.cdk_type = None;
            next.cdk_major = None;
        }
        FilterAction::SetCdkMajor(Some(major)) => {
            let valid = next
                .cdk_type
                .is_some_and(|cdk_type| ctx.facets.is_valid_major(cdk_type, *major));
            if !valid {
                return next;
            }
            next.cdk_major = Some(*major);
        }
        FilterAction::SetCdkMajor(None) => {
            next.cdk_major = None;
        }
        FilterAction::SetLanguage(Some(language)) => {
            if !ctx.languages.is_selectable(*language) {
                return next;
            }
            next.language = Some(*language);
        }
        FilterAction::SetLanguage(None) => {
            next.language = None;
        }
        FilterAction::SetFreeText(text) => {
            next.free_text = text.as_deref().filter(|t| !t.is_empty()).map(str::to_string);
        }
        FilterAction::SelectSubmodule(name) => {
            if !ctx.knows_submodule(name) {
                return next;
            }
            next.submodule = Some(name.clone());
        }
        FilterAction::ReturnToRoot => {
            if next.submodule.is_none() {
                return next;
            }
            // Leaving a submodule keeps only the language selection; every
            // other key is dropped along with the scope it described.
            next = FilterState {
                language: next.language,
                ..FilterState::default()
            };
        }
    }
    next
}

/// Normalize a raw, URL-derived state into a valid one.
///
/// Each field is checked against its own rule; the rules are independent and
/// order-insensitive, except that dropping an invalid type necessarily drops
/// the major depending on it. Nothing here errors: invalid content is
/// silently corrected.
pub fn normalize(state: &FilterState, ctx: &ValidationContext<'_>) -> FilterState {
    let cdk_type = state
        .cdk_type
        .filter(|cdk_type| ctx.facets.is_selectable_type(*cdk_type));
    let cdk_major = cdk_type.and_then(|cdk_type| {
        state
            .cdk_major
            .filter(|major| ctx.facets.is_valid_major(cdk_type, *major))
    });
    FilterState {
        cdk_type,
        cdk_major,
        language: state
            .language
            .filter(|language| ctx.languages.is_selectable(*language)),
        submodule: state
            .submodule
            .clone()
            .filter(|name| ctx.knows_submodule(name)),
        free_text: state.free_text.clone().filter(|t| !t.is_empty()),
    }
}

/// Case-insensitive substring match over a caller-supplied candidate list.
///
/// Deterministic in `(filter, candidates)`; candidate order is preserved and
/// an empty filter matches everything.
pub fn match_submodules<'a>(filter: &str, candidates: &'a [String]) -> Vec<&'a str> {
    let needle = filter.to_lowercase();
    candidates
        .iter()
        .map(String::as_str)
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .collect()
}

type Subscriber = Box<dyn Fn(&FilterState)>;

/// Owns the validated snapshot and notifies subscribers after each commit.
///
/// Execution is single-threaded and every mutation is synchronous; there is
/// no debouncing or queuing here. Hosts that want to coalesce keystrokes do
/// so before dispatching.
#[derive(Default)]
pub struct FilterController {
    state: FilterState,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for FilterController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterController")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl FilterController {
    /// Hydrate from a decoded URL state, normalizing before anything can
    /// observe it. Raw URL content never becomes the current state.
    pub fn hydrate(raw: &FilterState, ctx: &ValidationContext<'_>) -> Self {
        Self {
            state: normalize(raw, ctx),
            subscribers: Vec::new(),
        }
    }

    /// The last validated snapshot.
    pub fn current_state(&self) -> &FilterState {
        &self.state
    }

    /// Register a subscriber; it is called with each committed snapshot.
    pub fn subscribe(&mut self, subscriber: impl Fn(&FilterState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Run one action through the reducer. Commits and notifies only when the
    /// state actually changed; returns whether it did.
    pub fn dispatch(&mut self, action: &FilterAction, ctx: &ValidationContext<'_>) -> bool {
        let next = reduce(&self.state, action, ctx);
        if next == self.state {
            return false;
        }
        self.state = next;
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
        true
    }

    /// Stringly facet mutation keyed by the owned query-parameter names.
    ///
    /// An empty value clears the facet. Unknown keys and unparseable values
    /// are rejected without a state change, matching the defensive posture
    /// of the URL decoder.
    pub fn set_facet(&mut self, name: &str, value: &str, ctx: &ValidationContext<'_>) -> bool {
        let action = match name {
            query::KEY_CDK_TYPE => {
                if value.is_empty() {
                    FilterAction::SetCdkType(None)
                } else {
                    match CdkType::try_from(value) {
                        Ok(cdk_type) => FilterAction::SetCdkType(Some(cdk_type)),
                        Err(()) => return false,
                    }
                }
            }
            query::KEY_CDK_MAJOR => {
                if value.is_empty() {
                    FilterAction::SetCdkMajor(None)
                } else {
                    match value.parse::<u32>() {
                        Ok(major) => FilterAction::SetCdkMajor(Some(major)),
                        Err(_) => return false,
                    }
                }
            }
            query::KEY_LANGUAGE => {
                if value.is_empty() {
                    FilterAction::SetLanguage(None)
                } else {
                    match Language::try_from(value) {
                        Ok(language) => FilterAction::SetLanguage(Some(language)),
                        Err(()) => return false,
                    }
                }
            }
            query::KEY_FREE_TEXT => FilterAction::SetFreeText(Some(value.to_string())),
            _ => return false,
        };
        self.dispatch(&action, ctx)
    }
}
