//! One browsing session: facets, filter state, navigation, and the URL,
//! wired together with a single write-through policy.
//!
//! The session owns the composition so every mutation completes atomically
//! and re-serializes to the URL before the caller can read again. Filter
//! refinements replace the current history entry; submodule navigation and
//! going back push a new one. Dropping the session discards ephemeral input
//! (an in-progress free-text string) with it; nothing persists beyond the
//! URL.

use crate::catalog::{CatalogMetadata, CdkType, FacetIndex, FacetOption};
use crate::filter::{FilterAction, FilterController, FilterState, ValidationContext};
use crate::language::{self, Language, LanguageSpec};
use crate::nav::{NavState, NavigationStack};
use crate::query::{self, History, HistoryMode, UrlState};

pub struct Session<H: History> {
    url: UrlState,
    facets: FacetIndex,
    languages: LanguageSpec,
    nav: NavigationStack,
    controller: FilterController,
    history: H,
}

impl<H: History> std::fmt::Debug for Session<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("query", &self.url.query())
            .field("state", self.controller.current_state())
            .finish()
    }
}

impl<H: History> Session<H> {
    /// Hydrate from the URL once per mount.
    ///
    /// The raw query is decoded and normalized against the supplied metadata,
    /// submodule set, and language spec before anything can observe it. The
    /// URL itself is left as found; hydration reads shared state, it does not
    /// rewrite it.
    pub fn hydrate(
        initial_query: &str,
        metadata: &CatalogMetadata,
        nav: NavigationStack,
        languages: LanguageSpec,
        history: H,
    ) -> Self {
        let facets = FacetIndex::new(metadata);
        let raw = query::decode(initial_query);
        let controller = {
            let ctx = ValidationContext {
                facets: &facets,
                submodules: nav.submodules(),
                languages: &languages,
            };
            FilterController::hydrate(&raw, &ctx)
        };
        Self {
            url: UrlState::new(initial_query),
            facets,
            languages,
            nav,
            controller,
            history,
        }
    }

    pub fn state(&self) -> &FilterState {
        self.controller.current_state()
    }

    pub fn query(&self) -> &str {
        self.url.query()
    }

    pub fn nav_state(&self) -> NavState {
        self.nav.state_of(self.controller.current_state())
    }

    pub fn can_go_back(&self) -> bool {
        self.nav.can_go_back(self.controller.current_state())
    }

    /// The resolved documentation language; never a disabled key.
    pub fn active_language(&self) -> Language {
        language::resolve(self.controller.current_state().language, &self.languages)
    }

    pub fn type_facets(&self) -> Vec<FacetOption> {
        self.facets.type_facets()
    }

    /// Major-version facets for the currently selected type, if any are
    /// worth showing.
    pub fn major_facets(&self) -> Option<Vec<FacetOption>> {
        self.controller
            .current_state()
            .cdk_type
            .and_then(|cdk_type| self.facets.major_facets(cdk_type))
    }

    pub fn submodule_options(&self, filter: &str) -> Vec<FacetOption> {
        self.nav.submodule_options(filter)
    }

    pub fn subscribe(&mut self, subscriber: impl Fn(&FilterState) + 'static) {
        self.controller.subscribe(subscriber);
    }

    /// The history seam, for hosts that record.
    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn set_cdk_type(&mut self, cdk_type: Option<CdkType>) -> bool {
        self.refine(&FilterAction::SetCdkType(cdk_type))
    }

    pub fn set_cdk_major(&mut self, major: Option<u32>) -> bool {
        self.refine(&FilterAction::SetCdkMajor(major))
    }

    pub fn set_language(&mut self, language: Option<Language>) -> bool {
        self.refine(&FilterAction::SetLanguage(language))
    }

    pub fn set_free_text(&mut self, text: Option<&str>) -> bool {
        self.refine(&FilterAction::SetFreeText(text.map(str::to_string)))
    }

    /// Stringly facet mutation keyed by owned query-parameter names; see
    /// [`FilterController::set_facet`].
    pub fn set_facet(&mut self, name: &str, value: &str) -> bool {
        let ctx = ValidationContext {
            facets: &self.facets,
            submodules: self.nav.submodules(),
            languages: &self.languages,
        };
        if !self.controller.set_facet(name, value, &ctx) {
            return false;
        }
        self.url.sync(
            self.controller.current_state(),
            HistoryMode::Replace,
            &mut self.history,
        );
        true
    }

    /// Navigate into a submodule. Writes only the submodule key; every other
    /// selection rides along unchanged. Pushes a history entry.
    pub fn select_submodule(&mut self, name: &str) -> bool {
        self.navigate(&FilterAction::SelectSubmodule(name.to_string()))
    }

    /// Navigate back to the package root, carrying the language selection
    /// forward. No-op when already at root.
    pub fn go_back(&mut self) -> bool {
        self.navigate(&FilterAction::ReturnToRoot)
    }

    fn refine(&mut self, action: &FilterAction) -> bool {
        self.apply(action, HistoryMode::Replace)
    }

    fn navigate(&mut self, action: &FilterAction) -> bool {
        self.apply(action, HistoryMode::Push)
    }

    fn apply(&mut self, action: &FilterAction, mode: HistoryMode) -> bool {
        let ctx = ValidationContext {
            facets: &self.facets,
            submodules: self.nav.submodules(),
            languages: &self.languages,
        };
        if !self.controller.dispatch(action, &ctx) {
            return false;
        }
        self.url
            .sync(self.controller.current_state(), mode, &mut self.history);
        true
    }
}
