//! Documentation language selection.
//!
//! The set of languages is fixed; a deployment marks a subset as supported
//! per package and may disable entries globally (for example while a doc
//! generator is still in preview). Disabled entries stay visible so users can
//! discover them, but resolution never lands on one, no matter what the URL
//! or the presentation layer asked for.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    Python,
    Java,
    DotNet,
    GoLang,
}

/// Declaration order; used for fallback resolution and option listings.
pub const ALL_LANGUAGES: [Language; 5] = [
    Language::TypeScript,
    Language::Python,
    Language::Java,
    Language::DotNet,
    Language::GoLang,
];

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::DotNet => "dotnet",
            Language::GoLang => "golang",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::DotNet => ".NET",
            Language::GoLang => "Go",
        }
    }
}

impl TryFrom<&str> for Language {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "typescript" => Ok(Language::TypeScript),
            "python" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "dotnet" => Ok(Language::DotNet),
            "golang" => Ok(Language::GoLang),
            _ => Err(()),
        }
    }
}

/// Which languages a session offers, which of those are disabled, and where
/// resolution lands when the requested key is unusable.
#[derive(Clone, Debug)]
pub struct LanguageSpec {
    pub supported: Vec<Language>,
    pub disabled: BTreeSet<Language>,
    pub fallback: Language,
}

impl Default for LanguageSpec {
    fn default() -> Self {
        Self {
            supported: ALL_LANGUAGES.to_vec(),
            disabled: BTreeSet::new(),
            fallback: Language::TypeScript,
        }
    }
}

impl LanguageSpec {
    /// A key is selectable when it is supported and not disabled.
    pub fn is_selectable(&self, language: Language) -> bool {
        self.supported.contains(&language) && !self.disabled.contains(&language)
    }

    /// Options in declared order, disabled entries included for display.
    pub fn options(&self) -> impl Iterator<Item = (Language, bool)> + '_ {
        self.supported
            .iter()
            .map(|lang| (*lang, self.disabled.contains(lang)))
    }
}

/// Resolve the active documentation language.
///
/// Takes the candidate when it is selectable, otherwise the fallback when
/// that is, otherwise the first selectable supported entry in declared order.
/// When nothing is selectable at all the fallback is returned as-is; callers
/// shipping such a spec get what they configured.
pub fn resolve(candidate: Option<Language>, spec: &LanguageSpec) -> Language {
    if let Some(language) = candidate {
        if spec.is_selectable(language) {
            return language;
        }
    }
    if spec.is_selectable(spec.fallback) {
        return spec.fallback;
    }
    spec.supported
        .iter()
        .copied()
        .find(|lang| !spec.disabled.contains(lang))
        .unwrap_or(spec.fallback)
}
