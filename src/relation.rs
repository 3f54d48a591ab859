//! Builds the language ↔ script relation and the likely-language table.

use std::collections::{BTreeMap, BTreeSet};

use crate::cldr::{LikelySubtag, LocaleDocument};
use crate::exemplar::{self, ExemplarError};
use crate::overrides::CompilerOverrides;
use crate::ucd::{CodepointScripts, ScriptCode};

/// Exemplar set types that do not evidence which scripts a language is
/// written in: the "index" set adds Latin to Chinese for sorting, and the
/// "punctuation" set is script-agnostic by nature.
const IGNORED_EXEMPLAR_KINDS: [&str; 2] = ["index", "punctuation"];

/// Bidirectional many-to-many association between languages and scripts.
///
/// Both derived views go through a single mutation point, so they are exact
/// inverses at all times, and the backing maps are ordered, so iteration is
/// deterministic for emission.
#[derive(Debug, Default)]
pub struct ScriptLanguageRelation {
    scripts_per_language: BTreeMap<String, BTreeSet<ScriptCode>>,
    languages_per_script: BTreeMap<ScriptCode, BTreeSet<String>>,
}

impl ScriptLanguageRelation {
    /// Record one language ↔ script evidence edge. Duplicates are idempotent.
    pub fn record(&mut self, language: &str, script: ScriptCode) {
        self.scripts_per_language
            .entry(language.to_owned())
            .or_default()
            .insert(script);
        self.languages_per_script
            .entry(script)
            .or_default()
            .insert(language.to_owned());
    }

    pub fn scripts_of<'a>(&'a self, language: &str) -> impl Iterator<Item = ScriptCode> + 'a {
        self.scripts_per_language
            .get(language)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn languages_of(&self, script: ScriptCode) -> impl Iterator<Item = &str> {
        self.languages_per_script
            .get(&script)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.scripts_per_language.keys().map(String::as_str)
    }

    pub fn scripts(&self) -> impl Iterator<Item = ScriptCode> + '_ {
        self.languages_per_script.keys().copied()
    }

    pub fn contains(&self, language: &str, script: ScriptCode) -> bool {
        self.scripts_per_language
            .get(language)
            .is_some_and(|set| set.contains(&script))
    }
}

/// Accumulates evidence from the CLDR datasets into the relation and the
/// per-script likely-language table, then hands both over by value.
pub struct RelationBuilder<'a> {
    overrides: &'a CompilerOverrides,
    scripts: &'a CodepointScripts,
    unused_in_properties: &'a BTreeSet<ScriptCode>,
    relation: ScriptLanguageRelation,
    likely_languages: BTreeMap<ScriptCode, String>,
}

impl<'a> RelationBuilder<'a> {
    pub fn new(
        overrides: &'a CompilerOverrides,
        scripts: &'a CodepointScripts,
        unused_in_properties: &'a BTreeSet<ScriptCode>,
    ) -> Self {
        RelationBuilder {
            overrides,
            scripts,
            unused_in_properties,
            relation: ScriptLanguageRelation::default(),
            likely_languages: BTreeMap::new(),
        }
    }

    /// Record the script evidence of one locale's exemplar character sets.
    pub fn add_locale(&mut self, locale: &LocaleDocument) -> Result<(), ExemplarError> {
        for set in &locale.exemplar_sets {
            if set
                .kind
                .as_deref()
                .is_some_and(|kind| IGNORED_EXEMPLAR_KINDS.contains(&kind))
            {
                continue;
            }
            for token in exemplar::parse(&set.value)? {
                // A multi-character cluster counts as its leading codepoint.
                let Some(first) = token.chars().next() else {
                    continue;
                };
                let Some(script) = self.scripts.script_of(first as u32) else {
                    continue;
                };
                if self.overrides.is_dont_care_script(script.as_str()) {
                    continue;
                }
                self.relation.record(&locale.language, script);
            }
        }
        Ok(())
    }

    /// Fold one likely-subtag rule in.
    ///
    /// An `und`-language rule with a bare script names that script's most
    /// likely language, unless the script never occurs as a property value.
    /// Independently, every rule's target script contributes an evidence
    /// edge once resolved through the decomposition and variant tables.
    pub fn add_likely_subtag(&mut self, rule: &LikelySubtag) {
        let from = LocaleTagParts::split(&rule.from);
        let to = LocaleTagParts::split(&rule.to);

        if from.language == "und" && from.region.is_none() {
            if let Some(script) = from.script.and_then(ScriptCode::new) {
                if !self.unused_in_properties.contains(&script) {
                    self.likely_languages.insert(script, to.language.to_owned());
                }
            }
        }

        let Some(to_script) = to.script else {
            return;
        };
        for resolved in self.overrides.scripts_used_as_properties(to_script) {
            match ScriptCode::new(resolved) {
                Some(script) => self.relation.record(to.language, script),
                None => log::warn!(
                    "ignoring non-script subtag `{resolved}` in likely subtag target `{}`",
                    rule.to
                ),
            }
        }
    }

    pub fn finish(self) -> (ScriptLanguageRelation, BTreeMap<ScriptCode, String>) {
        (self.relation, self.likely_languages)
    }
}

struct LocaleTagParts<'s> {
    language: &'s str,
    script: Option<&'s str>,
    region: Option<&'s str>,
}

impl<'s> LocaleTagParts<'s> {
    fn split(tag: &'s str) -> LocaleTagParts<'s> {
        let mut parts = tag.split('_');
        LocaleTagParts {
            language: parts.next().unwrap_or_default(),
            script: parts.next(),
            region: parts.next(),
        }
    }
}
