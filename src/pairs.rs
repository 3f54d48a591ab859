//! Partitions script-agnostic punctuation into open/close/ambiguous roles
//! and proves every codepoint has at least one pairing partner.
//!
//! Pairing never crosses a name group: a codepoint's partner set is a
//! category-filtered view of its own group, so no global graph structure is
//! needed.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use smallvec::SmallVec;
use thiserror::Error;

use crate::overrides::CompilerOverrides;
use crate::ucd::{CharacterRecord, CodepointScripts};

#[derive(Debug, Error)]
pub enum PairError {
    #[error("can't find pair for {0}")]
    Unpairable(UnpairableCodepoint),
}

/// Identifies an offending codepoint the way the source data does: value,
/// display character, category, plus the group it was matched in.
#[derive(Debug)]
pub struct UnpairableCodepoint {
    pub codepoint: u32,
    pub category: PairCategory,
    pub group: String,
}

impl fmt::Display for UnpairableCodepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = char::from_u32(self.codepoint).unwrap_or(char::REPLACEMENT_CHARACTER);
        write!(
            f,
            "U+{:04X} \"{}\"({}) in group `{}`",
            self.codepoint,
            display,
            self.category.abbreviation(),
            self.group
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairCategory {
    Open,
    Close,
    InitialQuote,
    FinalQuote,
}

impl PairCategory {
    /// Map a Unicode general category abbreviation; anything that is not a
    /// paired-punctuation category maps to `None`.
    pub fn from_abbreviation(abbreviation: &str) -> Option<PairCategory> {
        match abbreviation {
            "Ps" => Some(PairCategory::Open),
            "Pe" => Some(PairCategory::Close),
            "Pi" => Some(PairCategory::InitialQuote),
            "Pf" => Some(PairCategory::FinalQuote),
            _ => None,
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            PairCategory::Open => "Ps",
            PairCategory::Close => "Pe",
            PairCategory::InitialQuote => "Pi",
            PairCategory::FinalQuote => "Pf",
        }
    }

    /// Categories that can close a pair opened by this category.
    fn end_categories(self) -> &'static [PairCategory] {
        use PairCategory::*;
        match self {
            Open => &[Close, InitialQuote, FinalQuote],
            InitialQuote => &[Close, FinalQuote],
            FinalQuote => &[Close, InitialQuote],
            Close => &[],
        }
    }

    /// Mirror image: categories that can open a pair this category ends.
    fn start_categories(self) -> &'static [PairCategory] {
        use PairCategory::*;
        match self {
            Close => &[Open, InitialQuote, FinalQuote],
            InitialQuote => &[Open, FinalQuote],
            FinalQuote => &[Open, InitialQuote],
            Open => &[],
        }
    }

    /// Initial and final quotes can act as either side of a pair.
    fn is_ambiguous(self) -> bool {
        matches!(self, PairCategory::InitialQuote | PairCategory::FinalQuote)
    }
}

/// One qualifying punctuation codepoint after overrides and normalization.
#[derive(Debug, Clone)]
pub struct PunctuationRecord {
    pub codepoint: u32,
    pub name: String,
    pub category: PairCategory,
    pub group_key: String,
}

/// The derived pair tables, sorted for binary search, plus the character
/// names used for emission comments.
#[derive(Debug)]
pub struct PairResolution {
    /// Codepoints that can start a pair: open plus ambiguous, ascending.
    pub starts: Vec<u32>,
    /// (end, start) edges, ascending by end codepoint then start codepoint.
    pub ends: Vec<PairEnd>,
    names: BTreeMap<u32, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairEnd {
    pub end: u32,
    pub start: u32,
}

impl PairResolution {
    pub fn name_of(&self, codepoint: u32) -> &str {
        self.names
            .get(&codepoint)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn max_codepoint(&self) -> Option<u32> {
        self.starts
            .iter()
            .copied()
            .chain(self.ends.iter().flat_map(|pair| [pair.end, pair.start]))
            .max()
    }
}

/// Classify every punctuation record, group by normalized name, compute the
/// partner sets, and fail if any codepoint ends up unpairable.
pub fn resolve<'r>(
    records: impl IntoIterator<Item = &'r CharacterRecord>,
    scripts: &CodepointScripts,
    overrides: &CompilerOverrides,
) -> Result<PairResolution, PairError> {
    let qualifiers = qualifier_expression(overrides);

    let mut by_codepoint: BTreeMap<u32, PunctuationRecord> = BTreeMap::new();
    let mut groups: BTreeMap<String, Vec<u32>> = BTreeMap::new();

    for record in records {
        let abbreviation = overrides
            .category_override(record.codepoint)
            .unwrap_or(record.general_category.as_str());
        // Pairing is only computed for script-agnostic punctuation; anything
        // belonging to a real script pairs under that script's own rules.
        if scripts
            .script_of(record.codepoint)
            .is_some_and(|script| !overrides.is_dont_care_script(script.as_str()))
        {
            continue;
        }
        let Some(category) = PairCategory::from_abbreviation(abbreviation) else {
            continue;
        };
        let group_key = normalize_name(&record.name, &qualifiers);
        groups
            .entry(group_key.clone())
            .or_default()
            .push(record.codepoint);
        by_codepoint.insert(
            record.codepoint,
            PunctuationRecord {
                codepoint: record.codepoint,
                name: record.name.clone(),
                category,
                group_key,
            },
        );
    }

    let mut possible_starts: BTreeMap<u32, SmallVec<[u32; 4]>> = BTreeMap::new();

    for record in by_codepoint.values() {
        let bucket = &groups[&record.group_key];

        // Start side: anything that can open must have somewhere to close.
        let end_categories = record.category.end_categories();
        if !end_categories.is_empty()
            && !bucket
                .iter()
                .any(|cp| end_categories.contains(&by_codepoint[cp].category))
        {
            return Err(PairError::Unpairable(unpairable(record)));
        }

        // End side: validated the same way, and kept for emission.
        let start_categories = record.category.start_categories();
        if !start_categories.is_empty() {
            let mut partners: SmallVec<[u32; 4]> = bucket
                .iter()
                .copied()
                .filter(|cp| start_categories.contains(&by_codepoint[cp].category))
                .collect();
            if partners.is_empty() {
                return Err(PairError::Unpairable(unpairable(record)));
            }
            partners.sort_unstable();
            possible_starts.insert(record.codepoint, partners);
        }
    }

    // by_codepoint is keyed ascending, so both outputs come out sorted.
    let starts: Vec<u32> = by_codepoint
        .values()
        .filter(|r| r.category == PairCategory::Open || r.category.is_ambiguous())
        .map(|r| r.codepoint)
        .collect();

    let mut ends = Vec::new();
    for (&end, partners) in &possible_starts {
        for &start in partners {
            ends.push(PairEnd { end, start });
        }
    }

    let names = by_codepoint
        .into_values()
        .map(|record| (record.codepoint, record.name))
        .collect();

    Ok(PairResolution {
        starts,
        ends,
        names,
    })
}

fn unpairable(record: &PunctuationRecord) -> UnpairableCodepoint {
    UnpairableCodepoint {
        codepoint: record.codepoint,
        category: record.category,
        group: record.group_key.clone(),
    }
}

/// Normalized group key: the character name with the upstream `BRAKCET`
/// misspelling fixed and positional qualifiers stripped.
fn normalize_name(name: &str, qualifiers: &Regex) -> String {
    let fixed = name.replace("BRAKCET", "BRACKET");
    qualifiers.replace_all(&fixed, " ").trim().to_owned()
}

/// One alternation over the qualifier table. The table is ordered longest
/// first and the regex engine picks the leftmost-first alternative, so
/// `LOW-9` wins over `LOW`.
fn qualifier_expression(overrides: &CompilerOverrides) -> Regex {
    let alternation = overrides
        .pair_name_qualifiers
        .iter()
        .map(|qualifier| regex::escape(qualifier))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\s*\b({alternation})\b[-\s]*"))
        .expect("the qualifier table builds a valid expression")
}
