//! Hand-curated override tables.
//!
//! Everything in here is a data-version knob rather than algorithm logic:
//! swapping these tables for a newer Unicode/CLDR release must not require
//! touching any of the builders that consume them. The builders therefore
//! take a [`CompilerOverrides`] at construction instead of reaching for the
//! constants directly.

use phf::{phf_map, phf_set, Map, Set};
use smallvec::{smallvec, SmallVec};

/// The fixed override tables one compiler run is built against.
#[derive(Clone, Copy)]
pub struct CompilerOverrides {
    /// `UnicodeData.txt` general-category overrides, keyed by codepoint.
    pub category_overrides: &'static Map<u32, &'static str>,
    /// Grouping script codes that stand for several real scripts.
    pub script_decompositions: &'static Map<&'static str, &'static [&'static str]>,
    /// Stylistic script variants collapsed to their base script.
    pub script_variants: &'static Map<&'static str, &'static str>,
    /// Positional/size qualifiers stripped when grouping punctuation names,
    /// longest first so that e.g. `LOW-9` wins over `LOW`.
    pub pair_name_qualifiers: &'static [&'static str],
    /// Scripts that say nothing about the language of the text.
    pub dont_care_scripts: &'static Set<&'static str>,
}

impl CompilerOverrides {
    pub fn category_override(&self, codepoint: u32) -> Option<&'static str> {
        self.category_overrides.get(&codepoint).copied()
    }

    pub fn is_dont_care_script(&self, code: &str) -> bool {
        self.dont_care_scripts.contains(code)
    }

    /// Resolve a script code from locale data to the script property values
    /// it actually stands for: composites expand to their constituents,
    /// variants collapse to their base, everything else is used verbatim.
    pub fn scripts_used_as_properties<'a>(&self, script: &'a str) -> SmallVec<[&'a str; 3]> {
        if let Some(parts) = self.script_decompositions.get(script) {
            SmallVec::from_slice(parts)
        } else if let Some(base) = self.script_variants.get(script) {
            smallvec![*base]
        } else {
            smallvec![script]
        }
    }
}

/// The override tables matching the Unicode 7.0 / CLDR 25 era datasets.
pub static UNICODE7: CompilerOverrides = CompilerOverrides {
    category_overrides: &CATEGORY_OVERRIDES,
    script_decompositions: &SCRIPT_DECOMPOSITIONS,
    script_variants: &SCRIPT_VARIANTS,
    pair_name_qualifiers: PAIR_NAME_QUALIFIERS,
    dont_care_scripts: &DONT_CARE_SCRIPTS,
};

// ASCII angle brackets are `So` in UnicodeData but pair like brackets.
static CATEGORY_OVERRIDES: Map<u32, &'static str> = phf_map! {
    0x3Cu32 => "Ps", // LESS-THAN SIGN
    0x3Eu32 => "Pe", // GREATER-THAN SIGN
};

static SCRIPT_DECOMPOSITIONS: Map<&'static str, &'static [&'static str]> = phf_map! {
    "Kore" => &["Hani", "Hang"],
    "Jpan" => &["Hani", "Hira", "Kana"],
    "Hrkt" => &["Hira", "Kana"],
};

static SCRIPT_VARIANTS: Map<&'static str, &'static str> = phf_map! {
    "Hant" => "Hani",
    "Hans" => "Hani",
    "Cyrs" => "Cyrl",
    "Latf" => "Latn",
    "Latg" => "Latn",
    "Syre" => "Syrc",
    "Syrj" => "Syrc",
    "Syrn" => "Syrc",
};

static PAIR_NAME_QUALIFIERS: &[&str] = &[
    "TOP",
    "BOTTOM",
    "LEFT",
    "RIGHT",
    "LESS",
    "GREATER",
    "LOW-REVERSED-9",
    "HIGH-REVERSED-9",
    "LOW-9",
    "LOW",
    "REVERSED",
];

// Inherited, Common, Unknown.
static DONT_CARE_SCRIPTS: Set<&'static str> = phf_set! { "Zinh", "Zyyy", "Zzzz" };
