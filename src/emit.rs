//! Serializes the derived relations as static Rust source tables.
//!
//! Each generator pass renders one self-contained string; the caller writes
//! it out only after the whole pass has succeeded, so an artifact on disk
//! is always complete. Tags are emitted as `u32::from_be_bytes(*b"....")`
//! expressions: readable in review, const-evaluable for the consumer, and
//! numerically ordered for binary search.

use std::collections::BTreeMap;

use crate::icu::ScriptEnumeration;
use crate::opentype::{ConditionFlags, OpenTypeTagMap};
use crate::pairs::PairResolution;
use crate::relation::ScriptLanguageRelation;
use crate::tag::Tag;
use crate::ucd::ScriptCode;

const GENERATED_BANNER: &str = "// file automatically generated by shapegen, do not edit\n";

/// Everything the language-data artifact is rendered from.
pub struct LanguageDataTables<'a> {
    pub scripts: &'a ScriptEnumeration,
    pub relation: &'a ScriptLanguageRelation,
    pub likely_languages: &'a BTreeMap<ScriptCode, String>,
    pub tag_map: &'a OpenTypeTagMap,
    pub condition_flags: &'a ConditionFlags,
}

pub fn language_data_source(tables: &LanguageDataTables) -> String {
    let mut out = String::from(GENERATED_BANNER);
    out.push_str("// indices into the per-script tables are UScriptCode enumeration values\n\n");

    push_script_code_limit(&mut out, tables.scripts);
    push_likely_language_table(&mut out, tables);
    push_condition_flags(&mut out, tables.condition_flags);
    push_tag_table(&mut out, tables);
    push_languages_using(&mut out, tables);
    out
}

fn push_script_code_limit(out: &mut String, scripts: &ScriptEnumeration) {
    out.push_str(&format!(
        "/// Number of script codes in the ICU build these tables were generated from.\n\
         pub const SCRIPT_CODE_LIMIT: usize = {};\n\n",
        scripts.limit()
    ));
}

fn push_likely_language_table(out: &mut String, tables: &LanguageDataTables) {
    let entries = tables.scripts.entries();
    out.push_str(
        "/// The language text from a script is most likely to be in if you have no\n\
         /// other information. Most of the unknowns are scripts that are never used\n\
         /// as a Unicode property value.\n",
    );
    out.push_str(&format!(
        "pub static LIKELY_LANGUAGE_FOR_SCRIPT: [(u32, u32); {}] = [\n",
        entries.len()
    ));
    for entry in entries {
        let row = match tables.likely_languages.get(&entry.code) {
            Some(language) => {
                // A few old scripts have a likely language with no OpenType
                // tag of its own; those fall back to the default tag.
                let opentype = tables
                    .tag_map
                    .get(language)
                    .map(|mapping| mapping.default_tag.as_str())
                    .unwrap_or("dflt");
                format!(
                    "({}, {})",
                    tag_literal(Tag::new(language)),
                    tag_literal(Tag::new(opentype))
                )
            }
            None => format!("(0, {})", tag_literal(Tag::DFLT)),
        };
        out.push_str(&format!("    {row},  // {}\n", entry.constant));
    }
    out.push_str("];\n");
    out.push_str("const _: () = assert!(SCRIPT_CODE_LIMIT <= LIKELY_LANGUAGE_FOR_SCRIPT.len());\n\n");
}

fn push_condition_flags(out: &mut String, flags: &ConditionFlags) {
    out.push_str("/// OpenType tag selection conditions, combinable as a bitmask.\n");
    out.push_str("pub const OPENTYPE_CONDITION_FLAG_DEFAULT: u32 = 0;\n");
    for (i, name) in flags.names().iter().enumerate() {
        out.push_str(&format!(
            "pub const {}: u32 = 1 << {i};\n",
            condition_flag_name(name)
        ));
    }
    out.push('\n');
}

fn push_tag_table(out: &mut String, tables: &LanguageDataTables) {
    let mut languages: Vec<_> = tables
        .tag_map
        .mappings()
        .map(|(language, mapping)| (Tag::new(language), mapping))
        .collect();
    languages.sort_by_key(|(tag, _)| *tag);

    let mut rows = Vec::new();
    for (language, mapping) in &languages {
        rows.push(format!(
            "    ({}, {}, OPENTYPE_CONDITION_FLAG_DEFAULT),\n",
            tag_literal(*language),
            tag_literal(Tag::new(&mapping.default_tag))
        ));
        for (condition, tag) in &mapping.conditionals {
            rows.push(format!(
                "    ({}, {}, {}),\n",
                tag_literal(*language),
                tag_literal(Tag::new(tag)),
                condition_flag_name(condition)
            ));
        }
    }

    out.push_str(
        "/// (language tag, OpenType tag, condition flag), sorted by language tag\n\
         /// value for binary search.\n",
    );
    out.push_str(&format!(
        "pub static OPENTYPE_TAG_PER_LANGUAGE: [(u32, u32, u32); {}] = [\n",
        rows.len()
    ));
    for row in rows {
        out.push_str(&row);
    }
    out.push_str("];\n\n");
}

fn push_languages_using(out: &mut String, tables: &LanguageDataTables) {
    let entries = tables.scripts.entries();
    let mut spans = Vec::with_capacity(entries.len());
    let mut flattened: Vec<(Tag, ScriptCode)> = Vec::new();

    for entry in entries {
        let mut languages: Vec<Tag> = tables
            .relation
            .languages_of(entry.code)
            .map(Tag::new)
            .collect();
        languages.sort_unstable();
        let start = flattened.len();
        flattened.extend(languages.into_iter().map(|tag| (tag, entry.code)));
        let count = flattened.len() - start;
        spans.push(if count == 0 { (0, 0) } else { (start, count) });
    }

    out.push_str(
        "/// (start index, count) into LANGUAGES_USING: the languages a script can\n\
         /// be used for, per script index.\n",
    );
    out.push_str(&format!(
        "pub static LANGUAGES_USING_SCRIPT: [(u16, u16); {}] = [\n",
        spans.len()
    ));
    for (entry, (start, count)) in entries.iter().zip(&spans) {
        out.push_str(&format!(
            "    ({start:3}, {count:3}),  // {} ({})\n",
            entry.code, entry.constant
        ));
    }
    out.push_str("];\n\n");

    out.push_str("/// The languages using each script, tag-sorted within each span.\n");
    out.push_str(&format!(
        "pub static LANGUAGES_USING: [u32; {}] = [\n",
        flattened.len()
    ));
    for (tag, script) in &flattened {
        out.push_str(&format!("    {},  // {script}\n", tag_literal(*tag)));
    }
    out.push_str("];\n");
}

pub fn pair_tables_source(pairs: &PairResolution) -> String {
    let storage = storage_type(pairs.max_codepoint().unwrap_or(0));
    let mut out = String::from(GENERATED_BANNER);

    out.push_str(
        "/// Codepoints that can start a bracket or quote pair, sorted for binary\n\
         /// search.\n",
    );
    out.push_str(&format!(
        "pub static PAIR_STARTS: [{storage}; {}] = [\n",
        pairs.starts.len()
    ));
    for &codepoint in &pairs.starts {
        out.push_str(&format!(
            "    0x{codepoint:04X},  // {}\n",
            pairs.name_of(codepoint)
        ));
    }
    out.push_str("];\n\n");

    out.push_str(
        "/// (end codepoint, start codepoint) pairs, sorted for binary search by\n\
         /// end codepoint.\n",
    );
    out.push_str(&format!(
        "pub static PAIR_ENDS: [({storage}, {storage}); {}] = [\n",
        pairs.ends.len()
    ));
    for pair in &pairs.ends {
        out.push_str(&format!(
            "    (0x{:04X}, 0x{:04X}),  // {} - {}\n",
            pair.end,
            pair.start,
            pairs.name_of(pair.end),
            pairs.name_of(pair.start)
        ));
    }
    out.push_str("];\n");
    out
}

/// A tag as readable, const-evaluable source text.
fn tag_literal(tag: Tag) -> String {
    format!("u32::from_be_bytes(*b\"{tag}\")")
}

/// `OPENTYPE_CONDITION_FLAG_` + the upper-cased condition name.
fn condition_flag_name(name: &str) -> String {
    let mut ident = String::from("OPENTYPE_CONDITION_FLAG_");
    for c in name.chars() {
        ident.push(if c.is_ascii_alphanumeric() {
            c.to_ascii_uppercase()
        } else {
            '_'
        });
    }
    ident
}

/// Narrow the element type when every codepoint fits in 16 bits.
fn storage_type(max_codepoint: u32) -> &'static str {
    if max_codepoint <= 0xFFFF {
        "u16"
    } else {
        "u32"
    }
}
