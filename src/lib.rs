//! Offline compiler baking CLDR, ICU and UCD datasets into static lookup
//! tables for a runtime text-shaping engine.
//!
//! Each generator pass reads a fixed set of input files once, builds the
//! derived relations in memory, and renders one self-contained Rust source
//! artifact. Any fatal condition aborts before anything is written, so an
//! artifact on disk is always complete.

/// Cache a literal regex at its use site.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).expect("hard-coded expression"))
    }};
}

pub mod cldr;
pub mod compile;
pub mod emit;
pub mod exemplar;
pub mod icu;
pub mod opentype;
pub mod overrides;
pub mod pairs;
pub mod relation;
pub mod tag;
pub mod ucd;

pub use compile::{
    compile_language_data, compile_pair_tables, CompileError, LanguageDataInputs, PairTableInputs,
};
pub use relation::ScriptLanguageRelation;
pub use tag::Tag;
