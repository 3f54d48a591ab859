//! The two generator passes, wired end to end.
//!
//! Both passes are pure functions from input locations to artifact text, so
//! the compiler stays callable as a library; actually writing the artifact
//! is left to the caller, which keeps output all-or-nothing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::cldr::{self, CldrError};
use crate::emit::{self, LanguageDataTables};
use crate::exemplar::ExemplarError;
use crate::icu::{IcuError, ScriptEnumeration};
use crate::opentype::{ConditionFlags, OpenTypeError, OpenTypeTagMap};
use crate::overrides::UNICODE7;
use crate::pairs::{self, PairError};
use crate::relation::RelationBuilder;
use crate::ucd::{self, CodepointScripts, ScriptAliases, ScriptRegistry, UcdError};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("cannot find the CLDR locale documents in `{0}` (expected for example `{1}`)")]
    MissingCldr(PathBuf, PathBuf),
    #[error("cannot find required input `{0}`")]
    MissingInput(PathBuf),
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("`{path}`: {source}")]
    Cldr {
        path: PathBuf,
        #[source]
        source: CldrError,
    },
    #[error("`{path}`: exemplar set of `{language}`: {source}")]
    Exemplar {
        path: PathBuf,
        language: String,
        #[source]
        source: ExemplarError,
    },
    #[error("UCD error: {0}")]
    Ucd(#[from] UcdError),
    #[error("script enumeration error: {0}")]
    Icu(#[from] IcuError),
    #[error("OpenType tag map error: {0}")]
    OpenType(#[from] OpenTypeError),
    #[error("punctuation pairing error: {0}")]
    Pairs(#[from] PairError),
}

/// Input locations for the language-data pass.
pub struct LanguageDataInputs {
    /// CLDR release checkout (`common/main`, `common/supplemental`).
    pub cldr: PathBuf,
    /// ICU source checkout (`source/common/unicode/uscript.h`).
    pub icu: PathBuf,
    /// lang-ietf-opentype checkout (`lib/map.json`).
    pub opentype: PathBuf,
    /// UCD directory (`Scripts.txt`, `PropertyValueAliases.txt`).
    pub ucd: PathBuf,
    /// The ISO 15924 registry file.
    pub iso15924: PathBuf,
}

/// Input locations for the pairs pass.
pub struct PairTableInputs {
    /// UCD directory (`Scripts.txt`, `PropertyValueAliases.txt`,
    /// `UnicodeData.txt`).
    pub ucd: PathBuf,
}

/// Build the likely-language, OpenType tag and languages-using tables.
pub fn compile_language_data(inputs: &LanguageDataInputs) -> Result<String, CompileError> {
    let overrides = &UNICODE7;

    let locale_dir = inputs.cldr.join("common/main");
    let en_probe = locale_dir.join("en.xml");
    if !en_probe.exists() {
        return Err(CompileError::MissingCldr(inputs.cldr.clone(), en_probe));
    }
    let header_path = inputs.icu.join("source/common/unicode/uscript.h");
    let map_path = inputs.opentype.join("lib/map.json");
    for required in [&header_path, &map_path, &inputs.iso15924] {
        if !required.exists() {
            return Err(CompileError::MissingInput(required.clone()));
        }
    }

    let scripts = load_codepoint_scripts(&inputs.ucd)?;
    let registry = ScriptRegistry::parse(&read_input(&inputs.iso15924)?)?;
    let unused = registry.unused_in_properties(&scripts);

    let mut builder = RelationBuilder::new(overrides, &scripts, &unused);
    for path in locale_documents(&locale_dir)? {
        let xml = read_input(&path)?;
        let locale = cldr::parse_locale(&xml).map_err(|source| CompileError::Cldr {
            path: path.clone(),
            source,
        })?;
        builder
            .add_locale(&locale)
            .map_err(|source| CompileError::Exemplar {
                path: path.clone(),
                language: locale.language.clone(),
                source,
            })?;
    }

    let subtags_path = inputs.cldr.join("common/supplemental/likelySubtags.xml");
    let subtags = cldr::parse_likely_subtags(&read_input(&subtags_path)?).map_err(|source| {
        CompileError::Cldr {
            path: subtags_path,
            source,
        }
    })?;
    for rule in &subtags {
        builder.add_likely_subtag(rule);
    }
    let (relation, likely_languages) = builder.finish();

    let tag_map = OpenTypeTagMap::parse(&read_input(&map_path)?)?;
    let condition_flags = ConditionFlags::derive(&tag_map)?;
    let script_enumeration = ScriptEnumeration::parse(&read_input(&header_path)?)?;

    Ok(emit::language_data_source(&LanguageDataTables {
        scripts: &script_enumeration,
        relation: &relation,
        likely_languages: &likely_languages,
        tag_map: &tag_map,
        condition_flags: &condition_flags,
    }))
}

/// Build the bracket/quote pairing tables.
pub fn compile_pair_tables(inputs: &PairTableInputs) -> Result<String, CompileError> {
    let scripts_probe = inputs.ucd.join("Scripts.txt");
    if !scripts_probe.exists() {
        return Err(CompileError::MissingInput(scripts_probe));
    }

    let scripts = load_codepoint_scripts(&inputs.ucd)?;
    let contents = read_input(&inputs.ucd.join("UnicodeData.txt"))?;
    let records = ucd::parse_unicode_data(&contents).collect::<Result<Vec<_>, _>>()?;
    let resolution = pairs::resolve(&records, &scripts, &UNICODE7)?;
    Ok(emit::pair_tables_source(&resolution))
}

fn load_codepoint_scripts(ucd: &Path) -> Result<CodepointScripts, CompileError> {
    let aliases = ScriptAliases::parse(&read_input(&ucd.join("PropertyValueAliases.txt"))?)?;
    let scripts = CodepointScripts::parse(&read_input(&ucd.join("Scripts.txt"))?, &aliases)?;
    Ok(scripts)
}

/// The locale documents under `common/main`, in a stable order so repeated
/// runs see the same file sequence regardless of directory order.
fn locale_documents(dir: &Path) -> Result<Vec<PathBuf>, CompileError> {
    let entries = fs::read_dir(dir).map_err(|source| CompileError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CompileError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "xml") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn read_input(path: &Path) -> Result<String, CompileError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            Err(CompileError::MissingInput(path.to_path_buf()))
        }
        Err(source) => Err(CompileError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
