//! Loaders for the raw Unicode Character Database files.
//!
//! All parsers work on in-memory file contents so every table can be built
//! from literal fixtures in tests; reading the files off disk is the
//! driver's job.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str;

use memchr::memchr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UcdError {
    #[error("{0} line {1}: malformed record: {2}")]
    MalformedRecord(&'static str, usize, String),
}

/// A 4-letter ISO 15924 script code (`Latn`, `Arab`, ...): one upper-case
/// ASCII letter followed by three lower-case ones.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScriptCode([u8; 4]);

impl ScriptCode {
    pub fn new(code: &str) -> Option<ScriptCode> {
        match code.as_bytes() {
            &[a, b, c, d]
                if a.is_ascii_uppercase()
                    && b.is_ascii_lowercase()
                    && c.is_ascii_lowercase()
                    && d.is_ascii_lowercase() =>
            {
                Some(ScriptCode([a, b, c, d]))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        str::from_utf8(&self.0).expect("script codes are ASCII by construction")
    }
}

impl fmt::Display for ScriptCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ScriptCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptCode({})", self.as_str())
    }
}

/// Iterate the data records of a `;`-separated UCD file: `#` comments
/// stripped, blank lines skipped, fields trimmed. Yields 1-based line
/// numbers for error reporting.
fn data_records(contents: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    contents.lines().enumerate().filter_map(|(idx, raw)| {
        let line = match memchr(b'#', raw.as_bytes()) {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        Some((idx + 1, line.split(';').map(str::trim).collect()))
    })
}

/// `XXXX..YYYY` or `XXXX`, hex, inclusive. An inverted range parses fine
/// and simply covers nothing, matching the upstream tooling.
fn parse_codepoint_range(text: &str) -> Option<(u32, u32)> {
    let (first, last) = match text.split_once("..") {
        Some((first, last)) => (first, last),
        None => (text, text),
    };
    let first = u32::from_str_radix(first, 16).ok()?;
    let last = u32::from_str_radix(last, 16).ok()?;
    Some((first, last))
}

/// Conversion table from the script property value names used by
/// `Scripts.txt` (Latin, Arabic, Hiragana...) to 4-letter script codes
/// (Latn, Arab, Hira...), taken from the `sc` rows of
/// `PropertyValueAliases.txt`.
pub struct ScriptAliases {
    by_name: HashMap<String, ScriptCode>,
}

impl ScriptAliases {
    pub fn parse(contents: &str) -> Result<ScriptAliases, UcdError> {
        const FILE: &str = "PropertyValueAliases.txt";
        let mut by_name = HashMap::new();
        for (line, fields) in data_records(contents) {
            if fields.first().copied() != Some("sc") {
                continue;
            }
            let [_, code, name, ..] = fields.as_slice() else {
                return Err(UcdError::MalformedRecord(
                    FILE,
                    line,
                    "`sc` row needs a code and a name".into(),
                ));
            };
            let code = ScriptCode::new(code).ok_or_else(|| {
                UcdError::MalformedRecord(FILE, line, format!("`{code}` is not a script code"))
            })?;
            by_name.insert((*name).to_owned(), code);
        }
        Ok(ScriptAliases { by_name })
    }

    pub fn code_for(&self, name: &str) -> Option<ScriptCode> {
        self.by_name.get(name).copied()
    }
}

/// The script property of every assigned codepoint.
///
/// Later file entries overwrite earlier ones. The upstream ranges are not
/// proven disjoint, so the last-writer-wins file order is preserved rather
/// than assumed away.
pub struct CodepointScripts {
    by_codepoint: HashMap<u32, ScriptCode>,
}

impl CodepointScripts {
    pub fn parse(contents: &str, aliases: &ScriptAliases) -> Result<CodepointScripts, UcdError> {
        const FILE: &str = "Scripts.txt";
        let mut by_codepoint = HashMap::new();
        for (line, fields) in data_records(contents) {
            let [codepoints, script_name, ..] = fields.as_slice() else {
                return Err(UcdError::MalformedRecord(
                    FILE,
                    line,
                    "expected `codepoints ; script`".into(),
                ));
            };
            // Upstream carries a few names with no alias; that is data noise,
            // not a reason to abort.
            let Some(code) = aliases.code_for(script_name) else {
                log::warn!("unknown script {script_name}");
                continue;
            };
            let (first, last) = parse_codepoint_range(codepoints).ok_or_else(|| {
                UcdError::MalformedRecord(
                    FILE,
                    line,
                    format!("bad codepoint range `{codepoints}`"),
                )
            })?;
            for codepoint in first..=last {
                by_codepoint.insert(codepoint, code);
            }
        }
        Ok(CodepointScripts { by_codepoint })
    }

    pub fn script_of(&self, codepoint: u32) -> Option<ScriptCode> {
        self.by_codepoint.get(&codepoint).copied()
    }

    /// Every script code assigned to at least one codepoint.
    pub fn assigned_codes(&self) -> BTreeSet<ScriptCode> {
        self.by_codepoint.values().copied().collect()
    }
}

/// The ISO 15924 registry: canonical short code → English long name.
///
/// Its only job here is finding scripts that are defined but never assigned
/// to any codepoint ("unused in properties"): grouping or legacy codes that
/// can never appear as a real Unicode script property value.
pub struct ScriptRegistry {
    long_names: BTreeMap<ScriptCode, String>,
}

impl ScriptRegistry {
    pub fn parse(contents: &str) -> Result<ScriptRegistry, UcdError> {
        const FILE: &str = "iso15924";
        let mut long_names = BTreeMap::new();
        for (line, fields) in data_records(contents) {
            let [short_name, _number, long_name, ..] = fields.as_slice() else {
                return Err(UcdError::MalformedRecord(
                    FILE,
                    line,
                    "expected `code;number;name`".into(),
                ));
            };
            let code = ScriptCode::new(short_name).ok_or_else(|| {
                UcdError::MalformedRecord(
                    FILE,
                    line,
                    format!("`{short_name}` is not a script code"),
                )
            })?;
            long_names.insert(code, (*long_name).to_owned());
        }
        Ok(ScriptRegistry { long_names })
    }

    pub fn codes(&self) -> impl Iterator<Item = ScriptCode> + '_ {
        self.long_names.keys().copied()
    }

    pub fn long_name(&self, code: ScriptCode) -> Option<&str> {
        self.long_names.get(&code).map(String::as_str)
    }

    /// Scripts defined in the registry but never used as a property value.
    pub fn unused_in_properties(&self, scripts: &CodepointScripts) -> BTreeSet<ScriptCode> {
        let used = scripts.assigned_codes();
        self.codes().filter(|code| !used.contains(code)).collect()
    }
}

/// One row of `UnicodeData.txt`, narrowed to the fields the compiler needs.
#[derive(Debug, Clone)]
pub struct CharacterRecord {
    pub codepoint: u32,
    pub name: String,
    pub general_category: String,
}

/// Parse `UnicodeData.txt`. Names are raw text, so unlike the other UCD
/// files no comment stripping applies here.
pub fn parse_unicode_data(
    contents: &str,
) -> impl Iterator<Item = Result<CharacterRecord, UcdError>> + '_ {
    const FILE: &str = "UnicodeData.txt";
    contents.lines().enumerate().filter_map(|(idx, raw)| {
        let line = raw.trim();
        if line.is_empty() {
            return None;
        }
        let record = (|| {
            let mut fields = line.split(';');
            let codepoint = fields.next().unwrap_or_default();
            let codepoint = u32::from_str_radix(codepoint, 16).map_err(|_| {
                UcdError::MalformedRecord(
                    FILE,
                    idx + 1,
                    format!("bad codepoint `{codepoint}`"),
                )
            })?;
            let missing = || {
                UcdError::MalformedRecord(FILE, idx + 1, "expected `code;name;category`".into())
            };
            let name = fields.next().ok_or_else(missing)?;
            let general_category = fields.next().ok_or_else(missing)?;
            Ok(CharacterRecord {
                codepoint,
                name: name.to_owned(),
                general_category: general_category.to_owned(),
            })
        })();
        Some(record)
    })
}
