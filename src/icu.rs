//! Reader for the `UScriptCode` enumeration in ICU's `uscript.h`.
//!
//! The emitted likely-language and languages-using tables are indexed by
//! these enumeration values, so the scan keeps entries in index order and
//! refuses gaps: a hole would silently shift every later row.

use thiserror::Error;

use crate::ucd::ScriptCode;

#[derive(Debug, Error)]
pub enum IcuError {
    #[error("could not find the UScriptCode enum")]
    EnumNotFound,
    #[error("USCRIPT_CODE_LIMIT is not declared in the UScriptCode enum")]
    MissingLimit,
    #[error("no script for index {0}")]
    MissingIndex(usize),
}

pub struct ScriptEntry {
    /// The symbolic constant, e.g. `USCRIPT_LATIN`.
    pub constant: String,
    /// The 4-letter short code from the entry's comment, e.g. `Latn`.
    pub code: ScriptCode,
}

/// The ICU script enumeration: one entry per sequential integer code, plus
/// the declared `USCRIPT_CODE_LIMIT`.
pub struct ScriptEnumeration {
    entries: Vec<ScriptEntry>,
    limit: usize,
}

impl ScriptEnumeration {
    pub fn parse(header: &str) -> Result<ScriptEnumeration, IcuError> {
        let mut slots: Vec<Option<ScriptEntry>> = Vec::new();
        let mut limit = None;
        let mut started = false;

        for raw in header.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line == "typedef enum UScriptCode {" {
                started = true;
                continue;
            }
            if !started {
                continue;
            }
            if line == "} UScriptCode;" {
                break;
            }

            if let Some(captures) = regex!(r"^USCRIPT_CODE_LIMIT\s*=\s*([0-9]+)").captures(line) {
                limit = captures[1].parse::<usize>().ok();
            } else if let Some(captures) =
                regex!(r"^(USCRIPT_[A-Z_]+)\s*=\s*([0-9]+),\s*/\*\s*([A-Z][a-z]{3})\s*\*/")
                    .captures(line)
            {
                let Ok(index) = captures[2].parse::<usize>() else {
                    continue;
                };
                let entry = ScriptEntry {
                    constant: captures[1].to_owned(),
                    code: ScriptCode::new(&captures[3])
                        .expect("the capture group only matches 4-letter codes"),
                };
                if slots.len() <= index {
                    slots.resize_with(index + 1, || None);
                }
                // Last writer wins, matching the file order semantics of the
                // other loaders.
                slots[index] = Some(entry);
            }
        }

        if !started {
            return Err(IcuError::EnumNotFound);
        }
        let limit = limit.ok_or(IcuError::MissingLimit)?;

        let mut entries = Vec::with_capacity(slots.len());
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(entry) => entries.push(entry),
                None => return Err(IcuError::MissingIndex(index)),
            }
        }
        if entries.len() < limit {
            return Err(IcuError::MissingIndex(entries.len()));
        }

        Ok(ScriptEnumeration { entries, limit })
    }

    /// All entries in index order, including any historical codes declared
    /// beyond the limit.
    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
