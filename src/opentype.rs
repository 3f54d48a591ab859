//! Reader for the lang-ietf-opentype language → OpenType tag map.
//!
//! A map entry is either a single default tag, or a list alternating
//! `[default, condition, tag, condition, tag, ...]`. The distinct condition
//! names are later packed into a `u32` bitmask, which caps them at 32
//! system-wide.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenTypeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("language `{0}` maps to an empty tag list")]
    EmptyMapping(String),
    #[error("language `{0}`: condition `{1}` has no tag")]
    DanglingCondition(String, String),
    #[error("{0} distinct OpenType conditions do not fit the 32 available flag bits")]
    TooManyConditions(usize),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMapping {
    Single(String),
    List(Vec<String>),
}

/// A language's OpenType language-system tags: the unconditional default
/// plus zero or more (condition, tag) alternatives in map order.
pub struct OpenTypeMapping {
    pub default_tag: String,
    pub conditionals: Vec<(String, String)>,
}

pub struct OpenTypeTagMap {
    mappings: BTreeMap<String, OpenTypeMapping>,
}

impl OpenTypeTagMap {
    pub fn parse(json: &str) -> Result<OpenTypeTagMap, OpenTypeError> {
        let raw: BTreeMap<String, RawMapping> = serde_json::from_str(json)?;
        let mut mappings = BTreeMap::new();
        for (language, mapping) in raw {
            let mapping = match mapping {
                RawMapping::Single(tag) => OpenTypeMapping {
                    default_tag: tag,
                    conditionals: Vec::new(),
                },
                RawMapping::List(tags) => {
                    let mut tags = tags.into_iter();
                    let default_tag = tags
                        .next()
                        .ok_or_else(|| OpenTypeError::EmptyMapping(language.clone()))?;
                    let mut conditionals = Vec::new();
                    while let Some(condition) = tags.next() {
                        let Some(tag) = tags.next() else {
                            return Err(OpenTypeError::DanglingCondition(language, condition));
                        };
                        conditionals.push((condition, tag));
                    }
                    OpenTypeMapping {
                        default_tag,
                        conditionals,
                    }
                }
            };
            mappings.insert(language, mapping);
        }
        Ok(OpenTypeTagMap { mappings })
    }

    pub fn mappings(&self) -> impl Iterator<Item = (&str, &OpenTypeMapping)> {
        self.mappings
            .iter()
            .map(|(language, mapping)| (language.as_str(), mapping))
    }

    pub fn get(&self, language: &str) -> Option<&OpenTypeMapping> {
        self.mappings.get(language)
    }

    /// Every distinct condition name used anywhere in the map.
    pub fn condition_names(&self) -> BTreeSet<&str> {
        self.mappings
            .values()
            .flat_map(|m| m.conditionals.iter().map(|(condition, _)| condition.as_str()))
            .collect()
    }
}

/// The bitmask assignment for condition names: DEFAULT is 0, every named
/// condition gets `1 << i` in sorted order. Exceeding the 32-bit mask fails
/// the build instead of truncating.
pub struct ConditionFlags {
    names: Vec<String>,
}

impl ConditionFlags {
    pub const MAX_FLAGS: usize = 32;

    pub fn derive(map: &OpenTypeTagMap) -> Result<ConditionFlags, OpenTypeError> {
        // BTreeSet iteration is already sorted.
        let names: Vec<String> = map.condition_names().into_iter().map(str::to_owned).collect();
        if names.len() > Self::MAX_FLAGS {
            return Err(OpenTypeError::TooManyConditions(names.len()));
        }
        Ok(ConditionFlags { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn flag_of(&self, name: &str) -> Option<u32> {
        let i = self.names.iter().position(|n| n == name)?;
        Some(1 << i)
    }
}
