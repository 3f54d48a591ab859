//! Readers for the CLDR locale documents and supplemental data.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CldrError {
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("locale document has no language identity")]
    MissingLanguageIdentity,
    #[error("likelySubtag entry is missing its `{0}` attribute")]
    MissingAttribute(&'static str),
}

/// One locale document from `common/main/`: the language identity plus its
/// typed exemplar character sets.
pub struct LocaleDocument {
    pub language: String,
    pub exemplar_sets: Vec<ExemplarSet>,
}

pub struct ExemplarSet {
    /// `index`, `auxiliary`, `punctuation`... or `None` for the main set.
    pub kind: Option<String>,
    pub value: String,
}

pub fn parse_locale(xml: &str) -> Result<LocaleDocument, CldrError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();

    let language = root
        .children()
        .find(|n| n.has_tag_name("identity"))
        .and_then(|identity| identity.children().find(|n| n.has_tag_name("language")))
        .and_then(|lang| lang.attribute("type"))
        .ok_or(CldrError::MissingLanguageIdentity)?
        .to_owned();

    let mut exemplar_sets = Vec::new();
    if let Some(characters) = root.children().find(|n| n.has_tag_name("characters")) {
        for node in characters
            .children()
            .filter(|n| n.has_tag_name("exemplarCharacters"))
        {
            exemplar_sets.push(ExemplarSet {
                kind: node.attribute("type").map(str::to_owned),
                value: node.text().unwrap_or_default().to_owned(),
            });
        }
    }

    Ok(LocaleDocument {
        language,
        exemplar_sets,
    })
}

/// One `likelySubtags.xml` rule: an abbreviated locale tag and the full tag
/// it most likely stands for.
pub struct LikelySubtag {
    pub from: String,
    pub to: String,
}

pub fn parse_likely_subtags(xml: &str) -> Result<Vec<LikelySubtag>, CldrError> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut entries = Vec::new();
    for node in doc.descendants().filter(|n| n.has_tag_name("likelySubtag")) {
        let from = node
            .attribute("from")
            .ok_or(CldrError::MissingAttribute("from"))?;
        let to = node
            .attribute("to")
            .ok_or(CldrError::MissingAttribute("to"))?;
        entries.push(LikelySubtag {
            from: from.to_owned(),
            to: to.to_owned(),
        });
    }
    Ok(entries)
}
