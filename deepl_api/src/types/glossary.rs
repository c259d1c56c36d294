//! Glossary types: metadata, entries and supported language pairs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{required, validate_each, Required, Validate, ValidationError};

/// Opaque glossary identifier, interpolated verbatim into request paths.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlossaryId(String);

impl GlossaryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlossaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GlossaryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for GlossaryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for GlossaryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Required for GlossaryId {
    fn is_missing(&self) -> bool {
        self.0.is_empty()
    }
}

/// Glossary metadata. Entries are fetched separately.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glossary {
    pub glossary_id: GlossaryId,
    pub name: String,
    /// False while the glossary is still being created.
    pub ready: bool,
    pub source_lang: String,
    pub target_lang: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub entry_count: u64,
}

impl Validate for Glossary {
    fn validate(&self) -> Result<(), ValidationError> {
        required("glossary_id", &self.glossary_id)?;
        required("name", &self.name)?;
        required("source_lang", &self.source_lang)?;
        required("target_lang", &self.target_lang)
    }
}

/// Response of the glossary listing. An account without glossaries gets an
/// empty list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glossaries {
    pub glossaries: Vec<Glossary>,
}

impl Validate for Glossaries {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_each(&self.glossaries).map_err(|e| e.within("glossaries"))
    }
}

/// Body of a glossary creation call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateGlossary {
    pub name: String,
    pub source_lang: String,
    pub target_lang: String,
    /// Entries rendered as tab-separated values.
    pub entries: String,
    pub entries_format: &'static str,
}

impl CreateGlossary {
    pub fn new(name: &str, source_lang: &str, target_lang: &str, entries: &GlossaryEntries) -> Self {
        Self {
            name: name.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            entries: entries.to_tsv(),
            entries_format: "tsv",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub source: String,
    pub target: String,
}

/// Source/target term pairs of a glossary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlossaryEntries(Vec<GlossaryEntry>);

impl GlossaryEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, source: &str, target: &str) -> Self {
        self.0.push(GlossaryEntry {
            source: source.to_string(),
            target: target.to_string(),
        });
        self
    }

    /// Parses one `source<TAB>target` pair per line. Blank lines are skipped;
    /// lines without a tab or with an empty side are dropped and logged at
    /// debug level. Surrounding whitespace is trimmed.
    pub fn from_tsv(tsv: &str) -> Self {
        let entries = tsv
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| {
                let parsed = line
                    .split_once('\t')
                    .map(|(source, target)| (source.trim(), target.trim()))
                    .filter(|(source, target)| !source.is_empty() && !target.is_empty());
                match parsed {
                    Some((source, target)) => Some(GlossaryEntry {
                        source: source.to_string(),
                        target: target.to_string(),
                    }),
                    None => {
                        tracing::debug!(
                            line = index + 1,
                            "dropping malformed glossary entry: {:?}",
                            line
                        );
                        None
                    }
                }
            })
            .collect();
        Self(entries)
    }

    pub fn to_tsv(&self) -> String {
        self.0
            .iter()
            .map(|e| format!("{}\t{}", e.source, e.target))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Languages between which glossaries can be created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryLanguagePairs {
    pub supported_languages: Vec<LanguagePair>,
}

impl Validate for GlossaryLanguagePairs {
    fn validate(&self) -> Result<(), ValidationError> {
        required("supported_languages", &self.supported_languages)?;
        validate_each(&self.supported_languages).map_err(|e| e.within("supported_languages"))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagePair {
    pub source_lang: String,
    pub target_lang: String,
}

impl Validate for LanguagePair {
    fn validate(&self) -> Result<(), ValidationError> {
        required("source_lang", &self.source_lang)?;
        required("target_lang", &self.target_lang)
    }
}
