//! Request and response bodies for `/translate`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validate::{required, validate_each, Validate, ValidationError};

use super::GlossaryId;

/// Tone of the translated text. Not every target language supports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    Default,
    More,
    Less,
    /// Like `More`, but falls back to the default for unsupported languages.
    PreferMore,
    /// Like `Less`, but falls back to the default for unsupported languages.
    PreferLess,
}

impl fmt::Display for Formality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Formality::Default => "default",
                Formality::More => "more",
                Formality::Less => "less",
                Formality::PreferMore => "prefer_more",
                Formality::PreferLess => "prefer_less",
            }
        )
    }
}

impl FromStr for Formality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "default" => Ok(Formality::Default),
            "more" => Ok(Formality::More),
            "less" => Ok(Formality::Less),
            "prefer_more" => Ok(Formality::PreferMore),
            "prefer_less" => Ok(Formality::PreferLess),
            other => Err(format!(
                "unknown formality '{}': expected default, more, less, prefer_more or prefer_less",
                other
            )),
        }
    }
}

/// How the input is split into sentences before translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitSentences {
    #[serde(rename = "0")]
    None,
    #[serde(rename = "1")]
    All,
    #[serde(rename = "nonewlines")]
    NoNewlines,
}

/// Markup the input contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagHandling {
    Xml,
    Html,
}

/// Body of a `/translate` call. Build with [`TranslateRequest::new`] and the
/// `with_*` methods.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranslateRequest {
    pub text: Vec<String>,
    pub target_lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formality: Option<Formality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_sentences: Option<SplitSentences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_formatting: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_handling: Option<TagHandling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glossary_id: Option<GlossaryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl TranslateRequest {
    pub fn new(target_lang: &str) -> Self {
        Self {
            text: Vec::new(),
            target_lang: target_lang.to_string(),
            source_lang: None,
            formality: None,
            split_sentences: None,
            preserve_formatting: None,
            tag_handling: None,
            glossary_id: None,
            context: None,
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text.push(text.to_string());
        self
    }
    pub fn with_texts(mut self, texts: &[String]) -> Self {
        self.text.extend_from_slice(texts);
        self
    }

    /// Without a source language the API detects it per text.
    pub fn with_source_lang(mut self, source_lang: &str) -> Self {
        self.source_lang = Some(source_lang.to_string());
        self
    }

    pub fn with_formality(mut self, formality: Formality) -> Self {
        self.formality = Some(formality);
        self
    }

    pub fn with_split_sentences(mut self, split_sentences: SplitSentences) -> Self {
        self.split_sentences = Some(split_sentences);
        self
    }

    pub fn with_preserve_formatting(mut self, preserve_formatting: bool) -> Self {
        self.preserve_formatting = Some(preserve_formatting);
        self
    }

    pub fn with_tag_handling(mut self, tag_handling: TagHandling) -> Self {
        self.tag_handling = Some(tag_handling);
        self
    }

    /// Glossaries require `source_lang` to be set as well.
    pub fn with_glossary_id(mut self, glossary_id: GlossaryId) -> Self {
        self.glossary_id = Some(glossary_id);
        self
    }

    /// Extra text that influences the translation but is not translated or billed.
    pub fn with_context(mut self, context: &str) -> Self {
        self.context = Some(context.to_string());
        self
    }
}

/// Response of a `/translate` call, one translation per input text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateResponse {
    pub translations: Vec<Translation>,
}

impl TranslateResponse {
    /// All translated texts in input order.
    pub fn texts(&self) -> Vec<&str> {
        self.translations.iter().map(|t| t.text.as_str()).collect()
    }
}

impl Validate for TranslateResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        required("translations", &self.translations)?;
        validate_each(&self.translations).map_err(|e| e.within("translations"))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Translation {
    pub detected_source_language: String,
    pub text: String,
}

impl Validate for Translation {
    fn validate(&self) -> Result<(), ValidationError> {
        required("detected_source_language", &self.detected_source_language)
    }
}
