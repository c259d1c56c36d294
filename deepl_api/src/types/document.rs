//! Document translation: upload, status polling and download.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::validate::{required, Validate, ValidationError};

use super::{Formality, GlossaryId};

/// A file to translate. Sent as a multipart form.
#[derive(Clone, Debug)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content: Vec<u8>,
    pub target_lang: String,
    pub source_lang: Option<String>,
    pub formality: Option<Formality>,
    pub glossary_id: Option<GlossaryId>,
}

impl DocumentUpload {
    pub fn new(file_name: &str, content: Vec<u8>, target_lang: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            content,
            target_lang: target_lang.to_string(),
            source_lang: None,
            formality: None,
            glossary_id: None,
        }
    }

    pub fn with_source_lang(mut self, source_lang: &str) -> Self {
        self.source_lang = Some(source_lang.to_string());
        self
    }

    pub fn with_formality(mut self, formality: Formality) -> Self {
        self.formality = Some(formality);
        self
    }

    pub fn with_glossary_id(mut self, glossary_id: GlossaryId) -> Self {
        self.glossary_id = Some(glossary_id);
        self
    }

    pub(crate) fn into_form(self) -> Form {
        let mut form = Form::new().text("target_lang", self.target_lang);
        if let Some(source_lang) = self.source_lang {
            form = form.text("source_lang", source_lang);
        }
        if let Some(formality) = self.formality {
            form = form.text("formality", formality.to_string());
        }
        if let Some(glossary_id) = self.glossary_id {
            form = form.text("glossary_id", glossary_id.to_string());
        }
        form.part("file", Part::bytes(self.content).file_name(self.file_name))
    }
}

/// Returned by the upload; both values are needed for every later call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentHandle {
    pub document_id: String,
    pub document_key: String,
}

impl Validate for DocumentHandle {
    fn validate(&self) -> Result<(), ValidationError> {
        required("document_id", &self.document_id)?;
        required("document_key", &self.document_key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentState {
    Queued,
    Translating,
    Done,
    Error,
}

impl DocumentState {
    /// No further status changes will happen.
    pub fn is_finished(&self) -> bool {
        matches!(self, DocumentState::Done | DocumentState::Error)
    }
}

impl std::fmt::Display for DocumentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DocumentState::Queued => "queued",
                DocumentState::Translating => "translating",
                DocumentState::Done => "done",
                DocumentState::Error => "error",
            }
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStatus {
    pub document_id: String,
    pub status: Option<DocumentState>,
    /// Estimate while translating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_remaining: Option<u64>,
    /// Set once the document is done.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billed_characters: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DocumentStatus {
    pub fn is_done(&self) -> bool {
        self.status == Some(DocumentState::Done)
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_some_and(|s| s.is_finished())
    }
}

impl Validate for DocumentStatus {
    fn validate(&self) -> Result<(), ValidationError> {
        required("document_id", &self.document_id)?;
        required("status", &self.status)
    }
}
