//! HTTP client for the DeepL v2 REST API.

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::{
    http::{HttpClient, DEFAULT_TIMEOUT},
    query::{LanguageType, QueryParameters},
    shape::{Binary, Created, Empty, Many, One, Text},
    types::{
        CreateGlossary, DocumentHandle, DocumentStatus, DocumentUpload, Glossaries, Glossary,
        GlossaryEntries, GlossaryId, GlossaryLanguagePairs, Language, TranslateRequest,
        TranslateResponse, Usage,
    },
    Error,
};

/// Base address for Pro (paid) accounts.
pub const PRO_BASE_URL: &str = "https://api.deepl.com/v2";
/// Base address for Free accounts.
pub const FREE_BASE_URL: &str = "https://api-free.deepl.com/v2";
/// Free account keys end with this marker.
pub const FREE_KEY_SUFFIX: &str = ":fx";

const USAGE_PATH: &str = "/usage";
const LANGUAGES_PATH: &str = "/languages";
const GLOSSARY_LANGUAGE_PAIRS_PATH: &str = "/glossary-language-pairs";
const TRANSLATE_PATH: &str = "/translate";
const GLOSSARIES_PATH: &str = "/glossaries";
const DOCUMENT_PATH: &str = "/document";

fn glossary_path(id: &GlossaryId) -> String {
    format!("{}/{}", GLOSSARIES_PATH, id)
}

fn glossary_entries_path(id: &GlossaryId) -> String {
    format!("{}/{}/entries", GLOSSARIES_PATH, id)
}

fn document_status_path(document_id: &str) -> String {
    format!("{}/{}", DOCUMENT_PATH, document_id)
}

fn document_result_path(document_id: &str) -> String {
    format!("{}/{}/result", DOCUMENT_PATH, document_id)
}

/// Picks the base address matching the account type of `api_key`.
pub fn base_url_for_key(api_key: &str) -> &'static str {
    if api_key.ends_with(FREE_KEY_SUFFIX) {
        FREE_BASE_URL
    } else {
        PRO_BASE_URL
    }
}

#[derive(Serialize)]
struct DocumentKeyBody<'a> {
    document_key: &'a str,
}

/// HTTP client for the DeepL API.
///
/// Every endpoint method builds its URL and body, then hands the request to
/// the shared [`HttpClient`], which attaches the credential and maps the
/// response. Calls are independent and may run concurrently on a shared
/// reference.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL, including the `/v2` prefix.
    base_api_url: String,
    http: HttpClient,
}

/// Configures a [`Client`] before it is built.
pub struct ClientBuilder {
    api_key: String,
    base_url: Option<String>,
    timeout: Duration,
}

impl ClientBuilder {
    /// Overrides the base address derived from the key.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Deadline for each whole request, connect to last body byte.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let base_api_url = self
            .base_url
            .unwrap_or_else(|| base_url_for_key(&self.api_key).to_string());
        Ok(Client {
            base_api_url: base_api_url.trim_end_matches('/').to_string(),
            http: HttpClient::with_timeout(&self.api_key, self.timeout)?,
        })
    }
}

impl Client {
    /// Creates a client for `api_key`, targeting the Free or Pro API depending
    /// on the key.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Self::builder(api_key).base_url(base_url).build()
    }

    pub fn builder(api_key: &str) -> ClientBuilder {
        ClientBuilder {
            api_key: api_key.to_string(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_api_url = base_url.trim_end_matches('/').to_string();
    }

    pub fn api_key(&self) -> &str {
        self.http.api_key()
    }

    /// Replaces the credential. The base address is left as it is; call
    /// [`Client::set_base_url`] when switching between Free and Pro keys.
    pub fn set_api_key(&mut self, api_key: &str) -> Result<(), Error> {
        self.http.set_api_key(api_key)
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::debug!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e)
        })
    }

    /// Characters used and available in the current billing period.
    pub async fn get_usage(&self) -> Result<Usage, Error> {
        let url = self.get_url(USAGE_PATH)?;
        self.http
            .get::<One<Usage>, QueryParameters>(url, None)
            .await
    }

    /// Languages supported as source or target.
    pub async fn get_languages(&self, language_type: LanguageType) -> Result<Vec<Language>, Error> {
        let url = self.get_url(LANGUAGES_PATH)?;
        self.http
            .get::<Many<Language>, LanguageType>(url, Some(&language_type))
            .await
    }

    pub async fn get_source_languages(&self) -> Result<Vec<Language>, Error> {
        self.get_languages(LanguageType::Source).await
    }

    pub async fn get_target_languages(&self) -> Result<Vec<Language>, Error> {
        self.get_languages(LanguageType::Target).await
    }

    /// Language pairs for which glossaries can be created.
    pub async fn get_glossary_language_pairs(&self) -> Result<GlossaryLanguagePairs, Error> {
        let url = self.get_url(GLOSSARY_LANGUAGE_PAIRS_PATH)?;
        self.http
            .get::<One<GlossaryLanguagePairs>, QueryParameters>(url, None)
            .await
    }

    pub async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, Error> {
        let url = self.get_url(TRANSLATE_PATH)?;
        self.http
            .post_json::<One<TranslateResponse>, _>(url, request)
            .await
    }

    pub async fn create_glossary(&self, request: &CreateGlossary) -> Result<Glossary, Error> {
        let url = self.get_url(GLOSSARIES_PATH)?;
        self.http
            .post_json::<Created<Glossary>, _>(url, request)
            .await
    }

    pub async fn list_glossaries(&self) -> Result<Glossaries, Error> {
        let url = self.get_url(GLOSSARIES_PATH)?;
        self.http
            .get::<One<Glossaries>, QueryParameters>(url, None)
            .await
    }

    pub async fn get_glossary(&self, glossary_id: &GlossaryId) -> Result<Glossary, Error> {
        let url = self.get_url(&glossary_path(glossary_id))?;
        self.http
            .get::<One<Glossary>, QueryParameters>(url, None)
            .await
    }

    pub async fn delete_glossary(&self, glossary_id: &GlossaryId) -> Result<(), Error> {
        let url = self.get_url(&glossary_path(glossary_id))?;
        self.http.delete::<Empty>(url).await
    }

    pub async fn get_glossary_entries(
        &self,
        glossary_id: &GlossaryId,
    ) -> Result<GlossaryEntries, Error> {
        let url = self.get_url(&glossary_entries_path(glossary_id))?;
        let tsv = self.http.get::<Text, QueryParameters>(url, None).await?;
        Ok(GlossaryEntries::from_tsv(&tsv))
    }

    /// Uploads a document for translation. Poll
    /// [`Client::get_document_status`] until it is finished, then download it.
    pub async fn upload_document(&self, upload: DocumentUpload) -> Result<DocumentHandle, Error> {
        let url = self.get_url(DOCUMENT_PATH)?;
        self.http
            .post_multipart::<One<DocumentHandle>>(url, upload.into_form())
            .await
    }

    pub async fn get_document_status(&self, handle: &DocumentHandle) -> Result<DocumentStatus, Error> {
        let url = self.get_url(&document_status_path(&handle.document_id))?;
        let body = DocumentKeyBody {
            document_key: &handle.document_key,
        };
        self.http.post_json::<One<DocumentStatus>, _>(url, &body).await
    }

    /// Downloads a finished document. The API serves the result only once.
    pub async fn download_document(&self, handle: &DocumentHandle) -> Result<Vec<u8>, Error> {
        let url = self.get_url(&document_result_path(&handle.document_id))?;
        let body = DocumentKeyBody {
            document_key: &handle.document_key,
        };
        self.http.post_json::<Binary, _>(url, &body).await
    }
}
