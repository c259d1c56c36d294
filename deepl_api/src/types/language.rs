use serde::{Deserialize, Serialize};

use crate::validate::{required, Validate, ValidationError};

/// One entry of the `/languages` listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    /// Language code, e.g. `EN-GB`.
    pub language: String,
    /// English name of the language.
    pub name: String,
    /// Only reported for target languages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_formality: Option<bool>,
}

impl Validate for Language {
    fn validate(&self) -> Result<(), ValidationError> {
        required("language", &self.language)?;
        required("name", &self.name)
    }
}
