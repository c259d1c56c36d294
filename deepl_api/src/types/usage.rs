//! Account usage returned by `/usage`.

use serde::{Deserialize, Serialize};

use crate::validate::{required, Validate, ValidationError};

/// Characters (and, on Pro plans, documents) used in the current billing period.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    /// Characters translated so far.
    pub character_count: u64,
    /// Maximum characters for the period.
    pub character_limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_document_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_document_limit: Option<u64>,
}

impl Usage {
    pub fn characters_remaining(&self) -> u64 {
        self.character_limit.saturating_sub(self.character_count)
    }

    /// True once the character quota is used up. Further translations
    /// answer with status 456.
    pub fn limit_reached(&self) -> bool {
        self.character_count >= self.character_limit
    }
}

impl Validate for Usage {
    fn validate(&self) -> Result<(), ValidationError> {
        required("character_limit", &self.character_limit)
    }
}
