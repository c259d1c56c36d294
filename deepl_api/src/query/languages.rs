use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use super::Query;

/// Which side of a translation a language listing describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageType {
    /// Languages that can be translated from. The API default.
    #[default]
    Source,
    /// Languages that can be translated into.
    Target,
}

impl fmt::Display for LanguageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LanguageType::Source => "source",
            LanguageType::Target => "target",
        })
    }
}

/// Never fails: anything but `target` reads as [`LanguageType::Source`].
impl FromStr for LanguageType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("target") {
            Ok(LanguageType::Target)
        } else {
            Ok(LanguageType::Source)
        }
    }
}

impl Query for LanguageType {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("type", self.to_string().as_str());
        url
    }
}
