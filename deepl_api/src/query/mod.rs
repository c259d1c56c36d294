mod common;
pub use self::common::{Query, QueryParameters};

mod languages;
pub use self::languages::LanguageType;
