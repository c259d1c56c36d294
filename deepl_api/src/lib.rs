//! Typed async client for the DeepL translation REST API.
//!
//! [`Client`] wraps one endpoint per method. Each call goes through the
//! [`HttpClient`] dispatcher, which authenticates the request, maps non-200
//! statuses to an [`ErrorKind`], and decodes and validates the body according
//! to a [`shape::Shape`].

mod client;
mod errors;
pub mod http;
mod query;
pub mod shape;
pub mod types;
pub mod validate;
pub use self::client::{
    base_url_for_key, Client, ClientBuilder, FREE_BASE_URL, FREE_KEY_SUFFIX, PRO_BASE_URL,
};
pub use self::errors::{ApiError, Error, ErrorKind};
pub use self::http::HttpClient;
pub use self::query::{LanguageType, Query, QueryParameters};
