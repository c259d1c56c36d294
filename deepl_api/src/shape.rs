//! Response shapes: how a successful body is decoded and validated.
//!
//! The dispatcher is generic over a [`Shape`] chosen by the caller, so whether
//! a body is one record or a sequence of records is decided at compile time.

use std::marker::PhantomData;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::validate::{validate_each, Validate};
use crate::Error;

/// Media type sent in `Accept` (and `Content-Type`) for JSON exchanges.
pub const JSON_MEDIA_TYPE: &str = "application/json; charset=utf-8";

/// Describes the body a successful call returns.
pub trait Shape {
    type Output;

    /// Value of the `Accept` header for this shape.
    const ACCEPT: &'static str = JSON_MEDIA_TYPE;

    /// Statuses that lead to [`Shape::decode`]. Everything else is an
    /// [`Error::Api`].
    fn is_success(status: StatusCode) -> bool {
        status == StatusCode::OK
    }

    fn decode(body: &[u8]) -> Result<Self::Output, Error>;
}

/// A single JSON record whose required fields are checked.
pub struct One<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned + Validate> Shape for One<T> {
    type Output = T;

    fn decode(body: &[u8]) -> Result<T, Error> {
        let value: T = serde_json::from_slice(body).map_err(Error::Decode)?;
        value.validate()?;
        Ok(value)
    }
}

/// Like [`One`], for endpoints that answer `201 Created`.
pub struct Created<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned + Validate> Shape for Created<T> {
    type Output = T;

    fn is_success(status: StatusCode) -> bool {
        status == StatusCode::OK || status == StatusCode::CREATED
    }

    fn decode(body: &[u8]) -> Result<T, Error> {
        One::<T>::decode(body)
    }
}

/// A JSON array; every element is validated and one bad element fails the
/// whole call.
pub struct Many<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned + Validate> Shape for Many<T> {
    type Output = Vec<T>;

    fn decode(body: &[u8]) -> Result<Vec<T>, Error> {
        let values: Vec<T> = serde_json::from_slice(body).map_err(Error::Decode)?;
        validate_each(&values)?;
        Ok(values)
    }
}

/// No meaningful body. Accepts `204 No Content` as well as `200 OK`.
pub struct Empty;

impl Shape for Empty {
    type Output = ();

    fn is_success(status: StatusCode) -> bool {
        status == StatusCode::OK || status == StatusCode::NO_CONTENT
    }

    fn decode(_body: &[u8]) -> Result<(), Error> {
        Ok(())
    }
}

/// Tab-separated text, as returned for glossary entries.
pub struct Text;

impl Shape for Text {
    type Output = String;

    const ACCEPT: &'static str = "text/tab-separated-values";

    fn decode(body: &[u8]) -> Result<String, Error> {
        String::from_utf8(body.to_vec()).map_err(Error::DecodeText)
    }
}

/// Raw bytes, as returned for translated documents.
pub struct Binary;

impl Shape for Binary {
    type Output = Vec<u8>;

    const ACCEPT: &'static str = "*/*";

    fn decode(body: &[u8]) -> Result<Vec<u8>, Error> {
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::validate::{required, ValidationError};

    #[derive(Deserialize, Debug, Default, PartialEq)]
    #[serde(default)]
    struct Fruit {
        title: String,
        description: String,
    }

    impl Validate for Fruit {
        fn validate(&self) -> Result<(), ValidationError> {
            required("title", &self.title)?;
            required("description", &self.description)
        }
    }

    #[test]
    fn one_decodes_and_validates() {
        let fruit = One::<Fruit>::decode(br#"{"title":"Apple","description":"Red"}"#).unwrap();
        assert_eq!(fruit.title, "Apple");
    }

    #[test]
    fn one_missing_field_is_validation_error() {
        let err = One::<Fruit>::decode(br#"{"title":"Apple"}"#).unwrap_err();
        assert!(matches!(err, Error::Validation(ref v) if v.field() == "description"));
    }

    #[test]
    fn truncated_json_is_decode_error() {
        let err = One::<Fruit>::decode(br#"{"title":"Apple""#).unwrap_err();
        match err {
            Error::Decode(e) => assert!(e.is_eof()),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn many_fails_whole_call_on_one_bad_element() {
        let body = br#"[
            {"title": "Apple", "description": "Forbidden fruit"},
            {"title": "Pear"}
        ]"#;
        let err = Many::<Fruit>::decode(body).unwrap_err();
        assert!(matches!(err, Error::Validation(ref v) if v.field() == "[1].description"));
    }

    #[test]
    fn many_rejects_object_body() {
        let err = Many::<Fruit>::decode(br#"{"title":"Apple","description":"Red"}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn text_rejects_invalid_utf8() {
        let err = Text::decode(b"caf\xe9\tKaffee").unwrap_err();
        assert!(matches!(err, Error::DecodeText(_)));
        assert_eq!(Text::decode("café\tKaffee".as_bytes()).unwrap(), "café\tKaffee");
    }

    #[test]
    fn empty_accepts_no_content() {
        assert!(Empty::is_success(StatusCode::NO_CONTENT));
        assert!(Empty::is_success(StatusCode::OK));
        assert!(!One::<Fruit>::is_success(StatusCode::NO_CONTENT));
        assert!(!Many::<Fruit>::is_success(StatusCode::CREATED));
        assert!(Created::<Fruit>::is_success(StatusCode::CREATED));
    }

    #[test]
    fn accept_headers() {
        assert_eq!(<One<Fruit> as Shape>::ACCEPT, JSON_MEDIA_TYPE);
        assert_eq!(<Text as Shape>::ACCEPT, "text/tab-separated-values");
        assert_eq!(<Binary as Shape>::ACCEPT, "*/*");
    }
}
