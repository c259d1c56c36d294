//! Required-field checks run on decoded responses.
//!
//! Response records are declared with `#[serde(default)]`, so a field the API
//! left out still decodes. [`Validate`] then rejects records whose required
//! fields are empty, which keeps "bad JSON" and "incomplete JSON" apart.

use std::fmt;

/// A required field was absent or empty in an otherwise well-formed body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    field: String,
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Path of the offending field, e.g. `glossaries[0].name`.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Prefixes the field path with the name of the enclosing field.
    pub fn within(self, parent: &str) -> Self {
        let field = if self.field.starts_with('[') {
            format!("{}{}", parent, self.field)
        } else {
            format!("{}.{}", parent, self.field)
        };
        Self { field }
    }

    /// Prefixes the field path with a sequence index.
    pub fn at(self, index: usize) -> Self {
        let field = if self.field.starts_with('[') {
            format!("[{}]{}", index, self.field)
        } else {
            format!("[{}].{}", index, self.field)
        };
        Self { field }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field `{}` is required", self.field)
    }
}

impl std::error::Error for ValidationError {}

/// Implemented by every response record the client decodes.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_each(self)
    }
}

/// Validates every element, failing on the first bad one.
pub fn validate_each<T: Validate>(items: &[T]) -> Result<(), ValidationError> {
    for (index, item) in items.iter().enumerate() {
        item.validate().map_err(|e| e.at(index))?;
    }
    Ok(())
}

/// Values that can be checked for presence.
pub trait Required {
    fn is_missing(&self) -> bool;
}

impl Required for str {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl Required for String {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Required for Vec<T> {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Required for Option<T> {
    fn is_missing(&self) -> bool {
        self.is_none()
    }
}

macro_rules! required_number {
    ($($ty:ty),*) => {
        $(impl Required for $ty {
            fn is_missing(&self) -> bool {
                *self == 0
            }
        })*
    };
}

required_number!(u32, u64, i32, i64);

/// Fails with `field` when `value` is missing.
pub fn required<T: Required + ?Sized>(field: &str, value: &T) -> Result<(), ValidationError> {
    if value.is_missing() {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}
