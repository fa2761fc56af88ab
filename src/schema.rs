//! Validator boundary: runtime schema checks on parsed JSON.
//!
//! A [`Schema`] turns an untrusted [`serde_json::Value`] into a typed value,
//! or reports a [`SchemaViolation`] saying where the shape went wrong and
//! why. Expected mismatches come back as values, never as panics - the
//! executor converts them into its failure taxonomy.
//!
//! Two schemas ship with the crate:
//!
//! - [`OfType<T>`]: any `T: Deserialize` is a schema; the workhorse.
//! - [`SchemaFn`]: a plain function as a schema, for ad-hoc checks that
//!   want to report precise field paths.
//!
//! # Examples
//!
//! ```rust
//! use surefetch::{OfType, Schema};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let schema = OfType::<User>::new();
//!
//! let ok = schema.validate(&json!({"id": 7, "name": "ada"}));
//! assert_eq!(ok.unwrap(), User { id: 7, name: "ada".to_string() });
//!
//! let bad = schema.validate(&json!({"id": "seven"}));
//! assert!(bad.is_err());
//! ```

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A structured validation failure: where the shape went wrong, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    path: String,
    reason: String,
}

impl SchemaViolation {
    /// Create a violation at a specific field path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surefetch::SchemaViolation;
    ///
    /// let violation = SchemaViolation::new("user.age", "expected a number");
    /// assert_eq!(violation.path(), "user.age");
    /// ```
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a violation at the document root (`$`).
    pub fn at_root(reason: impl Into<String>) -> Self {
        Self::new("$", reason)
    }

    /// The field path where validation failed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Why validation failed there.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "schema violation at {}: {}", self.path, self.reason)
    }
}

impl std::error::Error for SchemaViolation {}

/// Checks a parsed JSON value against an expected shape.
///
/// Implementations must be pure with respect to the input value: same value,
/// same verdict. The executor relies on that to treat a violation as
/// terminal - retrying the same endpoint will not change the shape.
pub trait Schema {
    /// The typed value produced on success.
    type Output;

    /// Check `value` against this schema.
    fn validate(&self, value: &Value) -> Result<Self::Output, SchemaViolation>;
}

/// Schema backed by a serde `Deserialize` implementation.
///
/// Deserialization failures are reported at the root path with serde's own
/// reason text, which names the offending field where serde knows it.
#[derive(Debug, Clone, Copy)]
pub struct OfType<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> OfType<T> {
    /// Create a schema for `T`.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for OfType<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Schema for OfType<T> {
    type Output = T;

    fn validate(&self, value: &Value) -> Result<T, SchemaViolation> {
        T::deserialize(value).map_err(|e| SchemaViolation::at_root(e.to_string()))
    }
}

/// Schema from a plain function.
///
/// Useful for ad-hoc checks, or when the caller wants violations with
/// precise field paths rather than serde's root-level reporting.
///
/// # Examples
///
/// ```rust
/// use surefetch::{Schema, SchemaFn, SchemaViolation};
/// use serde_json::{json, Value};
///
/// let schema = SchemaFn::new(|value: &Value| {
///     value["message"]
///         .as_str()
///         .map(str::to_string)
///         .ok_or_else(|| SchemaViolation::new("message", "expected a string"))
/// });
///
/// assert_eq!(schema.validate(&json!({"message": "ok"})).unwrap(), "ok");
/// assert!(schema.validate(&json!({})).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct SchemaFn<F, T> {
    check: F,
    _marker: PhantomData<fn() -> T>,
}

impl<F, T> SchemaFn<F, T>
where
    F: Fn(&Value) -> Result<T, SchemaViolation>,
{
    /// Wrap a function as a schema.
    pub fn new(check: F) -> Self {
        Self {
            check,
            _marker: PhantomData,
        }
    }
}

impl<F, T> std::fmt::Debug for SchemaFn<F, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaFn").finish_non_exhaustive()
    }
}

impl<F, T> Schema for SchemaFn<F, T>
where
    F: Fn(&Value) -> Result<T, SchemaViolation>,
{
    type Output = T;

    fn validate(&self, value: &Value) -> Result<T, SchemaViolation> {
        (self.check)(value)
    }
}

#[cfg(test)]
mod schema_tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Greeting {
        message: String,
    }

    #[test]
    fn test_of_type_accepts_matching_shape() {
        let schema = OfType::<Greeting>::new();
        let value = json!({"message": "ok"});

        let greeting = schema.validate(&value).unwrap();
        assert_eq!(greeting.message, "ok");
    }

    #[test]
    fn test_of_type_rejects_wrong_type() {
        let schema = OfType::<Greeting>::new();
        let value = json!({"message": 42});

        let violation = schema.validate(&value).unwrap_err();
        assert_eq!(violation.path(), "$");
        assert!(violation.reason().contains("string"));
    }

    #[test]
    fn test_of_type_rejects_missing_field() {
        let schema = OfType::<Greeting>::new();
        let value = json!({});

        let violation = schema.validate(&value).unwrap_err();
        assert!(violation.reason().contains("message"));
    }

    #[test]
    fn test_of_type_does_not_consume_the_value() {
        let schema = OfType::<Greeting>::new();
        let value = json!({"message": "twice"});

        assert!(schema.validate(&value).is_ok());
        assert!(schema.validate(&value).is_ok());
    }

    #[test]
    fn test_schema_fn_reports_field_path() {
        let schema = SchemaFn::new(|value: &Value| {
            value["count"]
                .as_u64()
                .ok_or_else(|| SchemaViolation::new("count", "expected an unsigned integer"))
        });

        assert_eq!(schema.validate(&json!({"count": 3})).unwrap(), 3);

        let violation = schema.validate(&json!({"count": -1})).unwrap_err();
        assert_eq!(violation.path(), "count");
    }

    #[test]
    fn test_violation_display() {
        let violation = SchemaViolation::new("user.age", "expected a number");
        assert_eq!(
            format!("{}", violation),
            "schema violation at user.age: expected a number"
        );
    }
}
