//! Argument validation for tool invocations.
//!
//! Each tool's arguments are checked field by field so that a single bad call
//! reports every problem at once instead of stopping at the first.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::client::is_path_segment;

pub type JsonObject = Map<String, Value>;

/// One argument that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All argument problems found for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInput {
    pub errors: Vec<FieldError>,
}

impl InvalidInput {
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invalid input: ")?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidInput {}

/// Typed construction from raw invocation arguments.
pub trait FromArguments: Sized {
    fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput>;
}

/// Reads typed fields out of an argument object, collecting failures.
///
/// Failed reads yield `Default` placeholders; [`ArgReader::finish`] discards the
/// assembled value whenever anything failed, so a partially bound value never
/// escapes.
pub struct ArgReader<'a> {
    args: &'a JsonObject,
    errors: Vec<FieldError>,
}

impl<'a> ArgReader<'a> {
    pub fn new(args: &'a JsonObject) -> Self {
        Self {
            args,
            errors: Vec::new(),
        }
    }

    pub fn required<T>(&mut self, field: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.args.get(field) {
            None | Some(Value::Null) => {
                self.fail(field, "required field is missing".to_string());
                T::default()
            }
            Some(value) => self.decode(field, value).unwrap_or_default(),
        }
    }

    /// A required string that is interpolated into the request path. Empty,
    /// `.` and `..` would change the route and are refused.
    pub fn segment(&mut self, field: &str) -> String {
        let before = self.errors.len();
        let value: String = self.required(field);
        if self.errors.len() == before && !is_path_segment(&value) {
            self.fail(field, format!("{:?} is not a valid path segment", value));
        }
        value
    }

    /// Absent and `null` both read as `None`.
    pub fn optional<T>(&mut self, field: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        match self.args.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.decode(field, value),
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, InvalidInput> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(InvalidInput {
                errors: self.errors,
            })
        }
    }

    fn decode<T: DeserializeOwned>(&mut self, field: &str, value: &Value) -> Option<T> {
        let value = integral(value).unwrap_or_else(|| value.clone());
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                self.fail(field, e.to_string());
                None
            }
        }
    }

    fn fail(&mut self, field: &str, message: String) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message,
        });
    }
}

/// `1.0` is an integer in JSON Schema terms, so whole floats are read as
/// integers. Beyond 2^53 a float no longer names a single integer.
fn integral(value: &Value) -> Option<Value> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    let f = value.as_f64().filter(|_| value.is_f64())?;
    if f.fract() != 0.0 || !(-MAX_EXACT..=MAX_EXACT).contains(&f) {
        return None;
    }
    if f >= 0.0 {
        Some(Value::from(f as u64))
    } else {
        Some(Value::from(f as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        owner: String,
        number: u64,
        page: Option<u64>,
    }

    impl FromArguments for Sample {
        fn from_arguments(args: &JsonObject) -> Result<Self, InvalidInput> {
            let mut r = ArgReader::new(args);
            let parsed = Sample {
                owner: r.required("owner"),
                number: r.required("number"),
                page: r.optional("page"),
            };
            r.finish(parsed)
        }
    }

    #[test]
    fn test_reads_all_fields() {
        let args = object(json!({"owner": "alice", "number": 3, "page": 2}));
        assert_eq!(
            Sample::from_arguments(&args).unwrap(),
            Sample {
                owner: "alice".into(),
                number: 3,
                page: Some(2),
            }
        );
    }

    #[test]
    fn test_optional_absent_or_null() {
        let args = object(json!({"owner": "alice", "number": 3, "page": null}));
        assert_eq!(Sample::from_arguments(&args).unwrap().page, None);
    }

    #[test]
    fn test_reports_every_failing_field() {
        let args = object(json!({"number": "three", "page": "x"}));
        let err = Sample::from_arguments(&args).unwrap_err();
        let fields: Vec<&str> = err.fields().collect();
        assert_eq!(fields, vec!["owner", "number", "page"]);
    }

    #[test]
    fn test_null_required_is_missing() {
        let args = object(json!({"owner": null, "number": 1}));
        let err = Sample::from_arguments(&args).unwrap_err();
        assert_eq!(
            err.errors,
            vec![FieldError {
                field: "owner".into(),
                message: "required field is missing".into(),
            }]
        );
    }

    #[test]
    fn test_display_lists_fields() {
        let err = Sample::from_arguments(&JsonObject::new()).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("Invalid input: "));
        assert!(text.contains("owner: required field is missing"));
        assert!(text.contains("number: required field is missing"));
    }

    #[test]
    fn test_whole_floats_read_as_integers() {
        let args = object(json!({"owner": "alice", "number": 3.0, "page": 2.0}));
        let parsed = Sample::from_arguments(&args).unwrap();
        assert_eq!(parsed.number, 3);
        assert_eq!(parsed.page, Some(2));
    }

    #[test]
    fn test_fractional_and_negative_numbers_rejected() {
        let args = object(json!({"owner": "alice", "number": 1.5, "page": -1.0}));
        let err = Sample::from_arguments(&args).unwrap_err();
        let fields: Vec<&str> = err.fields().collect();
        assert_eq!(fields, vec!["number", "page"]);
    }

    #[test]
    fn test_segment_refuses_dot_and_empty() {
        for bad in ["", ".", ".."] {
            let args = object(json!({ "name": bad }));
            let mut r = ArgReader::new(&args);
            let _ = r.segment("name");
            let err = r.finish(()).unwrap_err();
            assert_eq!(err.errors.len(), 1, "{bad:?} accepted");
            assert_eq!(err.errors[0].field, "name");
        }
    }

    #[test]
    fn test_segment_keeps_dotted_names() {
        let args = object(json!({"name": "v1.0", "other": "...", "missing": null}));
        let mut r = ArgReader::new(&args);
        assert_eq!(r.segment("name"), "v1.0");
        assert_eq!(r.segment("other"), "...");
        let _ = r.segment("missing");
        let err = r.finish(()).unwrap_err();
        assert_eq!(
            err.errors,
            vec![FieldError {
                field: "missing".into(),
                message: "required field is missing".into(),
            }]
        );
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let args = object(json!({"owner": "a", "number": 1, "extra": true}));
        assert!(Sample::from_arguments(&args).is_ok());
    }
}
