//! Schema-driven parameter validation shared by every skill.
//!
//! A skill declares its parameters as a static slice of [`FieldSpec`]s.
//! [`validate`] checks a JSON argument object against that schema and returns
//! either a [`ValidatedArgs`] bag of coerced values or a [`SkillError`] naming
//! the offending field. Unknown parameters are ignored.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::error::SkillError;

/// Longest string excerpt echoed back in a type error.
const FOUND_EXCERPT_CHARS: usize = 40;

/// The shape a parameter value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Integer greater than zero.
    PositiveInteger,
    /// Finite number greater than zero.
    PositiveNumber,
    /// Array whose elements are all strings. May be empty.
    TextList,
    /// ISO-8601 timestamp string. A missing offset is read as UTC.
    Timestamp,
}

impl FieldKind {
    /// Human-readable description used in type errors.
    #[must_use]
    pub fn expected(self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::PositiveInteger => "positive integer",
            FieldKind::PositiveNumber => "positive number",
            FieldKind::TextList => "array of strings",
            FieldKind::Timestamp => "ISO-8601 timestamp string",
        }
    }
}

/// One parameter in a skill's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
}

impl FieldSpec {
    /// A required, non-nullable parameter.
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            nullable: false,
        }
    }

    /// Allow an explicit `null`.
    #[must_use]
    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    /// Allow the parameter to be omitted.
    #[must_use]
    pub const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }
}

/// A coerced parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(u64),
    Number(f64),
    TextList(Vec<String>),
    Timestamp(DateTime<Utc>),
}

/// Parameters that passed [`validate`], keyed by schema field name.
///
/// Values are moved out with the `take_*` accessors. A `take_*` call whose
/// variant does not match leaves the value in place. An optional nullable
/// field that was omitted is stored as [`FieldValue::Null`].
#[derive(Debug, Default)]
pub struct ValidatedArgs {
    values: HashMap<&'static str, FieldValue>,
}

impl ValidatedArgs {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// # Errors
    ///
    /// `MissingParameter` if absent, `InvalidParameterType` if not text.
    pub fn take_text(&mut self, name: &'static str) -> Result<String, SkillError> {
        match self.take(name)? {
            FieldValue::Text(s) => Ok(s),
            other => Err(self.reject(name, FieldKind::Text, other)),
        }
    }

    /// Like [`take_text`](Self::take_text) but maps `null` and absence to `None`.
    ///
    /// # Errors
    ///
    /// `InvalidParameterType` if present and not text.
    pub fn take_optional_text(&mut self, name: &'static str) -> Result<Option<String>, SkillError> {
        match self.values.remove(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(FieldValue::Text(s)) => Ok(Some(s)),
            Some(other) => Err(self.reject(name, FieldKind::Text, other)),
        }
    }

    /// # Errors
    ///
    /// `MissingParameter` if absent, `InvalidParameterType` if not an integer.
    pub fn take_integer(&mut self, name: &'static str) -> Result<u64, SkillError> {
        match self.take(name)? {
            FieldValue::Integer(n) => Ok(n),
            other => Err(self.reject(name, FieldKind::PositiveInteger, other)),
        }
    }

    /// Integers are widened to `f64`.
    ///
    /// # Errors
    ///
    /// `MissingParameter` if absent, `InvalidParameterType` if not numeric.
    pub fn take_number(&mut self, name: &'static str) -> Result<f64, SkillError> {
        match self.take(name)? {
            FieldValue::Number(n) => Ok(n),
            #[allow(clippy::cast_precision_loss)]
            FieldValue::Integer(n) => Ok(n as f64),
            other => Err(self.reject(name, FieldKind::PositiveNumber, other)),
        }
    }

    /// # Errors
    ///
    /// `MissingParameter` if absent, `InvalidParameterType` if not a string list.
    pub fn take_text_list(&mut self, name: &'static str) -> Result<Vec<String>, SkillError> {
        match self.take(name)? {
            FieldValue::TextList(items) => Ok(items),
            other => Err(self.reject(name, FieldKind::TextList, other)),
        }
    }

    /// Maps `null` and absence to `None`.
    ///
    /// # Errors
    ///
    /// `InvalidParameterType` if present and not a timestamp.
    pub fn take_optional_timestamp(
        &mut self,
        name: &'static str,
    ) -> Result<Option<DateTime<Utc>>, SkillError> {
        match self.values.remove(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(FieldValue::Timestamp(ts)) => Ok(Some(ts)),
            Some(other) => Err(self.reject(name, FieldKind::Timestamp, other)),
        }
    }

    fn take(&mut self, name: &'static str) -> Result<FieldValue, SkillError> {
        self.values
            .remove(name)
            .ok_or(SkillError::MissingParameter { field: name })
    }

    /// Puts a mismatched value back and builds the type error for it.
    fn reject(&mut self, name: &'static str, kind: FieldKind, value: FieldValue) -> SkillError {
        let err = mismatch(name, kind, &value);
        self.values.insert(name, value);
        err
    }
}

/// Validate `args` against `schema`.
///
/// Fields are checked in schema order and the first failure is returned:
///
/// - a required field that is absent yields `MissingParameter`;
/// - `null` on a nullable field is accepted without a type check;
/// - any other value that does not match the field's [`FieldKind`] yields
///   `InvalidParameterType`.
///
/// # Errors
///
/// Returns the first [`SkillError::MissingParameter`] or
/// [`SkillError::InvalidParameterType`] encountered.
pub fn validate(
    args: &Map<String, Value>,
    schema: &[FieldSpec],
) -> Result<ValidatedArgs, SkillError> {
    for key in args.keys() {
        if !schema.iter().any(|spec| spec.name == key) {
            tracing::debug!(parameter = %key, "ignoring unknown parameter");
        }
    }

    let mut values = HashMap::with_capacity(schema.len());
    for spec in schema {
        match args.get(spec.name) {
            None if spec.required => {
                return Err(SkillError::MissingParameter { field: spec.name });
            }
            None => {
                if spec.nullable {
                    values.insert(spec.name, FieldValue::Null);
                }
            }
            Some(Value::Null) if spec.nullable => {
                values.insert(spec.name, FieldValue::Null);
            }
            Some(value) => {
                values.insert(spec.name, coerce(spec, value)?);
            }
        }
    }

    Ok(ValidatedArgs { values })
}

/// Borrow the argument object out of a JSON payload.
///
/// # Errors
///
/// Returns `InvalidParameterType` on the pseudo-field `arguments` when the
/// payload is not a JSON object.
pub fn args_object(args: &Value) -> Result<&Map<String, Value>, SkillError> {
    match args {
        Value::Object(map) => Ok(map),
        other => Err(SkillError::InvalidParameterType {
            field: "arguments",
            expected: "object",
            found: describe(other),
        }),
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2026-02-05T12:00:00Z`, `2026-02-05T12:00:00+02:00`) and
/// offset-less date-times, which are read as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn coerce(spec: &FieldSpec, value: &Value) -> Result<FieldValue, SkillError> {
    let invalid = |found: String| SkillError::InvalidParameterType {
        field: spec.name,
        expected: spec.kind.expected(),
        found,
    };

    match spec.kind {
        FieldKind::Text => value
            .as_str()
            .map(|s| FieldValue::Text(s.to_owned()))
            .ok_or_else(|| invalid(describe(value))),
        FieldKind::PositiveInteger => value
            .as_u64()
            .filter(|n| *n > 0)
            .map(FieldValue::Integer)
            .ok_or_else(|| invalid(describe(value))),
        FieldKind::PositiveNumber => value
            .as_f64()
            .filter(|n| n.is_finite() && *n > 0.0)
            .map(FieldValue::Number)
            .ok_or_else(|| invalid(describe(value))),
        FieldKind::TextList => {
            let Value::Array(items) = value else {
                return Err(invalid(describe(value)));
            };
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(s) => out.push(s.to_owned()),
                    None => return Err(invalid(format!("{} at index {index}", describe(item)))),
                }
            }
            Ok(FieldValue::TextList(out))
        }
        FieldKind::Timestamp => value
            .as_str()
            .and_then(parse_timestamp)
            .map(FieldValue::Timestamp)
            .ok_or_else(|| invalid(describe(value))),
    }
}

fn mismatch(field: &'static str, kind: FieldKind, found: &FieldValue) -> SkillError {
    let found = match found {
        FieldValue::Null => "null".to_string(),
        FieldValue::Text(_) => "string".to_string(),
        FieldValue::Integer(n) => format!("number {n}"),
        FieldValue::Number(n) => format!("number {n}"),
        FieldValue::TextList(items) => format!("array of {} strings", items.len()),
        FieldValue::Timestamp(ts) => format!("timestamp {}", ts.to_rfc3339()),
    };
    SkillError::InvalidParameterType {
        field,
        expected: kind.expected(),
        found,
    }
}

/// Short description of a JSON value for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => {
            let excerpt: String = s.chars().take(FOUND_EXCERPT_CHARS).collect();
            if excerpt.len() < s.len() {
                format!("string \"{excerpt}...\"")
            } else {
                format!("string \"{excerpt}\"")
            }
        }
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}
