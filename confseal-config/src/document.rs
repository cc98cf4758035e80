//! Whole-document substitution.
//!
//! Every string in the tree is passed through a [`StringSubstitutor`].
//! Failures do not stop the walk: each is recorded with its field path and
//! the walk ends with one [`SubstitutionError::Aggregate`] naming all of them.

use crate::error::{SubstitutionError, SubstitutionFailure};
use crate::path::{FieldPath, PathSegment};
use crate::resolver::KeyResolver;
use crate::substitutor::StringSubstitutor;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Decrypts every encrypted reference in `value`.
///
/// `label` names the document in the aggregate error, usually its path.
pub fn substitute_document(
    mut value: Value,
    label: &str,
    resolver: &KeyResolver,
) -> Result<Value, SubstitutionError> {
    let failures = substitute_in_place(&mut value, resolver);
    if failures.is_empty() {
        return Ok(value);
    }

    Err(SubstitutionError::Aggregate {
        label: label.to_string(),
        failures,
    })
}

/// Decrypts in place and returns the failures in document order.
///
/// A string whose substitution fails is left untouched.
pub fn substitute_in_place(
    value: &mut Value,
    resolver: &KeyResolver,
) -> Vec<SubstitutionFailure> {
    let mut walker = Walker {
        substitutor: StringSubstitutor::new(resolver),
        path: FieldPath::root(),
        failures: Vec::new(),
    };
    walker.walk(value);
    walker.failures
}

struct Walker<'r> {
    substitutor: StringSubstitutor<'r>,
    path: FieldPath,
    failures: Vec<SubstitutionFailure>,
}

impl Walker<'_> {
    fn walk(&mut self, value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter_mut() {
                    self.path.push(PathSegment::Key(key.clone()));
                    self.walk(child);
                    self.path.pop();
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter_mut().enumerate() {
                    self.path.push(PathSegment::Index(index));
                    self.walk(child);
                    self.path.pop();
                }
            }
            Value::String(text) => self.substitute_string(text),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    fn substitute_string(&mut self, text: &mut String) {
        let replaced = match self.substitutor.replace(text) {
            Ok(Cow::Borrowed(_)) => return,
            Ok(Cow::Owned(replaced)) => replaced,
            Err(failure) => {
                warn!(
                    field = %self.path,
                    error = %failure.cause,
                    "failed to substitute encrypted value"
                );
                self.failures.push(SubstitutionFailure {
                    field_path: self.path.clone(),
                    original_token: failure.token,
                    cause: failure.cause,
                });
                return;
            }
        };

        debug!(field = %self.path, "substituted encrypted value");
        *text = replaced;
    }
}

/// Parses a JSON document and substitutes it.
pub fn load_json_str(
    text: &str,
    label: &str,
    resolver: &KeyResolver,
) -> Result<Value, SubstitutionError> {
    let value: Value = serde_json::from_str(text).map_err(|source| SubstitutionError::Parse {
        label: label.to_string(),
        source,
    })?;
    substitute_document(value, label, resolver)
}

/// Reads, parses and substitutes the JSON document at `path`.
pub fn load_json_file(
    path: impl AsRef<Path>,
    resolver: &KeyResolver,
) -> Result<Value, SubstitutionError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SubstitutionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_json_str(&text, &path.display().to_string(), resolver)
}

/// Loads the document at `path` and binds it to `T` after substitution.
pub fn load_typed<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    resolver: &KeyResolver,
) -> Result<T, SubstitutionError> {
    let path = path.as_ref();
    let value = load_json_file(path, resolver)?;
    serde_json::from_value(value).map_err(|source| SubstitutionError::Bind {
        label: path.display().to_string(),
        source,
    })
}
