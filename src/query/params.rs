//! Named query parameters and their binding to positional placeholders.

use std::collections::BTreeMap;
use std::fmt;

use crate::db::Value;
use crate::error::{FlightError, Result};

/// Declared type of a query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Integer,
    Text,
}

impl ParamKind {
    fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ParamKind::Integer, Value::Int(_)) | (ParamKind::Text, Value::String(_))
        )
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Integer => write!(f, "integer"),
            ParamKind::Text => write!(f, "text"),
        }
    }
}

/// A named parameter a catalog query declares.
///
/// The position of a parameter in its query's list is the placeholder index
/// (`?1` for the first, `?2` for the second, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
}

impl ParamSpec {
    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Integer,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Text,
        }
    }
}

/// Parameter values supplied by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any earlier value with the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Orders the supplied values by `specs`, checking that every declared
    /// parameter is present with the right type and nothing else was given.
    pub fn bind(&self, specs: &[ParamSpec]) -> Result<Vec<Value>> {
        if let Some(unexpected) = self
            .values
            .keys()
            .find(|name| !specs.iter().any(|spec| spec.name == name.as_str()))
        {
            return Err(FlightError::query(format!(
                "Unexpected parameter '{unexpected}'"
            )));
        }

        specs
            .iter()
            .map(|spec| {
                let value = self.values.get(spec.name).ok_or_else(|| {
                    FlightError::query(format!("Missing parameter '{}'", spec.name))
                })?;
                if !spec.kind.accepts(value) {
                    return Err(FlightError::query(format!(
                        "Parameter '{}' must be {}, got {}",
                        spec.name,
                        spec.kind,
                        value.type_name()
                    )));
                }
                Ok(value.clone())
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
