//! Typed query-string parameters.
//!
//! Mock services are tuned through flat `key=value` parameters that arrive
//! either from configuration or from the browser-style URL query string.
//! Values are typed on parse: `true`/`false` become booleans, integral and
//! decimal literals become numbers, a bare key becomes `true`, and anything
//! else is kept as text.
//!
//! # Examples
//! ```
//! use querystring::{QueryParams, QueryValue};
//!
//! let config = QueryParams::parse("api.delay=250&auth.skip=false");
//! let url = QueryParams::parse("?auth.skip");
//! let params = config.overlay(url);
//!
//! assert_eq!(params.get("auth.skip"), Some(&QueryValue::Bool(true)));
//! assert_eq!(params.get_u64("api.delay"), Some(250));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A single typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// `true`, `false`, or a bare key.
    Bool(bool),
    /// Integral literal.
    Integer(i64),
    /// Decimal literal that is not integral.
    Float(f64),
    /// Anything else, percent-decoded.
    Text(String),
}

impl QueryValue {
    fn from_raw(raw: &str) -> Self {
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(integer) = raw.parse::<i64>() {
            return Self::Integer(integer);
        }
        match raw.parse::<f64>() {
            Ok(float) if float.is_finite() && looks_numeric(raw) => Self::Float(float),
            _ => Self::Text(raw.to_owned()),
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

// `f64::from_str` accepts "inf" and "NaN"; only plain decimal literals count.
fn looks_numeric(raw: &str) -> bool {
    raw.chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E'))
}

/// Ordered set of typed query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, QueryValue>);

impl QueryParams {
    /// Parse a query string, with or without its leading `?`.
    ///
    /// Empty segments are skipped. When a key repeats, the last value wins.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let trimmed = query.strip_prefix('?').unwrap_or(query);
        let mut params = BTreeMap::new();
        for segment in trimmed.split('&').filter(|segment| !segment.is_empty()) {
            let bare_key = !segment.contains('=');
            for (key, value) in url::form_urlencoded::parse(segment.as_bytes()) {
                if key.is_empty() {
                    continue;
                }
                let typed = if bare_key {
                    QueryValue::Bool(true)
                } else {
                    QueryValue::from_raw(&value)
                };
                params.insert(key.into_owned(), typed);
            }
        }
        Self(params)
    }

    /// Merge `other` on top of `self`; keys present in both take `other`'s value.
    #[must_use]
    pub fn overlay(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Insert or replace one parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: QueryValue) {
        self.0.insert(key.into(), value);
    }

    /// Look up a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// Boolean view of a parameter. Missing keys read as `false`.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(QueryValue::Bool(true)))
    }

    /// Non-negative integer view of a parameter.
    #[must_use]
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        match self.get(key) {
            Some(QueryValue::Integer(value)) => u64::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Iterate parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
