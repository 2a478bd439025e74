//! Core data structures for ArCo catalogue results
//!
//! A [`BindingRow`] is one solution as delivered by the SPARQL endpoint, a
//! [`Record`] is the flat, display-ready form handed back to callers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Kind of RDF term carried by a binding, as named by the SPARQL 1.1 JSON results format.
///
/// Only the value payload is used downstream, so unknown kinds (SPARQL 1.2 `triple`, vendor
/// extensions) and a missing `type` decode as [`TermType::Other`] instead of failing the row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TermType {
    Uri,
    Literal,
    /// Pre-1.1 spelling still emitted by Virtuoso
    TypedLiteral,
    Bnode,
    #[default]
    #[serde(other)]
    Other,
}

/// One bound value of a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingValue {
    #[serde(rename = "type", default)]
    pub term_type: TermType,
    pub value: String,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl BindingValue {
    pub fn literal(value: &str) -> Self {
        Self { term_type: TermType::Literal, value: value.to_string(), lang: None, datatype: None }
    }

    pub fn lang_literal(value: &str, lang: &str) -> Self {
        Self {
            term_type: TermType::Literal,
            value: value.to_string(),
            lang: Some(lang.to_string()),
            datatype: None,
        }
    }

    pub fn uri(value: &str) -> Self {
        Self { term_type: TermType::Uri, value: value.to_string(), lang: None, datatype: None }
    }
}

/// One solution: variable name to bound value. Unbound variables are simply missing.
pub type BindingRow = HashMap<String, BindingValue>;

/// A flat catalogue entry: field name to display string.
///
/// Holds exactly the fields that were bound on the originating row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
