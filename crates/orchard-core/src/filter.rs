//! Query filters over document fields

use crate::document::Document;
use crate::value::Value;
use std::cmp::Ordering;

/// Comparison applied to a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
}

impl Condition {
    /// Check a field value against this condition
    pub fn matches(&self, field: &Value) -> bool {
        match self {
            Condition::Eq(v) => field.loose_eq(v),
            Condition::Ne(v) => !field.loose_eq(v),
            Condition::Gt(v) => field.compare(v) == Some(Ordering::Greater),
            Condition::Gte(v) => matches!(
                field.compare(v),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Condition::Lt(v) => field.compare(v) == Some(Ordering::Less),
            Condition::Lte(v) => {
                matches!(field.compare(v), Some(Ordering::Less | Ordering::Equal))
            }
            Condition::In(values) => values.iter().any(|v| field.loose_eq(v)),
        }
    }
}

/// Conjunction of field conditions; the empty filter matches every document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Condition)>,
}

impl Filter {
    /// Match every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Match documents whose `path` equals `value`
    pub fn eq(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(path, Condition::Eq(value.into()))
    }

    /// Match documents by name
    pub fn by_name(name: &str) -> Self {
        Self::eq("name", name)
    }

    /// Add a condition on `path`
    pub fn and(mut self, path: impl Into<String>, condition: Condition) -> Self {
        self.conditions.push((path.into(), condition));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[(String, Condition)] {
        &self.conditions
    }

    /// Check a document against every condition
    pub fn matches<D: Document>(&self, doc: &D) -> bool {
        if self.conditions.is_empty() {
            return true;
        }
        let fields = Value::Map(doc.to_value_map());
        self.conditions.iter().all(|(path, condition)| {
            let field = fields.lookup(path).unwrap_or(&Value::Null);
            condition.matches(field)
        })
    }
}
