//! Predicate evaluation for in-memory record filtering.
//!
//! Matching is shallow: for every field a predicate names, the record must carry the field
//! and its value must compare equal. Numbers compare by value regardless of their BSON
//! width, so a predicate built from an `i32` literal finds a record stored with an `i64` or
//! `f64` of the same value.

use bson::{Bson, Document, datetime::DateTime};

use shelfkeep_core::predicate::{Predicate, PredicateVisitor};

/// Comparable view of a BSON value.
///
/// # Note
///
/// This is a private implementation detail used for predicate evaluation.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (Int32 and Int64 widened)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// DateTime value
    DateTime(DateTime),
    /// String value
    String(&'a str),
    /// Array of comparable values
    Array(Vec<Comparable<'a>>),
    /// Sub-document of comparable values, in stored order
    Map(Vec<(&'a str, Comparable<'a>)>),
    /// Any other BSON type, compared structurally
    Other(&'a Bson),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Int(i64::from(*value)),
            Bson::Int64(value) => Comparable::Int(*value),
            Bson::Double(value) => Comparable::Float(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            Bson::Document(doc) => Comparable::Map(
                doc
                    .iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<Vec<_>>()
            ),
            other => Comparable::Other(other),
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Int(a), Comparable::Int(b)) => a == b,
            (Comparable::Float(a), Comparable::Float(b)) => a == b,
            (Comparable::Int(a), Comparable::Float(b))
            | (Comparable::Float(b), Comparable::Int(a)) => int_equals_float(*a, *b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            // Key order is not significant for sub-documents.
            (Comparable::Map(a), Comparable::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter().any(|(other_key, other_value)| key == other_key && value == other_value)
                    })
            },
            (Comparable::Other(a), Comparable::Other(b)) => a == b,
            _ => false,
        }
    }
}

/// Exact comparison: `b` must be integral and inside the `i64` range.
fn int_equals_float(a: i64, b: f64) -> bool {
    b.fract() == 0.0 && b >= i64::MIN as f64 && b < i64::MAX as f64 && b as i64 == a
}

/// Evaluates predicates against a single stored record.
pub(crate) struct RecordEvaluator<'a> {
    record: &'a Document,
}

impl<'a> RecordEvaluator<'a> {
    pub fn new(record: &'a Document) -> Self {
        Self { record }
    }

    /// Returns `true` if `record` satisfies every field of `predicate`.
    pub fn matches(record: &'a Document, predicate: &Predicate) -> bool {
        predicate.accept(&mut RecordEvaluator::new(record))
    }
}

impl<'a> PredicateVisitor for RecordEvaluator<'a> {
    fn visit_field(&mut self, field: &str, value: &Bson) -> bool {
        match self.record.get(field) {
            Some(field_value) => Comparable::from(field_value) == Comparable::from(value),
            None => false,
        }
    }
}
