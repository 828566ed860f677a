//! Predicate construction for record lookups.
//!
//! A [`Predicate`] is a partial record: a set of field/value pairs that a stored record must
//! carry, each with an equal value, for the record to match. Fields of the record that the
//! predicate does not name are ignored. The empty predicate matches every record.
//!
//! # Example
//!
//! ```ignore
//! use shelfkeep_core::predicate::Predicate;
//!
//! let by_id = Predicate::field("id", 2);
//! let by_author = Predicate::field("author", "Kyle Simpson").and("title", "You Don't Know JS");
//! ```

use bson::{Bson, Document};

/// A partial record used to select records by exact per-field equality.
///
/// Field order follows construction order and has no effect on matching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    fields: Document,
}

impl Predicate {
    /// Creates an empty predicate, which matches every record.
    pub fn new() -> Self {
        Self { fields: Document::new() }
    }

    /// Creates a predicate requiring `field` to equal `value`.
    pub fn field(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::new().and(field, value)
    }

    /// Adds a further required field to this predicate.
    ///
    /// Naming a field twice keeps the last value.
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns `true` if the predicate names no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the required field/value pairs.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Bson)> {
        self.fields
            .iter()
            .map(|(field, value)| (field.as_str(), value))
    }

    /// Walks this predicate with `visitor`, stopping at the first field it rejects.
    pub fn accept<V: PredicateVisitor>(&self, visitor: &mut V) -> bool {
        self.fields()
            .all(|(field, value)| visitor.visit_field(field, value))
    }
}

impl From<Document> for Predicate {
    fn from(fields: Document) -> Self {
        Self { fields }
    }
}

/// Evaluates the per-field requirements of a [`Predicate`].
///
/// Backends implement this to decide whether one stored record satisfies one required
/// field; [`Predicate::accept`] combines the answers with logical AND.
pub trait PredicateVisitor {
    /// Returns `true` if the record under evaluation has `field` equal to `value`.
    fn visit_field(&mut self, field: &str, value: &Bson) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    struct Recorder(Vec<String>);

    impl PredicateVisitor for Recorder {
        fn visit_field(&mut self, field: &str, _value: &Bson) -> bool {
            self.0.push(field.to_string());
            field != "stop"
        }
    }

    #[test]
    fn builder_keeps_last_value_for_repeated_field() {
        let predicate = Predicate::field("id", 1).and("id", 2);

        assert_eq!(predicate, Predicate::from(doc! { "id": 2 }));
    }

    #[test]
    fn accept_short_circuits_on_first_rejected_field() {
        let predicate = Predicate::field("a", 1).and("stop", 2).and("c", 3);
        let mut recorder = Recorder(Vec::new());

        assert!(!predicate.accept(&mut recorder));
        assert_eq!(recorder.0, vec!["a", "stop"]);
    }

    #[test]
    fn empty_predicate_accepts_without_visiting() {
        let mut recorder = Recorder(Vec::new());

        assert!(Predicate::new().is_empty());
        assert!(Predicate::new().accept(&mut recorder));
        assert!(recorder.0.is_empty());
    }
}
