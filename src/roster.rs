// 📋 Roster - a collection of mixed entity kinds, unique by value
//
// Entries are bucketed by `hash_of` and confirmed with `same_value`, so the
// hash/equality contract is what keeps the roster free of duplicates.
// Entries are never handed out mutably, so a stored hash cannot go stale.

use std::collections::HashMap;

use crate::entities::{hash_of, same_value, Entity};
use crate::error::Result;
use crate::sink::DisplaySink;

#[derive(Debug, Default)]
pub struct Roster {
    /// Insertion order
    entries: Vec<Box<dyn Entity>>,
    /// hash → positions in `entries`
    buckets: HashMap<u64, Vec<usize>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity. Returns false (and drops it) if an equal one is held.
    pub fn insert(&mut self, entity: Box<dyn Entity>) -> bool {
        let key = hash_of(entity.as_ref());

        if self.position(entity.as_ref(), key).is_some() {
            tracing::debug!(kind = entity.kind(), "duplicate entity ignored");
            return false;
        }

        self.buckets.entry(key).or_default().push(self.entries.len());
        self.entries.push(entity);
        true
    }

    pub fn push<E: Entity + 'static>(&mut self, entity: E) -> bool {
        self.insert(Box::new(entity))
    }

    pub fn contains(&self, entity: &dyn Entity) -> bool {
        self.position(entity, hash_of(entity)).is_some()
    }

    fn position(&self, entity: &dyn Entity, key: u64) -> Option<usize> {
        self.buckets
            .get(&key)?
            .iter()
            .copied()
            .find(|&index| same_value(self.entries[index].as_ref(), entity))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Entity> + '_ {
        self.entries.iter().map(|entry| entry.as_ref())
    }

    /// Entries whose kind tag is exactly `kind` (variants are not included).
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a dyn Entity> + 'a {
        self.iter().filter(move |entity| entity.kind() == kind)
    }

    /// Send every entry to `sink`; returns how many were emitted.
    pub fn emit_all(&self, sink: &mut dyn DisplaySink) -> Result<usize> {
        for entity in self.iter() {
            sink.emit(entity)?;
        }
        Ok(self.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CertifiedLetter, Employee, Letter, Manager};

    #[test]
    fn test_roster_rejects_equal_values() {
        let mut roster = Roster::new();

        assert!(roster.push(Employee::new(234, "Johnson").unwrap()));
        assert!(!roster.push(Employee::new(234, "Johnson").unwrap()));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_roster_keeps_base_and_variant_apart() {
        let mut roster = Roster::new();

        assert!(roster.push(Employee::new(234, "Johnson").unwrap()));
        assert!(roster.push(Manager::new(234, "Johnson", "IT").unwrap()));
        assert_eq!(roster.len(), 2);

        assert_eq!(roster.of_kind("Employee").count(), 1);
        assert_eq!(roster.of_kind("Manager").count(), 1);
    }

    #[test]
    fn test_roster_contains() {
        let mut roster = Roster::new();
        roster.push(Letter::new("John", "11/16/2025").unwrap());

        assert!(roster.contains(&Letter::new("John", "11/16/2025").unwrap()));
        assert!(!roster.contains(&CertifiedLetter::new("John", "11/16/2025", "ABC123").unwrap()));
        assert!(!roster.contains(&Letter::new("John", "11/17/2025").unwrap()));
    }

    #[test]
    fn test_roster_preserves_insertion_order() {
        let mut roster = Roster::new();
        roster.push(Manager::new(567, "Smith", "IT").unwrap());
        roster.push(Employee::new(234, "Johnson").unwrap());

        let kinds: Vec<&str> = roster.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["Manager", "Employee"]);
    }

    #[test]
    fn test_roster_emit_all() {
        let mut roster = Roster::new();
        roster.push(Employee::new(234, "Johnson").unwrap());
        roster.push(Manager::new(567, "Smith", "IT").unwrap());

        let mut lines: Vec<String> = Vec::new();
        let count = roster.emit_all(&mut lines).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            lines,
            vec![
                "Employee: 234 Johnson".to_string(),
                "Employee: 567 Smith, Department: IT".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::new();
        assert!(roster.is_empty());
        assert_eq!(roster.iter().count(), 0);
    }
}
