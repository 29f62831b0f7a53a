//! Operator-facing interface numbering.

use std::collections::HashSet;

use crate::error::{Error, Result};

use super::InterfaceRecord;

/// Suffix appended to labels of interfaces created in this session.
pub const NEW_MARKER: &str = " *new*";

/// Maps 1-based ordinals to interface names and remembers which
/// interfaces were created during the current session.
///
/// Ordinals are positional and recomputed on every refresh, so they are
/// not stable identities. Resolve an ordinal right before using it.
#[derive(Debug, Clone, Default)]
pub struct InterfaceRegistry {
    names: Vec<String>,
    new_set: HashSet<String>,
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the numbered names with a fresh inventory listing.
    ///
    /// The "new" markers are kept, even for names that disappeared.
    pub fn refresh(&mut self, records: &[InterfaceRecord]) {
        self.names = records.iter().map(|r| r.name.clone()).collect();
    }

    /// Resolve a 1-based ordinal to an interface name.
    pub fn resolve(&self, ordinal: usize) -> Result<&str> {
        ordinal
            .checked_sub(1)
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
            .ok_or(Error::InvalidOrdinal {
                ordinal,
                count: self.names.len(),
            })
    }

    /// Ordinal currently assigned to `name`.
    pub fn ordinal_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name).map(|i| i + 1)
    }

    pub fn mark_new(&mut self, name: &str) {
        self.new_set.insert(name.to_string());
    }

    pub fn unmark_new(&mut self, name: &str) {
        self.new_set.remove(name);
    }

    pub fn is_new(&self, name: &str) -> bool {
        self.new_set.contains(name)
    }

    /// Drop "new" markers for names that are no longer listed.
    pub fn prune_new(&mut self) {
        let names = &self.names;
        self.new_set.retain(|n| names.contains(n));
    }

    /// Display label for an ordinal, e.g. `"2. tap-work *new*"`.
    pub fn label(&self, ordinal: usize) -> Result<String> {
        let name = self.resolve(ordinal)?;
        Ok(self.format_label(ordinal, name))
    }

    /// Labels for every interface, in ordinal order.
    pub fn labels(&self) -> Vec<String> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| self.format_label(i + 1, name))
            .collect()
    }

    fn format_label(&self, ordinal: usize, name: &str) -> String {
        let mut label = format!("{}. {}", ordinal, name);
        if self.is_new(name) {
            label.push_str(NEW_MARKER);
        }
        label
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
