//! Constant table built up while a source is scanned.

use crate::types::{OrderedMap, Scalar};

/// Constants declared so far in one parse, in declaration order.
///
/// The evaluator only ever sees `&ConstantTable`; the scanner is the single
/// owner that defines new entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantTable {
    entries: OrderedMap<Scalar>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`. A redeclared name takes the new value (last write
    /// wins) and keeps its original position.
    pub fn define(&mut self, name: impl Into<String>, value: Scalar) -> Option<Scalar> {
        self.entries.insert(name, value)
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter()
    }
}
