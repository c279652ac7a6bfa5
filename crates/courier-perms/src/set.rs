//! Permission sets and permission intersections.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::descriptor::PermissionDescriptor;

/// A set of permission descriptors, unique by name.
///
/// Iteration is in name order, which keeps encoded blocks deterministic.
/// Inserting a descriptor whose name is already present replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionSet<D> {
    descriptors: BTreeMap<String, D>,
}

impl<D: PermissionDescriptor> PermissionSet<D> {
    pub fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Insert a descriptor, returning the one it replaced.
    pub fn insert(&mut self, descriptor: D) -> Option<D> {
        self.descriptors
            .insert(descriptor.name().to_string(), descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&D> {
        self.descriptors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors in name order.
    pub fn iter(&self) -> btree_map::Values<'_, String, D> {
        self.descriptors.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.keys().map(String::as_str)
    }
}

impl<D: PermissionDescriptor> Default for PermissionSet<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: PermissionDescriptor> FromIterator<D> for PermissionSet<D> {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        let mut set = Self::new();
        for descriptor in iter {
            set.insert(descriptor);
        }
        set
    }
}

impl<D> IntoIterator for PermissionSet<D> {
    type Item = D;
    type IntoIter = btree_map::IntoValues<String, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.into_values()
    }
}

impl<'a, D> IntoIterator for &'a PermissionSet<D> {
    type Item = &'a D;
    type IntoIter = btree_map::Values<'a, String, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.values()
    }
}

/// An ordered sequence of permission sets whose effective meaning is their
/// intersection.
///
/// Order is preserved through encode and decode. It may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionIntersection<D> {
    sets: Vec<PermissionSet<D>>,
}

impl<D: PermissionDescriptor> PermissionIntersection<D> {
    pub fn new(sets: Vec<PermissionSet<D>>) -> Self {
        Self { sets }
    }

    /// An intersection with no sets.
    pub fn empty() -> Self {
        Self { sets: Vec::new() }
    }

    pub fn push(&mut self, set: PermissionSet<D>) {
        self.sets.push(set);
    }

    pub fn sets(&self) -> &[PermissionSet<D>] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PermissionSet<D>> {
        self.sets.iter()
    }

    pub fn into_sets(self) -> Vec<PermissionSet<D>> {
        self.sets
    }
}

impl<D: PermissionDescriptor> Default for PermissionIntersection<D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<D: PermissionDescriptor> From<Vec<PermissionSet<D>>> for PermissionIntersection<D> {
    fn from(sets: Vec<PermissionSet<D>>) -> Self {
        Self::new(sets)
    }
}

impl<D: PermissionDescriptor> FromIterator<PermissionSet<D>> for PermissionIntersection<D> {
    fn from_iter<I: IntoIterator<Item = PermissionSet<D>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, D> IntoIterator for &'a PermissionIntersection<D> {
    type Item = &'a PermissionSet<D>;
    type IntoIter = std::slice::Iter<'a, PermissionSet<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}
