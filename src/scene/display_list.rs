//! Display list: Insertion-ordered map from object id to object.
//!
//! Lookup by id and back-to-front iteration share one structure, so the
//! display order can never disagree with the set of live objects.

use super::object::ObjectId;
use std::collections::HashMap;

/// Objects keyed by id, iterated in display (insertion) order.
#[derive(Debug, Clone)]
pub struct DisplayList<T> {
    /// Entries back to front.
    entries: Vec<(ObjectId, T)>,
    /// Position of each id in `entries`.
    index: HashMap<ObjectId, usize>,
}

impl<T> DisplayList<T> {
    /// Create an empty display list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append `value` on top of everything else.
    ///
    /// Returns `false` and leaves the list unchanged if `id` is taken.
    pub fn push(&mut self, id: ObjectId, value: T) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id, self.entries.len());
        self.entries.push((id, value));
        true
    }

    /// Get an entry by id.
    pub fn get(&self, id: ObjectId) -> Option<&T> {
        self.index.get(&id).map(|&i| &self.entries[i].1)
    }

    /// Get a mutable entry by id.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        self.index.get(&id).map(|&i| &mut self.entries[i].1)
    }

    /// Check if `id` is present.
    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    /// Remove an entry, keeping the relative order of the rest.
    pub fn remove(&mut self, id: ObjectId) -> Option<T> {
        let position = self.index.remove(&id)?;
        let (_, value) = self.entries.remove(position);

        for (i, (shifted, _)) in self.entries.iter().enumerate().skip(position) {
            self.index.insert(*shifted, i);
        }
        Some(value)
    }

    /// Entries back to front.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    /// Mutable entries back to front.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut T)> {
        self.entries.iter_mut().map(|(id, value)| (*id, value))
    }

    /// Ids back to front.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for DisplayList<T> {
    fn default() -> Self {
        Self::new()
    }
}
