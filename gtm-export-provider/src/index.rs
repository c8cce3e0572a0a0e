//! Lookup structures built once per export.
//!
//! Entities are stored in declaration order; the maps hold positions into
//! that vector. Name maps keep the first position seen, so ties resolve to
//! the entity declared first.

use std::collections::HashMap;

use gtm_export_model::{Entity, GroupedEntity};

/// Id and name maps over an ungrouped collection.
#[derive(Debug, Clone)]
pub struct FlatIndex<T> {
    items: Vec<T>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl<T: Entity> FlatIndex<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_name = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            by_id.entry(item.id().to_string()).or_insert(pos);
            by_name.entry(item.name().to_string()).or_insert(pos);
        }
        Self {
            items,
            by_id,
            by_name,
        }
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.by_id.get(id).map(|&pos| &self.items[pos])
    }

    pub fn first_named(&self, name: &str) -> Option<&T> {
        self.by_name.get(name).map(|&pos| &self.items[pos])
    }

    /// First entity whose id or name equals `key`, by declaration order.
    pub fn first_matching(&self, key: &str) -> Option<&T> {
        let by_id = self.by_id.get(key).copied();
        let by_name = self.by_name.get(key).copied();
        let pos = match (by_id, by_name) {
            (Some(a), Some(b)) => a.min(b),
            (a, b) => a.or(b)?,
        };
        Some(&self.items[pos])
    }
}

/// Id, name and folder-membership maps over a groupable collection.
#[derive(Debug, Clone)]
pub struct GroupedIndex<T> {
    flat: FlatIndex<T>,
    by_folder: HashMap<String, Vec<usize>>,
}

impl<T: GroupedEntity> GroupedIndex<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut by_folder: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, item) in items.iter().enumerate() {
            if let Some(folder_id) = item.parent_folder_id() {
                by_folder.entry(folder_id.to_string()).or_default().push(pos);
            }
        }
        Self {
            flat: FlatIndex::new(items),
            by_folder,
        }
    }

    pub fn all(&self) -> &[T] {
        self.flat.all()
    }

    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.flat.get(id)
    }

    pub fn first_named(&self, name: &str) -> Option<&T> {
        self.flat.first_named(name)
    }

    /// Members of `folder_id` in declaration order.
    pub fn in_folder<'a>(&'a self, folder_id: &str) -> impl Iterator<Item = &'a T> + use<'a, T> {
        let items = self.flat.all();
        self.by_folder
            .get(folder_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&pos| &items[pos])
    }

    /// First member of `folder_id` named `name`.
    pub fn first_named_in_folder(&self, folder_id: &str, name: &str) -> Option<&T> {
        self.in_folder(folder_id).find(|item| item.name() == name)
    }

    /// Entities without a folder, in declaration order.
    pub fn ungrouped(&self) -> impl Iterator<Item = &T> {
        self.flat
            .all()
            .iter()
            .filter(|item| item.parent_folder_id().is_none())
    }
}
