use std::collections::HashMap;

use super::Texture;

/// Handle to a texture slot in a [`TextureTable`].
///
/// Ids stay valid until their slot is unloaded; a freed slot is reused by the
/// next insert, so holding an id past `unload` is a logic error that resolves
/// to `None` or to the newer texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(usize);

impl TextureId {
    #[cfg(test)]
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Name-addressed arena of loaded textures.
///
/// Generic over the stored value so slot bookkeeping can be exercised without
/// a GPU; the engine uses `TextureTable<Texture>`.
#[derive(Debug)]
pub struct TextureTable<T = Texture> {
    slots: Vec<Option<T>>,
    names: HashMap<String, TextureId>,
}

impl<T> Default for TextureTable<T> {
    fn default() -> Self {
        Self { slots: Vec::new(), names: HashMap::new() }
    }
}

impl<T> TextureTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`, replacing (and dropping) any previous
    /// texture with that name.
    pub fn insert(&mut self, name: &str, value: T) -> TextureId {
        if let Some(&id) = self.names.get(name) {
            self.slots[id.0] = Some(value);
            return id;
        }

        let id = match self.slots.iter().position(Option::is_none) {
            Some(free) => {
                self.slots[free] = Some(value);
                TextureId(free)
            }
            None => {
                self.slots.push(Some(value));
                TextureId(self.slots.len() - 1)
            }
        };
        self.names.insert(name.to_string(), id);
        id
    }

    #[inline]
    pub fn get(&self, id: TextureId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub fn id_of(&self, name: &str) -> Option<TextureId> {
        self.names.get(name).copied()
    }

    /// Drops the texture registered under `name`. Returns `false` if unknown.
    pub fn unload(&mut self, name: &str) -> bool {
        let Some(id) = self.names.remove(name) else {
            return false;
        };
        self.slots[id.0] = None;
        true
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup_by_name() {
        let mut table: TextureTable<&str> = TextureTable::new();
        let a = table.insert("hero", "hero pixels");
        let b = table.insert("tree", "tree pixels");
        assert_ne!(a, b);
        assert_eq!(table.id_of("hero"), Some(a));
        assert_eq!(table.get(b), Some(&"tree pixels"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn reinserting_a_name_replaces_in_place() {
        let mut table: TextureTable<u32> = TextureTable::new();
        let first = table.insert("hero", 1);
        let second = table.insert("hero", 2);
        assert_eq!(first, second);
        assert_eq!(table.get(first), Some(&2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unload_frees_slot_for_reuse() {
        let mut table: TextureTable<u32> = TextureTable::new();
        let a = table.insert("a", 1);
        table.insert("b", 2);
        assert!(table.unload("a"));
        assert_eq!(table.get(a), None);
        assert_eq!(table.id_of("a"), None);
        assert!(!table.unload("a"));

        let c = table.insert("c", 3);
        assert_eq!(c, a);
        assert_eq!(table.get(c), Some(&3));
    }

    #[test]
    fn clear_drops_everything() {
        let mut table: TextureTable<u32> = TextureTable::new();
        table.insert("a", 1);
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.get(TextureId::from_index(0)), None);
    }
}
