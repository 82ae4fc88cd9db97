//! Object registry keyed by interaction category
//!
//! One ordered collection per category. Ids are handed out on registration
//! and never reused within a session.

use serde::{Deserialize, Serialize};

use super::object::{Category, ObjectId, WorldObject};

/// A registered object with its handle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: ObjectId,
    pub object: WorldObject,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectRegistry {
    deadly: Vec<Entry>,
    blocking: Vec<Entry>,
    collectable: Vec<Entry>,
    next_id: u32,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, category: Category) -> &Vec<Entry> {
        match category {
            Category::Deadly => &self.deadly,
            Category::Blocking => &self.blocking,
            Category::Collectable => &self.collectable,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<Entry> {
        match category {
            Category::Deadly => &mut self.deadly,
            Category::Blocking => &mut self.blocking,
            Category::Collectable => &mut self.collectable,
        }
    }

    /// Append an object to its category and return its handle
    pub fn register(&mut self, object: WorldObject, category: Category) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.bucket_mut(category).push(Entry { id, object });
        id
    }

    /// Remove an object from whichever category holds it.
    ///
    /// Returns the removed object, or `None` if it was already gone.
    pub fn unregister(&mut self, id: ObjectId) -> Option<WorldObject> {
        for category in Category::ALL {
            let bucket = self.bucket_mut(category);
            if let Some(index) = bucket.iter().position(|e| e.id == id) {
                return Some(bucket.remove(index).object);
            }
        }
        None
    }

    /// Live objects of a category in registration order
    pub fn all_in(&self, category: Category) -> &[Entry] {
        self.bucket(category)
    }

    pub fn len(&self, category: Category) -> usize {
        self.bucket(category).len()
    }

    pub fn category_of(&self, id: ObjectId) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|&c| self.bucket(c).iter().any(|e| e.id == id))
    }

    pub fn get(&self, id: ObjectId) -> Option<&WorldObject> {
        Category::ALL
            .iter()
            .find_map(|&c| self.bucket(c).iter().find(|e| e.id == id))
            .map(|e| &e.object)
    }

    /// Re-pose every animated object for session time `time`
    pub fn animate(&mut self, time: f64) {
        for category in Category::ALL {
            for entry in self.bucket_mut(category) {
                entry.object.animate(time);
            }
        }
    }
}
