use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    index: usize,
    generation: u64,
}

impl Slot {
    pub fn index(self) -> usize {
        self.index
    }
}

struct Entry<T> {
    value: T,
    live: bool,
}

/// Lookups through a disposed slot, or through a slot from an earlier build,
/// return `None` instead of touching released data.
pub struct Arena<K, T> {
    generation: u64,
    entries: Vec<Entry<T>>,
    index: HashMap<K, Slot>,
}

impl<K, T> Arena<K, T>
where
    K: Copy + Eq + Hash,
{
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(generation: u64, capacity: usize) -> Self {
        Self {
            generation,
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, key: K, value: T) -> Option<Slot> {
        if self.index.contains_key(&key) {
            return None;
        }

        let slot = Slot {
            index: self.entries.len(),
            generation: self.generation,
        };
        self.entries.push(Entry { value, live: true });
        self.index.insert(key, slot);
        Some(slot)
    }

    pub fn slot_of(&self, key: &K) -> Option<Slot> {
        self.index
            .get(key)
            .copied()
            .filter(|slot| self.is_live(*slot))
    }

    pub fn is_live(&self, slot: Slot) -> bool {
        slot.generation == self.generation
            && self
                .entries
                .get(slot.index)
                .is_some_and(|entry| entry.live)
    }

    pub fn get(&self, slot: Slot) -> Option<&T> {
        if slot.generation != self.generation {
            return None;
        }
        self.entries
            .get(slot.index)
            .filter(|entry| entry.live)
            .map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        if slot.generation != self.generation {
            return None;
        }
        self.entries
            .get_mut(slot.index)
            .filter(|entry| entry.live)
            .map(|entry| &mut entry.value)
    }

    pub fn get_by_key(&self, key: &K) -> Option<&T> {
        self.slot_of(key).and_then(|slot| self.get(slot))
    }

    pub fn iter_live(&self) -> impl Iterator<Item = (Slot, &T)> {
        let generation = self.generation;
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.live)
            .map(move |(index, entry)| (Slot { index, generation }, &entry.value))
    }

    pub fn iter_live_mut(&mut self) -> impl Iterator<Item = (Slot, &mut T)> {
        let generation = self.generation;
        self.entries
            .iter_mut()
            .enumerate()
            .filter(|(_, entry)| entry.live)
            .map(move |(index, entry)| (Slot { index, generation }, &mut entry.value))
    }

    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.live).count()
    }

    pub fn capacity_slots(&self) -> usize {
        self.entries.len()
    }

    pub fn dispose(&mut self, slot: Slot) -> bool {
        if slot.generation != self.generation {
            return false;
        }
        match self.entries.get_mut(slot.index) {
            Some(entry) if entry.live => {
                entry.live = false;
                true
            }
            _ => false,
        }
    }

    pub fn dispose_all(&mut self) {
        for entry in &mut self.entries {
            entry.live = false;
        }
    }

    pub fn clear(&mut self) {
        self.dispose_all();
        self.entries.clear();
        self.index.clear();
    }
}
