use indexmap::IndexSet;
use std::hash::{BuildHasher, Hasher};

/// A hasher for slot indices. Indices are already unique, so the hash is the
/// index itself.
pub(crate) struct SlotHasher {
    hash: usize,
}

impl Hasher for SlotHasher {
    fn write(&mut self, _bytes: &[u8]) {
        panic!("Only slot indices are expected to be hashed.");
    }

    fn write_usize(&mut self, i: usize) {
        self.hash = i;
    }

    fn finish(&self) -> u64 {
        self.hash as u64
    }
}

#[derive(Clone, Default)]
pub(crate) struct BuildSlotHasher;

impl BuildHasher for BuildSlotHasher {
    type Hasher = SlotHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SlotHasher { hash: 0 }
    }
}

/// A slot index tagged with the generation it was handed out in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Addr {
    index: usize,
    generation: u64,
}

struct Slot<T> {
    value: Option<T>,
    generation: u64,
}

/// Slot arena backing a list. Freed slots are recycled, and every free bumps
/// the slot's generation so that stale [`Addr`]s stop resolving.
pub(crate) struct Mem<T> {
    slots: Vec<Slot<T>>,
    available: IndexSet<usize, BuildSlotHasher>,
}

impl<T> Default for Mem<T> {
    fn default() -> Self {
        Mem::with_capacity(0)
    }
}

impl<T> Mem<T> {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            slots: Vec::with_capacity(n),
            available: IndexSet::with_hasher(BuildSlotHasher),
        }
    }

    pub(crate) fn intern(&mut self, t: T) -> usize {
        if let Some(index) = self.available.pop() {
            self.slots[index].value = Some(t);
            index
        } else {
            let index = self.slots.len();
            self.slots.push(Slot {
                value: Some(t),
                generation: 0,
            });
            index
        }
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> &T {
        self.try_get(index).expect("Node address is free.")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> &mut T {
        self.slots
            .get_mut(index)
            .and_then(|slot| slot.value.as_mut())
            .expect("Node address is free.")
    }

    #[inline]
    pub(crate) fn try_get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(|slot| slot.value.as_ref())
    }

    /// Releases the slot and hands back what it held.
    pub(crate) fn free(&mut self, index: usize) -> T {
        let slot = &mut self.slots[index];
        let value = slot.value.take().expect("Node address is already free.");
        slot.generation = slot.generation.wrapping_add(1);
        self.available.insert(index);
        value
    }

    /// The address of a live slot, stamped with its current generation.
    #[inline]
    pub(crate) fn addr(&self, index: usize) -> Addr {
        Addr {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Maps an address back to its slot index, if the slot still holds the
    /// value it was handed out for.
    #[inline]
    pub(crate) fn resolve(&self, addr: Addr) -> Option<usize> {
        let slot = self.slots.get(addr.index)?;
        (slot.value.is_some() && slot.generation == addr.generation).then_some(addr.index)
    }

    /// Number of occupied slots.
    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.available.len()
    }

    /// Mutable references to the slots in `order`, in that order. Indices
    /// that are free or repeated are skipped.
    pub(crate) fn select_mut(&mut self, order: &[usize]) -> Vec<&mut T> {
        let ranks: IndexSet<usize, BuildSlotHasher> = order.iter().copied().collect();
        let mut picked: Vec<Option<&mut T>> = Vec::with_capacity(ranks.len());
        picked.resize_with(ranks.len(), || None);
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let (Some(rank), Some(value)) = (ranks.get_index_of(&index), slot.value.as_mut()) {
                picked[rank] = Some(value);
            }
        }
        picked.into_iter().flatten().collect()
    }
}
