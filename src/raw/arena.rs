use alloc::vec::Vec;

use super::handle::Handle;
use crate::Error;

/// Bumped every time a slot is vacated, so handles to a freed slot can be told apart
/// from handles to whatever is allocated there next.
pub(crate) type Generation = u32;

struct Slot<T> {
    generation: Generation,
    element: Option<T>,
}

pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    // Invariant: `free.capacity() >= slots.len()`, so vacating a slot never allocates.
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut arena = Self::new();
        arena.try_reserve(capacity)?;
        Ok(arena)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes room for `additional` more elements without touching any live slot.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        let reusable = self.free.len();
        let fresh = additional.saturating_sub(reusable);
        if fresh == 0 {
            return Ok(());
        }
        if self.slots.len().saturating_add(fresh) > Handle::MAX {
            log::debug!("arena cannot address {fresh} more slots (limit {})", Handle::MAX);
            return Err(Error::AllocationFailure);
        }

        self.slots.try_reserve(fresh).map_err(|err| {
            log::debug!("arena slot reservation failed: {err}");
            Error::AllocationFailure
        })?;
        // Keep the free list large enough to hold every slot we may ever vacate.
        let free_needed = self.slots.len() + fresh - self.free.len();
        self.free.try_reserve(free_needed).map_err(|err| {
            log::debug!("arena free-list reservation failed: {err}");
            Error::AllocationFailure
        })
    }

    /// Stores `element`, reusing a vacated slot when one is available.
    ///
    /// On failure the arena is left exactly as it was.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, Error> {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()].element = Some(element);
            return Ok(h);
        }

        self.try_reserve(1)?;
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        Ok(Handle::from_index(self.slots.len() - 1))
    }

    /// Returns true if `handle` addresses a live slot that has not been vacated since
    /// `generation` was observed.
    pub(crate) fn contains(&self, handle: Handle, generation: Generation) -> bool {
        self.slots
            .get(handle.to_index())
            .is_some_and(|slot| slot.generation == generation && slot.element.is_some())
    }

    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> Generation {
        self.slots[handle.to_index()].generation
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].element.as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.to_index()];
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        slot.generation = slot.generation.wrapping_add(1);
        debug_assert!(self.free.len() < self.free.capacity(), "`Arena::take()` - free list would grow!");
        self.free.push(handle);
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }
}
