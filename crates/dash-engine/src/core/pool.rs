use crate::error::{EngineError, Result};

/// Lifecycle contract for objects stored in an [`ObjectPool`].
///
/// The active flag lives on the object itself, so an entity that
/// deactivates during its own update is returned to the pool without the
/// pool being told.
pub trait Poolable {
    /// Clear motion and animation state. Called on every acquisition.
    fn reset(&mut self);
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

/// Index of a slot in a pool. Valid for the lifetime of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolHandle(usize);

impl PoolHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

struct Slot<T> {
    item: T,
    /// Monotonic acquisition stamp; smallest = checked out longest ago.
    acquired_at: u64,
}

/// Reusable-object arena backed by a flat Vec.
/// Sized for small counts (tens to a few hundred), so scans are linear.
pub struct ObjectPool<T: Poolable> {
    slots: Vec<Slot<T>>,
    max_size: usize,
    factory: Box<dyn Fn() -> T>,
    next_stamp: u64,
    forced_reuses: u64,
}

impl<T: Poolable> ObjectPool<T> {
    /// Create an empty pool that constructs objects with `factory` on demand.
    pub fn new(max_size: usize, factory: impl Fn() -> T + 'static) -> Self {
        Self {
            slots: Vec::with_capacity(max_size.min(256)),
            max_size,
            factory: Box::new(factory),
            next_stamp: 0,
            forced_reuses: 0,
        }
    }

    /// Create a pool and construct `initial` inactive objects up front.
    pub fn with_preallocated(max_size: usize, initial: usize, factory: impl Fn() -> T + 'static) -> Self {
        let mut pool = Self::new(max_size, factory);
        pool.preallocate(initial);
        pool
    }

    /// Construct inactive objects until the pool holds `count` (bounded by `max_size`).
    pub fn preallocate(&mut self, count: usize) {
        let target = count.min(self.max_size);
        while self.slots.len() < target {
            let mut item = (self.factory)();
            item.set_active(false);
            self.slots.push(Slot { item, acquired_at: 0 });
        }
    }

    /// Check out an object: the first inactive slot, else a new one, else
    /// (pool full and all active) the slot checked out longest ago.
    ///
    /// The returned object has been reset and marked active.
    pub fn acquire(&mut self) -> Result<(PoolHandle, &mut T)> {
        if self.max_size == 0 {
            return Err(EngineError::ZeroCapacityPool);
        }

        let idx = if let Some(idx) = self.slots.iter().position(|s| !s.item.is_active()) {
            idx
        } else if self.slots.len() < self.max_size {
            let item = (self.factory)();
            self.slots.push(Slot { item, acquired_at: 0 });
            self.slots.len() - 1
        } else {
            let idx = self
                .slots
                .iter()
                .enumerate()
                .min_by_key(|(_, s)| s.acquired_at)
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.forced_reuses += 1;
            log::warn!(
                "object pool exhausted ({} live); reclaiming oldest slot {}",
                self.max_size,
                idx
            );
            idx
        };

        self.next_stamp += 1;
        let slot = &mut self.slots[idx];
        slot.acquired_at = self.next_stamp;
        slot.item.reset();
        slot.item.set_active(true);
        Ok((PoolHandle(idx), &mut slot.item))
    }

    /// Return an object to the pool. Releasing an inactive object is a no-op.
    pub fn release(&mut self, handle: PoolHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            if slot.item.is_active() {
                slot.item.set_active(false);
            }
        }
    }

    /// Deactivate everything (used on restart). Objects stay allocated.
    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            slot.item.set_active(false);
        }
    }

    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots.get(handle.0).map(|s| &s.item)
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slots.get_mut(handle.0).map(|s| &mut s.item)
    }

    /// Iterate over checked-out objects.
    pub fn iter_active(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.item.is_active())
            .map(|(i, s)| (PoolHandle(i), &s.item))
    }

    /// Iterate over checked-out objects mutably.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (PoolHandle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.item.is_active())
            .map(|(i, s)| (PoolHandle(i), &mut s.item))
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.item.is_active()).count()
    }

    pub fn inactive_count(&self) -> usize {
        self.slots.len() - self.active_count()
    }

    /// Number of objects allocated so far.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// How many times `acquire` had to reclaim a live object.
    pub fn forced_reuses(&self) -> u64 {
        self.forced_reuses
    }
}
