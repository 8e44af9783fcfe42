use core::fmt;
use core::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Identity of a dimension, unit, scale or factory.
///
/// Two entities are the same entity iff their ids are equal; names and
/// symbols never participate in equality. Ids are minted in order by an
/// [`IdAllocator`] or a [`Registry`], and the `NonZeroU32` niche keeps
/// `Option<Id>` as small as `Id`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// The id of the `index`-th minted entity (0-based).
    pub fn from_index(index: u32) -> Self {
        Self(
            NonZeroU32::MIN
                .checked_add(index)
                .expect("fewer than u32::MAX ids are minted"),
        )
    }

    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

// Which kind of entity an id names. Ids of different kinds come from
// different allocators and may coincide numerically.
pub type DimensionId = Id;
pub type FundamentalId = Id;
pub type UnitId = Id;
pub type ScaleId = Id;
pub type FactoryId = Id;

/// Process-wide source of fresh ids for one kind of entity.
pub struct IdAllocator {
    next: AtomicU32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub const fn new() -> Self {
        Self {
            next: AtomicU32::new(0),
        }
    }

    /// Mint the next id. Never returns the same id twice.
    pub fn next(&self) -> Id {
        Id::from_index(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// Append-only arena of interned records addressed by [`Id`].
///
/// Used for the basis axes (fundamental dimensions): they are minted rarely,
/// live for the whole process, and are referenced by id from every
/// composition.
pub struct Registry<T> {
    slots: RwLock<Vec<Arc<T>>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T> {
    pub const fn new() -> Self {
        Self {
            slots: RwLock::new(Vec::new()),
        }
    }

    /// Allocate the next slot, building its record from the id it will have.
    ///
    /// `build` runs under the registry's write lock and must not read the
    /// registry.
    pub fn register_with(&self, build: impl FnOnce(Id) -> T) -> Id {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let index = u32::try_from(slots.len()).expect("registry holds fewer than u32::MAX slots");
        let id = Id::from_index(index);
        slots.push(Arc::new(build(id)));
        id
    }

    /// Record for an id previously returned by [`Registry::register_with`].
    pub fn get(&self, id: Id) -> Option<Arc<T>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(id.index() as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.slots.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
