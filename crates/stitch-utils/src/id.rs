use std::{collections::HashMap, hash::Hash, marker::PhantomData};

/// Plain `u32` backed identifiers that can be allocated and renumbered.
pub trait Id: Copy + Eq + Ord + Hash {
    fn from_u32(id: u32) -> Self;

    fn id(&self) -> u32;
}

// Id { u32 }
#[macro_export]
macro_rules! define_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name {
            id: u32,
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.id)
            }
        }

        impl $name {
            pub const fn new(id: u32) -> Self {
                Self { id }
            }

            pub fn as_usize(&self) -> usize {
                self.id as usize
            }

            pub fn id(&self) -> u32 {
                self.id
            }
        }

        impl $crate::id::Id for $name {
            fn from_u32(id: u32) -> Self {
                Self { id }
            }

            fn id(&self) -> u32 {
                self.id
            }
        }
    };
}

/// Hands out fresh identifiers in increasing order.
///
/// A generator lives exactly as long as the pass that needs it,
/// so ids are only unique within that pass.
#[derive(Debug, Clone)]
pub struct IdGen<T> {
    next: u32,
    t: PhantomData<T>,
}

impl<T> Default for IdGen<T> {
    fn default() -> Self {
        Self {
            next: 0,
            t: PhantomData,
        }
    }
}

impl<T: Id> IdGen<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator that never yields `max` or anything below it.
    pub fn after(max: Option<T>) -> Self {
        Self {
            next: max.map_or(0, |id| id.id() + 1),
            t: PhantomData,
        }
    }

    pub fn fresh(&mut self) -> T {
        let id = T::from_u32(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far (including any skipped by `after`).
    pub fn count(&self) -> u32 {
        self.next
    }
}

/// Canonical renumbering: ids are mapped to `0, 1, 2, ..`
/// in the order they are first seen.
///
/// Feeding the same traversal order twice yields the identity mapping
/// the second time, which makes renumbering idempotent.
#[derive(Debug, Clone)]
pub struct Renumbering<T> {
    table: HashMap<T, T>,
    gen: IdGen<T>,
}

impl<T: Id> Default for Renumbering<T> {
    fn default() -> Self {
        Self {
            table: HashMap::new(),
            gen: IdGen::new(),
        }
    }
}

impl<T: Id> Renumbering<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical id for `id`, assigning the next one on first sight.
    pub fn rename(&mut self, id: T) -> T {
        *self.table.entry(id).or_insert_with(|| self.gen.fresh())
    }

    pub fn is_identity(&self) -> bool {
        self.table.iter().all(|(from, to)| from == to)
    }
}
