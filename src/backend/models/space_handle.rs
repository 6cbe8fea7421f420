//! Space Handle - first-class, shareable atom collections
//!
//! A space is an insertion-ordered list of atoms. `SpaceHandle` wraps the
//! list in `Arc<RwLock<..>>` so that:
//! - cloning a handle is O(1) and every clone sees the same space
//! - a grounded atom holding a handle keeps the target space alive
//! - handles are `Send + Sync`
//!
//! The atom list itself sits behind a second `Arc` and is updated
//! copy-on-write, so taking a snapshot for a query is O(1) and a running
//! query never observes a concurrent mutation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use super::Atom;

static NEXT_SPACE_ID: AtomicU64 = AtomicU64::new(1);

/// Thread-safe handle to a space's data.
#[derive(Clone)]
pub struct SpaceHandle {
    id: u64,
    name: Arc<str>,
    data: Arc<RwLock<SpaceData>>,
}

#[derive(Default)]
struct SpaceData {
    atoms: Arc<Vec<Atom>>,
}

impl SpaceHandle {
    /// Create a new, empty space.
    pub fn new(name: &str) -> Self {
        Self {
            id: NEXT_SPACE_ID.fetch_add(1, Ordering::Relaxed),
            name: Arc::from(name),
            data: Arc::new(RwLock::new(SpaceData::default())),
        }
    }

    /// Create a space holding `atoms` in the given order.
    pub fn with_atoms(name: &str, atoms: Vec<Atom>) -> Self {
        let handle = Self::new(name);
        handle.data.write().atoms = Arc::new(atoms);
        handle
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an atom. Duplicates are kept.
    pub fn add(&self, atom: Atom) {
        trace!(target: "mettaspace::backend::space", space = self.id, %atom, "add");
        let mut data = self.data.write();
        Arc::make_mut(&mut data.atoms).push(atom);
    }

    /// Remove the first atom equal to `atom`.
    /// Returns true if the atom was found and removed.
    pub fn remove(&self, atom: &Atom) -> bool {
        let mut data = self.data.write();
        match data.atoms.iter().position(|a| a == atom) {
            Some(pos) => {
                Arc::make_mut(&mut data.atoms).remove(pos);
                trace!(target: "mettaspace::backend::space", space = self.id, %atom, "remove");
                true
            }
            None => false,
        }
    }

    /// Replace the first atom equal to `from` by `to`, keeping its position.
    pub fn replace(&self, from: &Atom, to: Atom) -> bool {
        let mut data = self.data.write();
        match data.atoms.iter().position(|a| a == from) {
            Some(pos) => {
                Arc::make_mut(&mut data.atoms)[pos] = to;
                true
            }
            None => false,
        }
    }

    /// O(1) snapshot of the current atom list.
    pub fn snapshot(&self) -> Arc<Vec<Atom>> {
        Arc::clone(&self.data.read().atoms)
    }

    /// Copy of the current atoms in insertion order.
    pub fn atoms(&self) -> Vec<Atom> {
        self.snapshot().as_ref().clone()
    }

    pub fn atom_count(&self) -> usize {
        self.data.read().atoms.len()
    }

    pub fn contains(&self, atom: &Atom) -> bool {
        self.data.read().atoms.contains(atom)
    }

    /// Check if two handles point to the same underlying space.
    pub fn same_space(&self, other: &SpaceHandle) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl PartialEq for SpaceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_space(other)
    }
}

impl Eq for SpaceHandle {}

impl fmt::Debug for SpaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroundingSpace-{}({})", self.id, self.name)
    }
}
