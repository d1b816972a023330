//! Thread-shareable handle around a single world.
//!
//! Mutations and snapshots take the write lock; renderers take shared read
//! guards. A snapshot is therefore never observed halfway through a move.

use std::sync::Arc;

use nuggets_core::{Cell, Command, Event, Occupant, Player, Spot};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rand::Rng;

use crate::{World, WorldError};

/// Reference-counted, lock-protected world.
#[derive(Debug)]
pub struct SharedWorld<C = Spot, P = Player> {
    inner: Arc<RwLock<World<C, P>>>,
}

impl<C, P> Clone for SharedWorld<C, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Cell, P: Occupant> SharedWorld<C, P> {
    /// Wraps the world for sharing across threads.
    #[must_use]
    pub fn new(world: World<C, P>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(world)),
        }
    }

    /// Shared access for readers such as renderers.
    pub fn read(&self) -> RwLockReadGuard<'_, World<C, P>> {
        self.inner.read()
    }

    /// Exclusive access for ad-hoc mutation.
    pub fn write(&self) -> RwLockWriteGuard<'_, World<C, P>> {
        self.inner.write()
    }

    /// Applies a command under the write lock.
    pub fn apply<R>(
        &self,
        command: Command,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> Result<(), WorldError>
    where
        R: Rng + ?Sized,
    {
        let mut world = self.inner.write();
        crate::apply(&mut *world, command, rng, out_events)
    }

    /// Deep copy taken while holding the write lock.
    pub fn snapshot(&self) -> Result<World<C, P>, WorldError> {
        self.inner.write().snapshot()
    }
}
