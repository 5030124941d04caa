use beholder::{Error, Observable, Observer, ObserverSet, Subject};
use std::cell::Cell;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
}

/// Creates users and notifies its observers after every creation.
///
/// Build one factory at startup and hand out references to it; every caller
/// then shares the same observers and id sequence.
#[derive(Debug, Default)]
pub struct UserFactory {
    next_id: Cell<u64>,
    observers: ObserverSet,
}

impl Observable for UserFactory {
    type Registry = ObserverSet;
    fn observers(&self) -> &ObserverSet { &self.observers }
}

impl UserFactory {
    pub fn new() -> Self { Self::default() }

    pub fn create_user(&self) -> Result<User, Error> {
        let user = User { id: self.next_id.get() };
        self.next_id.set(user.id + 1);
        debug!(user = user.id, "created user");
        self.notify(None)?;
        Ok(user)
    }
}

/// Counts how many objects the observed factory created
#[derive(Debug, Default)]
pub struct InstanceCountObserver {
    instances: Cell<usize>,
}

impl InstanceCountObserver {
    pub fn instances(&self) -> usize { self.instances.get() }

    pub fn reset(&self) { self.instances.set(0) }
}

impl Observer for InstanceCountObserver {
    fn update(&self, _: &dyn Subject, _: Option<&()>) -> Result<(), Error> {
        self.instances.set(self.instances.get() + 1);
        Ok(())
    }
}
