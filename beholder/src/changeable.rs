use crate::{Error, Observable, Observer, ObserverSet, Registry, Subject};
use std::cell::Cell;
use std::rc::Rc;
use tracing::trace;

/// A subject that only notifies its observers after it was marked as changed.
///
/// `notify` on an unchanged subject is a no-op. A firing `notify` clears the
/// mark once every observer was updated; if an observer fails, the mark is
/// kept so the next `notify` delivers again.
pub trait ChangeableSubject<D: ?Sized = ()>: Subject<D> {
    fn has_changed(&self) -> bool;

    /// Arm the next `notify`. Marking an already changed subject does nothing.
    fn mark_changed(&self);
}

impl<D, T> ChangeableSubject<D> for T
where
    D: ?Sized + 'static,
    T: Observable<D, Registry = ChangeTracker<D>> + 'static,
{
    fn has_changed(&self) -> bool { self.observers().has_changed() }

    fn mark_changed(&self) { self.observers().mark_changed() }
}

/// An [`ObserverSet`] gated by a changed flag. Embed it in a type to make the
/// type a [`ChangeableSubject`].
pub struct ChangeTracker<D: ?Sized = ()> {
    observers: ObserverSet<D>,
    changed: Cell<bool>,
}

impl<D: ?Sized> Default for ChangeTracker<D> {
    fn default() -> Self { Self::new() }
}

impl<D: ?Sized> std::fmt::Debug for ChangeTracker<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeTracker").field("observers", &self.observers).field("changed", &self.changed.get()).finish()
    }
}

impl<D: ?Sized> ChangeTracker<D> {
    pub fn new() -> Self { Self { observers: ObserverSet::new(), changed: Cell::new(false) } }

    pub fn has_changed(&self) -> bool { self.changed.get() }

    pub fn mark_changed(&self) { self.changed.set(true) }

    /// Reset the flag without notifying anybody. Meant for the subject's own
    /// bookkeeping, e.g. after it resynchronized its observers by other means.
    pub fn clear_changed(&self) { self.changed.set(false) }
}

impl<D: ?Sized> Registry<D> for ChangeTracker<D> {
    fn attach(&self, observer: Rc<dyn Observer<D>>) { self.observers.attach(observer) }

    fn detach(&self, observer: &dyn Observer<D>) { self.observers.detach(observer) }

    fn detach_all(&self) { self.observers.detach_all() }

    fn count(&self) -> usize { self.observers.count() }

    fn notify(&self, subject: &dyn Subject<D>, data: Option<&D>) -> Result<(), Error> {
        if !self.has_changed() {
            trace!("subject unchanged, skipping notify");
            return Ok(());
        }
        // a failing observer leaves the flag set
        self.observers.notify(subject, data)?;
        // marks made by observers during dispatch are absorbed here
        self.clear_changed();
        Ok(())
    }
}
