use crate::{Error, Observer, ObserverId};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

/// A Subject is something observers want to hear about.
///
/// Observers are notified in the order they were attached. An attached
/// observer stays attached until it is detached, whether or not the caller
/// kept a handle to it.
pub trait Subject<D: ?Sized = ()> {
    /// Attach an observer. Attaching an observer that is already attached does nothing.
    fn attach(&self, observer: Rc<dyn Observer<D>>);

    /// Detach an observer. Detaching an observer that is not attached does nothing.
    fn detach(&self, observer: &dyn Observer<D>);

    fn detach_all(&self);

    /// Call `update` on every attached observer, stopping at the first failure
    fn notify(&self, data: Option<&D>) -> Result<(), Error>;

    /// Number of attached observers
    fn count(&self) -> usize;

    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;
}

impl<D: ?Sized> dyn Subject<D> + '_ {
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> { self.as_any().downcast_ref::<T>() }

    /// Like [`downcast_ref`](Self::downcast_ref), but reports a mismatch as [`Error::InvalidArgument`]
    pub fn require<T: Any>(&self) -> Result<&T, Error> {
        self.downcast_ref::<T>().ok_or_else(|| Error::invalid_argument(format!("expected subject of type {}", std::any::type_name::<T>())))
    }
}

/// The bookkeeping a subject delegates to. Implemented by [`ObserverSet`] and
/// [`ChangeTracker`](crate::ChangeTracker).
pub trait Registry<D: ?Sized> {
    fn attach(&self, observer: Rc<dyn Observer<D>>);
    fn detach(&self, observer: &dyn Observer<D>);
    fn detach_all(&self);
    fn count(&self) -> usize;
    /// Dispatch to the registered observers on behalf of `subject`
    fn notify(&self, subject: &dyn Subject<D>, data: Option<&D>) -> Result<(), Error>;
}

/// Embed a registry in a type and implement this to make the type a [`Subject`]
pub trait Observable<D: ?Sized = ()> {
    type Registry: Registry<D>;
    fn observers(&self) -> &Self::Registry;
}

impl<D, T> Subject<D> for T
where
    D: ?Sized + 'static,
    T: Observable<D> + 'static,
{
    fn attach(&self, observer: Rc<dyn Observer<D>>) { Registry::attach(self.observers(), observer) }

    fn detach(&self, observer: &dyn Observer<D>) { Registry::detach(self.observers(), observer) }

    fn detach_all(&self) { Registry::detach_all(self.observers()) }

    fn notify(&self, data: Option<&D>) -> Result<(), Error> { <T::Registry as Registry<D>>::notify(self.observers(), self, data) }

    fn count(&self) -> usize { Registry::count(self.observers()) }

    fn as_any(&self) -> &dyn Any { self }
}

/// An ordered, duplicate-free set of observers
pub struct ObserverSet<D: ?Sized = ()> {
    entries: RefCell<Vec<Rc<dyn Observer<D>>>>,
}

impl<D: ?Sized> Default for ObserverSet<D> {
    fn default() -> Self { Self::new() }
}

impl<D: ?Sized> std::fmt::Debug for ObserverSet<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSet").field("observers", &self.count()).finish()
    }
}

impl<D: ?Sized> ObserverSet<D> {
    pub fn new() -> Self { Self { entries: RefCell::new(Vec::new()) } }

    /// Ids of the attached observers, in notification order
    pub fn ids(&self) -> Vec<ObserverId> { self.entries.borrow().iter().map(|observer| ObserverId::of(&**observer)).collect() }

    fn position(entries: &[Rc<dyn Observer<D>>], id: ObserverId) -> Option<usize> {
        entries.iter().position(|entry| ObserverId::of(&**entry) == id)
    }
}

impl<D: ?Sized> Registry<D> for ObserverSet<D> {
    fn attach(&self, observer: Rc<dyn Observer<D>>) {
        let id = ObserverId::of(&*observer);
        let mut entries = self.entries.borrow_mut();
        if Self::position(&entries, id).is_some() {
            trace!(observer = %id, "observer already attached");
            return;
        }
        entries.push(observer);
        trace!(observer = %id, count = entries.len(), "attached observer");
    }

    fn detach(&self, observer: &dyn Observer<D>) {
        let id = ObserverId::of(observer);
        let mut entries = self.entries.borrow_mut();
        match Self::position(&entries, id) {
            Some(index) => {
                entries.remove(index);
                trace!(observer = %id, "detached observer");
            }
            None => trace!(observer = %id, "observer not attached"),
        }
    }

    fn detach_all(&self) {
        let mut entries = self.entries.borrow_mut();
        trace!(count = entries.len(), "detaching all observers");
        entries.clear();
    }

    fn count(&self) -> usize { self.entries.borrow().len() }

    fn notify(&self, subject: &dyn Subject<D>, data: Option<&D>) -> Result<(), Error> {
        // dispatch from a snapshot so observers may attach and detach while being notified
        let observers = self.entries.borrow().clone();
        debug!(observers = observers.len(), "notifying observers");
        for observer in observers {
            observer.update(subject, data)?;
        }
        Ok(())
    }
}
