use crate::{Error, Subject};

/// An Observer is notified by the subjects it is attached to whenever they call `notify`
///
/// Implementations may pull state from `subject` (see [`Subject::as_any`] and
/// `<dyn Subject<D>>::require`) or use the pushed `data`, or both.
pub trait Observer<D: ?Sized = ()> {
    /// Handle a change announced by `subject`. A returned error aborts the
    /// notification round and is handed to whoever called `notify`.
    fn update(&self, subject: &dyn Subject<D>, data: Option<&D>) -> Result<(), Error>;
}

// Plain closures are observers
impl<D: ?Sized, F> Observer<D> for F
where F: Fn(&dyn Subject<D>, Option<&D>) -> Result<(), Error>
{
    fn update(&self, subject: &dyn Subject<D>, data: Option<&D>) -> Result<(), Error> { self(subject, data) }
}

/// Identity of an observer value, used to keep a subject's observers unique.
/// Two handles compare equal iff they point at the same observer.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObserverId(usize);

impl ObserverId {
    pub fn of<D: ?Sized>(observer: &dyn Observer<D>) -> Self { ObserverId(std::ptr::from_ref(observer).cast::<()>() as usize) }
}

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{:#x}", self.0) }
}
