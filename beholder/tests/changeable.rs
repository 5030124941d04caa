mod common;
use beholder::*;
use common::{Recorder, watcher};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

/// A text buffer that only tells its observers about edits once they are committed
#[derive(Default)]
struct Buffer {
    text: RefCell<String>,
    observers: ChangeTracker<str>,
}

impl Observable<str> for Buffer {
    type Registry = ChangeTracker<str>;
    fn observers(&self) -> &ChangeTracker<str> { &self.observers }
}

impl Buffer {
    fn edit(&self, text: &str) {
        self.text.borrow_mut().push_str(text);
        self.mark_changed();
    }

    fn commit(&self) -> Result<(), Error> {
        let text = self.text.borrow().clone();
        self.notify(Some(text.as_str()))
    }

    /// Drop pending edits without telling anyone
    fn discard(&self) {
        self.text.borrow_mut().clear();
        self.observers().clear_changed();
    }
}

#[derive(Default)]
struct Counter {
    count: Cell<usize>,
}

impl Observer<str> for Counter {
    fn update(&self, _: &dyn Subject<str>, _: Option<&str>) -> Result<(), Error> {
        self.count.set(self.count.get() + 1);
        Ok(())
    }
}

#[test]
fn test_state_machine() {
    let buffer = Buffer::default();
    let (journal, check) = watcher();
    let recorder = Recorder::new("recorder", &journal);
    buffer.attach(recorder.clone());

    assert!(!buffer.has_changed());
    buffer.commit().unwrap();
    assert!(check().is_empty()); // unchanged, so nothing fires
    assert!(!buffer.has_changed());

    buffer.edit("hello");
    assert!(buffer.has_changed());
    buffer.commit().unwrap();
    assert_eq!(check(), [("recorder", Some("hello".to_string()))]);
    assert!(!buffer.has_changed());

    buffer.commit().unwrap();
    assert!(check().is_empty());
}

#[test]
fn test_counter_scenario() {
    let buffer = Buffer::default();
    let counter = Rc::new(Counter::default());
    buffer.attach(counter.clone());
    assert_eq!(counter.count.get(), 0);

    for word in ["one", "two"] {
        buffer.edit(word);
        buffer.commit().unwrap();
    }
    assert_eq!(counter.count.get(), 2);
}

#[test]
fn test_every_observer_fires_exactly_once() {
    let buffer = Buffer::default();
    let (journal, check) = watcher();
    let a = Recorder::new("a", &journal);
    let b = Recorder::new("b", &journal);
    let c = Recorder::new("c", &journal);
    buffer.attach(a.clone());
    buffer.attach(b.clone());
    buffer.attach(c.clone());

    buffer.edit("x");
    buffer.edit("y"); // marking twice still fires once
    buffer.commit().unwrap();
    buffer.commit().unwrap();

    let xy = Some("xy".to_string());
    assert_eq!(check(), [("a", xy.clone()), ("b", xy.clone()), ("c", xy)]);
}

#[test]
fn test_discard_clears_without_notifying() {
    let buffer = Buffer::default();
    let counter = Rc::new(Counter::default());
    buffer.attach(counter.clone());

    buffer.edit("draft");
    buffer.discard();
    assert!(!buffer.has_changed());
    buffer.commit().unwrap();
    assert_eq!(counter.count.get(), 0);
}

#[test]
fn test_failed_delivery_is_retried() {
    let buffer = Buffer::default();
    let attempts = Rc::new(Cell::new(0));
    let flaky: Rc<dyn Observer<str>> = {
        let attempts = attempts.clone();
        Rc::new(move |_: &dyn Subject<str>, _: Option<&str>| {
            attempts.set(attempts.get() + 1);
            match attempts.get() {
                1 => Err(Error::observer(std::io::Error::new(std::io::ErrorKind::TimedOut, "sink timed out"))),
                _ => Ok(()),
            }
        })
    };
    let counter = Rc::new(Counter::default());
    buffer.attach(flaky.clone());
    buffer.attach(counter.clone());

    buffer.edit("payload");
    assert!(buffer.commit().is_err());
    assert!(buffer.has_changed());
    assert_eq!(counter.count.get(), 0);

    buffer.commit().unwrap();
    assert!(!buffer.has_changed());
    assert_eq!((attempts.get(), counter.count.get()), (2, 1));
}

#[test]
fn test_used_through_trait_objects() {
    let buffer = Buffer::default();
    let counter = Rc::new(Counter::default());
    let changeable: &dyn ChangeableSubject<str> = &buffer;

    changeable.attach(counter.clone());
    changeable.notify(None).unwrap();
    changeable.mark_changed();
    changeable.notify(None).unwrap();

    assert_eq!(changeable.count(), 1);
    assert_eq!(counter.count.get(), 1);
}
