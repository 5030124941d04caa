/*!
Subject/Observer capabilities for single-threaded code

# Design requirements:
- `Subject` and `Observer` must be dyn object safe - observers receive the subject as `&dyn Subject<D>`
- Attached observers are shared `Rc`s - they stay attached until detached, even if the caller dropped its handle
- No duplicates: attaching the same observer twice is a no-op
- Notification happens in attachment order, synchronously, and stops at the first observer error
- The bookkeeping lives in reusable structs (`ObserverSet`, `ChangeTracker`) that a type embeds and exposes through `Observable`

# Nomenclature:
- attach/detach - register/unregister an observer
- notify - call `update` on every attached observer
- push - the subject hands a payload to `update`
- pull - the observer reads the state it needs from the subject itself

# Basic usage

```rust
use beholder::*;
use std::{cell::Cell, rc::Rc};

struct Thermometer {
    celsius: Cell<i32>,
    observers: ObserverSet<i32>,
}

impl Observable<i32> for Thermometer {
    type Registry = ObserverSet<i32>;
    fn observers(&self) -> &ObserverSet<i32> { &self.observers }
}

struct Readout;

impl Observer<i32> for Readout {
    fn update(&self, subject: &dyn Subject<i32>, data: Option<&i32>) -> Result<(), Error> {
        let thermometer = subject.require::<Thermometer>()?;
        println!("pushed {data:?}, pulled {}", thermometer.celsius.get());
        Ok(())
    }
}

let thermometer = Thermometer { celsius: Cell::new(20), observers: ObserverSet::new() };
let readout = Rc::new(Readout);
thermometer.attach(readout.clone());
thermometer.attach(readout.clone()); // already attached
assert_eq!(thermometer.count(), 1);

thermometer.celsius.set(21);
thermometer.notify(Some(&21))?;
// Should print:
// pushed Some(21), pulled 21
# Ok::<(), Error>(())
```

# Change-gated usage

```rust
use beholder::*;
use std::{cell::Cell, rc::Rc};

#[derive(Default)]
struct Document {
    observers: ChangeTracker<str>,
}

impl Observable<str> for Document {
    type Registry = ChangeTracker<str>;
    fn observers(&self) -> &ChangeTracker<str> { &self.observers }
}

let saves = Rc::new(Cell::new(0));
let autosave = {
    let saves = saves.clone();
    Rc::new(move |_: &dyn Subject<str>, _: Option<&str>| {
        saves.set(saves.get() + 1);
        Ok::<(), Error>(())
    })
};

let document = Document::default();
document.attach(autosave.clone());

document.notify(Some("nothing to do"))?; // not marked, nobody is called
document.mark_changed();
document.notify(Some("saved"))?;
assert_eq!(saves.get(), 1);
assert!(!document.has_changed());
# Ok::<(), Error>(())
```
*/

mod changeable;
mod error;
mod observer;
mod subject;

pub use changeable::*;
pub use error::*;
pub use observer::*;
pub use subject::*;
