use beholder::{Error, Observer, Subject};
use std::{cell::RefCell, rc::Rc};
use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(Level::TRACE).with_test_writer().init(); }

/// An observer that records which observer saw which payload, in call order.
/// Several recorders can share one journal to check the order across observers.
pub struct Recorder {
    name: &'static str,
    journal: Rc<RefCell<Vec<(&'static str, Option<String>)>>>,
}

impl Recorder {
    #[allow(unused)]
    pub fn new(name: &'static str, journal: &Rc<RefCell<Vec<(&'static str, Option<String>)>>>) -> Rc<Self> {
        Rc::new(Self { name, journal: journal.clone() })
    }
}

impl Observer<str> for Recorder {
    fn update(&self, _: &dyn Subject<str>, data: Option<&str>) -> Result<(), Error> {
        self.journal.borrow_mut().push((self.name, data.map(str::to_string)));
        Ok(())
    }
}

#[allow(unused)]
pub fn watcher() -> (Rc<RefCell<Vec<(&'static str, Option<String>)>>>, Box<dyn Fn() -> Vec<(&'static str, Option<String>)>>) {
    let journal = Rc::new(RefCell::new(Vec::new()));
    let check: Box<dyn Fn() -> Vec<(&'static str, Option<String>)>> = {
        let journal = journal.clone();
        Box::new(move || journal.borrow_mut().drain(..).collect())
    };
    (journal, check)
}
