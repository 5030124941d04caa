use anyhow::Result;
use beholder::Subject;
use beholder_demos::{InstanceCountObserver, UserFactory};
use std::rc::Rc;
use tracing::{Level, info};

fn main() -> Result<()> {
    // initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).with_writer(std::io::stderr).init();

    // the one factory of this process
    let factory = UserFactory::new();

    let observer = Rc::new(InstanceCountObserver::default());
    factory.attach(observer.clone());

    println!("{}", observer.instances());
    factory.create_user()?;
    factory.create_user()?;
    println!("{}", observer.instances());

    factory.detach(&*observer);
    factory.detach(&*observer);
    factory.attach(observer.clone());
    factory.detach_all();
    info!(observers = factory.count(), "detached everything");

    Ok(())
}
