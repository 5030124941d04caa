use anyhow::Result;
use beholder::Subject;
use beholder_demos::{Echo, KeyboardSource, ReadMode, echo_until_quit};
use std::rc::Rc;
use tracing::{Level, info};

fn main() -> Result<()> {
    // initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).with_writer(std::io::stderr).init();

    // `--chars` delivers every typed character on its own
    let mode = if std::env::args().skip(1).any(|arg| arg == "--chars") { ReadMode::Character } else { ReadMode::Line };

    let source = KeyboardSource::stdin(mode);
    let echo = Rc::new(Echo::new(std::io::stdout()));
    source.attach(echo.clone());

    let reads = echo_until_quit(&source, &mut std::io::stdout())?;
    info!(reads, mode = ?source.mode(), "keyboard input finished");

    Ok(())
}
