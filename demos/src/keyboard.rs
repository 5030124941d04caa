use beholder::{Error, Observable, Observer, ObserverSet, Subject};
use std::cell::RefCell;
use std::io::{BufRead, Read, Write};
use tracing::debug;

/// Input that ends the echo loop
pub const QUIT: &str = "q";

pub const PROMPT: &str = "Please enter any keyboard input ('q' to quit) and proceed with ENTER.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// One line per read
    Line,
    /// One UTF-8 character per read, so a typed line is delivered piece by piece
    Character,
}

/// Reads keyboard input and notifies its observers with every trimmed read as payload
pub struct KeyboardSource {
    mode: ReadMode,
    input: RefCell<Box<dyn BufRead>>,
    observers: ObserverSet<str>,
}

impl Observable<str> for KeyboardSource {
    type Registry = ObserverSet<str>;
    fn observers(&self) -> &ObserverSet<str> { &self.observers }
}

impl KeyboardSource {
    pub fn new(mode: ReadMode, input: impl BufRead + 'static) -> Self {
        Self { mode, input: RefCell::new(Box::new(input)), observers: ObserverSet::new() }
    }

    pub fn stdin(mode: ReadMode) -> Self { Self::new(mode, std::io::stdin().lock()) }

    pub fn mode(&self) -> ReadMode { self.mode }

    /// Read the next input and notify observers with it. Returns `None` once the input is exhausted.
    pub fn execute(&self) -> Result<Option<String>, Error> {
        let Some(input) = self.read()? else {
            return Ok(None);
        };
        debug!(input = %input, mode = ?self.mode, "keyboard input");
        self.notify(Some(input.as_str()))?;
        Ok(Some(input))
    }

    fn read(&self) -> Result<Option<String>, Error> {
        let mut input = self.input.borrow_mut();
        match self.mode {
            ReadMode::Line => {
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    return Ok(None);
                }
                Ok(Some(line.trim().to_string()))
            }
            ReadMode::Character => {
                let Some(&lead) = input.fill_buf()?.first() else {
                    return Ok(None);
                };
                // a truncated or malformed sequence comes out as U+FFFD
                let mut bytes = Vec::with_capacity(4);
                (&mut *input).take(utf8_width(lead) as u64).read_to_end(&mut bytes)?;
                Ok(Some(String::from_utf8_lossy(&bytes).trim().to_string()))
            }
        }
    }
}

// Length of the UTF-8 sequence a lead byte starts
fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Prompt and read until the quit input or the end of input. Returns the number of reads.
pub fn echo_until_quit(source: &KeyboardSource, prompt: &mut impl Write) -> Result<usize, Error> {
    let mut reads = 0;
    loop {
        writeln!(prompt, "{PROMPT}")?;
        let Some(input) = source.execute()? else { break };
        reads += 1;
        if input == QUIT {
            break;
        }
    }
    Ok(reads)
}

/// Writes every keyboard input it is notified about
pub struct Echo<W> {
    out: RefCell<W>,
}

impl<W: Write> Echo<W> {
    pub fn new(out: W) -> Self { Self { out: RefCell::new(out) } }

    pub fn with_output<R>(&self, f: impl FnOnce(&W) -> R) -> R { f(&self.out.borrow()) }
}

impl<W: Write> Observer<str> for Echo<W> {
    fn update(&self, subject: &dyn Subject<str>, data: Option<&str>) -> Result<(), Error> {
        if subject.downcast_ref::<KeyboardSource>().is_none() {
            return Err(Error::invalid_argument("Invalid object."));
        }
        let mut out = self.out.borrow_mut();
        writeln!(out, "Received keyboard input: {}", data.unwrap_or_default())?;
        out.flush()?;
        Ok(())
    }
}
