//! Small programs built on `beholder`: a keyboard echo and a factory instance counter.

mod keyboard;
mod users;

pub use keyboard::*;
pub use users::*;
