//! Built-in visitors
//!
//! Contains CountHandler and LogHandler.

mod count;
mod log;

pub use self::count::CountHandler;
pub use self::log::LogHandler;
