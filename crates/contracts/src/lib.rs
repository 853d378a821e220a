//! # Contracts
//!
//! Frozen interface contracts, defining the record model shared by every
//! crate in the workspace. Business crates depend on this crate only;
//! reverse dependencies are prohibited.
//!
//! ## Record Model
//! - Every record carries one `ItemType` tag from a closed set
//! - `Buffer` owns records in iteration order
//! - Views (`ItemRef`, `ObjectRef`, ...) borrow a record already downcast to
//!   its shape; they never outlive the borrow they come from

mod buffer;
mod error;
mod item;
mod item_type;
mod shapes;
mod source;
mod stats;
mod view;

pub use buffer::Buffer;
pub use error::*;
pub use item::{Item, RawItem};
pub use item_type::ItemType;
pub use shapes::*;
pub use source::{ItemSource, VecSource};
pub use stats::ItemCounts;
pub use view::*;
