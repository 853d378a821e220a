//! ItemSource trait - record source abstraction
//!
//! A source hands out successive buffers until it is exhausted. Readers,
//! decoders and in-memory fixtures all sit behind this interface, so the
//! stream driver never needs to know where records come from.

use std::collections::VecDeque;

use crate::{Buffer, ContractError};

/// Record source
///
/// # Example
///
/// ```
/// use contracts::{Buffer, ItemSource, Location, Node, VecSource};
///
/// let mut first = Buffer::new();
/// first.push(Node::new(1, Location::default()));
/// let mut source = VecSource::new("fixture", vec![first, Buffer::new()]);
///
/// assert_eq!(source.read().unwrap().map(|b| b.len()), Some(1));
/// assert_eq!(source.read().unwrap().map(|b| b.len()), Some(0));
/// assert!(source.read().unwrap().is_none());
/// ```
pub trait ItemSource {
    /// Source name (used for logging/errors)
    fn name(&self) -> &str;

    /// Read the next buffer
    ///
    /// Returns `Ok(None)` once the source is exhausted. Calling `read` again
    /// after that keeps returning `Ok(None)`.
    ///
    /// # Errors
    /// Returns read error (should include context)
    fn read(&mut self) -> Result<Option<Buffer>, ContractError>;
}

/// In-memory source over a fixed list of buffers
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    name: String,
    buffers: VecDeque<Buffer>,
}

impl VecSource {
    pub fn new(name: impl Into<String>, buffers: impl IntoIterator<Item = Buffer>) -> Self {
        Self {
            name: name.into(),
            buffers: buffers.into_iter().collect(),
        }
    }

    /// Buffers not read yet
    pub fn remaining(&self) -> usize {
        self.buffers.len()
    }
}

impl ItemSource for VecSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> Result<Option<Buffer>, ContractError> {
        Ok(self.buffers.pop_front())
    }
}

impl<S: ItemSource + ?Sized> ItemSource for &mut S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read(&mut self) -> Result<Option<Buffer>, ContractError> {
        (**self).read()
    }
}

impl<S: ItemSource + ?Sized> ItemSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read(&mut self) -> Result<Option<Buffer>, ContractError> {
        (**self).read()
    }
}
