use std::collections::HashMap;

use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Addresses `240..=255` are memory-mapped I/O.
pub const STORAGE_LIMIT: usize = 240;

/// Variable name to memory address map for one compilation.
///
/// Addresses are handed out in first-reference order starting at 0. A name
/// keeps its address for the whole compilation and nothing is ever freed.
#[derive(Debug, Default)]
pub struct Storage {
    addresses: HashMap<String, u8>,
}

impl Storage {
    pub fn new() -> Self {
        Storage::default()
    }

    pub fn resolve(&self, name: &str) -> Option<u8> {
        self.addresses.get(name).copied()
    }

    /// Returns the address of `name`, allocating the next free one on first use.
    pub fn resolve_or_allocate(&mut self, name: &str, position: &Position) -> Result<u8, Error> {
        if let Some(address) = self.resolve(name) {
            return Ok(address);
        }

        if self.addresses.len() >= STORAGE_LIMIT {
            return Err(Error::new(
                ErrorImpl::StorageExhausted {
                    limit: STORAGE_LIMIT,
                },
                position.clone(),
            ));
        }

        let address = self.addresses.len() as u8;
        self.addresses.insert(name.to_string(), address);
        debug!(variable = name, address, "allocated storage");

        Ok(address)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
