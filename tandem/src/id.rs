//! Process-wide unique identifiers.

use lazy_static::lazy_static;
use parking_lot::Mutex;

/// A monotonically increasing identifier source. Wraps around on overflow.
#[derive(Debug, Default)]
pub struct UniqueId {
    next: Mutex<u32>,
}

impl UniqueId {
    /// A generator starting at 0
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// A generator whose first identifier is `first`
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: Mutex::new(first),
        }
    }

    /// Take the next identifier
    pub fn get(&self) -> u32 {
        let mut next = self.next.lock();
        let id = *next;
        *next = next.wrapping_add(1);
        id
    }
}

lazy_static! {
    static ref GLOBAL: UniqueId = UniqueId::new();
}

/// Take the next identifier from the process-wide generator
pub fn next_id() -> u32 {
    GLOBAL.get()
}
