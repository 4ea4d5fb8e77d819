use super::error::Chip8Error;
use serde::{Deserialize, Serialize};

/// Number of nested subroutine calls the machine supports.
pub const STACK_CAPACITY: usize = 16;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedCallStack")]
/// A bounded LIFO of return addresses.
pub struct CallStack {
    addresses: [u16; STACK_CAPACITY],
    // Number of live entries; addresses[..len] is the stack.
    len: usize,
}

// The serialized form, checked before it becomes a `CallStack`.
#[derive(Deserialize)]
struct SavedCallStack {
    addresses: [u16; STACK_CAPACITY],
    len: usize,
}

impl TryFrom<SavedCallStack> for CallStack {
    type Error = String;

    fn try_from(saved: SavedCallStack) -> Result<CallStack, String> {
        if saved.len > STACK_CAPACITY {
            return Err(format!(
                "call stack depth {} exceeds capacity {STACK_CAPACITY}",
                saved.len
            ));
        }
        Ok(CallStack {
            addresses: saved.addresses,
            len: saved.len,
        })
    }
}

impl CallStack {
    pub fn new() -> CallStack {
        CallStack::default()
    }

    pub fn push(&mut self, address: u16) -> Result<(), Chip8Error> {
        let slot = self
            .addresses
            .get_mut(self.len)
            .ok_or(Chip8Error::StackOverflow {
                capacity: STACK_CAPACITY,
            })?;
        *slot = address;
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.len == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.len -= 1;
        Ok(self.addresses[self.len])
    }

    pub fn peek(&self) -> Option<u16> {
        self.len.checked_sub(1).map(|top| self.addresses[top])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        STACK_CAPACITY
    }

    /// Live entries, bottom first.
    pub fn as_slice(&self) -> &[u16] {
        &self.addresses[..self.len]
    }
}
