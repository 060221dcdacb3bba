//! Keepalive reply counter.

/// Counter echoed in each keepalive reply.
///
/// Starts at 0 for every connection and wraps from `u32::MAX` to 0, so all
/// 2^32 values are produced before any repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepaliveCounter {
    next: u32,
}

impl KeepaliveCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter positioned at an arbitrary value.
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    /// Value the next reply will carry.
    #[inline]
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Return the current value and move to the next one.
    #[inline]
    pub fn advance(&mut self) -> u32 {
        let current = self.next;
        self.next = current.wrapping_add(1);
        current
    }
}
