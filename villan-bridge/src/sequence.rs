//! Order number allocation
//!
//! Hands out the human-readable order number printed on each ticket:
//! a process-wide counter modulo 200, zero-padded to three digits.
//! Numbering restarts at process start; that reset is a known property
//! of the system, not a defect.

use std::sync::atomic::{AtomicU32, Ordering};

const SEQUENCE_MODULO: u32 = 200;

/// Wrapping order number allocator
///
/// Atomic so per-destination print jobs may be parallelized later
/// without changing the numbering discipline.
#[derive(Debug, Default)]
pub struct SequenceAllocator {
    counter: AtomicU32,
}

impl SequenceAllocator {
    /// Create an allocator starting before the first number
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next order number
    ///
    /// Increments the counter and returns it zero-padded to width 3:
    /// `001`, `002`, ..., `199`, then wraps to `000`.
    pub fn allocate(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{:03}", (n + 1) % SEQUENCE_MODULO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padded() {
        let seq = SequenceAllocator::new();
        assert_eq!(seq.allocate(), "001");
        assert_eq!(seq.allocate(), "002");
    }

    #[test]
    fn test_wraps_at_modulo() {
        let seq = SequenceAllocator::new();
        let mut last = String::new();
        for _ in 0..200 {
            last = seq.allocate();
        }
        assert_eq!(last, "000");
    }

    #[test]
    fn test_201st_equals_first() {
        let seq = SequenceAllocator::new();
        let first = seq.allocate();
        for _ in 0..199 {
            seq.allocate();
        }
        assert_eq!(seq.allocate(), first);
    }

    #[test]
    fn test_cycles_full_range() {
        let seq = SequenceAllocator::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(seq.allocate());
        }
        assert_eq!(seen.len(), 200);
        assert!(seen.contains("000"));
        assert!(seen.contains("199"));
    }
}
