//! Fresh-name source for temporaries.
//!
//! One allocator lives as long as the translator that owns it; names keep counting across
//! translations instead of restarting at `t0`.

/// Hands out `<prefix>0`, `<prefix>1`, ... and never repeats within its lifetime.
///
/// Not synchronized: concurrent translations each need their own allocator.
#[derive(Debug, Clone)]
pub struct TemporaryAllocator {
    prefix: String,
    next: u64,
}

impl TemporaryAllocator {
    pub(crate) fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    pub fn next_name(&mut self) -> String {
        let name = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        name
    }

    /// Number of names handed out so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

impl Default for TemporaryAllocator {
    fn default() -> Self {
        Self::new("t")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::TemporaryAllocator;

    #[test]
    fn starts_at_zero_and_counts_up() {
        let mut alloc = TemporaryAllocator::default();
        assert_eq!(alloc.next_name(), "t0");
        assert_eq!(alloc.next_name(), "t1");
        assert_eq!(alloc.issued(), 2);
    }

    #[test]
    fn never_repeats_a_name() {
        let mut alloc = TemporaryAllocator::new("tmp");
        let names: HashSet<String> = (0..500).map(|_| alloc.next_name()).collect();
        assert_eq!(names.len(), 500);
        assert!(names.contains("tmp499"));
    }
}
