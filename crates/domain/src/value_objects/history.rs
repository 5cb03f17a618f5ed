//! Bounded per-player utterance history.

use crate::error::DomainError;

/// Fixed-capacity FIFO of a player's most recent utterances.
///
/// Backed by a ring of slots: `head` points at the oldest entry and `len`
/// counts occupied slots. Pushing into a full buffer overwrites the oldest
/// entry, so `len() <= capacity()` holds at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryBuffer {
    slots: Vec<Option<String>>,
    head: usize,
    len: usize,
}

impl HistoryBuffer {
    /// Number of utterances kept per player unless configured otherwise
    pub const DEFAULT_CAPACITY: usize = 3;

    /// Create an empty buffer holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, DomainError> {
        if capacity == 0 {
            return Err(DomainError::validation(
                "history capacity must be at least 1",
            ));
        }

        Ok(Self {
            slots: vec![None; capacity],
            head: 0,
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Append `text` as the newest entry.
    ///
    /// Returns the evicted oldest entry when the buffer was already full.
    pub fn push(&mut self, text: impl Into<String>) -> Option<String> {
        let capacity = self.capacity();

        if self.is_full() {
            // The slot after the newest entry is the oldest one.
            let evicted = self.slots[self.head].replace(text.into());
            self.head = (self.head + 1) % capacity;
            evicted
        } else {
            let tail = (self.head + self.len) % capacity;
            self.slots[tail] = Some(text.into());
            self.len += 1;
            None
        }
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let capacity = self.capacity();
        (0..self.len).filter_map(move |offset| self.slots[(self.head + offset) % capacity].as_deref())
    }

    /// The most recently pushed entry
    pub fn latest(&self) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        let idx = (self.head + self.len - 1) % self.capacity();
        self.slots[idx].as_deref()
    }

    /// Owned copy of the entries, oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self {
            slots: vec![None; Self::DEFAULT_CAPACITY],
            head: 0,
            len: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            HistoryBuffer::new(0),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_push_within_capacity_keeps_order() {
        let mut history = HistoryBuffer::default();
        assert!(history.is_empty());

        assert_eq!(history.push("hello"), None);
        assert_eq!(history.push("where is the inn?"), None);

        assert_eq!(history.len(), 2);
        assert_eq!(history.snapshot(), vec!["hello", "where is the inn?"]);
        assert_eq!(history.latest(), Some("where is the inn?"));
    }

    #[test]
    fn test_oldest_evicted_first() {
        let mut history = HistoryBuffer::new(3).unwrap();
        history.push("one");
        history.push("two");
        history.push("three");
        assert!(history.is_full());

        assert_eq!(history.push("four"), Some("one".to_string()));
        assert_eq!(history.snapshot(), vec!["two", "three", "four"]);

        assert_eq!(history.push("five"), Some("two".to_string()));
        assert_eq!(history.push("six"), Some("three".to_string()));
        assert_eq!(history.push("seven"), Some("four".to_string()));
        assert_eq!(history.snapshot(), vec!["five", "six", "seven"]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.latest(), Some("seven"));
    }

    #[test]
    fn test_len_never_exceeds_capacity() {
        let mut history = HistoryBuffer::new(2).unwrap();
        for i in 0..10 {
            history.push(format!("msg {i}"));
            assert!(history.len() <= history.capacity());
        }
        assert_eq!(history.snapshot(), vec!["msg 8", "msg 9"]);
    }

    #[test]
    fn test_capacity_one() {
        let mut history = HistoryBuffer::new(1).unwrap();
        assert_eq!(history.push("a"), None);
        assert_eq!(history.push("b"), Some("a".to_string()));
        assert_eq!(history.snapshot(), vec!["b"]);
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryBuffer::default();
        history.push("a");
        history.push("b");
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
        history.push("c");
        assert_eq!(history.snapshot(), vec!["c"]);
    }
}
