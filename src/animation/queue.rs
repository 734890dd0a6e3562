//! Pending-queue FIFO with stable positions.

use std::collections::VecDeque;

use crate::store::InstanceId;

/// FIFO of instances waiting for an animation slot.
///
/// An entry's index is its `queuePosition`; the scheduler rewrites the
/// position column after every removal.
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    entries: VecDeque<InstanceId>,
}

impl PendingQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` at the tail and return its position.
    pub fn push_back(&mut self, id: InstanceId) -> usize {
        self.entries.push_back(id);
        self.entries.len() - 1
    }

    /// Remove and return the head.
    pub fn pop_front(&mut self) -> Option<InstanceId> {
        self.entries.pop_front()
    }

    /// Remove `id` wherever it sits. Returns `true` if it was queued.
    pub fn remove(&mut self, id: InstanceId) -> bool {
        match self.entries.iter().position(|&e| e == id) {
            Some(pos) => self.entries.remove(pos).is_some(),
            None => false,
        }
    }

    /// Number of waiting instances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Waiting instances, head first, with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (usize, InstanceId)> + '_ {
        self.entries.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_positions() {
        let mut queue = PendingQueue::new();
        assert_eq!(queue.push_back(InstanceId(4)), 0);
        assert_eq!(queue.push_back(InstanceId(9)), 1);
        assert_eq!(queue.push_back(InstanceId(2)), 2);

        assert_eq!(queue.pop_front(), Some(InstanceId(4)));
        let order: Vec<_> = queue.iter().collect();
        assert_eq!(order, vec![(0, InstanceId(9)), (1, InstanceId(2))]);
    }

    #[test]
    fn remove_from_middle() {
        let mut queue = PendingQueue::new();
        let _ = queue.push_back(InstanceId(1));
        let _ = queue.push_back(InstanceId(2));
        let _ = queue.push_back(InstanceId(3));
        assert!(queue.remove(InstanceId(2)));
        assert!(!queue.remove(InstanceId(2)));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.iter().nth(1), Some((1, InstanceId(3))));
    }
}
