//! Id allocation strategies.
//!
//! The server hands out a monotonic counter; the client derives ids from the
//! clock. Both sit behind [`IdAllocator`] so the repository never cares which.

use chrono::Utc;

use crate::errors::AppError;

/// Hands out fresh integer ids.
pub trait IdAllocator: Send {
    /// Return an id that has not been returned before and does not collide with
    /// any id the allocator was seeded with. Fails once `i64` is exhausted.
    fn next_id(&mut self) -> Result<i64, AppError>;
}

fn exhausted() -> AppError {
    AppError::Internal("No course ids left to allocate".to_string())
}

/// Monotonic counter recovered as `max(existing) + 1`, or 1 for an empty collection.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: Option<i64>,
}

impl SequentialIds {
    pub fn starting_after(max_existing: Option<i64>) -> Self {
        Self {
            next: max_existing.map_or(Some(1), |max| max.checked_add(1)),
        }
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&mut self) -> Result<i64, AppError> {
        let id = self.next.ok_or_else(exhausted)?;
        self.next = id.checked_add(1);
        Ok(id)
    }
}

/// Millisecond timestamps, bumped so every value is strictly increasing.
#[derive(Debug, Clone)]
pub struct TimestampIds {
    last: i64,
}

impl TimestampIds {
    pub fn starting_after(max_existing: Option<i64>) -> Self {
        Self {
            last: max_existing.unwrap_or(0),
        }
    }
}

impl IdAllocator for TimestampIds {
    fn next_id(&mut self) -> Result<i64, AppError> {
        let floor = self.last.checked_add(1).ok_or_else(exhausted)?;
        self.last = Utc::now().timestamp_millis().max(floor);
        Ok(self.last)
    }
}

/// Which allocator a repository should build once the collection is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    Sequential,
    Timestamp,
}

impl IdStrategy {
    pub fn allocator(self, max_existing: Option<i64>) -> Box<dyn IdAllocator> {
        match self {
            IdStrategy::Sequential => Box::new(SequentialIds::starting_after(max_existing)),
            IdStrategy::Timestamp => Box::new(TimestampIds::starting_after(max_existing)),
        }
    }
}
