use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared claim counter for the dynamic strategies.
///
/// Starts before the first unit of work: the first [`claim`](Self::claim)
/// returns 0. Each claim hands out a fresh index exactly once, no matter how
/// many threads race on it. The counter only moves forward within a render.
#[derive(Debug, Default)]
pub struct WorkCursor {
    next: AtomicUsize,
}

impl WorkCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next unit index.
    pub fn claim(&self) -> usize {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of claims made so far, including the ones that fell past the
    /// end of the work.
    pub fn claims(&self) -> usize {
        self.next.load(Ordering::Relaxed)
    }

    /// Return to the initial state before a new render.
    pub fn reset(&mut self) {
        *self.next.get_mut() = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_are_sequential() {
        let cursor = WorkCursor::new();
        assert_eq!(cursor.claim(), 0);
        assert_eq!(cursor.claim(), 1);
        assert_eq!(cursor.claim(), 2);
        assert_eq!(cursor.claims(), 3);
    }

    #[test]
    fn test_reset() {
        let mut cursor = WorkCursor::new();
        cursor.claim();
        cursor.claim();
        cursor.reset();
        assert_eq!(cursor.claims(), 0);
        assert_eq!(cursor.claim(), 0);
    }

    #[test]
    fn test_concurrent_claims_are_unique() {
        let cursor = WorkCursor::new();
        let per_thread = 1000;

        let mut claimed: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (0..per_thread).map(|_| cursor.claim()).collect::<Vec<_>>()))
                .collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });

        claimed.sort_unstable();
        assert_eq!(claimed, (0..4 * per_thread).collect::<Vec<_>>());
    }
}
