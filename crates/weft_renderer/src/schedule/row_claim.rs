use super::{Span, WorkCursor};

/// Rows claimed one at a time from a shared cursor.
///
/// Each item is a whole row. The iterator ends on the first claim at or past
/// `height`.
#[derive(Debug)]
pub struct RowClaims<'c> {
    cursor: &'c WorkCursor,
    width: usize,
    height: usize,
    done: bool,
}

impl<'c> RowClaims<'c> {
    pub fn new(cursor: &'c WorkCursor, width: usize, height: usize) -> Self {
        Self {
            cursor,
            width,
            height,
            done: false,
        }
    }
}

impl Iterator for RowClaims<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if self.done {
            return None;
        }

        let y = self.cursor.claim();
        if y >= self.height {
            self.done = true;
            return None;
        }

        Some(Span {
            y,
            x_start: 0,
            x_end: self.width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_claimer_gets_every_row() {
        let cursor = WorkCursor::new();
        let rows: Vec<_> = RowClaims::new(&cursor, 8, 5).map(|s| s.y).collect();
        assert_eq!(rows, vec![0, 1, 2, 3, 4]);

        // Stopped after one claim past the end
        assert_eq!(cursor.claims(), 6);
        assert!(RowClaims::new(&cursor, 8, 5).next().is_none());
    }

    #[test]
    fn test_rows_span_full_width() {
        let cursor = WorkCursor::new();
        for span in RowClaims::new(&cursor, 13, 3) {
            assert_eq!(span.x_start, 0);
            assert_eq!(span.x_end, 13);
        }
    }

    #[test]
    fn test_ten_rows_three_workers() {
        let cursor = WorkCursor::new();

        let rows = || RowClaims::new(&cursor, 4, 10).map(|span| span.y).collect::<Vec<_>>();
        let mut claimed: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..3).map(|_| s.spawn(rows)).collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });

        claimed.sort_unstable();
        assert_eq!(claimed, (0..10).collect::<Vec<_>>());
        // Each worker made exactly one terminating claim
        assert_eq!(cursor.claims(), 13);
    }
}
