use std::ops::Range;

use super::{Runs, Span};

/// Fixed split of the flattened pixel index space (`y * width + x`) between
/// `workers` workers.
///
/// Worker `i` starts at row `height / workers * i`, column
/// `width / workers * i`; its band ends where worker `i + 1` starts, and the
/// last band runs to the end of the image. Leftover rows therefore all go to
/// the last worker. Inside a band only the first and last rows are partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPartition {
    width: usize,
    height: usize,
    workers: usize,
}

impl StaticPartition {
    pub fn new(width: usize, height: usize, workers: usize) -> Self {
        Self { width, height, workers }
    }

    /// Flattened index where `worker`'s band begins.
    pub fn start(&self, worker: usize) -> usize {
        if worker >= self.workers {
            return self.width * self.height;
        }
        let row = self.height / self.workers * worker;
        let column = self.width / self.workers * worker;
        row * self.width + column
    }

    /// Flattened indices owned by `worker`.
    pub fn band(&self, worker: usize) -> Range<usize> {
        self.start(worker)..self.start(worker + 1)
    }

    /// Rows of `worker`'s band, first and last clipped to the band.
    pub fn spans(&self, worker: usize) -> impl Iterator<Item = Span> {
        Runs::new(self.band(worker), self.width).map(|(y, columns)| Span {
            y,
            x_start: columns.start,
            x_end: columns.end,
        })
    }

    /// View-plane coordinates of `worker`'s first pixel, relative to the
    /// image centre: `(start_width, start_height)`.
    pub fn centred_start(&self, worker: usize) -> (i32, i32) {
        let start = self.start(worker);
        let (x, y) = if self.width == 0 {
            (0, 0)
        } else {
            (start % self.width, start / self.width)
        };
        (
            x as i32 - (self.width / 2) as i32,
            y as i32 - (self.height / 2) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn coverage(width: usize, height: usize, workers: usize) -> Vec<u32> {
        let partition = StaticPartition::new(width, height, workers);
        let mut counts = vec![0u32; width * height];
        for worker in 0..workers {
            for span in partition.spans(worker) {
                for index in span.indices(width) {
                    counts[index] += 1;
                }
            }
        }
        counts
    }

    #[test]
    fn test_single_worker_owns_whole_image() {
        let partition = StaticPartition::new(4, 4, 1);
        assert_eq!(partition.band(0), 0..16);
        assert_eq!(partition.centred_start(0), (-2, -2));

        let spans: Vec<_> = partition.spans(0).collect();
        assert_eq!(spans.len(), 4);
        assert!(spans.iter().all(|s| s.x_start == 0 && s.x_end == 4));
    }

    #[test]
    fn test_bands_are_contiguous() {
        let partition = StaticPartition::new(10, 7, 3);
        for worker in 0..3 {
            assert_eq!(partition.band(worker).end, partition.band(worker + 1).start);
        }
        assert_eq!(partition.band(0).start, 0);
        assert_eq!(partition.band(2).end, 70);

        // Worker 1 starts at row 2, column 3
        assert_eq!(partition.start(1), 23);
        let first = partition.spans(1).next().unwrap();
        assert_eq!((first.y, first.x_start, first.x_end), (2, 3, 10));
        assert_eq!(partition.centred_start(1), (-2, -1));
    }

    #[test]
    fn test_more_workers_than_pixels() {
        let counts = coverage(2, 2, 8);
        assert!(counts.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_sampled_coverage() {
        let mut rng = StdRng::seed_from_u64(0x5747);
        for _ in 0..200 {
            let width = rng.gen_range(1..64);
            let height = rng.gen_range(1..64);
            let workers = rng.gen_range(1..17);

            let counts = coverage(width, height, workers);
            assert!(
                counts.iter().all(|&c| c == 1),
                "{}x{} with {} workers",
                width,
                height,
                workers
            );
        }
    }
}
