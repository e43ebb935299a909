//! Per-worker render loops, one per distribution strategy.
//!
//! Each entry point renders everything its strategy assigns to `worker` and
//! returns the number of pixels it wrote.

use crate::buffer::SharedPixels;
use crate::sampler::{Frame, PixelSampler};
use crate::schedule::{BlockClaims, BlockGrid, RowClaims, Span, StaticPartition, WorkCursor};
use crate::world::World;

fn render_span<W: World + ?Sized>(
    sampler: &PixelSampler<'_, W>,
    span: Span,
    worker: usize,
    out: &mut [u32],
) -> usize {
    for (x, pixel) in (span.x_start..span.x_end).zip(out.iter_mut()) {
        *pixel = sampler.pixel(x, span.y, worker);
    }
    span.len()
}

/// Render `worker`'s band of a static partition into `band`, which holds
/// exactly the pixels of [`StaticPartition::band`].
pub fn render_static<W: World + ?Sized>(
    world: &W,
    frame: Frame,
    worker: usize,
    workers: usize,
    band: &mut [u32],
) -> usize {
    let sampler = PixelSampler::new(world, frame);
    let partition = StaticPartition::new(frame.width, frame.height, workers);
    let offset = partition.start(worker);
    debug_assert_eq!(band.len(), partition.band(worker).len());

    let mut written = 0;
    for span in partition.spans(worker) {
        let indices = span.indices(frame.width);
        let out = &mut band[indices.start - offset..indices.end - offset];
        written += render_span(&sampler, span, worker, out);
    }
    written
}

/// Claim and render whole rows until the cursor passes the last row.
pub fn render_row_claim<W: World + ?Sized>(
    world: &W,
    frame: Frame,
    worker: usize,
    cursor: &WorkCursor,
    pixels: &SharedPixels<'_>,
) -> usize {
    let sampler = PixelSampler::new(world, frame);

    let mut written = 0;
    for span in RowClaims::new(cursor, frame.width, frame.height) {
        // Safety: each row is claimed by exactly one worker
        let out = unsafe { pixels.slice_mut(span.indices(frame.width)) };
        written += render_span(&sampler, span, worker, out);
    }
    written
}

/// Claim and render blocks until the cursor passes the last block.
///
/// # Panics
/// If `block_size` is zero.
pub fn render_block_claim<W: World + ?Sized>(
    world: &W,
    frame: Frame,
    worker: usize,
    block_size: usize,
    cursor: &WorkCursor,
    pixels: &SharedPixels<'_>,
) -> usize {
    let sampler = PixelSampler::new(world, frame);
    let grid = BlockGrid::new(frame.width, frame.height, block_size);

    let mut written = 0;
    for block in BlockClaims::new(cursor, grid) {
        for span in block.spans() {
            // Safety: blocks partition the image and each is claimed once
            let out = unsafe { pixels.slice_mut(span.indices(frame.width)) };
            written += render_span(&sampler, span, worker, out);
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{Camera, Material, Scene};
    use weft_math::Colour;

    fn white_sky() -> Scene {
        let mut scene = Scene::new(Camera::default());
        scene.set_sky(Material::new(Colour::WHITE));
        scene
    }

    fn frame(width: usize, height: usize) -> Frame {
        Frame {
            width,
            height,
            aa_level: 1,
            colour_rise: false,
        }
    }

    #[test]
    fn test_static_workers_fill_their_bands() {
        let scene = white_sky();
        let frame = frame(7, 5);
        let partition = StaticPartition::new(7, 5, 2);
        let expected = Colour::WHITE.convert_to_pixel(-1.0);

        let mut total = 0;
        for worker in 0..2 {
            let mut band = vec![0u32; partition.band(worker).len()];
            total += render_static(&scene, frame, worker, 2, &mut band);
            assert!(band.iter().all(|&p| p == expected));
        }
        assert_eq!(total, 35);
    }

    #[test]
    fn test_single_row_claimer_writes_everything() {
        let scene = white_sky();
        let mut pixels = vec![0u32; 6 * 4];
        let cursor = WorkCursor::new();

        let shared = SharedPixels::new(&mut pixels);
        let written = render_row_claim(&scene, frame(6, 4), 0, &cursor, &shared);
        assert_eq!(written, 24);
        assert!(pixels.iter().all(|&p| p != 0));
        assert_eq!(cursor.claims(), 5);
    }

    #[test]
    fn test_single_block_claimer_writes_everything() {
        let scene = white_sky();
        let mut pixels = vec![0u32; 10 * 9];
        let cursor = WorkCursor::new();

        let shared = SharedPixels::new(&mut pixels);
        let written = render_block_claim(&scene, frame(10, 9), 0, 4, &cursor, &shared);
        assert_eq!(written, 90);
        assert!(pixels.iter().all(|&p| p != 0));
    }

    #[test]
    #[should_panic(expected = "block size must be positive")]
    fn test_zero_block_size_panics() {
        let scene = white_sky();
        let mut pixels = vec![0u32; 4 * 4];
        let cursor = WorkCursor::new();

        render_block_claim(&scene, frame(4, 4), 0, 0, &cursor, &SharedPixels::new(&mut pixels));
    }

    #[test]
    fn test_colour_rise_marks_worker() {
        let scene = white_sky();
        let mut tinted = frame(4, 4);
        tinted.colour_rise = true;

        let partition = StaticPartition::new(4, 4, 2);
        let mut first = vec![0u32; partition.band(0).len()];
        let mut second = vec![0u32; partition.band(1).len()];
        render_static(&scene, tinted, 0, 2, &mut first);
        render_static(&scene, tinted, 1, 2, &mut second);

        assert!(first.iter().all(|&p| p == first[0]));
        assert_ne!(first[0], second[0]);
    }
}
