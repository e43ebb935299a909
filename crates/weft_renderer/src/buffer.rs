//! Pixel storage for a render.

use std::marker::PhantomData;
use std::ops::Range;

/// Packed `0x00RRGGBB` pixels, row-major with row 0 at the bottom of the
/// image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Create a black buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Distance in pixels between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.width
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.stride() + x]
    }
}

/// Unsynchronised view of a pixel slice shared by every worker of a render.
///
/// Workers obtain disjoint mutable sub-slices through
/// [`slice_mut`](Self::slice_mut). Nothing here checks that the ranges
/// handed out are disjoint; that is the job of the work distribution, whose
/// spans cover each pixel exactly once.
pub struct SharedPixels<'a> {
    ptr: *mut u32,
    len: usize,
    _buffer: PhantomData<&'a mut [u32]>,
}

// Safety: access goes through `slice_mut`, whose callers guarantee that no
// two threads hold overlapping ranges.
unsafe impl Send for SharedPixels<'_> {}
unsafe impl Sync for SharedPixels<'_> {}

impl<'a> SharedPixels<'a> {
    pub fn new(pixels: &'a mut [u32]) -> Self {
        Self {
            ptr: pixels.as_mut_ptr(),
            len: pixels.len(),
            _buffer: PhantomData,
        }
    }

    /// Mutable access to `range` of the shared pixels.
    ///
    /// # Panics
    /// If `range` is out of bounds.
    ///
    /// # Safety
    /// No other slice overlapping `range` may be alive while the returned
    /// slice is.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn slice_mut(&self, range: Range<usize>) -> &mut [u32] {
        assert!(
            range.start <= range.end && range.end <= self.len,
            "pixel range {:?} out of bounds for buffer of {}",
            range,
            self.len
        );
        std::slice::from_raw_parts_mut(self.ptr.add(range.start), range.end - range.start)
    }
}
