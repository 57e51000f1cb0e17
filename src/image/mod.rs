//! Strided 2D sample views.
//!
//! A channel plane of a `View` is exposed as an `ImageView` with
//! `stride == width`. Cutting a patch out of it with [`ImageView::roi`] keeps
//! the plane's stride, so a patch row is a `width`-long slice starting
//! `stride` elements after the previous one.

use crate::util::{FrankenError, FrankenResult};

/// Borrowed 2D view over a 1D buffer.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a view over densely packed rows.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> FrankenResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view whose rows start `stride` elements apart.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> FrankenResult<Self> {
        if width == 0 || height == 0 {
            return Err(FrankenError::InvalidDimensions { width, height });
        }
        if stride < width {
            return Err(FrankenError::InvalidStride { width, stride });
        }
        let needed = (height - 1)
            .checked_mul(stride)
            .and_then(|v| v.checked_add(width))
            .ok_or(FrankenError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(FrankenError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Elements between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the element at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        self.row(y)?.get(x)
    }

    /// Returns row `y` (`width` elements).
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }

    /// Iterates the `height` rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + 'a {
        let (data, width) = (self.data, self.width);
        data.chunks(self.stride)
            .take(self.height)
            .map(move |row| &row[..width])
    }

    /// Returns the `width x height` sub-view whose top-left is `(x, y)`.
    ///
    /// The sub-view shares the buffer and stride; nothing is copied.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> FrankenResult<ImageView<'a, T>> {
        let inside = |start: usize, len: usize, limit: usize| {
            start.checked_add(len).is_some_and(|end| end <= limit)
        };
        if !inside(x, width, self.width) || !inside(y, height, self.height) {
            return Err(FrankenError::RoiOutOfBounds {
                x,
                y,
                width,
                height,
                img_width: self.width,
                img_height: self.height,
            });
        }
        let start = y * self.stride + x;
        ImageView::new(&self.data[start..], width, height, self.stride)
    }
}
