//! Capture grid of multi-channel views.
//!
//! A `View` stores its channel planes contiguously (planar layout): plane `c`
//! occupies `data[c * width * height..(c + 1) * width * height]`, row-major.
//! A `Grid` owns its views in row-major order and is immutable once built.

use crate::image::ImageView;
use crate::util::{FrankenError, FrankenResult};

/// Position of a view in the capture grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPos {
    /// Grid row (0-based).
    pub row: usize,
    /// Grid column (0-based).
    pub col: usize,
}

impl GridPos {
    /// Creates a grid position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One captured image decomposed into `u8` channel planes.
#[derive(Clone, Debug)]
pub struct View {
    data: Vec<u8>,
    channels: usize,
    width: usize,
    height: usize,
}

impl View {
    /// Creates a view from planar data (all of plane 0, then plane 1, ...).
    pub fn from_planar(
        data: Vec<u8>,
        channels: usize,
        width: usize,
        height: usize,
    ) -> FrankenResult<Self> {
        let needed = plane_len(width, height)?
            .checked_mul(channels)
            .ok_or(FrankenError::InvalidDimensions { width, height })?;
        if channels == 0 {
            return Err(FrankenError::ChannelMismatch {
                expected: 1,
                got: 0,
            });
        }
        if data.len() != needed {
            return Err(FrankenError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            channels,
            width,
            height,
        })
    }

    /// Creates a view from one buffer per channel plane.
    pub fn from_planes(planes: Vec<Vec<u8>>, width: usize, height: usize) -> FrankenResult<Self> {
        let channels = planes.len();
        let len = plane_len(width, height)?;
        let mut data = Vec::with_capacity(len.saturating_mul(channels));
        for plane in planes {
            if plane.len() != len {
                return Err(FrankenError::BufferTooSmall {
                    needed: len,
                    got: plane.len(),
                });
            }
            data.extend_from_slice(&plane);
        }
        Self::from_planar(data, channels, width, height)
    }

    /// Creates a view from pixel-interleaved samples (`RGBRGB...`).
    pub fn from_interleaved(
        samples: &[u8],
        channels: usize,
        width: usize,
        height: usize,
    ) -> FrankenResult<Self> {
        let len = plane_len(width, height)?;
        let needed = len
            .checked_mul(channels)
            .ok_or(FrankenError::InvalidDimensions { width, height })?;
        if samples.len() != needed {
            return Err(FrankenError::BufferTooSmall {
                needed,
                got: samples.len(),
            });
        }
        let mut data = vec![0u8; needed];
        for (pixel_idx, pixel) in samples.chunks_exact(channels.max(1)).enumerate() {
            for (c, &value) in pixel.iter().enumerate() {
                data[c * len + pixel_idx] = value;
            }
        }
        Self::from_planar(data, channels, width, height)
    }

    /// Creates a view where every channel of every pixel is `value`.
    pub fn filled(value: u8, channels: usize, width: usize, height: usize) -> FrankenResult<Self> {
        let needed = plane_len(width, height)?
            .checked_mul(channels)
            .ok_or(FrankenError::InvalidDimensions { width, height })?;
        Self::from_planar(vec![value; needed], channels, width, height)
    }

    /// Returns the number of channel planes.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the view width in samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the view height in samples.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns a borrowed view of channel plane `channel`.
    pub fn plane(&self, channel: usize) -> Option<ImageView<'_, u8>> {
        if channel >= self.channels {
            return None;
        }
        let len = self.width * self.height;
        let start = channel * len;
        ImageView::from_slice(&self.data[start..start + len], self.width, self.height).ok()
    }
}

fn plane_len(width: usize, height: usize) -> FrankenResult<usize> {
    if width == 0 || height == 0 {
        return Err(FrankenError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(FrankenError::InvalidDimensions { width, height })
}

/// Rectangular, row-major arrangement of views sharing one channel count.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    views: Vec<View>,
}

impl Grid {
    /// Builds a grid from `rows * cols` views in row-major order.
    pub fn new(rows: usize, cols: usize, views: Vec<View>) -> FrankenResult<Self> {
        if rows == 0 || cols == 0 || views.is_empty() {
            return Err(FrankenError::EmptyGrid);
        }
        let expected = rows.checked_mul(cols).ok_or(FrankenError::EmptyGrid)?;
        if views.len() < expected {
            return Err(FrankenError::MissingView {
                row: views.len() / cols,
                col: views.len() % cols,
            });
        }
        if views.len() > expected {
            return Err(FrankenError::IndexOutOfBounds {
                index: expected,
                len: views.len(),
                context: "grid view",
            });
        }
        let channels = views[0].channels();
        if let Some(view) = views.iter().find(|v| v.channels() != channels) {
            return Err(FrankenError::ChannelMismatch {
                expected: channels,
                got: view.channels(),
            });
        }
        Ok(Self { rows, cols, views })
    }

    /// Builds a grid from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<View>>) -> FrankenResult<Self> {
        let num_rows = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut views = Vec::with_capacity(num_rows * cols);
        for (row, row_views) in rows.into_iter().enumerate() {
            if row_views.len() != cols {
                return Err(FrankenError::MissingView {
                    row,
                    col: row_views.len().min(cols),
                });
            }
            views.extend(row_views);
        }
        Self::new(num_rows, cols, views)
    }

    /// Returns the number of grid rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of grid columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the channel count shared by all views.
    pub fn channels(&self) -> usize {
        self.views[0].channels()
    }

    /// Returns the view at `pos`, if it lies inside the grid.
    pub fn view(&self, pos: GridPos) -> Option<&View> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        self.views.get(pos.row * self.cols + pos.col)
    }

    pub(crate) fn require_view(&self, pos: GridPos) -> FrankenResult<&View> {
        self.view(pos).ok_or(FrankenError::IndexOutOfBounds {
            index: pos.row * self.cols + pos.col,
            len: self.views.len(),
            context: "grid view",
        })
    }

    /// Iterates all grid positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| GridPos::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, GridPos, View};
    use crate::util::FrankenError;

    #[test]
    fn interleaved_samples_are_split_into_planes() {
        let samples = [1u8, 2, 3, 4, 5, 6];
        let view = View::from_interleaved(&samples, 3, 2, 1).unwrap();
        assert_eq!(view.plane(0).unwrap().row(0).unwrap(), &[1u8, 4]);
        assert_eq!(view.plane(1).unwrap().row(0).unwrap(), &[2u8, 5]);
        assert_eq!(view.plane(2).unwrap().row(0).unwrap(), &[3u8, 6]);
        assert!(view.plane(3).is_none());
    }

    #[test]
    fn grid_rejects_mixed_channel_counts() {
        let a = View::filled(0, 3, 2, 2).unwrap();
        let b = View::filled(0, 1, 2, 2).unwrap();
        let err = Grid::new(1, 2, vec![a, b]).unwrap_err();
        assert_eq!(
            err,
            FrankenError::ChannelMismatch {
                expected: 3,
                got: 1
            }
        );
    }

    #[test]
    fn grid_rejects_extra_views() {
        let views = (0..7).map(|_| View::filled(0, 1, 2, 2).unwrap()).collect();
        assert_eq!(
            Grid::new(2, 3, views).unwrap_err(),
            FrankenError::IndexOutOfBounds {
                index: 6,
                len: 7,
                context: "grid view",
            }
        );
    }

    #[test]
    fn grid_positions_are_row_major() {
        let views = (0..6).map(|_| View::filled(0, 1, 1, 1).unwrap()).collect();
        let grid = Grid::new(2, 3, views).unwrap();
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], GridPos::new(0, 0));
        assert_eq!(positions[3], GridPos::new(1, 0));
        assert!(grid.view(GridPos::new(2, 0)).is_none());
    }
}
