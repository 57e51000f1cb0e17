//! Patch references into grid views.

use crate::grid::{Grid, GridPos, View};
use crate::image::ImageView;
use crate::util::{FrankenError, FrankenResult};

/// Tile-shaped region of a grid view; holds no pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatchRef {
    /// View the region belongs to.
    pub pos: GridPos,
    /// Top row of the region.
    pub row: usize,
    /// Left column of the region.
    pub col: usize,
    /// Region height.
    pub height: usize,
    /// Region width.
    pub width: usize,
}

impl PatchRef {
    /// Returns `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Resolves the reference against `grid`, checking bounds.
    pub fn resolve<'a>(&self, grid: &'a Grid) -> FrankenResult<PatchView<'a>> {
        let view = grid.require_view(self.pos)?;
        PatchView::new(view, self.row, self.col, self.height, self.width)
    }
}

/// Bounds-checked borrowed patch over all channel planes of a view.
#[derive(Clone, Copy, Debug)]
pub struct PatchView<'a> {
    view: &'a View,
    row: usize,
    col: usize,
    height: usize,
    width: usize,
}

impl<'a> PatchView<'a> {
    /// Creates a patch view; the region must be non-empty and inside `view`.
    pub fn new(
        view: &'a View,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> FrankenResult<Self> {
        if width == 0 || height == 0 {
            return Err(FrankenError::InvalidDimensions { width, height });
        }
        let fits_x = col.checked_add(width).is_some_and(|end| end <= view.width());
        let fits_y = row.checked_add(height).is_some_and(|end| end <= view.height());
        if !fits_x || !fits_y {
            return Err(FrankenError::RoiOutOfBounds {
                x: col,
                y: row,
                width,
                height,
                img_width: view.width(),
                img_height: view.height(),
            });
        }
        Ok(Self {
            view,
            row,
            col,
            height,
            width,
        })
    }

    /// Creates a patch view whose bounds were established by the caller.
    #[inline]
    pub(crate) fn new_unchecked(
        view: &'a View,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> Self {
        debug_assert!(row + height <= view.height() && col + width <= view.width());
        Self {
            view,
            row,
            col,
            height,
            width,
        }
    }

    /// Returns the number of channel planes.
    pub fn channels(&self) -> usize {
        self.view.channels()
    }

    /// Returns the patch height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the patch width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Returns channel `channel` of the patch as a strided image view.
    ///
    /// The stride is the width of the parent view.
    pub fn plane(&self, channel: usize) -> Option<ImageView<'a, u8>> {
        self.view
            .plane(channel)?
            .roi(self.col, self.row, self.width, self.height)
            .ok()
    }

    /// Iterates the channel planes of the patch in channel order.
    #[inline]
    pub fn planes(&self) -> impl Iterator<Item = ImageView<'a, u8>> + 'a {
        let patch = *self;
        (0..patch.channels()).filter_map(move |channel| patch.plane(channel))
    }
}
