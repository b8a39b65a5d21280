use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Linear mapping between day indices and horizontal pixels.
///
/// Day `i` occupies `[i * cell_width, (i + 1) * cell_width)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayScale {
    cell_width: f64,
}

impl DayScale {
    pub fn new(cell_width: f64) -> TimelineResult<Self> {
        if !cell_width.is_finite() || cell_width <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "day cell width must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self { cell_width })
    }

    #[must_use]
    pub fn cell_width(self) -> f64 {
        self.cell_width
    }

    #[must_use]
    pub fn index_to_pixel(self, index: usize) -> f64 {
        index as f64 * self.cell_width
    }

    /// Pixel width of `day_count` consecutive cells.
    #[must_use]
    pub fn span_width(self, day_count: usize) -> f64 {
        day_count as f64 * self.cell_width
    }

    /// Index of the cell under `pixel`, `None` left of the grid or for non-finite input.
    #[must_use]
    pub fn pixel_to_index(self, pixel: f64) -> Option<usize> {
        if !pixel.is_finite() || pixel < 0.0 {
            return None;
        }
        Some((pixel / self.cell_width).floor() as usize)
    }

    /// Whole days covered by a horizontal drag, rounded to the nearest cell.
    #[must_use]
    pub fn delta_days(self, delta_px: f64) -> i64 {
        if !delta_px.is_finite() {
            return 0;
        }
        (delta_px / self.cell_width).round() as i64
    }
}
