//! Per-draw counters.

use std::fmt;

/// What one `draw` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub tiles_requested: usize,
    pub tiles_loaded: usize,
    /// Tiles that were missing or failed and count as no data.
    pub tiles_absent: usize,
    pub contours_drawn: usize,
    pub images_drawn: usize,
}

impl DrawStats {
    pub(crate) fn record_tile(&mut self, present: bool) {
        if present {
            self.tiles_loaded += 1;
        } else {
            self.tiles_absent += 1;
        }
    }
}

impl fmt::Display for DrawStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} tiles loaded, {} contours, {} images",
            self.tiles_loaded, self.tiles_requested, self.contours_drawn, self.images_drawn
        )
    }
}
