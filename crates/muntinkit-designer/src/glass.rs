//! Glass opening dimensioning
//!
//! The usable glass area (the "light") is the frame opening minus the
//! profile's glass offset and the glazing bead on every side.

use muntinkit_core::Opening;
use serde::{Deserialize, Serialize};

/// Visible glass size in mm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlassDimensions {
    pub width: f64,
    pub height: f64,
}

impl GlassDimensions {
    /// Glass size for a frame, clamped at zero when the offsets eat the
    /// whole frame.
    pub fn from_frame(
        frame_width: f64,
        frame_height: f64,
        profile_offset: f64,
        bead_offset: f64,
    ) -> Self {
        let total = 2.0 * (profile_offset + bead_offset);
        Self {
            width: (frame_width - total).max(0.0),
            height: (frame_height - total).max(0.0),
        }
    }

    /// The opening bars are laid out in
    pub fn opening(&self) -> Opening {
        Opening::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
