//! Conversions from smithay's output types.

use kiosk_core::types::Size;
use smithay::output::Mode as SmithayMode;
use smithay::utils::Transform as SmithayTransform;

use crate::compositor::backend::Mode;
use crate::compositor::transform::Transform;

impl From<SmithayTransform> for Transform {
    fn from(transform: SmithayTransform) -> Self {
        match transform {
            SmithayTransform::Normal => Transform::Normal,
            SmithayTransform::_90 => Transform::Rotate90,
            SmithayTransform::_180 => Transform::Rotate180,
            SmithayTransform::_270 => Transform::Rotate270,
            SmithayTransform::Flipped => Transform::Flipped,
            SmithayTransform::Flipped90 => Transform::Flipped90,
            SmithayTransform::Flipped180 => Transform::Flipped180,
            SmithayTransform::Flipped270 => Transform::Flipped270,
        }
    }
}

impl From<Transform> for SmithayTransform {
    fn from(transform: Transform) -> Self {
        match transform {
            Transform::Normal => SmithayTransform::Normal,
            Transform::Rotate90 => SmithayTransform::_90,
            Transform::Rotate180 => SmithayTransform::_180,
            Transform::Rotate270 => SmithayTransform::_270,
            Transform::Flipped => SmithayTransform::Flipped,
            Transform::Flipped90 => SmithayTransform::Flipped90,
            Transform::Flipped180 => SmithayTransform::Flipped180,
            Transform::Flipped270 => SmithayTransform::Flipped270,
        }
    }
}

/// smithay does not flag preferred modes on the mode itself, so the result is
/// never marked preferred.
impl From<SmithayMode> for Mode {
    fn from(mode: SmithayMode) -> Self {
        Mode {
            size: Size::new(mode.size.w, mode.size.h),
            refresh: mode.refresh,
            preferred: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_round_trip() {
        for t in Transform::ALL {
            assert_eq!(Transform::from(SmithayTransform::from(t)), t);
        }
    }

    #[test]
    fn test_mode_conversion() {
        let mode = SmithayMode {
            size: (2560, 1440).into(),
            refresh: 144_000,
        };
        assert_eq!(Mode::from(mode), Mode::new(2560, 1440, 144_000));
    }
}
