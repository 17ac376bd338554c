//! Orientation transforms of outputs and surfaces.
//!
//! A [`Transform`] is one of the eight rotations/flips a display or a client
//! buffer may declare. Rotations are counter-clockwise; the flipped variants
//! mirror around the vertical axis before rotating.

use glam::Mat3;
use kiosk_core::types::Size;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    #[default]
    Normal,
    #[serde(rename = "90")]
    Rotate90,
    #[serde(rename = "180")]
    Rotate180,
    #[serde(rename = "270")]
    Rotate270,
    Flipped,
    #[serde(rename = "flipped_90")]
    Flipped90,
    #[serde(rename = "flipped_180")]
    Flipped180,
    #[serde(rename = "flipped_270")]
    Flipped270,
}

/// Builds a [`Mat3`] from nine values listed row by row.
pub(crate) fn from_row_major(m: [f32; 9]) -> Mat3 {
    Mat3::from_cols_array(&m).transpose()
}

impl Transform {
    pub const ALL: [Transform; 8] = [
        Transform::Normal,
        Transform::Rotate90,
        Transform::Rotate180,
        Transform::Rotate270,
        Transform::Flipped,
        Transform::Flipped90,
        Transform::Flipped180,
        Transform::Flipped270,
    ];

    /// The transform that undoes `self`.
    ///
    /// Only the unflipped quarter turns differ from their inverse; every
    /// flipped variant is its own inverse.
    pub fn invert(self) -> Transform {
        match self {
            Transform::Rotate90 => Transform::Rotate270,
            Transform::Rotate270 => Transform::Rotate90,
            other => other,
        }
    }

    pub fn is_flipped(self) -> bool {
        matches!(
            self,
            Transform::Flipped | Transform::Flipped90 | Transform::Flipped180 | Transform::Flipped270
        )
    }

    /// Whether width and height trade places under this transform.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Transform::Rotate90 | Transform::Rotate270 | Transform::Flipped90 | Transform::Flipped270
        )
    }

    /// Size of a `size`-sized area after applying this transform.
    pub fn transform_size(self, size: Size<i32>) -> Size<i32> {
        if self.swaps_axes() {
            size.swapped()
        } else {
            size
        }
    }

    /// 2D homogeneous matrix of this transform.
    pub fn matrix(self) -> Mat3 {
        let m = match self {
            Transform::Normal => [1., 0., 0., 0., 1., 0., 0., 0., 1.],
            Transform::Rotate90 => [0., 1., 0., -1., 0., 0., 0., 0., 1.],
            Transform::Rotate180 => [-1., 0., 0., 0., -1., 0., 0., 0., 1.],
            Transform::Rotate270 => [0., -1., 0., 1., 0., 0., 0., 0., 1.],
            Transform::Flipped => [-1., 0., 0., 0., 1., 0., 0., 0., 1.],
            Transform::Flipped90 => [0., 1., 0., 1., 0., 0., 0., 0., 1.],
            Transform::Flipped180 => [1., 0., 0., 0., -1., 0., 0., 0., 1.],
            Transform::Flipped270 => [0., -1., 0., -1., 0., 0., 0., 0., 1.],
        };
        from_row_major(m)
    }
}
