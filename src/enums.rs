use std::fmt;
use std::str::FromStr;

use ndarray::Axis;
use thiserror::Error;

/// Anatomical plane a slice is taken from.
///
/// Volumes are indexed `(x, y, z)` as stored in the NIfTI file, so each
/// view fixes one of those axes and keeps the other two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Axial,
    Sagittal,
    Coronal,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid view")]
pub struct ParseViewError(pub String);

impl View {
    pub const ALL: [View; 3] = [View::Axial, View::Sagittal, View::Coronal];

    /// The volume axis held fixed by this view
    pub fn axis(self) -> Axis {
        match self {
            View::Axial => Axis(2),
            View::Sagittal => Axis(0),
            View::Coronal => Axis(1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Axial => "axial",
            View::Sagittal => "sagittal",
            View::Coronal => "coronal",
        }
    }
}

impl FromStr for View {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "axial" => Ok(View::Axial),
            "sagittal" => Ok(View::Sagittal),
            "coronal" => Ok(View::Coronal),
            other => Err(ParseViewError(other.to_owned())),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
