use crate::volume::Volume;

use ndarray::{ArrayD, Axis, Ix3};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolumeLoaderError {
    #[error("Volume file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Expected a 3D volume, found {0} dimensions")]
    UnsupportedDimensions(usize),

    #[error("NIfTI error: {0}")]
    Nifti(#[from] nifti::NiftiError),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub struct VolumeLoader;

impl VolumeLoader {
    /// Load a volume from a `.nii` or `.nii.gz` file
    ///
    /// Voxel values are converted to `f32` with the header's scaling
    /// applied. The returned volume is indexed `(x, y, z)`.
    ///
    /// # Errors
    ///
    /// Returns error if the file is missing, is not a readable NIfTI image
    /// or does not hold a 3D volume
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Volume, VolumeLoaderError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(VolumeLoaderError::NotFound(path.to_path_buf()));
        }

        let object = ReaderOptions::new().read_file(path)?;
        let data = object.into_volume().into_ndarray::<f32>()?;

        Self::load_from_ndarray(data)
    }

    /// Build a volume from an n-dimensional array
    ///
    /// Trailing singleton dimensions (e.g. a 4D image with one frame) are
    /// dropped; anything else that is not 3D is rejected.
    pub fn load_from_ndarray(data: ArrayD<f32>) -> Result<Volume, VolumeLoaderError> {
        let data = Self::squeeze_trailing(data);
        if data.ndim() != 3 {
            return Err(VolumeLoaderError::UnsupportedDimensions(data.ndim()));
        }

        Ok(Volume::new(data.into_dimensionality::<Ix3>()?))
    }

    fn squeeze_trailing(mut data: ArrayD<f32>) -> ArrayD<f32> {
        while data.ndim() > 3 && data.shape()[data.ndim() - 1] == 1 {
            let last = Axis(data.ndim() - 1);
            data = data.index_axis_move(last, 0);
        }
        data
    }
}
