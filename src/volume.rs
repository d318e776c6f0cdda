use crate::enums::View;

use image::ImageBuffer;
use image::ImageFormat;
use image::Luma;
use ndarray::Array3;
use ndarray::ArrayView2;
use ndarray::Axis;
use rayon::prelude::*;
use std::io::Cursor;
use thiserror::Error;

pub type GrayImage = ImageBuffer<Luma<u8>, Vec<u8>>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Index {index} is out of bounds for axis of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Slice has no pixels")]
    EmptySlice,

    #[error("Pixel buffer does not match slice dimensions")]
    InvalidBuffer,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Volume {
    pub data: Array3<f32>,
}

impl Volume {
    pub fn new(data: Array3<f32>) -> Self {
        Self { data }
    }

    /// Get the dimensions of the volume (x, y, z)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    /// Number of slices available in the given view
    pub fn axis_len(&self, view: View) -> usize {
        self.data.len_of(view.axis())
    }

    pub fn is_valid_index(&self, index: usize, view: View) -> bool {
        index < self.axis_len(view)
    }

    /// Cross-section at `index` along the axis fixed by `view`, with the two
    /// remaining axes kept in volume order. `None` when `index` is out of
    /// bounds.
    pub fn get_slice_from_axis(&self, index: usize, view: View) -> Option<ArrayView2<'_, f32>> {
        if !self.is_valid_index(index, view) {
            return None;
        }
        Some(self.data.index_axis(view.axis(), index))
    }

    /// Rotate a slice by 90° counter-clockwise.
    ///
    /// A slice of shape `(rows, cols)` becomes `(cols, rows)` with
    /// `out[i][j] == slice[j][cols - 1 - i]`. No data is copied.
    pub fn rotate_ccw(slice: ArrayView2<'_, f32>) -> ArrayView2<'_, f32> {
        let mut rotated = slice.reversed_axes();
        rotated.invert_axis(Axis(0));
        rotated
    }

    /// Min and max over the finite values of the slice, widened to `f64` so
    /// the span of extreme `f32` values can not overflow
    fn intensity_window(slice: &ArrayView2<'_, f32>) -> (f64, f64) {
        slice
            .iter()
            .filter(|v| v.is_finite())
            .map(|&v| f64::from(v))
            .fold(None, |window, v| match window {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
            .unwrap_or((0.0, 0.0))
    }

    #[inline]
    fn normalize_to_u8(value: f32, min: f64, scale: f64) -> u8 {
        if !value.is_finite() {
            return 0;
        }
        ((f64::from(value) - min) * scale).round().clamp(0.0, 255.0) as u8
    }

    /// Rasterise a slice to 8-bit grayscale, one pixel per element.
    ///
    /// Intensities are windowed linearly between the slice's minimum (black)
    /// and maximum (white). Row 0 of the slice is the top row of the image.
    pub fn slice_to_image(slice: &ArrayView2<'_, f32>) -> Result<GrayImage, RenderError> {
        let (height, width) = slice.dim();
        if height == 0 || width == 0 {
            return Err(RenderError::EmptySlice);
        }

        let (min, max) = Self::intensity_window(slice);
        let scale = if max > min { 255.0 / (max - min) } else { 0.0 };

        let pixel_data: Vec<u8> = slice
            .axis_iter(Axis(0))
            .into_par_iter()
            .flat_map(|row| {
                row.iter()
                    .map(|&v| Self::normalize_to_u8(v, min, scale))
                    .collect::<Vec<u8>>()
            })
            .collect();

        ImageBuffer::from_raw(width as u32, height as u32, pixel_data)
            .ok_or(RenderError::InvalidBuffer)
    }

    /// Slice, rotate for display and rasterise in one go
    pub fn get_image_from_axis(&self, index: usize, view: View) -> Result<GrayImage, RenderError> {
        let slice = self
            .get_slice_from_axis(index, view)
            .ok_or(RenderError::IndexOutOfBounds {
                index,
                len: self.axis_len(view),
            })?;
        Self::slice_to_image(&Self::rotate_ccw(slice))
    }

    /// Encode a grayscale image as PNG into memory
    pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}
