//! # NIfTI-slice
//!
//! A small HTTP service that renders 2D cross-sections of a NIfTI volume
//! as grayscale PNG images.
//!
//! The volume is read from a single file fixed at startup and re-read on
//! every request. It can be sliced in the three anatomical planes:
//!  - Axial (fixes the third volume axis)
//!  - Sagittal (fixes the first volume axis)
//!  - Coronal (fixes the second volume axis)
//!
//! Slices are rotated 90° counter-clockwise for display, windowed between
//! their minimum and maximum intensity and encoded as 8-bit PNG with one
//! pixel per voxel.
//!
//! # HTTP API
//!
//! `GET /slice?index=<int>&view=<axial|sagittal|coronal>`, where `index`
//! defaults to `100` and `view` to `axial`. Responds with `image/png` on
//! success, `400` for an unknown view, a non-integer index or an index
//! outside the volume, and `500` when the volume can not be loaded or
//! rendered.
//!
//! # Examples
//!
//! ## Rendering a slice without the HTTP layer
//!
//! ```no_run
//! # use nifti_slice::{enums::View, volume::Volume, volume_loader::VolumeLoader};
//! let volume = VolumeLoader::load_from_file("brain.nii.gz")
//!     .expect("should have loaded the volume");
//! let image = volume
//!     .get_image_from_axis(volume.axis_len(View::Sagittal) / 2, View::Sagittal)
//!     .expect("should have returned image at center of volume");
//! let png = Volume::encode_png(&image).expect("should have encoded the image");
//! std::fs::write("result.png", png).expect("should have written the image");
//! ```
//!
//! ## Serving a volume
//!
//! ```no_run
//! # use nifti_slice::service::{router, ServiceConfig};
//! # async fn serve() -> std::io::Result<()> {
//! let app = router(ServiceConfig {
//!     volume_path: "brain.nii.gz".into(),
//!     debug: false,
//! });
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

pub mod config;
pub mod enums;
pub mod service;
pub mod volume;
pub mod volume_loader;
