use std::path::Path;

use ndarray::Array3;

/// Write `data` as an uncompressed single-file NIfTI-1 image with float32
/// voxels. `data` is indexed `(x, y, z)`.
pub fn write_nifti(path: &Path, data: &Array3<f32>) {
    let (nx, ny, nz) = data.dim();
    let mut header = [0u8; 348];

    // sizeof_hdr
    header[0..4].copy_from_slice(&348i32.to_le_bytes());

    let dim: [i16; 8] = [3, nx as i16, ny as i16, nz as i16, 1, 1, 1, 1];
    for (i, d) in dim.iter().enumerate() {
        let offset = 40 + i * 2;
        header[offset..offset + 2].copy_from_slice(&d.to_le_bytes());
    }

    // datatype FLOAT32, bitpix 32
    header[70..72].copy_from_slice(&16i16.to_le_bytes());
    header[72..74].copy_from_slice(&32i16.to_le_bytes());

    let pixdim: [f32; 8] = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
    for (i, p) in pixdim.iter().enumerate() {
        let offset = 76 + i * 4;
        header[offset..offset + 4].copy_from_slice(&p.to_le_bytes());
    }

    // vox_offset, scl_slope, scl_inter
    header[108..112].copy_from_slice(&352.0f32.to_le_bytes());
    header[112..116].copy_from_slice(&1.0f32.to_le_bytes());
    header[116..120].copy_from_slice(&0.0f32.to_le_bytes());

    header[344..348].copy_from_slice(b"n+1\0");

    let mut bytes = Vec::with_capacity(352 + data.len() * 4);
    bytes.extend_from_slice(&header);
    // no extensions
    bytes.extend_from_slice(&[0u8; 4]);

    // voxel data is stored with x varying fastest
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                bytes.extend_from_slice(&data[[x, y, z]].to_le_bytes());
            }
        }
    }

    std::fs::write(path, bytes).expect("should have written the NIfTI fixture");
}

/// Volume whose voxel at `(x, y, z)` holds `x * 100 + y * 10 + z`
pub fn indexed_volume(shape: (usize, usize, usize)) -> Array3<f32> {
    Array3::from_shape_fn(shape, |(x, y, z)| (x * 100 + y * 10 + z) as f32)
}
