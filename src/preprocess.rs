//! Frame loading and conversion into the network's input tensor.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage, ImageReader, Pixel};
use tract_onnx::prelude::tract_ndarray::Array4;

use crate::{Error, Result, INPUT_SIZE};

/// Read an image from disk and convert it into a `[1, 3, 224, 224]` tensor.
pub fn load_image(path: impl AsRef<Path>) -> Result<Array4<f32>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::ImageNotFound(path.to_path_buf()));
    }

    // format comes from the file contents, frame dumps often have no extension
    let img = ImageReader::open(path)
        .map_err(|e| Error::io(path, e))?
        .with_guessed_format()
        .map_err(|e| Error::io(path, e))?
        .decode()?;

    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "decoded frame"
    );

    Ok(image_to_tensor(&img))
}

/// Resize to the fixed input resolution and lay the pixels out channels first.
///
/// Aspect ratio is not preserved and channel values stay in `0.0..=255.0`.
pub fn image_to_tensor(img: &DynamicImage) -> Array4<f32> {
    let rgb = img.to_rgb8();
    let resized = image::imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

    let side = INPUT_SIZE as usize;
    let mut tensor = Array4::<f32>::zeros((1, 3, side, side));

    for (x, y, pixel) in resized.enumerate_pixels() {
        for (c, &v) in pixel.channels().iter().enumerate() {
            tensor[[0, c, y as usize, x as usize]] = v as f32;
        }
    }

    tensor
}
