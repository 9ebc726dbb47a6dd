use std::path::Path;

use log::{debug, warn};
use slidenorm_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit RGB.
///
/// The method reads any image format supported by the image crate and converts the pixels to
/// three 8-bit channels: grayscale is replicated, alpha is dropped and deeper samples are
/// rescaled to 8 bits.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB8 image containing the image data.
///
/// # Errors
///
/// Returns [`IoError::FileDoesNotExist`] if the path does not exist and
/// [`IoError::ImageDecodeError`] if the file is not a readable image.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()
        .map_err(IoError::ImageDecodeError)?;

    let color = img.color();
    if color.has_alpha() {
        warn!("{}: dropping alpha channel of {color:?} image", file_path.display());
    }
    if color.bytes_per_pixel() / color.channel_count() > 1 {
        warn!("{}: converting {color:?} samples to 8 bits", file_path.display());
    }

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };
    debug!("read {} ({size}, {color:?})", file_path.display());

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Writes an RGB8 image to the given file path.
///
/// The encoder is chosen from the file extension by the image crate.
///
/// # Arguments
///
/// * `file_path` - The destination path.
/// * `image` - The image to write.
///
/// # Errors
///
/// Returns [`IoError::FileError`] if the file cannot be created and
/// [`IoError::ImageEncodeError`] if the extension is not a supported format.
pub fn write_image_any_rgb8(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    image::save_buffer(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|e| match e {
        image::ImageError::IoError(e) => IoError::FileError(e),
        e => IoError::ImageEncodeError(e),
    })?;

    debug!("wrote {} ({})", file_path.display(), image.size());

    Ok(())
}
