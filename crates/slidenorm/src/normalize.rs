use std::path::Path;
use std::time::Instant;

use log::debug;

use crate::image::{Image, ImageError};
use crate::imgproc::{color, enhance};
use crate::io::{error::IoError, functional as F};

pub use crate::imgproc::enhance::ClaheParams;

/// An error type for the normalization pipeline.
#[derive(thiserror::Error, Debug)]
pub enum NormalizeError {
    /// Reading or writing the tile failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The image transformation failed.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// The input and output of a normalized tile.
pub struct Normalized {
    /// The tile as read from disk.
    pub original: Image<u8, 3>,
    /// The tile as written to disk.
    pub normalized: Image<u8, 3>,
}

/// Normalize the contrast of an RGB8 tile.
///
/// The tile is converted to 8-bit L*a*b*, the lightness channel is equalized with CLAHE and
/// the result is converted back to RGB8. The chroma channels are not touched, so the
/// correction does not shift the hue of the stains.
///
/// # Example
///
/// ```
/// use slidenorm::image::{Image, ImageSize};
/// use slidenorm::normalize::{normalize_rgb8, ClaheParams};
///
/// let tile = Image::<u8, 3>::from_size_val(ImageSize { width: 16, height: 8 }, 128).unwrap();
/// let normalized = normalize_rgb8(&tile, &ClaheParams::default()).unwrap();
///
/// assert_eq!(normalized.size(), tile.size());
/// ```
pub fn normalize_rgb8(src: &Image<u8, 3>, params: &ClaheParams) -> Result<Image<u8, 3>, ImageError> {
    let mut lab = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    color::lab8_from_rgb8(src, &mut lab)?;

    let mut lab_equalized = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    enhance::equalize_lightness(&lab, &mut lab_equalized, params)?;

    let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    color::rgb8_from_lab8(&lab_equalized, &mut dst)?;

    Ok(dst)
}

/// Read a tile, normalize its contrast and write the result.
///
/// # Arguments
///
/// * `input` - The tile to read.
/// * `output` - The destination of the normalized tile. The format follows its extension.
/// * `params` - The CLAHE parameters.
///
/// # Returns
///
/// Both the original and the normalized tile.
///
/// # Errors
///
/// Fails if the input is not a readable image or the output cannot be written. Nothing is
/// written when reading or transforming fails.
pub fn normalize_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    params: &ClaheParams,
) -> Result<Normalized, NormalizeError> {
    let tic = Instant::now();
    let original = F::read_image_any_rgb8(input)?;
    debug!("read tile in {:?}", tic.elapsed());

    let tic = Instant::now();
    let normalized = normalize_rgb8(&original, params)?;
    debug!("normalized tile in {:?}", tic.elapsed());

    let tic = Instant::now();
    F::write_image_any_rgb8(output, &normalized)?;
    debug!("wrote tile in {:?}", tic.elapsed());

    Ok(Normalized {
        original,
        normalized,
    })
}
