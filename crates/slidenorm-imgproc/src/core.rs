use slidenorm_image::{Image, ImageError};

use crate::parallel;

/// Concatenate two images horizontally.
///
/// The output image holds `left` in its first columns and `right` in the remaining ones.
///
/// # Arguments
///
/// * `left` - The image placed on the left side.
/// * `right` - The image placed on the right side.
/// * `dst` - The output image with the width of both inputs combined.
///
/// # Errors
///
/// Returns an error if the inputs differ in height or `dst` has the wrong size.
///
/// # Example
///
/// ```
/// use slidenorm_image::{Image, ImageSize};
/// use slidenorm_imgproc::core::hconcat;
///
/// let left = Image::<u8, 1>::new(ImageSize { width: 1, height: 2 }, vec![1, 2]).unwrap();
/// let right = Image::<u8, 1>::new(ImageSize { width: 2, height: 2 }, vec![3, 4, 5, 6]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 3, height: 2 }, 0).unwrap();
///
/// hconcat(&left, &right, &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[1, 3, 4, 2, 5, 6]);
/// ```
pub fn hconcat<T, const C: usize>(
    left: &Image<T, C>,
    right: &Image<T, C>,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if left.height() != right.height() {
        return Err(ImageError::InvalidImageSize(
            left.width(),
            left.height(),
            right.width(),
            right.height(),
        ));
    }

    if dst.width() != left.width() + right.width() || dst.height() != left.height() {
        return Err(ImageError::InvalidImageSize(
            left.width() + right.width(),
            left.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let left_stride = left.width() * C;
    let right_stride = right.width() * C;

    parallel::par_iter_rows_mut(dst, |y, row| {
        let (row_left, row_right) = row.split_at_mut(left_stride);
        row_left.copy_from_slice(&left.as_slice()[y * left_stride..(y + 1) * left_stride]);
        row_right.copy_from_slice(&right.as_slice()[y * right_stride..(y + 1) * right_stride]);
    });

    Ok(())
}
