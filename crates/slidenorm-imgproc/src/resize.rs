use crate::interpolation::{interpolate_pixel, InterpolationMode};
use crate::parallel;
use slidenorm_image::{Image, ImageDtype, ImageError};

/// Sample positions of `dst_len` points evenly spread over `[0, src_len - 1]`.
fn linspace(src_len: usize, dst_len: usize) -> Vec<f32> {
    let step = if dst_len > 1 {
        (src_len - 1) as f32 / (dst_len - 1) as f32
    } else {
        0.0
    };
    (0..dst_len).map(|i| i as f32 * step).collect()
}

/// Resize an image to a new size.
///
/// The function resizes an image to the size of `dst` using the specified interpolation mode.
/// It supports any number of channels and data types.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns an error if the source image is empty while the destination is not.
///
/// # Example
///
/// ```
/// use slidenorm_image::{Image, ImageSize};
/// use slidenorm_imgproc::interpolation::InterpolationMode;
/// use slidenorm_imgproc::resize::resize_native;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0).unwrap();
///
/// resize_native(&image, &mut image_resized, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_native<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    if dst.width() == 0 || dst.height() == 0 {
        return Ok(());
    }

    if src.width() == 0 || src.height() == 0 {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let xs = linspace(src.width(), dst.width());
    let ys = linspace(src.height(), dst.height());

    parallel::par_iter_rows_mut(dst, |y, row| {
        let v = ys[y];
        for (out, &u) in row.chunks_exact_mut(C).zip(&xs) {
            let pixel = interpolate_pixel(src, u, v, interpolation);
            for (o, p) in out.iter_mut().zip(pixel) {
                *o = T::from_f32(p);
            }
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidenorm_image::ImageSize;

    #[test]
    fn resize_smoke_ch3() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![7u8; 4 * 5 * 3],
        )?;

        let mut resized = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            0,
        )?;

        resize_native(&image, &mut resized, InterpolationMode::Bilinear)?;

        assert_eq!(resized.size().width, 2);
        assert_eq!(resized.size().height, 3);
        assert!(resized.as_slice().iter().all(|&v| v == 7));

        Ok(())
    }

    #[test]
    fn resize_upscale_bilinear() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![0.0, 2.0],
        )?;

        let mut resized = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 1,
            },
            0.0,
        )?;

        resize_native(&image, &mut resized, InterpolationMode::Bilinear)?;
        assert_eq!(resized.as_slice(), &[0.0, 1.0, 2.0]);

        Ok(())
    }

    #[test]
    fn resize_empty_source() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([0, 0].into(), vec![])?;
        let mut resized = Image::<u8, 1>::from_size_val([2, 2].into(), 0)?;

        assert_eq!(
            resize_native(&image, &mut resized, InterpolationMode::Nearest),
            Err(ImageError::InvalidImageSize(0, 0, 2, 2))
        );

        Ok(())
    }
}
