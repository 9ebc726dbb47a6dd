use slidenorm_image::{Image, ImageDtype};

/// Interpolation mode for the resize operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
) -> [f32; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let iu0 = (u.trunc() as usize).min(cols - 1);
    let iv0 = (v.trunc() as usize).min(rows - 1);
    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let frac_u = u.fract();
    let frac_v = v.fract();

    let w00 = (1.0 - frac_u) * (1.0 - frac_v);
    let w01 = frac_u * (1.0 - frac_v);
    let w10 = (1.0 - frac_u) * frac_v;
    let w11 = frac_u * frac_v;

    let data = image.as_slice();
    let p00 = &data[(iv0 * cols + iu0) * C..][..C];
    let p01 = &data[(iv0 * cols + iu1) * C..][..C];
    let p10 = &data[(iv1 * cols + iu0) * C..][..C];
    let p11 = &data[(iv1 * cols + iu1) * C..][..C];

    let mut pixel = [0.0; C];
    for (k, p) in pixel.iter_mut().enumerate() {
        let (a, b, c, d): (f32, f32, f32, f32) =
            (p00[k].into(), p01[k].into(), p10[k].into(), p11[k].into());
        *p = a * w00 + b * w01 + c * w10 + d * w11;
    }

    pixel
}

/// Kernel for nearest neighbor interpolation
pub(crate) fn nearest_neighbor_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
) -> [f32; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let iu = (u.round() as usize).min(cols - 1);
    let iv = (v.round() as usize).min(rows - 1);

    let base = (iv * cols + iu) * C;
    let mut pixel = [0.0; C];
    for (k, p) in pixel.iter_mut().enumerate() {
        *p = image.as_slice()[base + k].into();
    }

    pixel
}

/// Interpolate the pixel at the given sub-pixel location.
pub(crate) fn interpolate_pixel<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
) -> [f32; C] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidenorm_image::{ImageError, ImageSize};

    #[test]
    fn test_bilinear_center() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0, 1.0, 2.0, 3.0],
        )?;

        assert_eq!(bilinear_interpolation(&image, 0.5, 0.5), [1.5]);
        assert_eq!(bilinear_interpolation(&image, 1.0, 1.0), [3.0]);

        Ok(())
    }

    #[test]
    fn test_nearest() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![10, 11, 20, 21],
        )?;

        assert_eq!(nearest_neighbor_interpolation(&image, 0.2, 0.0), [10.0, 11.0]);
        assert_eq!(nearest_neighbor_interpolation(&image, 0.7, 0.0), [20.0, 21.0]);

        Ok(())
    }
}
