use crate::parallel;
use slidenorm_image::{Image, ImageDtype, ImageError};

/// D65 reference white.
const D65_X: f32 = 0.950_456;
const D65_Z: f32 = 1.088_754;

/// Linear sRGB to XYZ (D65).
const SRGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412_453, 0.357_580, 0.180_423],
    [0.212_671, 0.715_160, 0.072_169],
    [0.019_334, 0.119_193, 0.950_227],
];

/// XYZ (D65) to linear sRGB.
const XYZ_TO_SRGB: [[f32; 3]; 3] = [
    [3.240_479, -1.537_150, -0.498_535],
    [-0.969_256, 1.875_992, 0.041_556],
    [0.055_648, -0.204_043, 1.057_311],
];

// CIE constants for the piecewise cube root.
const DELTA: f32 = 6.0 / 29.0;
const DELTA_CUBE: f32 = DELTA * DELTA * DELTA;
const LINEAR_SLOPE: f32 = 1.0 / (3.0 * DELTA * DELTA);
const LINEAR_OFFSET: f32 = 4.0 / 29.0;

// 8-bit packing: L in [0, 100] maps to [0, 255], a and b are offset by 128.
const L_TO_U8: f32 = 255.0 / 100.0;
const U8_TO_L: f32 = 100.0 / 255.0;
const AB_OFFSET: f32 = 128.0;

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > DELTA_CUBE {
        t.cbrt()
    } else {
        t * LINEAR_SLOPE + LINEAR_OFFSET
    }
}

#[inline]
fn lab_f_inv(t: f32) -> f32 {
    if t > DELTA {
        t * t * t
    } else {
        (t - LINEAR_OFFSET) / LINEAR_SLOPE
    }
}

#[inline]
fn mat_mul(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Convert one sRGB pixel in [0, 1] to L*a*b*.
#[inline]
fn rgb_to_lab_pixel(rgb: [f32; 3]) -> [f32; 3] {
    let linear = [
        srgb_to_linear(rgb[0]),
        srgb_to_linear(rgb[1]),
        srgb_to_linear(rgb[2]),
    ];
    let [x, y, z] = mat_mul(&SRGB_TO_XYZ, linear);

    let fx = lab_f(x / D65_X);
    let fy = lab_f(y);
    let fz = lab_f(z / D65_Z);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Convert one L*a*b* pixel to sRGB clamped to [0, 1].
#[inline]
fn lab_to_rgb_pixel(lab: [f32; 3]) -> [f32; 3] {
    let fy = (lab[0] + 16.0) / 116.0;
    let fx = fy + lab[1] / 500.0;
    let fz = fy - lab[2] / 200.0;

    let xyz = [lab_f_inv(fx) * D65_X, lab_f_inv(fy), lab_f_inv(fz) * D65_Z];
    let [r, g, b] = mat_mul(&XYZ_TO_SRGB, xyz);

    [
        linear_to_srgb(r.clamp(0.0, 1.0)),
        linear_to_srgb(g.clamp(0.0, 1.0)),
        linear_to_srgb(b.clamp(0.0, 1.0)),
    ]
}

fn check_same_size<T, U>(src: &Image<T, 3>, dst: &Image<U, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

/// Convert an sRGB image to the CIE L*a*b* color space.
///
/// The input values are expected in the range [0, 1]. The output lightness is in the range
/// [0, 100] and the chroma components roughly in [-128, 127]. The D65 white point is used.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output Lab image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use slidenorm_image::{Image, ImageSize};
/// use slidenorm_imgproc::color::lab_from_rgb;
///
/// let rgb = Image::<f32, 3>::new(ImageSize { width: 1, height: 1 }, vec![1.0, 1.0, 1.0]).unwrap();
/// let mut lab = Image::<f32, 3>::from_size_val(rgb.size(), 0.0).unwrap();
///
/// lab_from_rgb(&rgb, &mut lab).unwrap();
/// assert!((lab.as_slice()[0] - 100.0).abs() < 1e-2);
/// ```
pub fn lab_from_rgb(src: &Image<f32, 3>, dst: &mut Image<f32, 3>) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let lab = rgb_to_lab_pixel([src_pixel[0], src_pixel[1], src_pixel[2]]);
        dst_pixel.copy_from_slice(&lab);
    });

    Ok(())
}

/// Convert a CIE L*a*b* image back to sRGB.
///
/// The output values are clamped to the range [0, 1].
///
/// # Arguments
///
/// * `src` - The input Lab image.
/// * `dst` - The output RGB image.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_lab(src: &Image<f32, 3>, dst: &mut Image<f32, 3>) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let rgb = lab_to_rgb_pixel([src_pixel[0], src_pixel[1], src_pixel[2]]);
        dst_pixel.copy_from_slice(&rgb);
    });

    Ok(())
}

/// Convert an RGB8 image to an 8-bit packed L*a*b* image.
///
/// The packing follows the usual convention for 8-bit Lab buffers:
///
/// L8 = L * 255 / 100, a8 = a + 128, b8 = b + 128
///
/// # Arguments
///
/// * `src` - The input RGB8 image.
/// * `dst` - The output Lab8 image.
///
/// # Example
///
/// ```
/// use slidenorm_image::{Image, ImageSize};
/// use slidenorm_imgproc::color::lab8_from_rgb8;
///
/// let rgb = Image::<u8, 3>::new(ImageSize { width: 2, height: 1 }, vec![0, 0, 0, 255, 255, 255]).unwrap();
/// let mut lab = Image::<u8, 3>::from_size_val(rgb.size(), 0).unwrap();
///
/// lab8_from_rgb8(&rgb, &mut lab).unwrap();
/// assert_eq!(lab.as_slice(), &[0, 128, 128, 255, 128, 128]);
/// ```
pub fn lab8_from_rgb8(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let [l, a, b] = rgb_to_lab_pixel([
            src_pixel[0] as f32 / 255.0,
            src_pixel[1] as f32 / 255.0,
            src_pixel[2] as f32 / 255.0,
        ]);
        dst_pixel[0] = u8::from_f32(l * L_TO_U8);
        dst_pixel[1] = u8::from_f32(a + AB_OFFSET);
        dst_pixel[2] = u8::from_f32(b + AB_OFFSET);
    });

    Ok(())
}

/// Convert an 8-bit packed L*a*b* image back to RGB8.
///
/// This is the inverse of [`lab8_from_rgb8`].
pub fn rgb8_from_lab8(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let rgb = lab_to_rgb_pixel([
            src_pixel[0] as f32 * U8_TO_L,
            src_pixel[1] as f32 - AB_OFFSET,
            src_pixel[2] as f32 - AB_OFFSET,
        ]);
        for (out, v) in dst_pixel.iter_mut().zip(rgb) {
            *out = u8::from_f32(v * 255.0);
        }
    });

    Ok(())
}
