use log::debug;
use rayon::prelude::*;
use slidenorm_image::{Image, ImageDtype, ImageError};

use crate::histogram::{clip_histogram, NUM_LEVELS_U8};
use crate::parallel;

/// Parameters of the contrast limited adaptive histogram equalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaheParams {
    /// Contrast amplification bound, relative to a uniform histogram. Zero or negative disables
    /// the clipping and the filter degrades to plain adaptive histogram equalization.
    pub clip_limit: f32,
    /// Number of tiles along the (x, y) axes.
    pub grid_size: (usize, usize),
}

impl Default for ClaheParams {
    fn default() -> Self {
        Self {
            clip_limit: 2.0,
            grid_size: (8, 8),
        }
    }
}

/// Mirror an index into `[0, len)` without repeating the border pixel (reflect-101).
#[inline]
fn reflect_101(mut p: usize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len - 1;
    loop {
        if p <= last {
            return p;
        }
        // fold back across the last pixel
        let over = p - last;
        if over <= last {
            return last - over;
        }
        p = over - last;
    }
}

/// Compute the equalization lookup table of one tile.
fn tile_lut(
    data: &[u8],
    width: usize,
    height: usize,
    tile_origin: (usize, usize),
    tile_size: (usize, usize),
    clip_limit: Option<u32>,
    lut_scale: f32,
) -> [u8; NUM_LEVELS_U8] {
    let mut hist = [0u32; NUM_LEVELS_U8];
    for yy in tile_origin.1..tile_origin.1 + tile_size.1 {
        let sy = reflect_101(yy, height);
        let row = &data[sy * width..(sy + 1) * width];
        for xx in tile_origin.0..tile_origin.0 + tile_size.0 {
            hist[row[reflect_101(xx, width)] as usize] += 1;
        }
    }

    if let Some(limit) = clip_limit {
        clip_histogram(&mut hist, limit);
    }

    let mut lut = [0u8; NUM_LEVELS_U8];
    let mut sum = 0u32;
    for (l, h) in lut.iter_mut().zip(hist) {
        sum += h;
        *l = u8::from_f32(sum as f32 * lut_scale);
    }
    lut
}

/// Size of one tile of the grid.
///
/// If either dimension does not divide evenly, both axes are padded with a mirrored border
/// and every tile grows by one pixel along each axis, even the evenly divisible one.
fn grid_tile_size(width: usize, height: usize, grid: (usize, usize)) -> (usize, usize) {
    let (tiles_x, tiles_y) = grid;
    if width % tiles_x == 0 && height % tiles_y == 0 {
        (width / tiles_x, height / tiles_y)
    } else {
        (width / tiles_x + 1, height / tiles_y + 1)
    }
}

/// Interpolation anchors along one axis: the two neighbouring tiles and the weight of the
/// second one.
fn axis_anchors(len: usize, tile_len: usize, num_tiles: usize) -> Vec<(usize, usize, f32)> {
    let inv_tile = 1.0 / tile_len as f32;
    (0..len)
        .map(|p| {
            let pf = p as f32 * inv_tile - 0.5;
            let t1 = pf.floor();
            let alpha = pf - t1;
            let t1 = t1 as isize;
            let t2 = (t1 + 1).min(num_tiles as isize - 1) as usize;
            (t1.max(0) as usize, t2, alpha)
        })
        .collect()
}

/// Apply contrast limited adaptive histogram equalization (CLAHE) to a grayscale image.
///
/// The image is divided into `grid_size` tiles. Each tile gets its own equalization lookup
/// table from its clipped histogram, and every output pixel blends the tables of the four
/// nearest tile centers bilinearly. When the image size is not a multiple of the grid, the
/// tiles are gathered from a mirrored border.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output grayscale image.
/// * `params` - The clip limit and tile grid.
///
/// # Errors
///
/// Returns an error if the images differ in size or the tile grid has a zero dimension.
///
/// # Example
///
/// ```
/// use slidenorm_image::{Image, ImageSize};
/// use slidenorm_imgproc::enhance::{clahe, ClaheParams};
///
/// let src = Image::<u8, 1>::from_size_val(ImageSize { width: 16, height: 16 }, 100).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// clahe(&src, &mut dst, &ClaheParams { clip_limit: 2.0, grid_size: (2, 2) }).unwrap();
/// assert!(dst.as_slice().iter().all(|&v| v == dst.as_slice()[0]));
/// ```
pub fn clahe(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    params: &ClaheParams,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let (width, height) = (src.width(), src.height());
    let (tiles_x, tiles_y) = params.grid_size;

    if tiles_x == 0 || tiles_y == 0 {
        return Err(ImageError::InvalidTileGrid(tiles_x, tiles_y, width, height));
    }

    if width == 0 || height == 0 {
        return Ok(());
    }

    let tile_size = grid_tile_size(width, height, params.grid_size);
    let tile_area = tile_size.0 * tile_size.1;
    let lut_scale = (NUM_LEVELS_U8 - 1) as f32 / tile_area as f32;

    let clip_limit = if params.clip_limit > 0.0 {
        let limit = (params.clip_limit * tile_area as f32 / NUM_LEVELS_U8 as f32) as u32;
        Some(limit.max(1))
    } else {
        None
    };

    debug!(
        "clahe: {width}x{height} image, {tiles_x}x{tiles_y} tiles of {}x{}, clip {clip_limit:?}",
        tile_size.0, tile_size.1
    );

    let data = src.as_slice();
    let luts = (0..tiles_x * tiles_y)
        .into_par_iter()
        .map(|idx| {
            let origin = ((idx % tiles_x) * tile_size.0, (idx / tiles_x) * tile_size.1);
            tile_lut(data, width, height, origin, tile_size, clip_limit, lut_scale)
        })
        .collect::<Vec<_>>();

    let x_anchors = axis_anchors(width, tile_size.0, tiles_x);
    let y_anchors = axis_anchors(height, tile_size.1, tiles_y);

    parallel::par_iter_rows_mut(dst, |y, row| {
        let (ty1, ty2, ya) = y_anchors[y];
        let src_row = &data[y * width..(y + 1) * width];
        let top = &luts[ty1 * tiles_x..(ty1 + 1) * tiles_x];
        let bottom = &luts[ty2 * tiles_x..(ty2 + 1) * tiles_x];

        for ((out, &p), &(tx1, tx2, xa)) in row.iter_mut().zip(src_row).zip(&x_anchors) {
            let p = p as usize;
            let t = top[tx1][p] as f32 * (1.0 - xa) + top[tx2][p] as f32 * xa;
            let b = bottom[tx1][p] as f32 * (1.0 - xa) + bottom[tx2][p] as f32 * xa;
            *out = u8::from_f32(t * (1.0 - ya) + b * ya);
        }
    });

    Ok(())
}

/// Equalize the lightness of an 8-bit packed L*a*b* image with CLAHE.
///
/// Only the first channel is equalized; the two chroma channels are copied through
/// unmodified so the hue of every pixel is preserved.
///
/// # Arguments
///
/// * `src` - The input Lab8 image.
/// * `dst` - The output Lab8 image.
/// * `params` - The clip limit and tile grid.
pub fn equalize_lightness(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    params: &ClaheParams,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let mut planes = src.split_channels()?;
    let mut lightness = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    clahe(&planes[0], &mut lightness, params)?;
    planes[0] = lightness;

    *dst = Image::from_channels(&planes)?;

    Ok(())
}
