/// Number of intensity levels of an 8-bit image.
pub const NUM_LEVELS_U8: usize = 256;

/// Clip a histogram at `clip_limit` counts per bin and redistribute the excess.
///
/// The clipped counts are spread as a uniform batch over all bins, the remainder is then added
/// one count at a time with a fixed stride across the histogram. The total count is preserved.
///
/// # Example
///
/// ```
/// use slidenorm_imgproc::histogram::clip_histogram;
///
/// let mut hist = [0u32; 256];
/// hist[10] = 1000;
///
/// clip_histogram(&mut hist, 10);
/// assert_eq!(hist.iter().sum::<u32>(), 1000);
/// assert!(hist[10] <= 10 + 4);
/// ```
pub fn clip_histogram(hist: &mut [u32; NUM_LEVELS_U8], clip_limit: u32) {
    let mut clipped = 0usize;
    for bin in hist.iter_mut() {
        if *bin > clip_limit {
            clipped += (*bin - clip_limit) as usize;
            *bin = clip_limit;
        }
    }

    let redist_batch = clipped / NUM_LEVELS_U8;
    let mut residual = clipped - redist_batch * NUM_LEVELS_U8;

    for bin in hist.iter_mut() {
        *bin += redist_batch as u32;
    }

    if residual != 0 {
        let residual_step = (NUM_LEVELS_U8 / residual).max(1);
        let mut i = 0;
        while i < NUM_LEVELS_U8 && residual > 0 {
            hist[i] += 1;
            i += residual_step;
            residual -= 1;
        }
    }
}
