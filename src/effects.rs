//! Pixel effect kernels.
//!
//! Both kernels work on a tightly packed RGBA8 buffer covering one shape's
//! bounding box and leave the alpha channel alone.

use crate::shape::Effect;

const CHANNELS: usize = 4;

/// Edge length of a mosaic block for a given intensity
pub fn mosaic_block_size(intensity: u32) -> usize {
    intensity.max(2) as usize
}

/// Neighbourhood radius of the box blur for a given intensity
pub fn blur_radius(intensity: u32) -> usize {
    (intensity / 2).max(1) as usize
}

/// Run the kernel matching `effect` over `buf`
pub fn apply(effect: Effect, intensity: u32, buf: &mut [u8], width: usize, height: usize) {
    match effect {
        Effect::Mosaic => mosaic(buf, width, height, intensity),
        Effect::Blur => blur(buf, width, height, intensity),
    }
}

/// Pixelate by flooding each block with the colour of its top-left pixel.
///
/// Blocks are `max(2, block_size)` pixels square, laid out from the buffer
/// origin; the last row and column may be partial. Each block samples its own
/// origin before writing it, so the sample is always the pre-effect value.
pub fn mosaic(buf: &mut [u8], width: usize, height: usize, block_size: u32) {
    debug_assert_eq!(buf.len(), width * height * CHANNELS);
    let size = mosaic_block_size(block_size);

    for by in (0..height).step_by(size) {
        for bx in (0..width).step_by(size) {
            let origin = (by * width + bx) * CHANNELS;
            let rgb = [buf[origin], buf[origin + 1], buf[origin + 2]];

            for y in by..(by + size).min(height) {
                for x in bx..(bx + size).min(width) {
                    let idx = (y * width + x) * CHANNELS;
                    buf[idx..idx + 3].copy_from_slice(&rgb);
                }
            }
        }
    }
}

/// Unweighted box blur with clamp-to-edge sampling.
///
/// Every output pixel is the mean of the `(2r+1)²` square around it, where
/// `r = max(1, intensity / 2)` and out-of-range neighbours reuse the nearest
/// edge pixel. Means are read from a snapshot of the input and rounded half
/// to even. The square sum is computed as two clamped 1-D passes, which
/// yields the same integer sums as visiting every neighbour.
///
/// Row sums fit in `u64` and square sums in `u128` for any `u32` intensity.
pub fn blur(buf: &mut [u8], width: usize, height: usize, intensity: u32) {
    debug_assert_eq!(buf.len(), width * height * CHANNELS);
    if width == 0 || height == 0 {
        return;
    }
    let radius = blur_radius(intensity);
    let span = 2 * radius as u128 + 1;
    let count = span * span;
    let r = radius as isize;

    // Horizontal clamped window sums, per RGB channel
    let mut rows = vec![[0u64; 3]; width * height];
    for y in 0..height {
        let row = &buf[y * width * CHANNELS..(y + 1) * width * CHANNELS];
        let sample = |x: isize| -> [u128; 3] {
            let x = x.clamp(0, width as isize - 1) as usize * CHANNELS;
            [row[x] as u128, row[x + 1] as u128, row[x + 2] as u128]
        };
        let mut sums = clamped_window(width, radius, |x| sample(x as isize));
        for x in 0..width {
            rows[y * width + x] = sums.map(|s| s as u64);
            let xi = x as isize;
            let incoming = sample(xi + r + 1);
            let outgoing = sample(xi - r);
            for c in 0..3 {
                sums[c] = sums[c] + incoming[c] - outgoing[c];
            }
        }
    }

    // Vertical clamped window over the row sums, then write back
    let column = |x: usize, y: isize| -> [u128; 3] {
        let y = y.clamp(0, height as isize - 1) as usize;
        rows[y * width + x].map(u128::from)
    };
    for x in 0..width {
        let mut sums = clamped_window(height, radius, |y| column(x, y as isize));
        for y in 0..height {
            let idx = (y * width + x) * CHANNELS;
            for c in 0..3 {
                buf[idx + c] = rounded_mean(sums[c], count);
            }
            let yi = y as isize;
            let incoming = column(x, yi + r + 1);
            let outgoing = column(x, yi - r);
            for c in 0..3 {
                sums[c] = sums[c] + incoming[c] - outgoing[c];
            }
        }
    }
}

/// Sum of `at(clamp(k))` for `k` in `-radius..=radius` over `len` samples.
///
/// The clamped tails are counted instead of walked, so the cost is bounded by
/// `len` rather than by the radius.
fn clamped_window(len: usize, radius: usize, at: impl Fn(usize) -> [u128; 3]) -> [u128; 3] {
    let last = len - 1;
    let head = at(0);
    let tail = at(last);
    let overhang = radius.saturating_sub(last) as u128;
    let mut sums = [0u128; 3];
    for c in 0..3 {
        sums[c] = radius as u128 * head[c] + overhang * tail[c];
    }
    for i in 0..=radius.min(last) {
        let v = at(i);
        for c in 0..3 {
            sums[c] += v[c];
        }
    }
    sums
}

/// `sum / count` rounded half to even, the way a clamped byte store rounds
fn rounded_mean(sum: u128, count: u128) -> u8 {
    let quotient = sum / count;
    let twice_rem = 2 * (sum % count);
    let rounded = if twice_rem > count || (twice_rem == count && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded.min(255) as u8
}
