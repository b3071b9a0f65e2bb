//! Weighted median cut over an RGB histogram.

use crate::color::Rgb;

/// A box of histogram entries for median cut subdivision.
#[derive(Debug, Clone)]
struct ColorBox {
    entries: Vec<(Rgb, u64)>,
}

impl ColorBox {
    fn new(entries: Vec<(Rgb, u64)>) -> Self {
        Self { entries }
    }

    fn total_weight(&self) -> u64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Channel ranges `(max - min)` as `[r, g, b]`.
    fn ranges(&self) -> [u8; 3] {
        let mut lo = [u8::MAX; 3];
        let mut hi = [u8::MIN; 3];
        for (color, _) in &self.entries {
            for (axis, v) in color.to_bytes().into_iter().enumerate() {
                lo[axis] = lo[axis].min(v);
                hi[axis] = hi[axis].max(v);
            }
        }
        [hi[0] - lo[0], hi[1] - lo[1], hi[2] - lo[2]]
    }

    /// Larger, more varied boxes split first.
    ///
    /// Ranges are offset by one so a box that is flat along one axis still
    /// ranks by its other two.
    fn priority(&self) -> u128 {
        let [r, g, b] = self.ranges();
        let volume = (r as u128 + 1) * (g as u128 + 1) * (b as u128 + 1);
        self.total_weight() as u128 * volume
    }

    /// Weighted centroid, rounded to the nearest 8-bit color.
    fn centroid(&self) -> Rgb {
        let mut sums = [0u64; 3];
        let mut total = 0u64;
        for (color, w) in &self.entries {
            for (axis, v) in color.to_bytes().into_iter().enumerate() {
                sums[axis] += v as u64 * w;
            }
            total += w;
        }
        if total == 0 {
            return Rgb::BLACK;
        }
        let avg = |s: u64| ((s + total / 2) / total).min(255) as u8;
        Rgb::new(avg(sums[0]), avg(sums[1]), avg(sums[2]))
    }

    /// Split along the widest channel at the weighted median.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let [rr, rg, rb] = self.ranges();
        let axis = if rr >= rg && rr >= rb {
            0
        } else if rg >= rb {
            1
        } else {
            2
        };

        // Secondary key on the full color keeps the order total.
        self.entries
            .sort_unstable_by_key(|(c, _)| (c.to_bytes()[axis], *c));

        let half_weight = self.total_weight().div_ceil(2);
        let mut accumulated = 0u64;
        let mut split_idx = 1;
        for (i, (_, w)) in self.entries.iter().enumerate() {
            accumulated += w;
            if accumulated >= half_weight && i + 1 < self.entries.len() {
                split_idx = i + 1;
                break;
            }
        }
        split_idx = split_idx.max(1).min(self.entries.len() - 1);

        let right = self.entries.split_off(split_idx);
        (ColorBox::new(self.entries), ColorBox::new(right))
    }
}

/// Reduce a histogram to at most `max_colors` representative colors.
///
/// Returns `(centroid, weight)` pairs sorted by descending weight, then by
/// color. If the histogram already has `max_colors` entries or fewer they
/// are returned as-is (in the same order), so no padding ever happens.
pub(crate) fn median_cut(histogram: Vec<(Rgb, u64)>, max_colors: usize) -> Vec<(Rgb, u64)> {
    if histogram.is_empty() || max_colors == 0 {
        return Vec::new();
    }

    let mut result: Vec<(Rgb, u64)> = if histogram.len() <= max_colors {
        histogram
    } else {
        let mut boxes = Vec::with_capacity(max_colors);
        boxes.push(ColorBox::new(histogram));

        while boxes.len() < max_colors {
            // First box with the highest priority; strict `>` keeps it stable.
            let mut best: Option<(usize, u128)> = None;
            for (i, b) in boxes.iter().enumerate() {
                if b.entries.len() < 2 {
                    continue;
                }
                let p = b.priority();
                if best.map_or(true, |(_, bp)| p > bp) {
                    best = Some((i, p));
                }
            }
            let Some((idx, _)) = best else {
                break;
            };

            let (left, right) = boxes.remove(idx).split();
            boxes.push(left);
            boxes.push(right);
        }

        boxes
            .iter()
            .map(|b| (b.centroid(), b.total_weight()))
            .collect()
    };

    result.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    result
}
