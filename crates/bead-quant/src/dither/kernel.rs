//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`: a neighbor offset and its share of the
/// quantization error as a numerator over `divisor`. `dy` is never negative,
/// so the kernel only reaches pixels that have not been processed yet.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries. `dx` is mirrored on reversed rows.
    pub entries: &'static [(i32, i32, u8)],

    /// Each neighbor receives `error * weight / divisor`.
    pub divisor: u8,

    /// Largest `dy` in `entries`; the error buffer needs `max_dy + 1` rows.
    pub max_dy: usize,
}

impl Kernel {
    /// Sum of weights; equals `divisor` for full propagation.
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|&(_, _, w)| w as u32).sum()
    }
}

/// Floyd-Steinberg kernel, 100% propagation.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};
