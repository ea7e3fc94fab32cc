//! Dictionary metadata and packed marker codes.

/// A fixed AprilTag-style dictionary.
#[derive(Clone, Copy, Debug)]
pub struct Dictionary {
    pub name: &'static str,
    /// Number of payload bits per side.
    pub marker_size: usize,
    /// Largest Hamming distance that still decodes unambiguously.
    pub max_correction_bits: u8,
    /// Published codes, one per tag id: payload bit `i` is code bit
    /// `bit_count - 1 - i`, and a set bit is a white cell.
    pub codes: &'static [u64],
    /// Grid column of payload bit `i`, counted from the outer border cell (0).
    pub bit_x: &'static [u8],
    /// Grid row of payload bit `i`.
    pub bit_y: &'static [u8],
}

impl Dictionary {
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.marker_size * self.marker_size
    }

    /// Published code of tag `id`, if the dictionary has it.
    #[inline]
    pub fn code(&self, id: u32) -> Option<u64> {
        self.codes.get(id as usize).copied()
    }

    /// Code of tag `id` re-packed the way cells are read off an image:
    /// row-major over the payload (`idx = y * marker_size + x`), black = 1.
    pub fn grid_code(&self, id: u32) -> Option<u64> {
        self.code(id).map(|code| self.to_grid(code))
    }

    fn to_grid(&self, code: u64) -> u64 {
        let n = self.marker_size;
        let bits = self.bit_count();
        let mut grid = 0u64;
        for (i, (&x, &y)) in self.bit_x.iter().zip(self.bit_y).enumerate() {
            let white = (code >> (bits - 1 - i)) & 1 == 1;
            if !white {
                let idx = (y as usize - 1) * n + (x as usize - 1);
                grid |= 1u64 << idx;
            }
        }
        grid
    }

    /// Side of the full tag in cells: payload plus a one-cell black border.
    #[inline]
    pub fn grid_cells(&self) -> usize {
        self.marker_size + 2
    }
}
