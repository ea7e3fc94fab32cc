//! Rotation-aware Hamming matching against a dictionary.

use crate::Dictionary;

/// Best dictionary entry for an observed payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub id: u32,
    /// Quarter turns such that `observed == rotate_code(dict_code, rotation)`.
    pub rotation: u8,
    pub hamming: u8,
}

/// Brute-force matcher over all ids and the four rotations of each code.
#[derive(Clone, Debug)]
pub struct Matcher {
    dict: Dictionary,
    max_hamming: u8,
    rotated: Vec<[u64; 4]>,
}

impl Matcher {
    /// Returns `None` when the payload does not fit in 64 bits, the bit
    /// layout does not cover the payload, or `max_hamming` exceeds the
    /// dictionary's `max_correction_bits`.
    pub fn new(dict: Dictionary, max_hamming: u8) -> Option<Self> {
        let bits = dict.bit_count();
        if bits > 64 || dict.bit_x.len() != bits || dict.bit_y.len() != bits {
            return None;
        }
        if max_hamming > dict.max_correction_bits {
            return None;
        }

        let n = dict.marker_size;
        let rotated = (0..dict.codes.len() as u32)
            .filter_map(|id| dict.grid_code(id))
            .map(|base| {
                [
                    base,
                    rotate_code(base, n, 1),
                    rotate_code(base, n, 2),
                    rotate_code(base, n, 3),
                ]
            })
            .collect();

        Some(Self {
            dict,
            max_hamming,
            rotated,
        })
    }

    #[inline]
    pub fn dictionary(&self) -> Dictionary {
        self.dict
    }

    /// Lowest-distance match within `max_hamming`; ties keep the lowest id.
    pub fn match_code(&self, observed: u64) -> Option<Match> {
        let mut best: Option<Match> = None;

        for (id, rots) in self.rotated.iter().enumerate() {
            for (rot, &cand) in rots.iter().enumerate() {
                let h = (observed ^ cand).count_ones() as u8;
                if h > self.max_hamming {
                    continue;
                }
                if best.is_some_and(|b| b.hamming <= h) {
                    continue;
                }
                best = Some(Match {
                    id: id as u32,
                    rotation: rot as u8,
                    hamming: h,
                });
                if h == 0 {
                    return best;
                }
            }
        }

        best
    }
}

/// Rotate an `n x n` code stored row-major (`idx = y * n + x`) by quarter turns.
pub fn rotate_code(code: u64, n: usize, rot: u8) -> u64 {
    let rot = rot & 3;
    if rot == 0 {
        return code;
    }

    let mut out = 0u64;
    for y in 0..n {
        for x in 0..n {
            let (sx, sy) = match rot {
                1 => (y, n - 1 - x),
                2 => (n - 1 - x, n - 1 - y),
                _ => (n - 1 - y, x),
            };
            out |= ((code >> (sy * n + sx)) & 1) << (y * n + x);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::TAG36H11;

    fn grid(id: u32) -> u64 {
        TAG36H11.grid_code(id).expect("known id")
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let code = grid(17);
        let mut r = code;
        for _ in 0..4 {
            r = rotate_code(r, 6, 1);
        }
        assert_eq!(r, code);
        assert_eq!(rotate_code(rotate_code(code, 6, 1), 6, 1), rotate_code(code, 6, 2));
    }

    #[test]
    fn finds_rotated_code() {
        let matcher = Matcher::new(TAG36H11, 0).expect("36 bits fit");
        let observed = rotate_code(grid(42), 6, 3);
        let m = matcher.match_code(observed).expect("match");
        assert_eq!((m.id, m.rotation, m.hamming), (42, 3, 0));
    }

    #[test]
    fn corrects_up_to_max_hamming() {
        let matcher = Matcher::new(TAG36H11, 2).expect("36 bits fit");
        let observed = grid(300) ^ 0b101;
        let m = matcher.match_code(observed).expect("within two bits");
        assert_eq!((m.id, m.hamming), (300, 2));

        let too_far = grid(300) ^ 0b10101;
        assert!(matcher
            .match_code(too_far)
            .is_none_or(|m| m.id != 300));
    }

    #[test]
    fn max_hamming_is_capped_by_the_family() {
        assert!(Matcher::new(TAG36H11, TAG36H11.max_correction_bits).is_some());
        assert!(Matcher::new(TAG36H11, TAG36H11.max_correction_bits + 1).is_none());
        assert!(Matcher::new(TAG36H11, 12).is_none());
    }

    #[test]
    fn solid_and_empty_payloads_never_match() {
        let matcher = Matcher::new(TAG36H11, TAG36H11.max_correction_bits).expect("matcher");
        assert!(matcher.match_code(0).is_none());
        assert!(matcher.match_code((1u64 << 36) - 1).is_none());
    }
}
