use num_bigint::BigUint;
use rayon::prelude::*;

use crate::constraints::{leading_digit_rules, rare_second_digit_pairs};
use crate::rare::{digital_root, is_rare, reverse_number};

/// A partially-fixed candidate: the outer two digit positions on each side
/// are pinned by the constraint tables, the middle block is free.
#[derive(Debug, Clone)]
struct Skeleton {
    prefix: String,
    suffix: String,
}

/// Lazy sweep over the free middle block of one skeleton.
///
/// The counter runs from 10^k to 2 * 10^k - 1 where k is the middle width;
/// the leading "1" forces fixed-width decimal formatting and is stripped
/// during assembly. A rare number's digital root lands in {2, 5, 8, 9}, so
/// after each test the counter advances by the distance from the current
/// root to the next admissible one (3 past a 2 or 5, 2 past a 9, else 1).
/// The jump is sound because incrementing the middle block shifts the whole
/// number's root by the same amount no matter which digit position absorbs
/// the carry.
struct MiddleSweep {
    prefix: String,
    suffix: String,
    mid: BigUint,
    end: BigUint,
}

fn stride_for_root(root: u32) -> u32 {
    match root {
        2 | 5 => 3,
        9 => 2,
        _ => 1,
    }
}

impl MiddleSweep {
    fn new(skeleton: Skeleton, digits: u32) -> Self {
        let mid_range = BigUint::from(10u32).pow(digits - 4);
        MiddleSweep {
            prefix: skeleton.prefix,
            suffix: skeleton.suffix,
            mid: mid_range.clone(),
            end: mid_range * 2u32,
        }
    }

    fn next_rare(&mut self) -> Option<BigUint> {
        while self.mid < self.end {
            let mid_digits = self.mid.to_string();
            let mut s =
                String::with_capacity(self.prefix.len() + self.suffix.len() + mid_digits.len());
            s.push_str(&self.prefix);
            s.push_str(&mid_digits[1..]);
            s.push_str(&self.suffix);
            let n: BigUint = s.parse().unwrap();

            let rev = reverse_number(&n);
            self.mid += stride_for_root(digital_root(&n));

            if rev < n && is_rare(&n, Some(&rev)) {
                return Some(n);
            }
        }
        None
    }
}

fn skeletons(digits: u32) -> Vec<Skeleton> {
    debug_assert!(digits >= 5);
    let mut out = Vec::new();
    for (first, lasts) in leading_digit_rules() {
        for &last in lasts {
            for (second, second_last) in rare_second_digit_pairs(first, last) {
                out.push(Skeleton {
                    prefix: format!("{}{}", first, second),
                    suffix: format!("{}{}", second_last, last),
                });
            }
        }
    }
    out
}

/// Every structurally-legal candidate of 2 to 4 digits. These lengths have
/// no free middle block, so the candidate list is fully determined by the
/// digit tables (plus an open middle digit for length 3).
fn structural_candidates(digits: u32) -> Vec<BigUint> {
    let mut out = Vec::new();
    for (first, lasts) in leading_digit_rules() {
        for &last in lasts {
            match digits {
                2 => out.push(BigUint::from(u32::from(first) * 10 + u32::from(last))),
                3 => {
                    for mid in 0..10u32 {
                        out.push(BigUint::from(
                            u32::from(first) * 100 + mid * 10 + u32::from(last),
                        ));
                    }
                }
                _ => {
                    for (second, second_last) in rare_second_digit_pairs(first, last) {
                        let n = u32::from(first) * 1000
                            + u32::from(second) * 100
                            + u32::from(second_last) * 10
                            + u32::from(last);
                        out.push(BigUint::from(n));
                    }
                }
            }
        }
    }
    out
}

/// Lazy iterator over every rare number with exactly `digits` decimal
/// digits. Candidates are verified on demand; nothing is precomputed beyond
/// the skeleton list, so the iterator can be dropped at any point without
/// having paid for the rest of the length.
pub struct RareNumbers {
    digits: u32,
    short: std::vec::IntoIter<BigUint>,
    frames: std::vec::IntoIter<Skeleton>,
    sweep: Option<MiddleSweep>,
}

impl RareNumbers {
    pub fn new(digits: u32) -> Self {
        let (short, frames) = if digits < 2 {
            (Vec::new(), Vec::new())
        } else if digits <= 4 {
            (structural_candidates(digits), Vec::new())
        } else {
            (Vec::new(), skeletons(digits))
        };
        RareNumbers {
            digits,
            short: short.into_iter(),
            frames: frames.into_iter(),
            sweep: None,
        }
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }
}

impl Iterator for RareNumbers {
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        loop {
            if let Some(sweep) = &mut self.sweep {
                if let Some(n) = sweep.next_rare() {
                    return Some(n);
                }
                self.sweep = None;
            }

            if let Some(candidate) = self.short.next() {
                if is_rare(&candidate, None) {
                    return Some(candidate);
                }
                continue;
            }

            match self.frames.next() {
                Some(skeleton) => self.sweep = Some(MiddleSweep::new(skeleton, self.digits)),
                None => return None,
            }
        }
    }
}

/// Collect all rare numbers of one length, fanning the independent skeleton
/// sweeps out across the rayon pool. Results are gathered per skeleton and
/// concatenated in skeleton order, so the output sequence is identical to
/// the sequential iterator's.
pub fn search_length_parallel(digits: u32) -> Vec<BigUint> {
    if digits < 5 {
        return RareNumbers::new(digits).collect();
    }

    let groups: Vec<Vec<BigUint>> = skeletons(digits)
        .into_par_iter()
        .map(|skeleton| {
            let mut sweep = MiddleSweep::new(skeleton, digits);
            std::iter::from_fn(|| sweep.next_rare()).collect()
        })
        .collect();

    groups.into_iter().flatten().collect()
}
