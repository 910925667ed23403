//! Banded local alignment for long sequences.
//!
//! Restricts the Smith-Waterman DP to a diagonal band of half-width `w`:
//! row `i` only computes columns within `w` of the scaled diagonal
//! `i * n / m`, so memory and time are O((m+1) * (2w+1)) instead of
//! O(m * n). Cells outside the band are never written and read as -inf.
//!
//! This is a heuristic: the result is exactly the unrestricted local
//! optimum **only** when the optimal path lies entirely inside the band.
//! Callers choose the band width and accept that conditional guarantee;
//! a wider band trades speed for certainty.

use crate::scoring::ScoringScheme;
use crate::types::{Alignment, Compass, GAP};
use physalia_core::{PhysaliaError, Result};

/// See [`crate::matrix::NEG_INF`]; duplicated here to keep the band
/// storage self-contained.
const NEG_INF: i32 = i32::MIN / 2;

/// Band-local storage: one `2w+1` slice of columns per row, centred on
/// the scaled diagonal.
struct Band {
    path: Vec<i32>,
    compass: Vec<Compass>,
    /// Half-width `w`.
    half: usize,
    /// Columns stored per row (`2w + 1`).
    width: usize,
    /// Row length ratio numerator/denominator for the band centre.
    n: usize,
    m: usize,
}

impl Band {
    fn new(m: usize, n: usize, half: usize) -> Self {
        let width = 2 * half + 1;
        Self {
            path: vec![NEG_INF; (m + 1) * width],
            compass: vec![Compass::Stop; (m + 1) * width],
            half,
            width,
            n,
            m,
        }
    }

    /// Band centre column for row `i` (scaled diagonal).
    #[inline]
    fn centre(&self, i: usize) -> usize {
        i * self.n / self.m
    }

    #[inline]
    fn in_band(&self, i: usize, j: usize) -> bool {
        let c = self.centre(i);
        j + self.half >= c && j <= c + self.half
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        i * self.width + (j + self.half - self.centre(i))
    }

    #[inline]
    fn path(&self, i: usize, j: usize) -> i32 {
        if self.in_band(i, j) {
            self.path[self.offset(i, j)]
        } else {
            NEG_INF
        }
    }

    #[inline]
    fn compass(&self, i: usize, j: usize) -> Option<Compass> {
        if self.in_band(i, j) {
            Some(self.compass[self.offset(i, j)])
        } else {
            None
        }
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, score: i32, dir: Compass) {
        let at = self.offset(i, j);
        self.path[at] = score;
        self.compass[at] = dir;
    }
}

/// Local (Smith-Waterman) alignment restricted to a diagonal band.
///
/// Same contract as [`align_local`](crate::align_local), with the banded
/// approximation caveat above. The workspace cell ceiling does not apply:
/// memory is already bounded by the band.
///
/// # Errors
///
/// [`EmptyInput`](PhysaliaError::EmptyInput) for an empty sequence,
/// [`InvalidInput`](PhysaliaError::InvalidInput) for a zero band width,
/// [`NoAlignment`](PhysaliaError::NoAlignment) when no in-band region
/// scores above zero.
pub fn align_local_banded(
    query: &[u8],
    target: &[u8],
    scoring: &ScoringScheme,
    band_width: usize,
) -> Result<Alignment> {
    let m = query.len();
    let n = target.len();
    if m == 0 {
        return Err(PhysaliaError::EmptyInput("query".into()));
    }
    if n == 0 {
        return Err(PhysaliaError::EmptyInput("target".into()));
    }
    if band_width == 0 {
        return Err(PhysaliaError::InvalidInput(
            "band_width must be at least 1".into(),
        ));
    }

    let open = scoring.gap_open();
    let extend = scoring.gap_extend();
    let mut band = Band::new(m, n, band_width);

    // Local borders inside the band are zero-score Stop cells.
    for j in 0..=band_width.min(n) {
        band.set(0, j, 0, Compass::Stop);
    }

    // Running best score ending in a vertical gap, per column. A column
    // enters the band at most once (the centre is monotone in i), so the
    // initial -inf is correct whenever a column first becomes active.
    let mut vert = vec![NEG_INF; n + 1];

    let mut best = 0i32;
    let mut best_i = 0usize;
    let mut best_j = 0usize;

    for i in 1..=m {
        let c = band.centre(i);
        if c <= band_width {
            band.set(i, 0, 0, Compass::Stop);
        }
        let lo = c.saturating_sub(band_width).max(1);
        let hi = (c + band_width).min(n);
        let mut horiz = NEG_INF;
        for j in lo..=hi {
            let diag = band.path(i - 1, j - 1) + scoring.score_pair(query[i - 1], target[j - 1]);
            let up = (band.path(i - 1, j) + open).max(vert[j] + extend);
            let left = (band.path(i, j - 1) + open).max(horiz + extend);
            vert[j] = up;
            horiz = left;

            // Fixed tie-break order: Diagonal, then Up, then Left.
            let mut cell = diag;
            let mut dir = Compass::Diagonal;
            if up > cell {
                cell = up;
                dir = Compass::Up;
            }
            if left > cell {
                cell = left;
                dir = Compass::Left;
            }
            if cell <= 0 {
                cell = 0;
                dir = Compass::Stop;
            }
            band.set(i, j, cell, dir);

            if cell > best {
                best = cell;
                best_i = i;
                best_j = j;
            }
        }
    }

    if best <= 0 {
        return Err(PhysaliaError::NoAlignment);
    }

    walk_band(&band, query, target, best, best_i, best_j, open, extend)
}

/// Band-aware traceback; mirrors [`crate::traceback::walk_back`] with
/// every read going through the band (out-of-band is -inf/unreadable).
#[allow(clippy::too_many_arguments)]
fn walk_band(
    band: &Band,
    query: &[u8],
    target: &[u8],
    score: i32,
    end_q: usize,
    end_t: usize,
    gap_open: i32,
    gap_extend: i32,
) -> Result<Alignment> {
    let mut aligned_query = Vec::new();
    let mut aligned_target = Vec::new();
    let mut i = end_q;
    let mut j = end_t;

    loop {
        if i == 0 && j == 0 {
            break;
        }
        let dir = band.compass(i, j).ok_or_else(|| {
            PhysaliaError::InconsistentMatrix(format!("traceback left the band at ({i}, {j})"))
        })?;
        match dir {
            Compass::Stop => break,
            Compass::Diagonal => {
                if i == 0 || j == 0 {
                    return Err(PhysaliaError::InconsistentMatrix(format!(
                        "diagonal step at border cell ({i}, {j})"
                    )));
                }
                aligned_query.push(query[i - 1]);
                aligned_target.push(target[j - 1]);
                i -= 1;
                j -= 1;
            }
            Compass::Up => {
                let here = band.path(i, j);
                let mut run = 1usize;
                loop {
                    if run > i {
                        return Err(PhysaliaError::InconsistentMatrix(format!(
                            "vertical gap run at ({i}, {j}) has no origin"
                        )));
                    }
                    if band.path(i - run, j) + gap_open + (run as i32 - 1) * gap_extend == here {
                        break;
                    }
                    run += 1;
                }
                for step in 0..run {
                    aligned_query.push(query[i - 1 - step]);
                    aligned_target.push(GAP);
                }
                i -= run;
            }
            Compass::Left => {
                let here = band.path(i, j);
                let mut run = 1usize;
                loop {
                    if run > j {
                        return Err(PhysaliaError::InconsistentMatrix(format!(
                            "horizontal gap run at ({i}, {j}) has no origin"
                        )));
                    }
                    if band.path(i, j - run) + gap_open + (run as i32 - 1) * gap_extend == here {
                        break;
                    }
                    run += 1;
                }
                for step in 0..run {
                    aligned_query.push(GAP);
                    aligned_target.push(target[j - 1 - step]);
                }
                j -= run;
            }
        }
    }

    aligned_query.reverse();
    aligned_target.reverse();
    Ok(Alignment {
        score,
        aligned_query,
        aligned_target,
        query_start: i,
        query_end: end_q,
        target_start: j,
        target_end: end_t,
    })
}
