//! Score extraction and compass-driven traceback.
//!
//! [`alignment_end`] finds the reportable score and end cell for the active
//! mode; [`walk_back`] follows the compass matrix from there to the
//! alignment start, rebuilding the two gapped strings. Affine gap runs are
//! not stored as separate state matrices — a run's length is recovered by
//! scanning for the cell where `path + gap_open + (len - 1) * gap_extend`
//! reproduces the current score (the shortest such run, for determinism).

use crate::matrix::DpWorkspace;
use crate::types::{AlignmentMode, Compass, GAP};
use physalia_core::{PhysaliaError, Result};

/// The reportable score and 1-based end cell of the alignment.
///
/// Global: always the bottom-right cell. Local: the maximum over the whole
/// matrix, first occurrence in row-major order on ties.
///
/// # Errors
///
/// [`PhysaliaError::NoAlignment`] if, in Local mode, no cell scores above
/// zero.
pub(crate) fn alignment_end(
    ws: &DpWorkspace,
    mode: AlignmentMode,
) -> Result<(i32, usize, usize)> {
    let m = ws.rows() - 1;
    let n = ws.cols() - 1;
    match mode {
        AlignmentMode::Global => Ok((ws.path(m, n), m, n)),
        AlignmentMode::Local => {
            let mut best = 0i32;
            let mut best_i = 0usize;
            let mut best_j = 0usize;
            for i in 1..=m {
                for j in 1..=n {
                    let v = ws.path(i, j);
                    if v > best {
                        best = v;
                        best_i = i;
                        best_j = j;
                    }
                }
            }
            if best <= 0 {
                return Err(PhysaliaError::NoAlignment);
            }
            Ok((best, best_i, best_j))
        }
    }
}

/// Walk the compass matrix backwards from `(end_q, end_t)`.
///
/// Returns the two gapped strings (equal length, gap symbol [`GAP`]) and
/// the 0-based start coordinates in each original sequence. Terminates at
/// a [`Compass::Stop`] cell or at the origin, which covers both modes.
///
/// # Errors
///
/// [`PhysaliaError::InconsistentMatrix`] if the walk would read outside
/// the matrix or a gap run cannot be reconstructed — either indicates a
/// defect, and the result must not be trusted.
pub(crate) fn walk_back(
    ws: &DpWorkspace,
    query: &[u8],
    target: &[u8],
    end_q: usize,
    end_t: usize,
    gap_open: i32,
    gap_extend: i32,
) -> Result<(Vec<u8>, Vec<u8>, usize, usize)> {
    if end_q >= ws.rows() || end_t >= ws.cols() || end_q > query.len() || end_t > target.len() {
        return Err(PhysaliaError::InconsistentMatrix(format!(
            "traceback start ({end_q}, {end_t}) outside matrix"
        )));
    }

    let mut aligned_query = Vec::new();
    let mut aligned_target = Vec::new();
    let mut i = end_q;
    let mut j = end_t;

    loop {
        if i == 0 && j == 0 {
            break;
        }
        match ws.compass(i, j) {
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
                let here = ws.path(i, j);
                let mut run = 1usize;
                loop {
                    if run > i {
                        return Err(PhysaliaError::InconsistentMatrix(format!(
                            "vertical gap run at ({i}, {j}) has no origin"
                        )));
                    }
                    if ws.path(i - run, j) + gap_open + (run as i32 - 1) * gap_extend == here {
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
                let here = ws.path(i, j);
                let mut run = 1usize;
                loop {
                    if run > j {
                        return Err(PhysaliaError::InconsistentMatrix(format!(
                            "horizontal gap run at ({i}, {j}) has no origin"
                        )));
                    }
                    if ws.path(i, j - run) + gap_open + (run as i32 - 1) * gap_extend == here {
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
    Ok((aligned_query, aligned_target, i, j))
}
