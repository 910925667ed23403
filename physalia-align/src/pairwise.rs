//! Mode entry points: global, local, and profile alignment.
//!
//! Each entry point composes the shared machinery — matrix fill, score
//! extraction, traceback — into an [`Alignment`]. The `_with` variants
//! accept a caller-owned [`DpWorkspace`] so repeated calls (database
//! search against one matrix) reuse the DP buffers instead of
//! reallocating.

use crate::matrix::{fill, DpWorkspace, PairScorer, ProfileScorer, ScoreSource};
use crate::profile::ProfileMatrix;
use crate::scoring::ScoringScheme;
use crate::traceback::{alignment_end, walk_back};
use crate::types::{Alignment, AlignmentMode};
use physalia_core::Result;

/// Global (Needleman-Wunsch) alignment with affine gap penalties.
///
/// # Errors
///
/// Returns [`EmptyInput`](physalia_core::PhysaliaError::EmptyInput) if
/// either sequence is empty, or
/// [`ResourceExhausted`](physalia_core::PhysaliaError::ResourceExhausted)
/// if the DP matrix would exceed the default cell ceiling.
pub fn align_global(query: &[u8], target: &[u8], scoring: &ScoringScheme) -> Result<Alignment> {
    align_global_with(&mut DpWorkspace::new(), query, target, scoring)
}

/// [`align_global`] reusing a caller-owned workspace.
pub fn align_global_with(
    ws: &mut DpWorkspace,
    query: &[u8],
    target: &[u8],
    scoring: &ScoringScheme,
) -> Result<Alignment> {
    let src = PairScorer::new(query, target, scoring);
    run(ws, &src, query, target, AlignmentMode::Global)
}

/// Local (Smith-Waterman) alignment with affine gap penalties.
///
/// # Errors
///
/// In addition to the [`align_global`] errors, returns
/// [`NoAlignment`](physalia_core::PhysaliaError::NoAlignment) when no
/// region scores above zero — a normal outcome for unrelated sequences
/// that callers must handle.
pub fn align_local(query: &[u8], target: &[u8], scoring: &ScoringScheme) -> Result<Alignment> {
    align_local_with(&mut DpWorkspace::new(), query, target, scoring)
}

/// [`align_local`] reusing a caller-owned workspace.
pub fn align_local_with(
    ws: &mut DpWorkspace,
    query: &[u8],
    target: &[u8],
    scoring: &ScoringScheme,
) -> Result<Alignment> {
    let src = PairScorer::new(query, target, scoring);
    run(ws, &src, query, target, AlignmentMode::Local)
}

/// Align a position-specific scoring profile against a sequence.
///
/// The profile is the first operand; its consensus symbols render the
/// profile side of the aligned output. The same fill/traceback machinery
/// runs underneath — only the per-cell score lookup differs.
///
/// # Errors
///
/// As [`align_global`] / [`align_local`], depending on `mode`.
pub fn align_profile(
    profile: &ProfileMatrix,
    target: &[u8],
    mode: AlignmentMode,
) -> Result<Alignment> {
    align_profile_with(&mut DpWorkspace::new(), profile, target, mode)
}

/// [`align_profile`] reusing a caller-owned workspace.
pub fn align_profile_with(
    ws: &mut DpWorkspace,
    profile: &ProfileMatrix,
    target: &[u8],
    mode: AlignmentMode,
) -> Result<Alignment> {
    let src = ProfileScorer::new(profile, target);
    run(ws, &src, profile.consensus(), target, mode)
}

/// Fill, extract, walk: the shared pipeline behind every entry point.
fn run<S: ScoreSource>(
    ws: &mut DpWorkspace,
    src: &S,
    query: &[u8],
    target: &[u8],
    mode: AlignmentMode,
) -> Result<Alignment> {
    fill(ws, src, mode)?;
    let (score, end_q, end_t) = alignment_end(ws, mode)?;
    let (aligned_query, aligned_target, query_start, target_start) = walk_back(
        ws,
        query,
        target,
        end_q,
        end_t,
        src.gap_open(),
        src.gap_extend(),
    )?;
    Ok(Alignment {
        score,
        aligned_query,
        aligned_target,
        query_start,
        query_end: end_q,
        target_start,
        target_end: end_t,
    })
}
