//! Pairwise sequence alignment for the Physalia bioinformatics ecosystem.
//!
//! Provides global (Needleman-Wunsch), local (Smith-Waterman), profile, and
//! banded pairwise alignment with affine gap penalties, supporting both
//! nucleotide and protein scoring schemes (BLOSUM, PAM, custom).
//!
//! The engine is a pure computation library: it borrows already-parsed
//! sequences and a scoring model, and returns coordinates, a score, and the
//! gapped strings. Sequence I/O, matrix-file loading, and report formatting
//! live elsewhere. Calls are synchronous and side-effect-free; independent
//! alignments may run on separate threads, each with its own
//! [`DpWorkspace`].
//!
//! # Quick start
//!
//! ```
//! use physalia_align::{align, AlignmentMode, ScoringMatrix, ScoringScheme};
//!
//! let scoring = ScoringScheme::Simple(ScoringMatrix::dna_default());
//! let result = align(b"ACGT", b"ACGT", AlignmentMode::Global, &scoring).unwrap();
//! assert_eq!(result.score, 8);
//! ```

pub mod banded;
pub mod matrix;
pub mod pairwise;
pub mod profile;
pub mod scoring;
pub mod similarity;
pub mod types;

mod traceback;

pub use banded::align_local_banded;
pub use matrix::{DpWorkspace, PairScorer, ProfileScorer, ScoreSource, DEFAULT_MAX_CELLS};
pub use pairwise::{
    align_global, align_global_with, align_local, align_local_with, align_profile,
    align_profile_with,
};
pub use profile::ProfileMatrix;
pub use scoring::{ScoringMatrix, ScoringScheme, SubstitutionMatrix};
pub use similarity::similarity;
pub use types::{Alignment, AlignmentMode, Compass, SimilarityStats, GAP};

/// Convenience function: align two sequences using the specified mode and scoring.
///
/// Dispatches to [`align_local`] for [`AlignmentMode::Local`] or
/// [`align_global`] for [`AlignmentMode::Global`].
///
/// # Errors
///
/// Propagates the mode's errors: empty input, matrix-size ceiling, or (Local)
/// no positive-scoring region.
pub fn align(
    query: &[u8],
    target: &[u8],
    mode: AlignmentMode,
    scoring: &ScoringScheme,
) -> physalia_core::Result<Alignment> {
    match mode {
        AlignmentMode::Local => align_local(query, target, scoring),
        AlignmentMode::Global => align_global(query, target, scoring),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dna_scheme() -> ScoringScheme {
        ScoringScheme::Simple(ScoringMatrix::dna_default())
    }

    #[test]
    fn align_global_end_to_end() {
        let result = align(b"ACGT", b"ACGT", AlignmentMode::Global, &dna_scheme()).unwrap();
        assert_eq!(result.score, 8);
        let stats = similarity(
            &result.aligned_query,
            &result.aligned_target,
            &dna_scheme(),
            4,
            4,
        )
        .unwrap();
        assert!((stats.aligned_identity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn align_local_end_to_end() {
        let result = align(
            b"AAACGTAAA",
            b"TTTCGTTTT",
            AlignmentMode::Local,
            &dna_scheme(),
        )
        .unwrap();
        assert!(result.score > 0);
    }

    #[test]
    fn align_protein_global() {
        let scoring = ScoringScheme::Substitution(SubstitutionMatrix::blosum62());
        let result = align(b"HEAGAWGHEE", b"PAWHEAE", AlignmentMode::Global, &scoring).unwrap();
        assert!(result.score > 0);
        assert!(result.columns() > 0);
    }

    #[test]
    fn symmetric_pair_transposes() {
        // No ties in this pair: swapping operands swaps the aligned strings
        let scoring = dna_scheme();
        let ab = align_global(b"ACGTT", b"ACGT", &scoring).unwrap();
        let ba = align_global(b"ACGT", b"ACGTT", &scoring).unwrap();
        assert_eq!(ab.score, ba.score);
        assert_eq!(ab.aligned_query, ba.aligned_target);
        assert_eq!(ab.aligned_target, ba.aligned_query);
    }
}
