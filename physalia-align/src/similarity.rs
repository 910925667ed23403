//! Identity and similarity statistics over an aligned pair.
//!
//! Works on the gapped output strings of an alignment, not on the DP
//! matrices — any equal-length aligned pair can be scored, whichever
//! variant produced it.

use crate::scoring::ScoringScheme;
use crate::types::{SimilarityStats, GAP};
use physalia_core::{PhysaliaError, Result};

/// Compute identity/similarity fractions for two aligned strings.
///
/// A column is *identical* when both residues match (case-insensitive) and
/// *similar* when the scheme scores the pair above zero (identities
/// included, for any sane matrix). Gap columns count toward neither
/// numerator nor the aligned-column denominator. The `overall_*` figures
/// divide the same counts by the longer of the two original (un-gapped)
/// sequence lengths, so alignments of different extents can be compared.
///
/// # Errors
///
/// Returns [`PhysaliaError::InvalidInput`] if the aligned strings differ
/// in length.
pub fn similarity(
    aligned_query: &[u8],
    aligned_target: &[u8],
    scoring: &ScoringScheme,
    query_len: usize,
    target_len: usize,
) -> Result<SimilarityStats> {
    if aligned_query.len() != aligned_target.len() {
        return Err(PhysaliaError::InvalidInput(format!(
            "aligned strings differ in length: {} vs {}",
            aligned_query.len(),
            aligned_target.len()
        )));
    }

    let mut columns = 0usize;
    let mut identical = 0usize;
    let mut similar = 0usize;
    for (&q, &t) in aligned_query.iter().zip(aligned_target) {
        if q == GAP || t == GAP {
            continue;
        }
        columns += 1;
        if q.to_ascii_uppercase() == t.to_ascii_uppercase() {
            identical += 1;
        }
        if scoring.score_pair(q, t) > 0 {
            similar += 1;
        }
    }

    let frac = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
    let longer = query_len.max(target_len);

    Ok(SimilarityStats {
        aligned_identity: frac(identical, columns),
        aligned_similarity: frac(similar, columns),
        overall_identity: frac(identical, longer),
        overall_similarity: frac(similar, longer),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{ScoringMatrix, SubstitutionMatrix};

    fn dna_scheme() -> ScoringScheme {
        ScoringScheme::Simple(ScoringMatrix::dna_default())
    }

    #[test]
    fn perfect_match() {
        let stats = similarity(b"ACGT", b"ACGT", &dna_scheme(), 4, 4).unwrap();
        assert!((stats.aligned_identity - 1.0).abs() < f64::EPSILON);
        assert!((stats.aligned_similarity - 1.0).abs() < f64::EPSILON);
        assert!((stats.overall_identity - 1.0).abs() < f64::EPSILON);
        assert!((stats.overall_similarity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn gap_columns_excluded() {
        // 3 non-gap columns, 3 identities, over originals of length 4
        let stats = similarity(b"AC-GT", b"ACTG-", &dna_scheme(), 4, 4).unwrap();
        assert!((stats.aligned_identity - 1.0).abs() < f64::EPSILON);
        assert!((stats.overall_identity - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn conservative_substitution_counts_as_similar() {
        // BLOSUM62: I/L scores +2 — similar but not identical
        let scheme = ScoringScheme::Substitution(SubstitutionMatrix::blosum62());
        let stats = similarity(b"IW", b"LW", &scheme, 2, 2).unwrap();
        assert!((stats.aligned_identity - 0.5).abs() < f64::EPSILON);
        assert!((stats.aligned_similarity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overall_uses_longer_sequence() {
        // Local alignment of 2 identical columns from originals of length 8 and 4
        let stats = similarity(b"AC", b"AC", &dna_scheme(), 8, 4).unwrap();
        assert!((stats.aligned_identity - 1.0).abs() < f64::EPSILON);
        assert!((stats.overall_identity - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn length_mismatch_rejected() {
        assert!(matches!(
            similarity(b"ACG", b"AC", &dna_scheme(), 3, 2),
            Err(PhysaliaError::InvalidInput(_))
        ));
    }

    #[test]
    fn idempotent() {
        let a = similarity(b"ACG-T", b"ACGCT", &dna_scheme(), 4, 5).unwrap();
        let b = similarity(b"ACG-T", b"ACGCT", &dna_scheme(), 4, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_alignment_is_zero() {
        let stats = similarity(b"", b"", &dna_scheme(), 4, 4).unwrap();
        assert_eq!(stats.aligned_identity, 0.0);
        assert_eq!(stats.overall_similarity, 0.0);
    }
}
