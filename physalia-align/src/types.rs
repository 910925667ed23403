//! Core types for pairwise alignment results.

use core::fmt;

/// Gap symbol used in aligned output strings.
pub const GAP: u8 = b'-';

/// The alignment strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignmentMode {
    /// Local alignment (Smith-Waterman) — finds the best-scoring local region.
    Local,
    /// Global alignment (Needleman-Wunsch) — aligns sequences end-to-end.
    Global,
}

/// Per-cell traceback direction: which predecessor produced the cell's score.
///
/// `Stop` marks cells where a local alignment restarts (running score reset
/// to zero) and the `(0,0)` origin in global mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Compass {
    /// Alignment start — traceback terminates here.
    Stop,
    /// Match/mismatch: came from `(i-1, j-1)`.
    Diagonal,
    /// Gap in the target: came from `(i-1, j)`.
    Up,
    /// Gap in the query: came from `(i, j-1)`.
    Left,
}

/// The result of a pairwise sequence alignment.
///
/// The two aligned strings always have equal length; columns where one
/// sequence is absent carry the [`GAP`] symbol. Coordinates are 0-based
/// into the original (un-gapped) sequences, starts inclusive and ends
/// exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    /// Alignment score.
    pub score: i32,
    /// Aligned query sequence (with `-` for gaps).
    pub aligned_query: Vec<u8>,
    /// Aligned target sequence (with `-` for gaps).
    pub aligned_target: Vec<u8>,
    /// Start position in the original query (0-based, inclusive).
    pub query_start: usize,
    /// End position in the original query (0-based, exclusive).
    pub query_end: usize,
    /// Start position in the original target (0-based, inclusive).
    pub target_start: usize,
    /// End position in the original target (0-based, exclusive).
    pub target_end: usize,
}

impl Alignment {
    /// Number of columns in the alignment (including gap columns).
    pub fn columns(&self) -> usize {
        self.aligned_query.len()
    }

    /// Whether the alignment contains no columns.
    pub fn is_empty(&self) -> bool {
        self.aligned_query.is_empty()
    }

    /// Number of gap columns (in either sequence).
    pub fn gaps(&self) -> usize {
        self.aligned_query
            .iter()
            .zip(&self.aligned_target)
            .filter(|&(&q, &t)| q == GAP || t == GAP)
            .count()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", String::from_utf8_lossy(&self.aligned_query))?;
        write!(f, "{}", String::from_utf8_lossy(&self.aligned_target))
    }
}

impl physalia_core::Scored for Alignment {
    fn score(&self) -> f64 {
        self.score as f64
    }
}

/// Identity and similarity statistics for an aligned pair.
///
/// All values are fractions in `[0.0, 1.0]`. The `aligned_*` figures are
/// normalised to the number of non-gap aligned columns; the `overall_*`
/// figures to the longer of the two original sequence lengths, which makes
/// alignments of different extents comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarityStats {
    /// Identical columns over non-gap aligned columns.
    pub aligned_identity: f64,
    /// Positive-scoring columns over non-gap aligned columns.
    pub aligned_similarity: f64,
    /// Identical columns over the longer original sequence length.
    pub overall_identity: f64,
    /// Positive-scoring columns over the longer original sequence length.
    pub overall_similarity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Alignment {
        Alignment {
            score: 5,
            aligned_query: b"AC-GT".to_vec(),
            aligned_target: b"ACTG-".to_vec(),
            query_start: 0,
            query_end: 4,
            target_start: 0,
            target_end: 4,
        }
    }

    #[test]
    fn column_and_gap_counts() {
        let aln = sample();
        assert_eq!(aln.columns(), 5);
        assert_eq!(aln.gaps(), 2);
        assert!(!aln.is_empty());
    }

    #[test]
    fn display_shows_both_rows() {
        let rendered = sample().to_string();
        assert_eq!(rendered, "AC-GT\nACTG-");
    }

    #[test]
    fn scored_trait() {
        use physalia_core::Scored;
        assert!((sample().score() - 5.0).abs() < f64::EPSILON);
    }
}
