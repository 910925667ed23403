//! Scoring schemes for pairwise sequence alignment.
//!
//! Provides simple match/mismatch scoring for nucleotides ([`ScoringMatrix`]),
//! amino acid substitution matrices ([`SubstitutionMatrix`]) with BLOSUM and
//! PAM presets, and a unified [`ScoringScheme`] enum that the alignment
//! algorithms accept.

use physalia_core::{PhysaliaError, Result};

// ---------------------------------------------------------------------------
// Simple scoring (nucleotides)
// ---------------------------------------------------------------------------

/// A simple match/mismatch scoring matrix with affine gap penalties.
///
/// Suitable for nucleotide alignments where all matches score the same
/// and all mismatches score the same.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringMatrix {
    pub match_score: i32,
    pub mismatch_score: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

impl ScoringMatrix {
    /// Create a new scoring matrix.
    ///
    /// # Errors
    ///
    /// Returns [`PhysaliaError::InvalidMatrix`] if `match_score` is not
    /// positive, or `mismatch_score`/`gap_open`/`gap_extend` are not negative.
    pub fn new(
        match_score: i32,
        mismatch_score: i32,
        gap_open: i32,
        gap_extend: i32,
    ) -> Result<Self> {
        if match_score <= 0 {
            return Err(PhysaliaError::InvalidMatrix(
                "match_score must be positive".into(),
            ));
        }
        if mismatch_score >= 0 {
            return Err(PhysaliaError::InvalidMatrix(
                "mismatch_score must be negative".into(),
            ));
        }
        if gap_open >= 0 {
            return Err(PhysaliaError::InvalidMatrix(
                "gap_open must be negative".into(),
            ));
        }
        if gap_extend >= 0 {
            return Err(PhysaliaError::InvalidMatrix(
                "gap_extend must be negative".into(),
            ));
        }
        Ok(Self {
            match_score,
            mismatch_score,
            gap_open,
            gap_extend,
        })
    }

    /// Default scoring for DNA alignment: +2 match, -1 mismatch, -5 gap open, -2 gap extend.
    pub fn dna_default() -> Self {
        Self {
            match_score: 2,
            mismatch_score: -1,
            gap_open: -5,
            gap_extend: -2,
        }
    }

    /// Score a pair of bases. Case-insensitive.
    pub fn score_pair(&self, a: u8, b: u8) -> i32 {
        if a.to_ascii_uppercase() == b.to_ascii_uppercase() {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

// ---------------------------------------------------------------------------
// Amino acid index mapping
// ---------------------------------------------------------------------------

/// Maps an amino acid letter to a 0-based index in substitution matrices.
///
/// Standard 20 amino acids + B (Asx), Z (Glx), X (unknown), * (stop).
/// Returns `None` for unrecognized characters.
fn aa_to_index(aa: u8) -> Option<usize> {
    match aa.to_ascii_uppercase() {
        b'A' => Some(0),
        b'R' => Some(1),
        b'N' => Some(2),
        b'D' => Some(3),
        b'C' => Some(4),
        b'Q' => Some(5),
        b'E' => Some(6),
        b'G' => Some(7),
        b'H' => Some(8),
        b'I' => Some(9),
        b'L' => Some(10),
        b'K' => Some(11),
        b'M' => Some(12),
        b'F' => Some(13),
        b'P' => Some(14),
        b'S' => Some(15),
        b'T' => Some(16),
        b'W' => Some(17),
        b'Y' => Some(18),
        b'V' => Some(19),
        b'B' => Some(20),
        b'Z' => Some(21),
        b'X' => Some(22),
        b'*' => Some(23),
        _ => None,
    }
}

/// Matrix dimension: 24 amino acid symbols.
const AA_DIM: usize = 24;

// ---------------------------------------------------------------------------
// Substitution matrices (protein)
// ---------------------------------------------------------------------------

/// An amino acid substitution matrix with affine gap penalties.
///
/// Stores a 24x24 lookup table covering the 20 standard amino acids plus
/// B (Asx), Z (Glx), X (unknown), and * (stop codon). Residues outside the
/// alphabet score as the worst entry in the table, so every byte value has
/// a defined score.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubstitutionMatrix {
    /// 24x24 flattened score table (row-major).
    scores: Vec<i32>,
    pub gap_open: i32,
    pub gap_extend: i32,
    name: String,
    worst: i32,
}

impl SubstitutionMatrix {
    /// Build a matrix from a caller-supplied 24x24 table (row-major, NCBI
    /// residue order `A R N D C Q E G H I L K M F P S T W Y V B Z X *`).
    ///
    /// # Errors
    ///
    /// Returns [`PhysaliaError::InvalidMatrix`] if the table is not 24x24
    /// or the gap penalties are not negative.
    pub fn from_table(
        name: impl Into<String>,
        scores: Vec<i32>,
        gap_open: i32,
        gap_extend: i32,
    ) -> Result<Self> {
        if scores.len() != AA_DIM * AA_DIM {
            return Err(PhysaliaError::InvalidMatrix(format!(
                "expected {} entries, got {}",
                AA_DIM * AA_DIM,
                scores.len()
            )));
        }
        if gap_open >= 0 || gap_extend >= 0 {
            return Err(PhysaliaError::InvalidMatrix(
                "gap penalties must be negative".into(),
            ));
        }
        let worst = scores.iter().copied().min().unwrap_or(-4);
        Ok(Self {
            scores,
            gap_open,
            gap_extend,
            name: name.into(),
            worst,
        })
    }

    /// Score a pair of amino acids. Case-insensitive.
    ///
    /// Returns the worst score in the matrix for unrecognised residues.
    pub fn score_pair(&self, a: u8, b: u8) -> i32 {
        match (aa_to_index(a), aa_to_index(b)) {
            (Some(i), Some(j)) => self.scores[i * AA_DIM + j],
            _ => self.worst,
        }
    }

    /// Matrix name (e.g. "BLOSUM62").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// BLOSUM62 substitution matrix. Gap penalties: -11 open, -1 extend.
    pub fn blosum62() -> Self {
        Self {
            scores: BLOSUM62.to_vec(),
            gap_open: -11,
            gap_extend: -1,
            name: "BLOSUM62".into(),
            worst: -4,
        }
    }

    /// PAM250 substitution matrix. Gap penalties: -11 open, -1 extend.
    pub fn pam250() -> Self {
        Self {
            scores: PAM250.to_vec(),
            gap_open: -11,
            gap_extend: -1,
            name: "PAM250".into(),
            worst: -8,
        }
    }
}

// ---------------------------------------------------------------------------
// Unified scoring scheme
// ---------------------------------------------------------------------------

/// A unified scoring scheme accepted by alignment algorithms.
#[derive(Debug, Clone)]
pub enum ScoringScheme {
    /// Simple match/mismatch scoring (typically for nucleotides).
    Simple(ScoringMatrix),
    /// Amino acid substitution matrix (BLOSUM, PAM, etc.).
    Substitution(SubstitutionMatrix),
}

impl ScoringScheme {
    /// Score a pair of residues under this scheme.
    pub fn score_pair(&self, a: u8, b: u8) -> i32 {
        match self {
            ScoringScheme::Simple(m) => m.score_pair(a, b),
            ScoringScheme::Substitution(m) => m.score_pair(a, b),
        }
    }

    /// Gap opening penalty (negative).
    pub fn gap_open(&self) -> i32 {
        match self {
            ScoringScheme::Simple(m) => m.gap_open,
            ScoringScheme::Substitution(m) => m.gap_open,
        }
    }

    /// Gap extension penalty (negative).
    pub fn gap_extend(&self) -> i32 {
        match self {
            ScoringScheme::Simple(m) => m.gap_extend,
            ScoringScheme::Substitution(m) => m.gap_extend,
        }
    }
}

impl From<ScoringMatrix> for ScoringScheme {
    fn from(m: ScoringMatrix) -> Self {
        ScoringScheme::Simple(m)
    }
}

impl From<SubstitutionMatrix> for ScoringScheme {
    fn from(m: SubstitutionMatrix) -> Self {
        ScoringScheme::Substitution(m)
    }
}

// ===========================================================================
// NCBI substitution matrix data
// Row/column order: A R N D C Q E G H I L K M F P S T W Y V B Z X *
// ===========================================================================

/// BLOSUM62 — 24x24 flattened, NCBI reference.
#[rustfmt::skip]
const BLOSUM62: [i32; AA_DIM * AA_DIM] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4, // A
    -1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4, // R
    -2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4, // N
    -2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4, // D
     0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4, // C
    -1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4, // Q
    -1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // E
     0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4, // G
    -2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4, // H
    -1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4, // I
    -1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4, // L
    -1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4, // K
    -1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4, // M
    -2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4, // F
    -1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4, // P
     1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4, // S
     0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4, // T
    -3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4, // W
    -2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4, // Y
     0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4, // V
    -2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4, // B
    -1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // Z
     0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4, // X
    -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1, // *
];

/// PAM250 — 24x24 flattened, NCBI/Dayhoff reference.
#[rustfmt::skip]
const PAM250: [i32; AA_DIM * AA_DIM] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     2, -2,  0,  0, -2,  0,  0,  1, -1, -1, -2, -1, -1, -3,  1,  1,  1, -6, -3,  0,  0,  0,  0, -8, // A
    -2,  6,  0, -1, -4,  1, -1, -3,  2, -2, -3,  3,  0, -4,  0,  0, -1,  2, -4, -2, -1,  0, -1, -8, // R
     0,  0,  2,  2, -4,  1,  1,  0,  2, -2, -3,  1, -2, -3,  0,  1,  0, -4, -2, -2,  2,  1,  0, -8, // N
     0, -1,  2,  4, -5,  2,  3,  1,  1, -2, -4,  0, -3, -6, -1,  0,  0, -7, -4, -2,  3,  3, -1, -8, // D
    -2, -4, -4, -5, 12, -5, -5, -3, -3, -2, -6, -5, -5, -4, -3,  0, -2, -8,  0, -2, -4, -5, -3, -8, // C
     0,  1,  1,  2, -5,  4,  2, -1,  3, -2, -2,  1, -1, -5,  0, -1, -1, -5, -4, -2,  1,  3, -1, -8, // Q
     0, -1,  1,  3, -5,  2,  4,  0,  1, -2, -3,  0, -2, -5, -1,  0,  0, -7, -4, -2,  3,  3, -1, -8, // E
     1, -3,  0,  1, -3, -1,  0,  5, -2, -3, -4, -2, -3, -5,  0,  1,  0, -7, -5, -1,  0,  0, -1, -8, // G
    -1,  2,  2,  1, -3,  3,  1, -2,  6, -2, -2,  0, -2, -2,  0, -1, -1, -3,  0, -2,  1,  2, -1, -8, // H
    -1, -2, -2, -2, -2, -2, -2, -3, -2,  5,  2, -2,  2,  1, -2, -1,  0, -5, -1,  4, -2, -2, -1, -8, // I
    -2, -3, -3, -4, -6, -2, -3, -4, -2,  2,  6, -3,  4,  2, -3, -3, -2, -2, -1,  2, -3, -3, -1, -8, // L
    -1,  3,  1,  0, -5,  1,  0, -2,  0, -2, -3,  5,  0, -5, -1,  0,  0, -3, -4, -2,  1,  0, -1, -8, // K
    -1,  0, -2, -3, -5, -1, -2, -3, -2,  2,  4,  0,  6,  0, -2, -2, -1, -4, -2,  2, -2, -2, -1, -8, // M
    -3, -4, -3, -6, -4, -5, -5, -5, -2,  1,  2, -5,  0,  9, -5, -3, -3,  0,  7, -1, -4, -5, -2, -8, // F
     1,  0,  0, -1, -3,  0, -1,  0,  0, -2, -3, -1, -2, -5,  6,  1,  0, -6, -5, -1, -1,  0, -1, -8, // P
     1,  0,  1,  0,  0, -1,  0,  1, -1, -1, -3,  0, -2, -3,  1,  2,  1, -2, -3, -1,  0,  0,  0, -8, // S
     1, -1,  0,  0, -2, -1,  0,  0, -1,  0, -2,  0, -1, -3,  0,  1,  3, -5, -3,  0,  0, -1,  0, -8, // T
    -6,  2, -4, -7, -8, -5, -7, -7, -3, -5, -2, -3, -4,  0, -6, -2, -5, 17,  0, -6, -5, -6, -4, -8, // W
    -3, -4, -2, -4,  0, -4, -4, -5,  0, -1, -1, -4, -2,  7, -5, -3, -3,  0, 10, -2, -3, -4, -2, -8, // Y
     0, -2, -2, -2, -2, -2, -2, -1, -2,  4,  2, -2,  2, -1, -1, -1,  0, -6, -2,  4, -2, -2, -1, -8, // V
     0, -1,  2,  3, -4,  1,  3,  0,  1, -2, -3,  1, -2, -4, -1,  0,  0, -5, -3, -2,  3,  2, -1, -8, // B
     0,  0,  1,  3, -5,  3,  3,  0,  2, -2, -3,  0, -2, -5,  0,  0, -1, -6, -4, -2,  2,  3, -1, -8, // Z
     0, -1,  0, -1, -3, -1, -1, -1, -1, -1, -1, -1, -1, -2, -1,  0,  0, -4, -2, -1, -1, -1, -1, -8, // X
    -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8,  1, // *
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dna_default_values() {
        let m = ScoringMatrix::dna_default();
        assert_eq!(m.match_score, 2);
        assert_eq!(m.mismatch_score, -1);
        assert_eq!(m.gap_open, -5);
        assert_eq!(m.gap_extend, -2);
    }

    #[test]
    fn dna_score_pair_case_insensitive() {
        let m = ScoringMatrix::dna_default();
        assert_eq!(m.score_pair(b'A', b'A'), 2);
        assert_eq!(m.score_pair(b'a', b'A'), 2);
        assert_eq!(m.score_pair(b'A', b'T'), -1);
    }

    #[test]
    fn scoring_matrix_validation() {
        assert!(ScoringMatrix::new(0, -1, -5, -2).is_err());
        assert!(ScoringMatrix::new(2, 0, -5, -2).is_err());
        assert!(ScoringMatrix::new(2, -1, 0, -2).is_err());
        assert!(ScoringMatrix::new(2, -1, -5, 0).is_err());
        assert!(ScoringMatrix::new(2, -1, -5, -2).is_ok());
    }

    #[test]
    fn blosum62_diagonal_spot_checks() {
        let m = SubstitutionMatrix::blosum62();
        assert_eq!(m.score_pair(b'A', b'A'), 4);
        assert_eq!(m.score_pair(b'W', b'W'), 11);
        assert_eq!(m.score_pair(b'R', b'R'), 5);
        assert_eq!(m.score_pair(b'a', b'a'), 4);
    }

    #[test]
    fn blosum62_off_diagonal_symmetric() {
        let m = SubstitutionMatrix::blosum62();
        assert_eq!(m.score_pair(b'A', b'R'), -1);
        assert_eq!(m.score_pair(b'R', b'A'), -1);
    }

    #[test]
    fn blosum62_gap_penalties() {
        let m = SubstitutionMatrix::blosum62();
        assert_eq!(m.gap_open, -11);
        assert_eq!(m.gap_extend, -1);
        assert_eq!(m.name(), "BLOSUM62");
    }

    #[test]
    fn pam250_diagonal() {
        let m = SubstitutionMatrix::pam250();
        assert_eq!(m.score_pair(b'A', b'A'), 2);
        assert_eq!(m.score_pair(b'W', b'W'), 17);
    }

    #[test]
    fn unrecognised_residue_returns_worst() {
        let m = SubstitutionMatrix::blosum62();
        assert_eq!(m.score_pair(b'?', b'A'), -4);
        assert_eq!(m.score_pair(b'A', b'1'), -4);
    }

    #[test]
    fn from_table_validates_dimensions() {
        let err = SubstitutionMatrix::from_table("TINY", vec![1, 2, 3], -10, -1);
        assert!(matches!(err, Err(PhysaliaError::InvalidMatrix(_))));

        let err = SubstitutionMatrix::from_table("BAD_GAPS", vec![0; AA_DIM * AA_DIM], 10, -1);
        assert!(matches!(err, Err(PhysaliaError::InvalidMatrix(_))));

        let m = SubstitutionMatrix::from_table("FLAT", vec![1; AA_DIM * AA_DIM], -10, -1).unwrap();
        assert_eq!(m.score_pair(b'A', b'W'), 1);
        assert_eq!(m.name(), "FLAT");
    }

    #[test]
    fn from_table_matches_preset() {
        let m = SubstitutionMatrix::from_table("B62", BLOSUM62.to_vec(), -11, -1).unwrap();
        let preset = SubstitutionMatrix::blosum62();
        for a in b"ARNDCQEGHILKMFPSTWYVBZX*" {
            for b in b"ARNDCQEGHILKMFPSTWYVBZX*" {
                assert_eq!(m.score_pair(*a, *b), preset.score_pair(*a, *b));
            }
        }
    }

    #[test]
    fn scoring_scheme_delegates() {
        let dna = ScoringScheme::Simple(ScoringMatrix::dna_default());
        assert_eq!(dna.score_pair(b'A', b'A'), 2);
        assert_eq!(dna.gap_open(), -5);
        assert_eq!(dna.gap_extend(), -2);

        let protein = ScoringScheme::Substitution(SubstitutionMatrix::blosum62());
        assert_eq!(protein.score_pair(b'W', b'W'), 11);
        assert_eq!(protein.gap_open(), -11);
        assert_eq!(protein.gap_extend(), -1);
    }

    #[test]
    fn from_conversions() {
        let _scheme: ScoringScheme = ScoringMatrix::dna_default().into();
        let _scheme: ScoringScheme = SubstitutionMatrix::blosum62().into();
    }
}
