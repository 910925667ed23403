//! Position-specific scoring matrices (profiles).
//!
//! A [`ProfileMatrix`] stands in for the first operand of an alignment: one
//! score vector per consensus position instead of a residue scored through a
//! substitution matrix. Built externally (e.g. from a multiple alignment);
//! this crate only consumes it.

use physalia_core::{PhysaliaError, Result};

/// A position-specific scoring matrix with affine gap penalties.
///
/// Each row holds one score per alphabet symbol. The consensus sequence
/// (one symbol per row) is what the profile side of an aligned output
/// renders as.
#[derive(Debug, Clone)]
pub struct ProfileMatrix {
    /// Alphabet symbols, in the column order of each row.
    alphabet: Vec<u8>,
    /// One score vector per consensus position; each of `alphabet.len()` entries.
    rows: Vec<Vec<i32>>,
    /// Consensus symbol per position.
    consensus: Vec<u8>,
    pub gap_open: i32,
    pub gap_extend: i32,
    /// Byte → alphabet column, -1 for symbols outside the alphabet.
    index: Vec<i16>,
}

impl ProfileMatrix {
    /// Build a profile from per-position score vectors.
    ///
    /// `rows[p][c]` is the score for aligning alphabet symbol `c` against
    /// consensus position `p`. Symbol lookup is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`PhysaliaError::InvalidMatrix`] if the alphabet is empty,
    /// any row length differs from the alphabet size, or the gap penalties
    /// are not negative; [`PhysaliaError::InvalidInput`] if the consensus
    /// length differs from the number of rows.
    pub fn new(
        alphabet: &[u8],
        rows: Vec<Vec<i32>>,
        consensus: Vec<u8>,
        gap_open: i32,
        gap_extend: i32,
    ) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(PhysaliaError::InvalidMatrix(
                "profile alphabet must not be empty".into(),
            ));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != alphabet.len()) {
            return Err(PhysaliaError::InvalidMatrix(format!(
                "profile row {} has {} entries, alphabet has {}",
                bad,
                rows[bad].len(),
                alphabet.len()
            )));
        }
        if gap_open >= 0 || gap_extend >= 0 {
            return Err(PhysaliaError::InvalidMatrix(
                "gap penalties must be negative".into(),
            ));
        }
        if consensus.len() != rows.len() {
            return Err(PhysaliaError::InvalidInput(format!(
                "consensus length {} does not match profile length {}",
                consensus.len(),
                rows.len()
            )));
        }

        let mut index = vec![-1i16; 256];
        for (col, &sym) in alphabet.iter().enumerate() {
            index[sym.to_ascii_uppercase() as usize] = col as i16;
            index[sym.to_ascii_lowercase() as usize] = col as i16;
        }

        Ok(Self {
            alphabet: alphabet.to_vec(),
            rows,
            consensus,
            gap_open,
            gap_extend,
            index,
        })
    }

    /// Number of consensus positions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the profile has no positions.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The alphabet the score vectors are ordered by.
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    /// Consensus symbols, one per position.
    pub fn consensus(&self) -> &[u8] {
        &self.consensus
    }

    /// Score for aligning `residue` against consensus position `pos`.
    ///
    /// Residues outside the alphabet score as the worst entry in that
    /// position's row, so every byte value has a defined score.
    pub fn score(&self, pos: usize, residue: u8) -> i32 {
        let row = &self.rows[pos];
        match self.index[residue as usize] {
            -1 => row.iter().copied().min().unwrap_or(0),
            col => row[col as usize],
        }
    }
}
