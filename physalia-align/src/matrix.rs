//! Dynamic-programming matrix filling (Gotoh, 1982).
//!
//! One `path` matrix holds the best cumulative score per cell; a parallel
//! [`Compass`] matrix records which predecessor produced it. The two
//! affine-gap continuation states are carried as running bests (one array
//! for vertical gaps, one scalar per row for horizontal gaps) instead of
//! full matrices; the traceback reconstructs gap runs from `path` alone.
//!
//! The fill routine is generic over a [`ScoreSource`], so sequence-pair
//! and profile alignment share one monomorphised hot loop.

use crate::profile::ProfileMatrix;
use crate::scoring::ScoringScheme;
use crate::types::{AlignmentMode, Compass};
use physalia_core::{PhysaliaError, Result};

/// Sentinel for "no score here": low enough to never win a max, high
/// enough that adding a gap penalty cannot overflow.
pub(crate) const NEG_INF: i32 = i32::MIN / 2;

/// Default ceiling on DP cells per fill (`path` + `compass` ≈ 5 bytes/cell,
/// so this bounds a fill at roughly 670 MB). Override per workspace with
/// [`DpWorkspace::with_cell_limit`].
pub const DEFAULT_MAX_CELLS: usize = 1 << 27;

// ---------------------------------------------------------------------------
// Score sources
// ---------------------------------------------------------------------------

/// Per-cell substitution score provider for the fill loop.
///
/// `score(i, j)` is the contribution of aligning row position `i` against
/// column position `j`, both 0-based into the original operands.
pub trait ScoreSource {
    /// Number of row positions (first operand length).
    fn rows(&self) -> usize;
    /// Number of column positions (second operand length).
    fn cols(&self) -> usize;
    /// Substitution score at `(i, j)`.
    fn score(&self, i: usize, j: usize) -> i32;
    /// Gap opening penalty (negative).
    fn gap_open(&self) -> i32;
    /// Gap extension penalty (negative).
    fn gap_extend(&self) -> i32;
}

/// Scores a sequence pair through a [`ScoringScheme`].
pub struct PairScorer<'a> {
    query: &'a [u8],
    target: &'a [u8],
    scheme: &'a ScoringScheme,
}

impl<'a> PairScorer<'a> {
    pub fn new(query: &'a [u8], target: &'a [u8], scheme: &'a ScoringScheme) -> Self {
        Self {
            query,
            target,
            scheme,
        }
    }
}

impl ScoreSource for PairScorer<'_> {
    fn rows(&self) -> usize {
        self.query.len()
    }

    fn cols(&self) -> usize {
        self.target.len()
    }

    #[inline]
    fn score(&self, i: usize, j: usize) -> i32 {
        self.scheme.score_pair(self.query[i], self.target[j])
    }

    fn gap_open(&self) -> i32 {
        self.scheme.gap_open()
    }

    fn gap_extend(&self) -> i32 {
        self.scheme.gap_extend()
    }
}

/// Scores a [`ProfileMatrix`] (rows) against a sequence (columns).
pub struct ProfileScorer<'a> {
    profile: &'a ProfileMatrix,
    target: &'a [u8],
}

impl<'a> ProfileScorer<'a> {
    pub fn new(profile: &'a ProfileMatrix, target: &'a [u8]) -> Self {
        Self { profile, target }
    }
}

impl ScoreSource for ProfileScorer<'_> {
    fn rows(&self) -> usize {
        self.profile.len()
    }

    fn cols(&self) -> usize {
        self.target.len()
    }

    #[inline]
    fn score(&self, i: usize, j: usize) -> i32 {
        self.profile.score(i, self.target[j])
    }

    fn gap_open(&self) -> i32 {
        self.profile.gap_open
    }

    fn gap_extend(&self) -> i32 {
        self.profile.gap_extend
    }
}

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

/// Reusable scratch buffers for matrix filling.
///
/// The engine holds no process-wide state: a workspace is owned by the
/// caller (or created per call by the convenience entry points) and may be
/// reused across calls to avoid reallocation. Buffers are resized on
/// demand — an undersized workspace is grown, never silently reused.
#[derive(Debug)]
pub struct DpWorkspace {
    path: Vec<i32>,
    compass: Vec<Compass>,
    vert: Vec<i32>,
    rows: usize,
    cols: usize,
    max_cells: usize,
}

impl Default for DpWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl DpWorkspace {
    /// Workspace with the default cell ceiling ([`DEFAULT_MAX_CELLS`]).
    pub fn new() -> Self {
        Self::with_cell_limit(DEFAULT_MAX_CELLS)
    }

    /// Workspace with an explicit ceiling on DP cells per fill.
    ///
    /// A fill whose `(rows+1) * (cols+1)` exceeds the ceiling fails with
    /// [`PhysaliaError::ResourceExhausted`] before allocating.
    pub fn with_cell_limit(max_cells: usize) -> Self {
        Self {
            path: Vec::new(),
            compass: Vec::new(),
            vert: Vec::new(),
            rows: 0,
            cols: 0,
            max_cells,
        }
    }

    /// The configured cell ceiling.
    pub fn cell_limit(&self) -> usize {
        self.max_cells
    }

    /// Matrix rows (including the border row) of the last fill.
    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    /// Matrix columns (including the border column) of the last fill.
    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub(crate) fn path(&self, i: usize, j: usize) -> i32 {
        self.path[i * self.cols + j]
    }

    #[inline]
    pub(crate) fn compass(&self, i: usize, j: usize) -> Compass {
        self.compass[i * self.cols + j]
    }

    /// Size the buffers for a `rows x cols` fill (border included).
    fn reserve(&mut self, rows: usize, cols: usize) -> Result<()> {
        let cells = rows
            .checked_mul(cols)
            .ok_or(PhysaliaError::ResourceExhausted {
                requested: usize::MAX,
                limit: self.max_cells,
            })?;
        if cells > self.max_cells {
            return Err(PhysaliaError::ResourceExhausted {
                requested: cells,
                limit: self.max_cells,
            });
        }
        self.path.resize(cells, 0);
        self.compass.resize(cells, Compass::Stop);
        self.vert.resize(cols, NEG_INF);
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fill
// ---------------------------------------------------------------------------

/// Fill the path and compass matrices for the given score source and mode.
///
/// Border row/column are initialised to cumulative gap cost (Global) or to
/// zero (Local). Ties between predecessors break in the fixed order
/// Diagonal, Up, Left; in Local mode a cell whose best is non-positive is
/// clamped to zero and marked [`Compass::Stop`].
///
/// # Errors
///
/// [`PhysaliaError::EmptyInput`] if either operand has zero length;
/// [`PhysaliaError::ResourceExhausted`] if the matrix would exceed the
/// workspace's cell ceiling (checked before any allocation).
pub(crate) fn fill<S: ScoreSource>(
    ws: &mut DpWorkspace,
    src: &S,
    mode: AlignmentMode,
) -> Result<()> {
    let m = src.rows();
    let n = src.cols();
    if m == 0 {
        return Err(PhysaliaError::EmptyInput("first operand".into()));
    }
    if n == 0 {
        return Err(PhysaliaError::EmptyInput("second operand".into()));
    }
    ws.reserve(m + 1, n + 1)?;

    let cols = n + 1;
    let open = src.gap_open();
    let extend = src.gap_extend();

    ws.path[0] = 0;
    ws.compass[0] = Compass::Stop;
    match mode {
        AlignmentMode::Global => {
            for i in 1..=m {
                ws.path[i * cols] = open + (i as i32 - 1) * extend;
                ws.compass[i * cols] = Compass::Up;
            }
            for j in 1..=n {
                ws.path[j] = open + (j as i32 - 1) * extend;
                ws.compass[j] = Compass::Left;
            }
        }
        AlignmentMode::Local => {
            for i in 1..=m {
                ws.path[i * cols] = 0;
                ws.compass[i * cols] = Compass::Stop;
            }
            for j in 1..=n {
                ws.path[j] = 0;
                ws.compass[j] = Compass::Stop;
            }
        }
    }

    // No vertical gap can end at the border row.
    for v in ws.vert.iter_mut() {
        *v = NEG_INF;
    }

    for i in 1..=m {
        let mut horiz = NEG_INF;
        for j in 1..=n {
            let diag = ws.path[(i - 1) * cols + j - 1] + src.score(i - 1, j - 1);
            let up = (ws.path[(i - 1) * cols + j] + open).max(ws.vert[j] + extend);
            let left = (ws.path[i * cols + j - 1] + open).max(horiz + extend);
            ws.vert[j] = up;
            horiz = left;

            // Fixed tie-break order: Diagonal, then Up, then Left.
            let mut best = diag;
            let mut dir = Compass::Diagonal;
            if up > best {
                best = up;
                dir = Compass::Up;
            }
            if left > best {
                best = left;
                dir = Compass::Left;
            }
            if mode == AlignmentMode::Local && best <= 0 {
                best = 0;
                dir = Compass::Stop;
            }
            ws.path[i * cols + j] = best;
            ws.compass[i * cols + j] = dir;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringMatrix;

    fn dna_scheme() -> ScoringScheme {
        ScoringScheme::Simple(ScoringMatrix::dna_default())
    }

    #[test]
    fn global_fill_identical_sequences() {
        let scheme = dna_scheme();
        let src = PairScorer::new(b"ACGT", b"ACGT", &scheme);
        let mut ws = DpWorkspace::new();
        fill(&mut ws, &src, AlignmentMode::Global).unwrap();

        // 4 matches * 2
        assert_eq!(ws.path(4, 4), 8);
        assert_eq!(ws.compass(4, 4), Compass::Diagonal);
        // Border initialisation: cumulative gap cost
        assert_eq!(ws.path(0, 0), 0);
        assert_eq!(ws.path(1, 0), -5);
        assert_eq!(ws.path(2, 0), -7);
        assert_eq!(ws.compass(2, 0), Compass::Up);
        assert_eq!(ws.path(0, 3), -9);
        assert_eq!(ws.compass(0, 3), Compass::Left);
    }

    #[test]
    fn local_fill_clamps_to_zero() {
        let scheme = ScoringScheme::Simple(ScoringMatrix::new(1, -4, -10, -5).unwrap());
        let src = PairScorer::new(b"AAAA", b"CCCC", &scheme);
        let mut ws = DpWorkspace::new();
        fill(&mut ws, &src, AlignmentMode::Local).unwrap();

        for i in 0..ws.rows() {
            for j in 0..ws.cols() {
                assert_eq!(ws.path(i, j), 0);
                assert_eq!(ws.compass(i, j), Compass::Stop);
            }
        }
    }

    #[test]
    fn tie_break_prefers_diagonal() {
        // A vs A with match=2: diag (2) beats any gap path, trivially
        // diagonal; the interesting case is equal-score predecessors, which
        // the walk tests exercise end-to-end via byte-identical reruns.
        let scheme = dna_scheme();
        let src = PairScorer::new(b"A", b"A", &scheme);
        let mut ws = DpWorkspace::new();
        fill(&mut ws, &src, AlignmentMode::Global).unwrap();
        assert_eq!(ws.compass(1, 1), Compass::Diagonal);
    }

    #[test]
    fn empty_input_rejected_before_allocation() {
        let scheme = dna_scheme();
        let mut ws = DpWorkspace::new();
        let src = PairScorer::new(b"", b"ACGT", &scheme);
        assert!(matches!(
            fill(&mut ws, &src, AlignmentMode::Global),
            Err(PhysaliaError::EmptyInput(_))
        ));
        assert_eq!(ws.rows(), 0, "no buffers sized for empty input");

        let src = PairScorer::new(b"ACGT", b"", &scheme);
        assert!(matches!(
            fill(&mut ws, &src, AlignmentMode::Local),
            Err(PhysaliaError::EmptyInput(_))
        ));
    }

    #[test]
    fn cell_limit_enforced() {
        let scheme = dna_scheme();
        let src = PairScorer::new(b"ACGT", b"ACGT", &scheme);
        // 5 * 5 = 25 cells needed
        let mut ws = DpWorkspace::with_cell_limit(24);
        match fill(&mut ws, &src, AlignmentMode::Global) {
            Err(PhysaliaError::ResourceExhausted { requested, limit }) => {
                assert_eq!(requested, 25);
                assert_eq!(limit, 24);
            }
            other => panic!("expected ResourceExhausted, got {other:?}"),
        }

        let mut ws = DpWorkspace::with_cell_limit(25);
        assert!(fill(&mut ws, &src, AlignmentMode::Global).is_ok());
    }

    #[test]
    fn workspace_reuse_resizes() {
        let scheme = dna_scheme();
        let mut ws = DpWorkspace::new();

        let small = PairScorer::new(b"AC", b"AC", &scheme);
        fill(&mut ws, &small, AlignmentMode::Global).unwrap();
        assert_eq!((ws.rows(), ws.cols()), (3, 3));

        let large = PairScorer::new(b"ACGTACGT", b"ACGTACGT", &scheme);
        fill(&mut ws, &large, AlignmentMode::Global).unwrap();
        assert_eq!((ws.rows(), ws.cols()), (9, 9));
        assert_eq!(ws.path(8, 8), 16);
    }

    #[test]
    fn profile_scorer_matches_profile_lookup() {
        let profile = crate::profile::tests::acgt_profile();
        let src = ProfileScorer::new(&profile, b"AGGT");
        assert_eq!(src.rows(), 4);
        assert_eq!(src.cols(), 4);
        assert_eq!(src.score(0, 0), 3); // consensus A vs A
        assert_eq!(src.score(1, 1), -2); // consensus C vs G
        assert_eq!(src.gap_open(), -5);
        assert_eq!(src.gap_extend(), -1);
    }
}
