use log::trace;

use crate::error::Error;

use super::columns::{normalize, ColumnSpec};

/// A single node of the toroidal linked structure.
///
/// Header nodes and body nodes share this representation. `row` is `-1`
/// for header nodes (including the root). `col` is the pool index of the
/// owning column header; for a header node it is its own index.
#[derive(Debug, Clone, Copy)]
struct Node {
    up: usize,
    down: usize,
    left: usize,
    right: usize,
    col: usize,
    row: isize,
}

impl Node {
    fn header(idx: usize) -> Node {
        Node {
            up: idx,
            down: idx,
            left: idx,
            right: idx,
            col: idx,
            row: -1,
        }
    }
}

/// A sparse matrix representation of an exact cover problem, realized as a
/// toroidal, four-way, circularly doubly-linked structure (dancing links).
///
/// Node identities are `usize` indices into a single arena; the root
/// sentinel occupies index `0`, and the `ncols` column headers occupy
/// indices `1..=ncols`. Row (body) nodes are appended to the arena as they
/// are inserted and are never reallocated; identities are stable for the
/// lifetime of the matrix (spec §3, "Lifecycle").
#[derive(Debug)]
pub struct Matrix {
    pool: Vec<Node>,
    names: Vec<String>,
    sizes: Vec<usize>,
    is_primary: Vec<bool>,
    ncols: usize,
    nrows: usize,
    finalized: bool,
}

const ROOT: usize = 0;

impl Matrix {
    /// Creates a matrix from a column declaration.
    ///
    /// `columns` is either a nonnegative integer `n` (generating primary
    /// columns `C0..C{n-1}`) or an ordered list of column entries, each
    /// either a bare name (primary) or an explicit `(name, primary)` pair.
    /// Fails with [`Error::InvalidColumnSpec`] if two columns share a name.
    pub fn new(columns: impl Into<ColumnSpec>) -> Result<Matrix, Error> {
        let entries = normalize(columns.into());
        let ncols = entries.len();

        let mut mat = Matrix {
            pool: Vec::with_capacity(ncols + 1),
            names: Vec::with_capacity(ncols + 1),
            sizes: Vec::with_capacity(ncols + 1),
            is_primary: Vec::with_capacity(ncols + 1),
            ncols,
            nrows: 0,
            finalized: false,
        };

        mat.pool.push(Node::header(ROOT));
        mat.names.push("<root>".to_owned());
        mat.sizes.push(0);
        mat.is_primary.push(false);

        let mut prev = ROOT;
        for (name, primary) in entries {
            if mat.names.contains(&name) {
                return Err(Error::InvalidColumnSpec(format!(
                    "duplicate column name {name:?}"
                )));
            }

            let idx = mat.pool.len();
            mat.pool.push(Node::header(idx));
            mat.names.push(name);
            mat.sizes.push(0);
            mat.is_primary.push(primary);

            if primary {
                mat.pool[prev].right = idx;
                mat.pool[idx].left = prev;
                prev = idx;
            }
        }
        mat.pool[prev].right = ROOT;
        mat.pool[ROOT].left = prev;

        Ok(mat)
    }

    /// The number of declared columns (primary and secondary).
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// The number of rows inserted so far.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Adds a sparse row to the matrix.
    ///
    /// `indices` holds the column positions (`0..ncols`) of the 1s in the
    /// row. If `already_sorted` is false the indices are sorted ascending
    /// first; rows must be linked in ascending column-index order so the
    /// row ring is traversable left-to-right in that order. An empty
    /// `indices` is legal and produces a row that can never be selected.
    /// Fails with [`Error::BuilderClosed`] after [`end_add`](Self::end_add),
    /// or with [`Error::IndexOutOfRange`] if an index is `>= ncols`.
    /// Duplicate indices within one row are not checked (spec §4.2).
    pub fn add_sparse_row(&mut self, indices: &[usize], already_sorted: bool) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::BuilderClosed);
        }

        for &ind in indices {
            if ind >= self.ncols {
                return Err(Error::IndexOutOfRange {
                    index: ind,
                    ncols: self.ncols,
                });
            }
        }

        let mut sorted;
        let order: &[usize] = if already_sorted {
            indices
        } else {
            sorted = indices.to_vec();
            sorted.sort_unstable();
            &sorted
        };

        let row = self.nrows as isize;
        let mut prev: Option<usize> = None;
        let mut start: Option<usize> = None;

        for &ind in order {
            let header = ind + 1;
            let idx = self.pool.len();
            self.pool.push(Node {
                up: header,
                down: header,
                left: idx,
                right: idx,
                col: header,
                row,
            });

            let last = self.pool[header].up;
            self.pool[last].down = idx;
            self.pool[idx].up = last;
            self.pool[header].up = idx;
            self.sizes[header] += 1;

            if let Some(p) = prev {
                self.pool[p].right = idx;
                self.pool[idx].left = p;
            } else {
                start = Some(idx);
            }
            prev = Some(idx);
        }

        if let (Some(start), Some(last)) = (start, prev) {
            self.pool[last].right = start;
            self.pool[start].left = last;
        }

        self.nrows += 1;
        Ok(())
    }

    /// Idempotent finalization. After this, [`add_sparse_row`](Self::add_sparse_row) fails.
    pub fn end_add(&mut self) {
        self.finalized = true;
    }

    /// Returns the primary column header with the smallest current size,
    /// breaking ties by first-encountered order (spec §4.4).
    /// Fails with [`Error::EmptyMatrix`] if the primary header ring is empty.
    pub fn min_column(&self) -> Result<usize, Error> {
        let start = self.pool[ROOT].right;
        if start == ROOT {
            return Err(Error::EmptyMatrix);
        }

        let mut best = start;
        let mut best_size = self.sizes[start];
        let mut c = self.pool[start].right;
        while c != ROOT {
            if self.sizes[c] < best_size {
                best = c;
                best_size = self.sizes[c];
            }
            c = self.pool[c].right;
        }
        Ok(best)
    }

    /// Returns a uniformly random primary column header, using the given RNG.
    /// Fails with [`Error::EmptyMatrix`] if the primary header ring is empty.
    pub fn random_column_with(&self, rng: &mut impl rand::Rng) -> Result<usize, Error> {
        let start = self.pool[ROOT].right;
        if start == ROOT {
            return Err(Error::EmptyMatrix);
        }

        let mut live = 1;
        let mut c = self.pool[start].right;
        while c != ROOT {
            live += 1;
            c = self.pool[c].right;
        }

        let mut col = start;
        for _ in 0..rng.gen_range(0..live) {
            col = self.pool[col].right;
        }
        Ok(col)
    }

    /// Like [`random_column_with`](Self::random_column_with), using the thread-local RNG.
    pub fn random_column(&self) -> Result<usize, Error> {
        self.random_column_with(&mut rand::thread_rng())
    }

    /// Covers column `h`: unlinks it from the header ring, then removes
    /// every body node sharing a row with a node in `h`'s column from
    /// its *other* column's vertical ring. `h`'s own vertical ring is left
    /// intact so it can be walked during [`uncover`](Self::uncover).
    ///
    /// Exposed for [`crate::solver::Solver`]; not part of the user-facing
    /// contract beyond that use (spec §6).
    pub fn cover(&mut self, h: usize) {
        trace!("cover {:?}", self.names[h]);
        let (l, r) = (self.pool[h].left, self.pool[h].right);
        self.pool[l].right = r;
        self.pool[r].left = l;

        let mut i = self.pool[h].down;
        while i != h {
            let mut j = self.pool[i].right;
            while j != i {
                let (u, d, c) = (self.pool[j].up, self.pool[j].down, self.pool[j].col);
                self.pool[u].down = d;
                self.pool[d].up = u;
                self.sizes[c] -= 1;
                j = self.pool[j].right;
            }
            i = self.pool[i].down;
        }
    }

    /// The exact inverse of [`cover`](Self::cover), traversed in reverse
    /// (bottom-to-top, then right-to-left).
    pub fn uncover(&mut self, h: usize) {
        trace!("uncover {:?}", self.names[h]);
        let mut i = self.pool[h].up;
        while i != h {
            let mut j = self.pool[i].left;
            while j != i {
                let (u, d, c) = (self.pool[j].up, self.pool[j].down, self.pool[j].col);
                self.pool[u].down = j;
                self.pool[d].up = j;
                self.sizes[c] += 1;
                j = self.pool[j].left;
            }
            i = self.pool[i].up;
        }

        let (l, r) = (self.pool[h].left, self.pool[h].right);
        self.pool[l].right = h;
        self.pool[r].left = h;
    }
}

// Internal walk/accessor API used by `solver::Solver`. Not part of the
// public contract (spec §6): the solver lives in this crate and needs
// node-level access the public API doesn't expose.
impl Matrix {
    pub(crate) fn root(&self) -> usize {
        ROOT
    }

    pub(crate) fn down(&self, n: usize) -> usize {
        self.pool[n].down
    }

    pub(crate) fn up(&self, n: usize) -> usize {
        self.pool[n].up
    }

    pub(crate) fn left(&self, n: usize) -> usize {
        self.pool[n].left
    }

    pub(crate) fn right(&self, n: usize) -> usize {
        self.pool[n].right
    }

    pub(crate) fn col_of(&self, n: usize) -> usize {
        self.pool[n].col
    }

    /// The matrix-assigned row index of a body node (not a header).
    pub(crate) fn row_of(&self, n: usize) -> usize {
        debug_assert!(self.pool[n].row >= 0, "row_of called on a header node");
        self.pool[n].row as usize
    }

    pub(crate) fn header_name(&self, h: usize) -> &str {
        &self.names[h]
    }

    #[cfg(test)]
    pub(crate) fn header_size(&self, h: usize) -> usize {
        self.sizes[h]
    }

    #[cfg(test)]
    pub(crate) fn is_primary(&self, h: usize) -> bool {
        self.is_primary[h]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knuth_matrix() -> Matrix {
        let mut mat = Matrix::new(7).unwrap();
        for row in [
            vec![2, 4, 5],
            vec![0, 3, 6],
            vec![1, 2, 5],
            vec![0, 3],
            vec![1, 6],
            vec![3, 4, 6],
        ] {
            mat.add_sparse_row(&row, true).unwrap();
        }
        mat
    }

    #[test]
    fn header_ring_visits_every_primary_column_once() {
        let mat = knuth_matrix();
        let mut seen = vec![];
        let mut c = mat.right(mat.root());
        while c != mat.root() {
            seen.push(c);
            c = mat.right(c);
        }
        assert_eq!(seen.len(), 7);
        assert_eq!(seen.iter().collect::<std::collections::HashSet<_>>().len(), 7);
    }

    #[test]
    fn size_matches_vertical_ring_length() {
        let mat = knuth_matrix();
        for h in 1..=7 {
            let mut count = 0;
            let mut i = mat.down(h);
            while i != h {
                count += 1;
                i = mat.down(i);
            }
            assert_eq!(count, mat.header_size(h), "column {h}");
        }
    }

    #[test]
    fn inverse_links_hold_throughout() {
        let mat = knuth_matrix();
        for n in 0..mat.pool.len() {
            assert_eq!(mat.right(mat.left(n)), n);
            assert_eq!(mat.left(mat.right(n)), n);
            assert_eq!(mat.down(mat.up(n)), n);
            assert_eq!(mat.up(mat.down(n)), n);
        }
    }

    #[test]
    fn cover_then_uncover_is_identity() {
        let mut mat = knuth_matrix();
        let before = format!("{:?}", mat.pool);
        let before_sizes = mat.sizes.clone();

        let col = mat.min_column().unwrap();
        mat.cover(col);
        mat.uncover(col);

        assert_eq!(format!("{:?}", mat.pool), before);
        assert_eq!(mat.sizes, before_sizes);
    }

    #[test]
    fn min_column_picks_smallest_with_first_encountered_tie_break() {
        let mat = knuth_matrix();
        // A, B, C, E, F all have size 2; A is first-encountered in the ring.
        let col = mat.min_column().unwrap();
        assert_eq!(mat.header_name(col), "A");
    }

    #[test]
    fn secondary_columns_are_not_in_the_root_ring() {
        let mat = Matrix::new(vec![("A", true), ("B", false)]).unwrap();
        let mut c = mat.right(mat.root());
        let mut ring = vec![];
        while c != mat.root() {
            ring.push(mat.header_name(c).to_owned());
            c = mat.right(c);
        }
        assert_eq!(ring, vec!["A".to_owned()]);
        assert!(!mat.is_primary(2));
    }

    #[test]
    fn add_sparse_row_rejects_out_of_range_index() {
        let mut mat = Matrix::new(3).unwrap();
        assert_eq!(
            mat.add_sparse_row(&[0, 3], false),
            Err(Error::IndexOutOfRange { index: 3, ncols: 3 })
        );
    }

    #[test]
    fn add_sparse_row_fails_after_end_add() {
        let mut mat = Matrix::new(3).unwrap();
        mat.end_add();
        assert_eq!(mat.add_sparse_row(&[0], false), Err(Error::BuilderClosed));
    }

    #[test]
    fn end_add_is_idempotent() {
        let mut mat = Matrix::new(1).unwrap();
        mat.end_add();
        mat.end_add();
        assert_eq!(mat.add_sparse_row(&[0], false), Err(Error::BuilderClosed));
    }

    #[test]
    fn duplicate_column_names_are_rejected() {
        assert!(matches!(
            Matrix::new(vec!["A", "A"]),
            Err(Error::InvalidColumnSpec(_))
        ));
    }

    #[test]
    fn empty_row_is_legal_and_inert() {
        let mut mat = Matrix::new(2).unwrap();
        mat.add_sparse_row(&[], false).unwrap();
        assert_eq!(mat.nrows(), 1);
        assert_eq!(mat.header_size(1), 0);
        assert_eq!(mat.header_size(2), 0);
    }

    #[test]
    fn min_column_on_matrix_with_no_rows_returns_zero_size_header() {
        let mat = Matrix::new(3).unwrap();
        let col = mat.min_column().unwrap();
        assert_eq!(mat.header_size(col), 0);
    }

    #[test]
    fn selectors_fail_on_empty_primary_ring() {
        let mat = Matrix::new(vec![("S", false)]).unwrap();
        assert_eq!(mat.min_column(), Err(Error::EmptyMatrix));
        assert_eq!(mat.random_column(), Err(Error::EmptyMatrix));
    }

    #[test]
    fn random_column_with_seeded_rng_is_reproducible() {
        use rand::{rngs::StdRng, SeedableRng};

        let mat = knuth_matrix();
        let pick_sequence = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..5)
                .map(|_| mat.random_column_with(&mut rng).unwrap())
                .collect::<Vec<_>>()
        };

        assert_eq!(pick_sequence(42), pick_sequence(42));
    }
}
