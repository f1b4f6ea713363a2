//! Algorithm X: a depth-first exact-cover search over a [`Matrix`] (spec §4.5).

use std::fmt;

use log::{debug, trace};
use rand::rngs::ThreadRng;

use crate::dlx::Matrix;
use crate::error::Error;

/// A solution: matrix-assigned row index → the ordered column names that
/// row covers (spec §4.6). Order reflects the physical ring traversal
/// starting at the column selected for that row, not necessarily
/// ascending column index; tests should treat membership, not order, as
/// the semantic (spec §4.6).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution(std::collections::BTreeMap<usize, Vec<String>>);

impl Solution {
    /// Rows in this solution, in ascending row-index order.
    pub fn rows(&self) -> impl Iterator<Item = (&usize, &Vec<String>)> {
        self.0.iter()
    }

    /// The column names covered by a given row, if that row is part of this solution.
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.0.get(&row).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cols) in &self.0 {
            writeln!(f, "row {row}: {}", cols.join(", "))?;
        }
        Ok(())
    }
}

/// A callback invoked once per solution found during search.
///
/// Receives a read-only snapshot of the solution (spec §5: the matrix is
/// in a partially covered state while this runs; implementors must not
/// retain the mapping without copying it and must not call any mutating
/// method on the matrix used by the solver). Returns `true` to request
/// early termination, `false` to continue the search.
pub trait Callback {
    fn on_solution(&mut self, solution: &Solution) -> bool;
}

impl<F> Callback for F
where
    F: FnMut(&Solution) -> bool,
{
    fn on_solution(&mut self, solution: &Solution) -> bool {
        self(solution)
    }
}

/// Drives an Algorithm X search over a borrowed [`Matrix`].
///
/// Binds a matrix, a callback, and a column-selection mode the way the
/// teacher's `Matrix::solve(&mut impl Callback)` binds a callback to an
/// owned matrix; here the matrix is borrowed so the caller retains
/// ownership across (and after) the search.
///
/// `R` is the RNG type used by the random selector, mirroring
/// [`Matrix::random_column_with`](crate::dlx::Matrix::random_column_with)'s
/// `impl rand::Rng` bound. [`Solver::new`] fixes it to
/// [`ThreadRng`](rand::rngs::ThreadRng), the thread-local source used for
/// `choose_min = false` without an explicit RNG. [`Solver::with_rng`] is
/// generic over any `R: rand::Rng`, so a caller can pass a seeded
/// `rand::rngs::StdRng` (via `SeedableRng::seed_from_u64` or similar) to get
/// a reproducible column sequence; `ThreadRng` itself has no public seeding
/// constructor and can't be used this way.
pub struct Solver<'m, C: Callback, R: rand::Rng = ThreadRng> {
    mat: &'m mut Matrix,
    callback: C,
    choose_min: bool,
    rng: Option<R>,
    stack: Vec<usize>,
    stop: bool,
}

impl<'m, C: Callback> Solver<'m, C, ThreadRng> {
    /// Creates a solver bound to `mat` and `callback`. When `choose_min` is
    /// true the min-size heuristic picks each branching column; otherwise
    /// the thread-local random selector is used.
    pub fn new(mat: &'m mut Matrix, callback: C, choose_min: bool) -> Solver<'m, C, ThreadRng> {
        Solver {
            mat,
            callback,
            choose_min,
            rng: None,
            stack: Vec::new(),
            stop: false,
        }
    }
}

impl<'m, C: Callback, R: rand::Rng> Solver<'m, C, R> {
    /// Like [`new`](Self::new), but random column choices are drawn from a
    /// caller-supplied RNG (any `R: rand::Rng`, e.g. a seeded
    /// `rand::rngs::StdRng`) rather than the thread-local one, for
    /// deterministic tests (spec §4.4, §8 "Determinism").
    pub fn with_rng(mat: &'m mut Matrix, callback: C, rng: R) -> Solver<'m, C, R> {
        Solver {
            mat,
            callback,
            choose_min: false,
            rng: Some(rng),
            stack: Vec::new(),
            stop: false,
        }
    }

    /// Runs `search(0)` to completion (or until the callback requests a stop).
    ///
    /// On early stop the search performs a full unwind before returning
    /// (spec §5 option b): every cover it performed is matched with an
    /// uncover, so the matrix is left in its pre-search state regardless
    /// of whether the callback ever returns true.
    pub fn solve(&mut self) {
        self.stop = false;
        self.search(0);
    }

    fn choose_column(&mut self) -> Result<usize, Error> {
        if self.choose_min {
            self.mat.min_column()
        } else if let Some(rng) = &mut self.rng {
            self.mat.random_column_with(rng)
        } else {
            self.mat.random_column()
        }
    }

    fn search(&mut self, k: usize) {
        let root = self.mat.root();
        if self.mat.right(root) == root {
            let solution = self.project(k);
            trace!("solution at depth {k}: {} rows", solution.len());
            if self.callback.on_solution(&solution) {
                self.stop = true;
            }
            return;
        }

        let h = match self.choose_column() {
            Ok(h) => h,
            Err(_) => return,
        };
        debug!("search depth {k}: branching on {:?}", self.mat.header_name(h));

        self.mat.cover(h);

        let mut r = self.mat.down(h);
        while r != h {
            let next = self.mat.down(r);

            if self.stack.len() <= k {
                self.stack.push(r);
            } else {
                self.stack[k] = r;
            }

            let mut j = self.mat.right(r);
            while j != r {
                self.mat.cover(self.mat.col_of(j));
                j = self.mat.right(j);
            }

            self.search(k + 1);

            // Unwind unconditionally, even if `stop` was just set: a full
            // unwind on abort leaves the matrix restored either way
            // (spec §5 option b).
            let mut j = self.mat.left(r);
            while j != r {
                self.mat.uncover(self.mat.col_of(j));
                j = self.mat.left(j);
            }

            if self.stop {
                break;
            }
            r = next;
        }

        self.mat.uncover(h);
    }

    /// Builds the row-index → column-name mapping for the solution at
    /// stack depth `k` (spec §4.6).
    fn project(&self, k: usize) -> Solution {
        let mut rows = std::collections::BTreeMap::new();
        for &r in self.stack.iter().take(k) {
            let mut names = vec![self.mat.header_name(self.mat.col_of(r)).to_owned()];
            let mut j = self.mat.right(r);
            while j != r {
                names.push(self.mat.header_name(self.mat.col_of(j)).to_owned());
                j = self.mat.right(j);
            }
            rows.insert(self.mat.row_of(r), names);
        }
        Solution(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dlx::Matrix;

    fn knuth_matrix() -> Matrix {
        let mut mat = Matrix::new(vec!["A", "B", "C", "D", "E", "F", "G"]).unwrap();
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
        mat.end_add();
        mat
    }

    #[test]
    fn knuths_example_has_exactly_one_solution() {
        let mut mat = knuth_matrix();
        let mut solutions = vec![];
        let mut solver = Solver::new(&mut mat, |sol: &Solution| {
            solutions.push(sol.clone());
            false
        }, true);
        solver.solve();

        assert_eq!(solutions.len(), 1);
        let rows: std::collections::BTreeSet<_> = solutions[0].rows().map(|(r, _)| *r).collect();
        assert_eq!(rows, std::collections::BTreeSet::from([0, 3, 4]));

        let names: std::collections::BTreeSet<String> = solutions[0]
            .rows()
            .flat_map(|(_, cols)| cols.iter().cloned())
            .collect();
        assert_eq!(
            names,
            ["A", "B", "C", "D", "E", "F", "G"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        );
    }

    #[test]
    fn stop_after_first_leaves_matrix_fully_restored() {
        let mut mat = knuth_matrix();
        let before = format!("{mat:?}");

        let mut solver = Solver::new(&mut mat, |_: &Solution| true, true);
        solver.solve();

        assert_eq!(format!("{mat:?}"), before);
    }

    #[test]
    fn empty_matrix_yields_one_trivial_solution() {
        let mut mat = Matrix::new(0).unwrap();
        mat.end_add();
        let mut count = 0;
        let mut solver = Solver::new(&mut mat, |_: &Solution| {
            count += 1;
            false
        }, true);
        solver.solve();
        assert_eq!(count, 1);
    }

    #[test]
    fn unsatisfiable_matrix_yields_no_solution() {
        let mut mat = Matrix::new(1).unwrap();
        mat.add_sparse_row(&[], false).unwrap();
        mat.end_add();
        let mut count = 0;
        let mut solver = Solver::new(&mut mat, |_: &Solution| {
            count += 1;
            false
        }, true);
        solver.solve();
        assert_eq!(count, 0);
    }

    #[test]
    fn random_selector_with_seeded_rng_finds_the_unique_solution() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut mat = knuth_matrix();
        let mut solutions = vec![];
        let mut solver = Solver::with_rng(
            &mut mat,
            |sol: &Solution| {
                solutions.push(sol.clone());
                false
            },
            StdRng::seed_from_u64(42),
        );
        solver.solve();

        assert_eq!(solutions.len(), 1);
        let rows: std::collections::BTreeSet<_> = solutions[0].rows().map(|(r, _)| *r).collect();
        assert_eq!(rows, std::collections::BTreeSet::from([0, 3, 4]));
    }

    #[test]
    fn random_selector_with_seeded_rng_is_reproducible() {
        use rand::{rngs::StdRng, SeedableRng};

        let run = || {
            let mut mat = knuth_matrix();
            let mut rows_seen = vec![];
            let mut solver = Solver::with_rng(
                &mut mat,
                |sol: &Solution| {
                    rows_seen.push(sol.rows().map(|(r, _)| *r).collect::<Vec<_>>());
                    false
                },
                StdRng::seed_from_u64(7),
            );
            solver.solve();
            rows_seen
        };

        assert_eq!(run(), run());
    }
}
