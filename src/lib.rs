//! An exact cover solver library using Knuth's Algorithm X over a dancing
//! links (DLX) sparse matrix.
//!
//! [`dlx::Matrix`] is the toroidal, four-way circularly linked sparse
//! matrix: callers declare columns, insert sparse rows, and finalize the
//! builder. [`solver::Solver`] runs the depth-first exact-cover search over
//! a finalized matrix, delivering each solution to a [`solver::Callback`].
//!
//! Problem-specific encoders (N-Queens, Sudoku) are not part of the core.
//! They are ordinary consumers of the public `Matrix`/`Solver` API, kept in
//! [`problems`].
//!
//! ```
//! use exact_cover::dlx::Matrix;
//! use exact_cover::solver::{Solution, Solver};
//!
//! let mut mat = Matrix::new(vec!["A", "B", "C", "D", "E", "F", "G"]).unwrap();
//! for row in [
//!     vec![2, 4, 5],
//!     vec![0, 3, 6],
//!     vec![1, 2, 5],
//!     vec![0, 3],
//!     vec![1, 6],
//!     vec![3, 4, 6],
//! ] {
//!     mat.add_sparse_row(&row, true).unwrap();
//! }
//! mat.end_add();
//!
//! let mut solutions = vec![];
//! let mut solver = Solver::new(&mut mat, |sol: &Solution| {
//!     solutions.push(sol.clone());
//!     false
//! }, true);
//! solver.solve();
//! assert_eq!(solutions.len(), 1);
//! ```

pub mod dlx;
pub mod error;
pub mod problems;
pub mod solver;

pub use error::Error;
