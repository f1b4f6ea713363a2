use exact_cover::dlx::Matrix;
use exact_cover::solver::{Solution, Solver};

fn main() {
    env_logger::init();

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

    let mut solver = Solver::new(
        &mut mat,
        |sol: &Solution| {
            println!("{sol}");
            false
        },
        true,
    );
    solver.solve();
}
