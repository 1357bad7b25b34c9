use super::*;
use crate::model::matrix::{UsageMatrix, dot};
use crate::pipeline::stage2_margins::prepare;
use approx::assert_abs_diff_eq;

fn sym(rows: &[&[f64]]) -> SymMatrix {
    let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
    SymMatrix::from_rows(&rows)
}

fn prepared(rows: &[&[f64]]) -> Prepared {
    let n_cols = rows[0].len();
    let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
    prepare(&UsageMatrix::from_rows(&rows, n_cols).unwrap()).unwrap()
}

#[test]
fn test_jacobi_diagonal_input_is_sorted() {
    let m = sym(&[&[1.0, 0.0, 0.0], &[0.0, 3.0, 0.0], &[0.0, 0.0, 2.0]]);
    let eig = jacobi_eigen(&m, &EigenSettings::default()).unwrap();
    assert_eq!(eig.values, vec![3.0, 2.0, 1.0]);
    assert_eq!(eig.sweeps, 0);
    assert_eq!(eig.vector(0), vec![0.0, 1.0, 0.0]);
}

#[test]
fn test_jacobi_two_by_two() {
    let m = sym(&[&[2.0, 1.0], &[1.0, 2.0]]);
    let eig = jacobi_eigen(&m, &EigenSettings::default()).unwrap();
    assert_abs_diff_eq!(eig.values[0], 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(eig.values[1], 1.0, epsilon = 1e-12);
    let v0 = eig.vector(0);
    assert_abs_diff_eq!(v0[0].abs(), 0.5f64.sqrt(), epsilon = 1e-12);
    assert_abs_diff_eq!(v0[0], v0[1], epsilon = 1e-12);
}

#[test]
fn test_jacobi_eigenvectors_orthonormal_and_oriented() {
    let m = sym(&[
        &[4.0, 1.0, -2.0, 2.0],
        &[1.0, 2.0, 0.0, 1.0],
        &[-2.0, 0.0, 3.0, -2.0],
        &[2.0, 1.0, -2.0, 5.0],
    ]);
    let eig = jacobi_eigen(&m, &EigenSettings::default()).unwrap();
    assert_abs_diff_eq!(eig.values.iter().sum::<f64>(), m.trace(), epsilon = 1e-9);
    for w in eig.values.windows(2) {
        assert!(w[0] >= w[1]);
    }
    for a in 0..4 {
        let va = eig.vector(a);
        let (big, _) = va
            .iter()
            .enumerate()
            .fold((0, 0.0f64), |acc, (i, x)| if x.abs() > acc.1 { (i, x.abs()) } else { acc });
        assert!(va[big] > 0.0);
        for b in 0..4 {
            let expected = if a == b { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(dot(&va, &eig.vector(b)), expected, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_jacobi_clamps_tiny_negative_eigenvalues() {
    // rank one: eigenvalues 2 and 0
    let m = sym(&[&[1.0, 1.0], &[1.0, 1.0]]);
    let eig = jacobi_eigen(&m, &EigenSettings::default()).unwrap();
    assert_abs_diff_eq!(eig.values[0], 2.0, epsilon = 1e-12);
    assert!(eig.values[1] >= 0.0);
    assert_abs_diff_eq!(eig.values[1], 0.0, epsilon = 1e-12);
}

#[test]
fn test_jacobi_reports_non_convergence() {
    let m = sym(&[&[2.0, 1.0], &[1.0, 2.0]]);
    let settings = EigenSettings {
        max_sweeps: 0,
        ..EigenSettings::default()
    };
    let err = jacobi_eigen(&m, &settings).unwrap_err();
    assert!(matches!(err, CoaError::NonConvergence { sweeps: 0, .. }));
}

#[test]
fn test_orient_flips_on_negative_peak() {
    let mut v = vec![0.2, -0.9, 0.3];
    orient(&mut v);
    assert_eq!(v, vec![-0.2, 0.9, -0.3]);
    let mut tie = vec![-0.5, 0.5];
    orient(&mut tie);
    assert_eq!(tie, vec![0.5, -0.5]);
}

#[test]
fn test_max_axes() {
    assert_eq!(max_axes(4, 3), 2);
    assert_eq!(max_axes(100, 59), 58);
    assert_eq!(max_axes(1, 5), 0);
}

#[test]
fn test_fit_axes_variable_side() {
    let p = prepared(&[&[10.0, 2.0, 3.0], &[4.0, 8.0, 1.0], &[2.0, 3.0, 9.0], &[6.0, 6.0, 6.0]]);
    let axes = fit_axes(&p, 2, &EigenSettings::default()).unwrap();
    assert_eq!(axes.side, Side::Variables);
    assert_eq!(axes.len(), 2);
    assert_eq!(axes.spectrum.len(), 3);
    assert_abs_diff_eq!(axes.total_inertia(), axes.cross_product_trace, epsilon = 1e-12);
    assert_abs_diff_eq!(axes.axes[0].eigenvalue, 0.188884921, epsilon = 1e-6);
    assert_abs_diff_eq!(axes.axes[1].eigenvalue, 0.131629652, epsilon = 1e-6);
    assert_eq!(axes.spectrum[2], 0.0);
}

#[test]
fn test_fit_axes_gene_side_matches_transpose() {
    let by_genes = prepared(&[&[10.0, 2.0, 3.0], &[4.0, 8.0, 1.0], &[2.0, 3.0, 9.0], &[6.0, 6.0, 6.0]]);
    let by_vars = prepared(&[&[10.0, 4.0, 2.0, 6.0], &[2.0, 8.0, 3.0, 6.0], &[3.0, 1.0, 9.0, 6.0]]);
    let a = fit_axes(&by_genes, 2, &EigenSettings::default()).unwrap();
    let b = fit_axes(&by_vars, 2, &EigenSettings::default()).unwrap();
    assert_eq!(b.side, Side::Genes);
    for k in 0..2 {
        assert_abs_diff_eq!(a.axes[k].eigenvalue, b.axes[k].eigenvalue, epsilon = 1e-9);
        let v = &b.axes[k].vector;
        assert_eq!(v.len(), 4);
        assert_abs_diff_eq!(dot(v, v), 1.0, epsilon = 1e-8);
    }
    assert_abs_diff_eq!(dot(&b.axes[0].vector, &b.axes[1].vector), 0.0, epsilon = 1e-8);
}
