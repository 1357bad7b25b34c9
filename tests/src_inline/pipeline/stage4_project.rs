use super::*;
use crate::pipeline::stage2_margins::{Prepared, prepare};
use crate::pipeline::stage3_diagonalize::{EigenSettings, fit_axes};
use approx::assert_abs_diff_eq;

const TABLE: [[f64; 3]; 4] = [
    [10.0, 2.0, 3.0],
    [4.0, 8.0, 1.0],
    [2.0, 3.0, 9.0],
    [6.0, 6.0, 6.0],
];

fn setup(n_axes: usize) -> (UsageMatrix, Prepared, AxisSet) {
    let rows: Vec<Vec<f64>> = TABLE.iter().map(|r| r.to_vec()).collect();
    let m = UsageMatrix::from_rows(&rows, 3).unwrap();
    let p = prepare(&m).unwrap();
    let axes = fit_axes(&p, n_axes, &EigenSettings::default()).unwrap();
    (m, p, axes)
}

#[test]
fn test_row_and_column_coordinates_match_reference() {
    let (m, p, axes) = setup(2);
    let coords = project(&m, &p.margins, &p.weights, &axes);
    let rows = [
        [-0.303097, -0.550190],
        [-0.470981, 0.500954],
        [0.709169, 0.052840],
        [0.041158, 0.055594],
    ];
    for (i, expected) in rows.iter().enumerate() {
        for k in 0..2 {
            assert_abs_diff_eq!(coords.rows.get(i, k), expected[k], epsilon = 1e-4);
        }
    }
    let cols = [
        [-0.339868, -0.383228],
        [-0.242152, 0.493133],
        [0.635683, -0.049394],
    ];
    for (j, expected) in cols.iter().enumerate() {
        for k in 0..2 {
            assert_abs_diff_eq!(coords.cols.get(j, k), expected[k], epsilon = 1e-4);
        }
    }
}

#[test]
fn test_row_coordinates_are_centred() {
    let (m, p, axes) = setup(2);
    let coords = project(&m, &p.margins, &p.weights, &axes);
    for k in 0..2 {
        let weighted: f64 = (0..4)
            .map(|i| p.weights.row_mass[i] * coords.rows.get(i, k))
            .sum();
        assert_abs_diff_eq!(weighted, 0.0, epsilon = 1e-10);
    }
}

#[test]
fn test_transition_formula_links_rows_to_columns() {
    let (m, p, axes) = setup(2);
    let coords = project(&m, &p.margins, &p.weights, &axes);
    for (i, row) in TABLE.iter().enumerate() {
        let total: f64 = row.iter().sum();
        for k in 0..2 {
            let via_columns: f64 = row
                .iter()
                .enumerate()
                .map(|(j, x)| x / total * coords.cols.get(j, k))
                .sum::<f64>()
                / axes.axes[k].eigenvalue.sqrt();
            assert_abs_diff_eq!(coords.rows.get(i, k), via_columns, epsilon = 1e-8);
        }
    }
}

#[test]
fn test_clamped_axis_has_zero_coordinates() {
    let (m, p, axes) = setup(3);
    assert_eq!(axes.axes[2].eigenvalue, 0.0);
    let coords = project(&m, &p.margins, &p.weights, &axes);
    for i in 0..4 {
        assert_eq!(coords.rows.get(i, 2), 0.0);
    }
    for j in 0..3 {
        assert_eq!(coords.cols.get(j, 2), 0.0);
    }
}

#[test]
fn test_profile_coordinates_scale_free() {
    let (_, p, axes) = setup(2);
    let a = profile_coordinates(&[10.0, 2.0, 3.0], 15.0, &p.weights, &axes);
    let b = profile_coordinates(&[20.0, 4.0, 6.0], 30.0, &p.weights, &axes);
    for k in 0..2 {
        assert_abs_diff_eq!(a[k], b[k], epsilon = 1e-12);
    }
}
