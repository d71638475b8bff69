//! Fixed size linear algebra for the DOP calculations.
//! Only 4x4 symmetric normal matrices and 3x3 rotations are involved,
//! so we stick to plain arrays.

/// Row major 4x4 matrix
pub type Matrix4 = [[f64; 4]; 4];

/// Row major 3x3 matrix
pub type Matrix3 = [[f64; 3]; 3];

const IDENTITY4: Matrix4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Forms the normal matrix `AᵗA` from the rows of `A`
pub fn normal_matrix(rows: &[[f64; 4]]) -> Matrix4 {
    let mut n = [[0.0_f64; 4]; 4];
    for row in rows {
        for i in 0..4 {
            for j in 0..4 {
                n[i][j] += row[i] * row[j];
            }
        }
    }
    n
}

/// Inverts a 4x4 matrix by Gauss-Jordan elimination with partial pivoting.
/// Returns None when the matrix is singular (null pivot) or not finite.
pub fn invert(m: &Matrix4) -> Option<Matrix4> {
    let mut a = *m;
    let mut inv = IDENTITY4;

    for col in 0..4 {
        let pivot = (col..4)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);

        let p = a[pivot][col];
        if p == 0.0 || !p.is_finite() {
            return None;
        }

        a.swap(col, pivot);
        inv.swap(col, pivot);

        for k in 0..4 {
            a[col][k] /= p;
            inv[col][k] /= p;
        }

        for row in 0..4 {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for k in 0..4 {
                a[row][k] -= factor * a[col][k];
                inv[row][k] -= factor * inv[col][k];
            }
        }
    }

    Some(inv)
}

/// Returns the diagonal of `R.Q.Rᵗ`, `Q` being the upper left 3x3 block of `q`
pub fn rotated_diagonal(rotation: &Matrix3, q: &Matrix4) -> [f64; 3] {
    let mut diag = [0.0_f64; 3];
    for (d, r) in diag.iter_mut().zip(rotation.iter()) {
        for i in 0..3 {
            for j in 0..3 {
                *d += r[i] * q[i][j] * r[j];
            }
        }
    }
    diag
}
