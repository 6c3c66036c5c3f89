// ─────────────────────────────────────────────────────────────────────
// QCPIC — Dense Linear Algebra
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! Dense LU with partial pivoting, sized for the small (Nr × Nr) systems
//! of the Hankel-transform setup.

use ndarray::Array2;
use qcpic_types::error::{PicError, PicResult};

/// LU factorization with partial pivoting.
///
/// On return `a` holds L (unit diagonal, below) and U (on/above the
/// diagonal); `perm[k]` is the pivot row chosen at step k.
pub fn lu_decompose(a: &mut Array2<f64>, perm: &mut [usize]) -> PicResult<()> {
    let n = a.nrows();
    if a.ncols() != n || perm.len() != n {
        return Err(PicError::LinAlg(format!(
            "LU requires a square system, got {}x{}",
            a.nrows(),
            a.ncols()
        )));
    }
    for k in 0..n {
        // Pivot search in column k.
        let mut p = k;
        let mut max = a[[k, k]].abs();
        for i in (k + 1)..n {
            if a[[i, k]].abs() > max {
                max = a[[i, k]].abs();
                p = i;
            }
        }
        if max == 0.0 {
            return Err(PicError::LinAlg(format!(
                "singular matrix at elimination step {k}"
            )));
        }
        perm[k] = p;
        if p != k {
            for j in 0..n {
                let tmp = a[[k, j]];
                a[[k, j]] = a[[p, j]];
                a[[p, j]] = tmp;
            }
        }
        let pivot = a[[k, k]];
        for i in (k + 1)..n {
            let factor = a[[i, k]] / pivot;
            a[[i, k]] = factor;
            for j in (k + 1)..n {
                a[[i, j]] -= factor * a[[k, j]];
            }
        }
    }
    Ok(())
}

/// Solve L·U·x = P·b in place, given the output of [`lu_decompose`].
pub fn lu_solve(lu: &Array2<f64>, perm: &[usize], b: &mut [f64]) {
    let n = lu.nrows();
    for k in 0..n {
        b.swap(k, perm[k]);
    }
    // Forward substitution (L has unit diagonal).
    for i in 1..n {
        let mut s = b[i];
        for j in 0..i {
            s -= lu[[i, j]] * b[j];
        }
        b[i] = s;
    }
    // Back substitution.
    for i in (0..n).rev() {
        let mut s = b[i];
        for j in (i + 1)..n {
            s -= lu[[i, j]] * b[j];
        }
        b[i] = s / lu[[i, i]];
    }
}

/// Matrix inverse via LU, column by column.
pub fn invert(a: &Array2<f64>) -> PicResult<Array2<f64>> {
    let n = a.nrows();
    let mut lu = a.clone();
    let mut perm = vec![0usize; n];
    lu_decompose(&mut lu, &mut perm)?;
    let mut inv = Array2::zeros((n, n));
    let mut col = vec![0.0; n];
    for j in 0..n {
        col.iter_mut().for_each(|v| *v = 0.0);
        col[j] = 1.0;
        lu_solve(&lu, &perm, &mut col);
        for i in 0..n {
            inv[[i, j]] = col[i];
        }
    }
    Ok(inv)
}
