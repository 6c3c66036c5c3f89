// ─────────────────────────────────────────────────────────────────────
// QCPIC — Bessel Functions
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! Bessel functions of the first kind and their zeros.
//!
//! J0/J1 use the classic rational approximations (Abramowitz & Stegun
//! 9.4.1-9.4.6, ~1e-8 absolute accuracy), higher orders use upward
//! recurrence where it is stable (x > n) and Miller's normalized downward
//! recurrence otherwise. Zeros are located by Newton iteration seeded with
//! McMahon's asymptotic expansion.

use ndarray::Array1;

/// J0(x).
pub fn bessel_j0(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        let num = 57568490574.0
            + y * (-13362590354.0
                + y * (651619640.7
                    + y * (-11214424.18 + y * (77392.33017 + y * (-184.9052456)))));
        let den = 57568490411.0
            + y * (1029532985.0
                + y * (9494680.718 + y * (59272.64853 + y * (267.8532712 + y))));
        num / den
    } else {
        let z = 8.0 / ax;
        let y = z * z;
        let xx = ax - 0.785398164;
        let p0 = 1.0
            + y * (-0.1098628627e-2
                + y * (0.2734510407e-4 + y * (-0.2073370639e-5 + y * 0.2093887211e-6)));
        let q0 = -0.1562499995e-1
            + y * (0.1430488765e-3
                + y * (-0.6911147651e-5 + y * (0.7621095161e-6 + y * (-0.934935152e-7))));
        (0.636619772 / ax).sqrt() * (xx.cos() * p0 - z * xx.sin() * q0)
    }
}

/// J1(x).
pub fn bessel_j1(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        let num = x
            * (72362614232.0
                + y * (-7895059235.0
                    + y * (242396853.1
                        + y * (-2972611.439 + y * (15704.48260 + y * (-30.16036606))))));
        let den = 144725228442.0
            + y * (2300535178.0
                + y * (18583304.74 + y * (99447.43394 + y * (376.9991397 + y))));
        num / den
    } else {
        let z = 8.0 / ax;
        let y = z * z;
        let xx = ax - 2.356194491;
        let p1 = 1.0
            + y * (0.183105e-2
                + y * (-0.3516396496e-4 + y * (0.2457520174e-5 + y * (-0.240337019e-6))));
        let q1 = 0.04687499995
            + y * (-0.2002690873e-3
                + y * (0.8449199096e-5 + y * (-0.88228987e-6 + y * 0.105787412e-6)));
        let ans = (0.636619772 / ax).sqrt() * (xx.cos() * p1 - z * xx.sin() * q1);
        if x < 0.0 {
            -ans
        } else {
            ans
        }
    }
}

/// J_n(x) for any integer order.
///
/// Negative orders and arguments reflect via J_{-n}(x) = (-1)^n J_n(x) and
/// J_n(-x) = (-1)^n J_n(x).
pub fn bessel_jn(n: i32, x: f64) -> f64 {
    if n < 0 {
        let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
        return sign * bessel_jn(-n, x);
    }
    if x < 0.0 {
        let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
        return sign * bessel_jn(n, -x);
    }
    match n {
        0 => bessel_j0(x),
        1 => bessel_j1(x),
        _ => bessel_jn_pos(n as usize, x),
    }
}

/// n >= 2, x >= 0.
fn bessel_jn_pos(n: usize, x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    if x > n as f64 {
        // Upward recurrence: J_{k+1} = (2k/x) J_k - J_{k-1}.
        let two_over_x = 2.0 / x;
        let mut jm = bessel_j0(x);
        let mut j = bessel_j1(x);
        for k in 1..n {
            let jp = k as f64 * two_over_x * j - jm;
            jm = j;
            j = jp;
        }
        j
    } else {
        // Miller's algorithm: downward recurrence from well above n,
        // normalized with J0 + 2*sum_k J_{2k} = 1.
        const ACC: f64 = 160.0;
        const BIG: f64 = 1.0e10;
        let two_over_x = 2.0 / x;
        let start = 2 * ((n + (ACC * n as f64).sqrt() as usize) / 2) + 2;
        let mut jp = 0.0_f64;
        let mut j = 1.0e-30_f64;
        let mut sum = 0.0_f64;
        let mut ans = 0.0_f64;
        for k in (1..=start).rev() {
            let jm = k as f64 * two_over_x * j - jp;
            jp = j;
            j = jm;
            if j.abs() > BIG {
                j /= BIG;
                jp /= BIG;
                ans /= BIG;
                sum /= BIG;
            }
            if k % 2 == 0 {
                sum += j;
            }
            if k == n {
                ans = jp;
            }
        }
        sum = 2.0 * sum - j;
        ans / sum
    }
}

/// Derivative J_n'(x) = (J_{n-1}(x) - J_{n+1}(x)) / 2.
pub fn bessel_jn_prime(n: i32, x: f64) -> f64 {
    0.5 * (bessel_jn(n - 1, x) - bessel_jn(n + 1, x))
}

/// First `k` positive zeros of J_m.
///
/// McMahon's expansion seeds a Newton iteration; for the orders used here
/// (m <= Nm + 1, small) the seed lands within the correct bracket for
/// every zero index.
pub fn bessel_zeros(m: usize, k: usize) -> Array1<f64> {
    let mut zeros = Array1::zeros(k);
    let mu = 4.0 * (m as f64) * (m as f64);
    for l in 1..=k {
        let beta = (l as f64 + 0.5 * m as f64 - 0.25) * std::f64::consts::PI;
        // McMahon, first two correction terms.
        let mut x = beta - (mu - 1.0) / (8.0 * beta)
            - 4.0 * (mu - 1.0) * (7.0 * mu - 31.0) / (3.0 * (8.0 * beta).powi(3));
        for _ in 0..50 {
            let f = bessel_jn(m as i32, x);
            let fp = bessel_jn_prime(m as i32, x);
            let step = f / fp;
            x -= step;
            if step.abs() < 1e-14 * x {
                break;
            }
        }
        zeros[l - 1] = x;
    }
    zeros
}
