//! Small statistics toolkit: mean, least-squares line, and the Student-t
//! p-value needed to report a regression the way `scipy.stats.linregress`
//! does.

use serde::Serialize;

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Result of an ordinary least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub r_value: f64,
    /// Two-sided p-value for the null hypothesis `slope == 0`.
    pub p_value: f64,
    /// Standard error of the slope.
    pub std_err: f64,
    /// Number of (x, y) pairs used.
    pub samples: usize,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through the paired samples.
///
/// Returns `None` when there are fewer than two pairs or when every `x` is
/// identical (the slope is undefined).
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Option<Regression> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let x_mean = mean(xs)?;
    let y_mean = mean(ys)?;

    let mut ssxm = 0.0;
    let mut ssym = 0.0;
    let mut ssxym = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        ssxm += dx * dx;
        ssym += dy * dy;
        ssxym += dx * dy;
    }
    if ssxm == 0.0 {
        return None;
    }

    let slope = ssxym / ssxm;
    let intercept = y_mean - slope * x_mean;

    let r = if ssym == 0.0 {
        0.0
    } else {
        (ssxym / (ssxm * ssym).sqrt()).clamp(-1.0, 1.0)
    };

    let df = (n - 2) as f64;
    let (p_value, std_err) = if n == 2 {
        // A line through two points fits exactly.
        (0.0, 0.0)
    } else if 1.0 - r * r <= f64::EPSILON {
        (0.0, 0.0)
    } else {
        let t = r * (df / ((1.0 - r) * (1.0 + r))).sqrt();
        let p = students_t_two_sided(t, df);
        let se = ((1.0 - r * r) * ssym / ssxm / df).sqrt();
        (p, se)
    };

    Some(Regression {
        slope,
        intercept,
        r_value: r,
        p_value,
        std_err,
        samples: n,
    })
}

/// Two-sided tail probability `P(|T| >= |t|)` for Student's t with `df`
/// degrees of freedom.
pub fn students_t_two_sided(t: f64, df: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    let x = df / (df + t * t);
    regularized_incomplete_beta(df / 2.0, 0.5, x).clamp(0.0, 1.0)
}

/// I_x(a, b) via the continued fraction expansion (Lentz's method).
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 300;
    const EPS: f64 = 1e-15;
    const TINY: f64 = 1e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < TINY {
        d = TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;
        if (del - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

/// Lanczos approximation (g = 7, n = 9).
fn ln_gamma(x: f64) -> f64 {
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    if x < 0.5 {
        // Reflection formula.
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let mut sum = COEFFS[0];
    for (i, c) in COEFFS.iter().enumerate().skip(1) {
        sum += c / (x + i as f64);
    }
    let t = x + 7.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + sum.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn ln_gamma_matches_factorials() {
        assert!(close(ln_gamma(1.0), 0.0, 1e-12));
        assert!(close(ln_gamma(5.0), 24f64.ln(), 1e-10));
        assert!(close(ln_gamma(0.5), std::f64::consts::PI.sqrt().ln(), 1e-10));
    }

    #[test]
    fn t_distribution_reference_values() {
        // df = 1 is the Cauchy distribution: P(|T| >= 1) = 0.5.
        assert!(close(students_t_two_sided(1.0, 1.0), 0.5, 1e-9));
        // Critical value t = 2.228 at df = 10 gives p ≈ 0.05.
        assert!(close(students_t_two_sided(2.228_138_85, 10.0), 0.05, 1e-6));
        assert!(close(students_t_two_sided(0.0, 7.0), 1.0, 1e-12));
    }

    #[test]
    fn exact_line_has_unit_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x - 2.0).collect();
        let reg = linear_regression(&xs, &ys).unwrap();
        assert!(close(reg.slope, 3.0, 1e-12));
        assert!(close(reg.intercept, -2.0, 1e-12));
        assert!(close(reg.r_value, 1.0, 1e-12));
        assert!(reg.p_value < 1e-12);
        assert_eq!(reg.samples, 5);
        assert!(close(reg.predict(10.0), 28.0, 1e-9));
    }

    #[test]
    fn noisy_line_reference_values() {
        // df = 3 has a closed-form t CDF to check the p-value against.
        let reg = linear_regression(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0]).unwrap();
        assert!(close(reg.slope, 0.6, 1e-12));
        assert!(close(reg.intercept, 2.2, 1e-12));
        assert!(close(reg.r_value, 0.774_596_669_241_483_4, 1e-12));
        assert!(close(reg.p_value, 0.124_027_062_657_554_6, 1e-9));
        assert!(close(reg.std_err, 0.282_842_712_474_619, 1e-12));
    }

    #[test]
    fn degenerate_inputs() {
        assert!(linear_regression(&[1.0], &[2.0]).is_none());
        assert!(linear_regression(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
        let flat_y = linear_regression(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(flat_y.slope, 0.0);
        assert_eq!(flat_y.r_value, 0.0);
    }
}
