//! Modified Bessel functions of the second kind and the kinetic moment
//! integral of a Boltzmann gas.
//!
//! Both use the rapidity representation `p = m sinh t`, where the integrand
//! decays like `exp(-z cosh t)`. The trapezoid rule is spectrally accurate for
//! such integrands, so a fixed node count is enough everywhere the gas is
//! evaluated (z is bounded below by the thermal mass ratio).

/// Cut the rapidity integral where the weight has fallen by e^-40.
const WEIGHT_E_FOLDS: f64 = 40.0;

fn rapidity_cutoff(z: f64) -> f64 {
    (1.0 + WEIGHT_E_FOLDS / z).acosh()
}

fn trapezoid(z: f64, nodes: usize, f: impl Fn(f64) -> f64) -> f64 {
    let t_max = rapidity_cutoff(z);
    let h = t_max / nodes as f64;
    let mut sum = 0.5 * (f(0.0) * (-z).exp() + f(t_max) * (-z * t_max.cosh()).exp());
    for i in 1..nodes {
        let t = i as f64 * h;
        sum += f(t) * (-z * t.cosh()).exp();
    }
    sum * h
}

/// `K_n(z) = int_0^inf exp(-z cosh t) cosh(n t) dt`, for `z > 0`.
pub fn bessel_k(n: u32, z: f64) -> f64 {
    debug_assert!(z > 0.0);
    let n = n as f64;
    trapezoid(z, 240, |t| (n * t).cosh())
}

/// `int_0^inf sinh^6 t / cosh t exp(-z cosh t) dt`.
///
/// With `m^5` in front this is `int dp p^6 / E^2 exp(-E/T)`, the momentum
/// integral behind the shear coefficient `I_42^(1)`.
pub fn shear_moment(z: f64) -> f64 {
    debug_assert!(z > 0.0);
    trapezoid(z, 480, |t| t.sinh().powi(6) / t.cosh())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_tabulated_values() {
        // Abramowitz & Stegun, table 9.8
        assert!((bessel_k(0, 1.0) - 0.421_024_438_2).abs() < 1e-9);
        assert!((bessel_k(1, 1.0) - 0.601_907_230_2).abs() < 1e-9);
        assert!((bessel_k(1, 2.0) - 0.139_865_881_8).abs() < 1e-9);
    }

    #[test]
    fn recurrence_holds() {
        // K_{n+1}(z) = K_{n-1}(z) + (2n/z) K_n(z)
        for z in [0.5, 1.0, 2.5, 6.0] {
            let k1 = bessel_k(1, z);
            let k2 = bessel_k(2, z);
            let k3 = bessel_k(3, z);
            assert!((k3 - (k1 + 4.0 / z * k2)).abs() < 1e-9 * k3);
        }
    }

    #[test]
    fn shear_moment_massless_limit() {
        // m^5 J(m/T) -> 24 T^5 as m -> 0
        let z: f64 = 1e-3;
        let t = 1.0;
        let m = z * t;
        let approx = m.powi(5) * shear_moment(z);
        assert!((approx - 24.0).abs() / 24.0 < 1e-3);
    }
}
