//! Scalar Newton iteration safeguarded by a shrinking bracket.

use crate::error::{SolverError, SolverResult};
use tracing::trace;

/// Newton solver configuration.
#[derive(Clone, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance on the residual
    pub abs_tol: f64,
    /// Relative tolerance on the residual and the bracket width
    pub rel_tol: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1e-14,
            rel_tol: 1e-12,
        }
    }
}

/// Newton iteration result.
#[derive(Clone, Debug)]
pub struct NewtonResult {
    /// Root estimate
    pub x: f64,
    /// Residual at `x`
    pub residual: f64,
    /// Number of residual evaluations
    pub iterations: usize,
}

/// Find the root of an increasing function `g` inside `[lo, hi]`.
///
/// `eval` returns `(g(x), g'(x))`. Iterates never leave the bracket: a Newton
/// step that would exit, or a non-finite step, is replaced by bisection. The
/// bracket shrinks after every evaluation using the sign of the residual, so
/// `g` must be monotonically increasing on the interval.
pub fn bracketed_newton<F>(
    x0: f64,
    lo: f64,
    hi: f64,
    mut eval: F,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: FnMut(f64) -> SolverResult<(f64, f64)>,
{
    if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
        return Err(SolverError::Numeric {
            what: format!("invalid bracket [{lo}, {hi}]"),
        });
    }
    let (mut lo, mut hi) = (lo, hi);
    let mut x = x0.clamp(lo, hi);

    for iter in 1..=config.max_iterations {
        let (g, dg) = eval(x)?;
        trace!(iter, x, g, "newton iterate");
        if !g.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("non-finite residual at x = {x}"),
            });
        }
        if g.abs() <= config.abs_tol + config.rel_tol * x.abs() {
            return Ok(NewtonResult {
                x,
                residual: g,
                iterations: iter,
            });
        }

        if g > 0.0 {
            hi = x;
        } else {
            lo = x;
        }
        if hi - lo <= config.rel_tol * hi.abs() {
            return Ok(NewtonResult {
                x: 0.5 * (lo + hi),
                residual: g,
                iterations: iter,
            });
        }

        let next = x - g / dg;
        x = if next.is_finite() && next > lo && next < hi {
            next
        } else {
            0.5 * (lo + hi)
        };
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "maximum iterations {} reached in [{lo}, {hi}]",
            config.max_iterations
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_quadratic() {
        // x^2 - 4 = 0 on [0, 10]
        let config = NewtonConfig::default();
        let result =
            bracketed_newton(3.0, 0.0, 10.0, |x| Ok((x * x - 4.0, 2.0 * x)), &config).unwrap();
        assert!((result.x - 2.0).abs() < 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn falls_back_to_bisection_on_bad_slope() {
        // derivative deliberately wrong: Newton steps leave the bracket
        let config = NewtonConfig::default();
        let result = bracketed_newton(0.9, 0.0, 1.0, |x| Ok((x - 0.3, 1e-6)), &config).unwrap();
        assert!((result.x - 0.3).abs() < 1e-10);
    }

    #[test]
    fn exhausted_budget_fails() {
        let config = NewtonConfig {
            max_iterations: 2,
            ..NewtonConfig::default()
        };
        let err = bracketed_newton(0.9, 0.0, 1.0, |x| Ok((x - 0.3, 1e-6)), &config).unwrap_err();
        assert!(matches!(err, SolverError::ConvergenceFailed { .. }));
    }

    #[test]
    fn rejects_inverted_bracket() {
        let config = NewtonConfig::default();
        let err = bracketed_newton(0.5, 1.0, 0.0, |x| Ok((x, 1.0)), &config).unwrap_err();
        assert!(matches!(err, SolverError::Numeric { .. }));
    }

    #[test]
    fn propagates_evaluation_errors() {
        let config = NewtonConfig::default();
        let err = bracketed_newton(
            0.5,
            0.0,
            1.0,
            |_| {
                Err(SolverError::NonPhysical {
                    what: "test".into(),
                })
            },
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::NonPhysical { .. }));
    }
}
