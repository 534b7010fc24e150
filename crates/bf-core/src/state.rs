//! Six-component state vector advanced by the time integrator.

use core::ops::{Add, Mul, Sub};

/// Conserved and dissipative quantities at one proper time (fm^-4).
///
/// `ttt, ttx, tty, ttn` are the `T^{tau mu}` components in Milne coordinates,
/// `pi = -tau^2 pi^{eta eta}` is the shear-stress scalar and `bulk` the bulk
/// pressure. The integrator only adds and scales whole vectors, so a stage can
/// never observe a partially updated state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StateVector {
    pub ttt: f64,
    pub ttx: f64,
    pub tty: f64,
    pub ttn: f64,
    pub pi: f64,
    pub bulk: f64,
}

impl StateVector {
    pub const LEN: usize = 6;

    pub fn new(ttt: f64, ttx: f64, tty: f64, ttn: f64, pi: f64, bulk: f64) -> Self {
        Self {
            ttt,
            ttx,
            tty,
            ttn,
            pi,
            bulk,
        }
    }

    /// Local rest frame at rest in Milne coordinates: `T^{tau tau} = e`.
    pub fn at_rest(e: f64, pi: f64, bulk: f64) -> Self {
        Self::new(e, 0.0, 0.0, 0.0, pi, bulk)
    }

    pub fn to_array(self) -> [f64; Self::LEN] {
        [self.ttt, self.ttx, self.tty, self.ttn, self.pi, self.bulk]
    }

    pub fn from_array(a: [f64; Self::LEN]) -> Self {
        Self::new(a[0], a[1], a[2], a[3], a[4], a[5])
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Component-wise map, used to build averages and scaled increments.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_array(self.to_array().map(f))
    }

    fn zip(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let a = self.to_array();
        let b = other.to_array();
        Self::from_array(core::array::from_fn(|i| f(a[i], b[i])))
    }

    /// Largest absolute component difference.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.zip(*other, |a, b| (a - b).abs())
            .to_array()
            .into_iter()
            .fold(0.0, f64::max)
    }
}

impl Add for StateVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Sub for StateVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl Mul<f64> for StateVector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|a| a * rhs)
    }
}
