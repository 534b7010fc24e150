//! Sampled observables and the sink interface they are delivered through.

use bf_core::StateVector;
use bf_solver::Primitives;

use crate::error::SimResult;
use crate::transport::Transport;

/// One sampled series of the evolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Observable {
    EnergyDensity,
    Shear,
    Bulk,
    PressureRatio,
    ShearInverseReynolds,
    BulkInverseReynolds,
    TauPi,
    TauBulk,
    BQuasi,
    DB2nd,
    ShearNsInverseReynolds,
    BulkNsInverseReynolds,
}

impl Observable {
    pub const COUNT: usize = 12;

    pub const ALL: [Observable; Self::COUNT] = [
        Observable::EnergyDensity,
        Observable::Shear,
        Observable::Bulk,
        Observable::PressureRatio,
        Observable::ShearInverseReynolds,
        Observable::BulkInverseReynolds,
        Observable::TauPi,
        Observable::TauBulk,
        Observable::BQuasi,
        Observable::DB2nd,
        Observable::ShearNsInverseReynolds,
        Observable::BulkNsInverseReynolds,
    ];

    /// Stable identifier, used for file names and store keys.
    pub fn key(&self) -> &'static str {
        match self {
            Observable::EnergyDensity => "energy_density",
            Observable::Shear => "shear",
            Observable::Bulk => "bulk",
            Observable::PressureRatio => "pressure_ratio",
            Observable::ShearInverseReynolds => "shear_inverse_reynolds",
            Observable::BulkInverseReynolds => "bulk_inverse_reynolds",
            Observable::TauPi => "tau_pi",
            Observable::TauBulk => "tau_bulk",
            Observable::BQuasi => "b_quasi",
            Observable::DB2nd => "db_2nd",
            Observable::ShearNsInverseReynolds => "shear_ns_inverse_reynolds",
            Observable::BulkNsInverseReynolds => "bulk_ns_inverse_reynolds",
        }
    }

    /// Column label of the series.
    pub fn label(&self) -> &'static str {
        match self {
            Observable::EnergyDensity => "e/e0",
            Observable::Shear => "pi [fm^-4]",
            Observable::Bulk => "Pi [fm^-4]",
            Observable::PressureRatio => "PL/PT",
            Observable::ShearInverseReynolds => "R_pi^-1",
            Observable::BulkInverseReynolds => "R_Pi^-1",
            Observable::TauPi => "tau_pi",
            Observable::TauBulk => "tau_Pi",
            Observable::BQuasi => "B",
            Observable::DB2nd => "dB_2nd",
            Observable::ShearNsInverseReynolds => "R_piNS^-1",
            Observable::BulkNsInverseReynolds => "R_PiNS^-1",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// All observables at one proper time.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Steps taken when the sample was recorded
    pub step: usize,
    /// [fm]
    pub tau: f64,
    values: [f64; Observable::COUNT],
}

impl Sample {
    /// Evaluate every observable; `e0` is the initial energy density.
    pub fn compute(
        step: usize,
        tau: f64,
        e0: f64,
        x: &StateVector,
        prims: &Primitives,
        tr: &Transport,
    ) -> Self {
        let (pi, bulk, p) = (x.pi, x.bulk, prims.p);
        let sqrt_3_2 = 1.5_f64.sqrt();
        let mut values = [0.0; Observable::COUNT];
        for obs in Observable::ALL {
            values[obs.index()] = match obs {
                Observable::EnergyDensity => prims.e / e0,
                Observable::Shear => pi,
                Observable::Bulk => bulk,
                Observable::PressureRatio => (p + bulk - pi) / (p + bulk + 0.5 * pi),
                Observable::ShearInverseReynolds => sqrt_3_2 * pi / p,
                Observable::BulkInverseReynolds => bulk / p,
                Observable::TauPi => tr.tau_pi,
                Observable::TauBulk => tr.tau_bulk,
                Observable::BQuasi => tr.b(),
                Observable::DB2nd => tr.db_2nd,
                Observable::ShearNsInverseReynolds => sqrt_3_2 * tr.pi_ns / p,
                Observable::BulkNsInverseReynolds => tr.bulk_ns / p,
            };
        }
        Self { step, tau, values }
    }

    pub fn get(&self, obs: Observable) -> f64 {
        self.values[obs.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Observable, f64)> + '_ {
        Observable::ALL.into_iter().map(|o| (o, self.get(o)))
    }
}

/// Destination for sampled records.
pub trait SampleSink {
    fn record(&mut self, sample: &Sample) -> SimResult<()>;
}

/// In-memory sink keeping every sample.
#[derive(Clone, Debug, Default)]
pub struct SampleLog {
    pub samples: Vec<Sample>,
}

impl SampleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of one observable in sampling order, paired with tau.
    pub fn series(&self, obs: Observable) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.tau, s.get(obs))).collect()
    }
}

impl SampleSink for SampleLog {
    fn record(&mut self, sample: &Sample) -> SimResult<()> {
        self.samples.push(sample.clone());
        Ok(())
    }
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    fn record(&mut self, sample: &Sample) -> SimResult<()> {
        (**self).record(sample)
    }
}
