//! The closed-form cyclical learning rate.
//!
//! The rate sweeps linearly from `base_lr` up to `max_lr` and back down again over a cycle of
//! `2 * stepsize` steps. The policy decides how the amplitude of the sweep shrinks over time:
//!
//!```text
//! cycle  = ⌊1 + step / (2 * stepsize)⌋
//! x      = |step / stepsize - 2 * cycle + 1|
//! lr     = base_lr + (max_lr - base_lr) * max(0, 1 - x) * decay
//!
//! decay  = 1                              triangular
//!        = t2_gamma ^ (cycle - 1)         triangular2
//!        = er_gamma ^ step                exp_range
//!```
//!
//! See [Cyclical Learning Rates for Training Neural Networks](https://arxiv.org/abs/1506.01186).
use std::{fmt, str::FromStr};

use ndarray::{Array, ArrayBase, Data, Dimension};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{Result, ScheduleError};

mod config;

pub use config::CyclicalLRConfig;

/// How the amplitude of the triangular wave decays across cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Policy {
    /// Constant amplitude.
    #[default]
    Triangular,
    /// Amplitude scaled by `t2_gamma` at the start of every new cycle.
    Triangular2,
    /// Amplitude scaled by `er_gamma` at every step.
    ExpRange,
}

impl Policy {
    /// The names accepted when parsing a policy.
    pub const NAMES: &'static [&'static str] = &["triangular", "triangular2", "exp_range"];

    /// Returns the canonical name of the policy.
    pub fn name(self) -> &'static str {
        match self {
            Self::Triangular => "triangular",
            Self::Triangular2 => "triangular2",
            Self::ExpRange => "exp_range",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "triangular" => Ok(Self::Triangular),
            "triangular2" => Ok(Self::Triangular2),
            "exp_range" => Ok(Self::ExpRange),
            other => Err(ScheduleError::InvalidPolicy {
                value: other.to_owned(),
                allowed: Self::NAMES,
            }),
        }
    }
}

impl TryFrom<&str> for Policy {
    type Error = ScheduleError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<String> for Policy {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Policy> for String {
    fn from(policy: Policy) -> Self {
        policy.name().to_owned()
    }
}

/// A cyclical learning rate, as a pure function of the training step.
///
/// All the hyperparameters are fixed at construction. Evaluation performs no mutation, so a
/// single value can be shared freely between threads and queried in any order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclicalLR {
    stepsize: f32,
    base_lr: f32,
    max_lr: f32,
    policy: Policy,
    t2_gamma: f32,
    er_gamma: f32,
}

impl CyclicalLR {
    /// Creates a new cyclical learning rate with the default decay constants.
    ///
    /// # Arguments
    ///
    /// * `steps_per_epoch` - number of optimizer steps in one epoch.
    ///
    /// * `stepsize_factor` - number of epochs in half a cycle.
    ///
    /// * `base_lr` - lower bound of the triangular wave.
    ///
    /// * `max_lr` - upper bound of the triangular wave.
    ///
    /// * `policy` - one of `triangular`, `triangular2` or `exp_range`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidPolicy`] if `policy` is not a known name and
    /// [`ScheduleError::DegenerateStepsize`] if `stepsize_factor * steps_per_epoch` is zero or NaN.
    pub fn new(
        steps_per_epoch: usize,
        stepsize_factor: f32,
        base_lr: f32,
        max_lr: f32,
        policy: &str,
    ) -> Result<Self> {
        CyclicalLRConfig::new(steps_per_epoch)
            .stepsize_factor(stepsize_factor)
            .base_lr(base_lr)
            .max_lr(max_lr)
            .policy(policy.parse()?)
            .build()
    }

    /// Creates a schedule from an explicit half-cycle length, bypassing the epoch arithmetic.
    pub fn with_stepsize(
        stepsize: f32,
        base_lr: f32,
        max_lr: f32,
        policy: Policy,
        t2_gamma: f32,
        er_gamma: f32,
    ) -> Result<Self> {
        if stepsize == 0. || stepsize.is_nan() {
            return Err(ScheduleError::DegenerateStepsize(stepsize));
        }

        Ok(Self {
            stepsize,
            base_lr,
            max_lr,
            policy,
            t2_gamma,
            er_gamma,
        })
    }

    /// Number of steps in half a cycle.
    pub fn stepsize(&self) -> f32 {
        self.stepsize
    }

    /// Number of steps in a full up-and-down sweep.
    pub fn cycle_length(&self) -> f32 {
        2. * self.stepsize
    }

    pub fn base_lr(&self) -> f32 {
        self.base_lr
    }

    pub fn max_lr(&self) -> f32 {
        self.max_lr
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn t2_gamma(&self) -> f32 {
        self.t2_gamma
    }

    pub fn er_gamma(&self) -> f32 {
        self.er_gamma
    }

    /// Returns the 1-indexed cycle `step` belongs to.
    pub fn cycle(&self, step: f32) -> f32 {
        (1. + step / self.cycle_length()).floor()
    }

    /// Computes the learning rate for `step`.
    pub fn evaluate(&self, step: f32) -> f32 {
        let cycle = self.cycle(step);
        let x = (step / self.stepsize - 2. * cycle + 1.).abs();
        let amplitude = (1. - x).max(0.);
        let decay = match self.policy {
            Policy::Triangular => 1.,
            Policy::Triangular2 => self.t2_gamma.powf(cycle - 1.),
            Policy::ExpRange => self.er_gamma.powf(step),
        };

        self.base_lr + (self.max_lr - self.base_lr) * amplitude * decay
    }

    /// Computes the learning rate for an integer step.
    pub fn evaluate_step(&self, step: usize) -> f32 {
        self.evaluate(step as f32)
    }

    /// Computes the learning rate for every step yielded by `steps`.
    pub fn evaluate_iter<I>(&self, steps: I) -> Vec<f32>
    where
        I: IntoIterator<Item = usize>,
    {
        steps
            .into_iter()
            .map(|step| self.evaluate_step(step))
            .collect()
    }

    /// Computes the learning rate element-wise over an array of steps.
    pub fn evaluate_array<S, D>(&self, steps: &ArrayBase<S, D>) -> Array<f32, D>
    where
        S: Data<Elem = f32>,
        D: Dimension,
    {
        steps.mapv(|step| self.evaluate(step))
    }

    /// Same as [`.evaluate_array()`](Self::evaluate_array()), split across the rayon thread pool.
    pub fn par_evaluate_array<S, D>(&self, steps: &ArrayBase<S, D>) -> Array<f32, D>
    where
        S: Data<Elem = f32>,
        D: Dimension,
    {
        let mut rates = steps.to_owned();
        rates.par_mapv_inplace(|step| self.evaluate(step));
        rates
    }
}

#[cfg(test)]
mod test;
