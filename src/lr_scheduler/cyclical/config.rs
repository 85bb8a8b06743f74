#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use super::{CyclicalLR, Policy};
use crate::Result;

const DEFAULT_STEPSIZE_FACTOR: f32 = 8.;
const DEFAULT_BASE_LR: f32 = 0.001;
const DEFAULT_MAX_LR: f32 = 0.006;
const DEFAULT_T2_GAMMA: f32 = 0.5;
const DEFAULT_ER_GAMMA: f32 = 0.99994;

/// Construction parameters of a [`CyclicalLR`].
///
/// Every field but `steps_per_epoch` has a default, both when built in code and when
/// deserialized, so a configuration file only needs to spell out what it changes:
///
/// ```
/// # #[cfg(feature = "serialize")]
/// # {
/// use cyclical_lr::{CyclicalLRConfig, Policy};
///
/// let config: CyclicalLRConfig =
///     serde_json::from_str(r#"{ "steps_per_epoch": 100, "policy": "triangular2" }"#).unwrap();
/// assert_eq!(config.policy, Policy::Triangular2);
/// assert_eq!(config.stepsize(), 800.);
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct CyclicalLRConfig {
    /// Number of optimizer steps in one epoch.
    pub steps_per_epoch: usize,
    /// Number of epochs in half a cycle.
    #[cfg_attr(feature = "serialize", serde(default = "default_stepsize_factor"))]
    pub stepsize_factor: f32,
    #[cfg_attr(feature = "serialize", serde(default = "default_base_lr"))]
    pub base_lr: f32,
    #[cfg_attr(feature = "serialize", serde(default = "default_max_lr"))]
    pub max_lr: f32,
    #[cfg_attr(feature = "serialize", serde(default))]
    pub policy: Policy,
    /// Per-cycle decay base, only read by [`Policy::Triangular2`].
    #[cfg_attr(feature = "serialize", serde(default = "default_t2_gamma"))]
    pub t2_gamma: f32,
    /// Per-step decay base, only read by [`Policy::ExpRange`].
    #[cfg_attr(feature = "serialize", serde(default = "default_er_gamma"))]
    pub er_gamma: f32,
}

#[cfg(feature = "serialize")]
fn default_stepsize_factor() -> f32 {
    DEFAULT_STEPSIZE_FACTOR
}

#[cfg(feature = "serialize")]
fn default_base_lr() -> f32 {
    DEFAULT_BASE_LR
}

#[cfg(feature = "serialize")]
fn default_max_lr() -> f32 {
    DEFAULT_MAX_LR
}

#[cfg(feature = "serialize")]
fn default_t2_gamma() -> f32 {
    DEFAULT_T2_GAMMA
}

#[cfg(feature = "serialize")]
fn default_er_gamma() -> f32 {
    DEFAULT_ER_GAMMA
}

impl CyclicalLRConfig {
    /// Creates a configuration with the default hyperparameters.
    ///
    /// # Arguments
    ///
    /// * `steps_per_epoch` - number of optimizer steps in one epoch.
    pub fn new(steps_per_epoch: usize) -> Self {
        Self {
            steps_per_epoch,
            stepsize_factor: DEFAULT_STEPSIZE_FACTOR,
            base_lr: DEFAULT_BASE_LR,
            max_lr: DEFAULT_MAX_LR,
            policy: Policy::default(),
            t2_gamma: DEFAULT_T2_GAMMA,
            er_gamma: DEFAULT_ER_GAMMA,
        }
    }

    pub fn stepsize_factor(mut self, stepsize_factor: f32) -> Self {
        self.stepsize_factor = stepsize_factor;
        self
    }

    pub fn base_lr(mut self, base_lr: f32) -> Self {
        self.base_lr = base_lr;
        self
    }

    pub fn max_lr(mut self, max_lr: f32) -> Self {
        self.max_lr = max_lr;
        self
    }

    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn t2_gamma(mut self, t2_gamma: f32) -> Self {
        self.t2_gamma = t2_gamma;
        self
    }

    pub fn er_gamma(mut self, er_gamma: f32) -> Self {
        self.er_gamma = er_gamma;
        self
    }

    /// Half-cycle length in steps, `stepsize_factor * steps_per_epoch`.
    pub fn stepsize(&self) -> f32 {
        self.stepsize_factor * self.steps_per_epoch as f32
    }

    /// Validates the configuration and freezes it into a schedule.
    pub fn build(&self) -> Result<CyclicalLR> {
        CyclicalLR::with_stepsize(
            self.stepsize(),
            self.base_lr,
            self.max_lr,
            self.policy,
            self.t2_gamma,
            self.er_gamma,
        )
    }
}
