//! The `cyclical-lr` crate provides cyclical learning rate schedules for gradient descent.
//!
//! Instead of decaying monotonically, a cyclical learning rate sweeps back and forth between a
//! lower bound `base_lr` and an upper bound `max_lr`. Each sweep, or *cycle*, lasts `2 * stepsize`
//! training steps: the rate climbs linearly for `stepsize` steps and falls back for as many.
//!
//! # Policies
//!
//! The [`Policy`] decides how the amplitude of the wave evolves over training:
//!
//!  **Policy**    | **Amplitude at step t**
//! ---------------|----------------------------------------
//!  `triangular`  | constant
//!  `triangular2` | scaled by `t2_gamma` at every new cycle
//!  `exp_range`   | scaled by `er_gamma ^ t`
//!
//! # Schedules
//!
//! A [`CyclicalLR`] is an immutable value: it is built once from a [`CyclicalLRConfig`] and then
//! queried with [`.evaluate()`](CyclicalLR::evaluate()) for any step, in any order, from any
//! thread.
//!
//!```
//! use cyclical_lr::{CyclicalLRConfig, Policy};
//!
//! let schedule = CyclicalLRConfig::new(100)
//!     .policy(Policy::Triangular2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schedule.stepsize(), 800.);
//! assert!((schedule.evaluate(800.) - 0.006).abs() < 1e-7);
//! assert!((schedule.evaluate(2400.) - 0.0035).abs() < 1e-7);
//!```
//!
//! Building fails only for a schedule that cannot be evaluated, see [`ScheduleError`].
//!
//! # Optimizers
//!
//! The rate is meant to be fed to an optimizer once per training step. The
//! [`lr_scheduler`] module shows how to do that with [`CyclicLR`], which wraps any
//! [`Optimizer`] whose status implements [`OptimizerStatus`].
//!
//! # Diagnostics
//!
//! The [`diagnostics`] module samples a schedule into a [`Curve`](diagnostics::Curve) that can be
//! exported to CSV for plotting, or compared against a previously recorded one.
pub mod diagnostics;
pub mod lr_scheduler;

mod error;
mod optimizer;
mod sgd;

pub use error::{Result, ScheduleError};
pub use lr_scheduler::{CyclicLR, CyclicalLR, CyclicalLRConfig, LRScheduler, Policy};
pub use optimizer::{IntoParam, Optimize, Optimizer, OptimizerStatus, Param};
pub use sgd::{SGDParam, StochasticGD};
