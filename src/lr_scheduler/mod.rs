//! Learning rate schedules.
//!
//! [`CyclicalLR`] is the schedule itself: a pure function from a training step to a learning
//! rate. It can be queried directly from any training loop:
//!
//! ```
//! use cyclical_lr::CyclicalLR;
//!
//! let schedule = CyclicalLR::new(100, 8., 0.001, 0.006, "triangular2").unwrap();
//! for step in 0..10 {
//!     let lr = schedule.evaluate_step(step);
//!     assert!(lr >= 0.001 && lr <= 0.006);
//! }
//! ```
//!
//! When the loop is driven by an [`Optimizer`](crate::Optimizer), [`CyclicLR`] keeps the step
//! count and pushes the scheduled value into the optimizer. Scheduling should be applied after
//! the optimizer's update:
//!
//! ```
//! use cyclical_lr::{CyclicLR, CyclicalLR, LRScheduler, StochasticGD};
//!
//! let optim = StochasticGD::new(0.1);
//! let scheduler = CyclicLR::new(&optim, CyclicalLR::new(10, 2., 0.001, 0.006, "triangular").unwrap());
//! for _ in 0..40 {
//!     optim.zero_grad();
//!     optim.step();
//!     scheduler.step();
//! }
//! assert_eq!(scheduler.get_current_step(), 40);
//! ```
use std::cell::Cell;

mod cyclic_lr;
mod cyclical;

pub use cyclic_lr::CyclicLR;
pub use cyclical::{CyclicalLR, CyclicalLRConfig, Policy};

/// Learning rate scheduler trait, defines the scheduler's logic.
pub trait LRScheduler {
    /// Advances the scheduler by one step and updates the learning rate.
    fn step(&self);

    /// Returns the learning rate in effect before the last call to `.step()`.
    fn get_last_lr(&self) -> f32;

    /// Returns the learning rate currently in effect.
    fn get_current_lr(&self) -> f32;

    /// Returns the number of steps taken so far.
    fn get_current_step(&self) -> usize;

    /// Sets the step counter, e.g. when resuming an interrupted training.
    fn set_current_step(&self, step: usize);

    /// Prints the update of the learning rate. It should be called after `.step()`.
    fn print_lr(&self) {
        println!(
            "step {}: learning rate adjusted to [{}]",
            self.get_current_step(),
            self.get_current_lr()
        );
    }
}

/// Prepares a learning rate scheduler to perform the next update step.
///
/// Sets `last_lr` as `current_lr` and increases `current_step`.
fn prepare_step(last_lr: &Cell<f32>, current_lr: &Cell<f32>, current_step: &Cell<usize>) {
    last_lr.set(current_lr.get());
    current_step.set(current_step.get() + 1);
}
