use std::cell::Cell;

use crate::{Optimizer, OptimizerStatus};

use super::{prepare_step, CyclicalLR, LRScheduler};

/// Drives an optimizer's learning rate with a [`CyclicalLR`] schedule.
///
///```text
/// lrₜ = schedule(t)
///```
///
/// The learning rate is set to `schedule(0)` as soon as the scheduler is created, and every call
/// to `.step()` moves to the next training step.
pub struct CyclicLR<'a, T>
where
    T: OptimizerStatus,
{
    optimizer: &'a Optimizer<T>,
    schedule: CyclicalLR,
    current_step: Cell<usize>,
    current_lr: Cell<f32>,
    last_lr: Cell<f32>,
}

impl<'a, T> CyclicLR<'a, T>
where
    T: OptimizerStatus,
{
    /// Creates a new CyclicLR scheduler.
    ///
    /// # Arguments
    ///
    /// * `optimizer` - wrapped optimizer.
    ///
    /// * `schedule` - the cyclical learning rate to follow.
    pub fn new(optimizer: &'a Optimizer<T>, schedule: CyclicalLR) -> Self {
        let current_lr = schedule.evaluate_step(0);
        optimizer.set_lr(current_lr);
        log::debug!(
            "cyclic lr: {} policy, stepsize {}, lr in [{}, {}]",
            schedule.policy(),
            schedule.stepsize(),
            schedule.base_lr(),
            schedule.max_lr()
        );

        Self {
            optimizer,
            schedule,
            current_step: Cell::new(0),
            current_lr: Cell::new(current_lr),
            last_lr: Cell::new(0.0),
        }
    }

    /// Returns the schedule followed by this scheduler.
    pub fn schedule(&self) -> &CyclicalLR {
        &self.schedule
    }

    /// Moves to the next training step.
    pub fn step(&self) {
        LRScheduler::step(self);
    }

    /// Returns the last learning rate value computed by this learning rate scheduler.
    pub fn get_last_lr(&self) -> f32 {
        LRScheduler::get_last_lr(self)
    }

    /// Returns the current learning rate value computed by this learning rate scheduler.
    pub fn get_current_lr(&self) -> f32 {
        LRScheduler::get_current_lr(self)
    }

    /// Sets the current step for this learning rate scheduler.
    pub fn set_current_step(&self, step: usize) {
        LRScheduler::set_current_step(self, step);
    }

    /// Returns the current step for this learning rate scheduler.
    pub fn get_current_step(&self) -> usize {
        LRScheduler::get_current_step(self)
    }

    /// Prints the learning rate update together with the step.
    pub fn print_lr(&self) {
        LRScheduler::print_lr(self);
    }
}

impl<'a, T> LRScheduler for CyclicLR<'a, T>
where
    T: OptimizerStatus,
{
    fn step(&self) {
        prepare_step(&self.last_lr, &self.current_lr, &self.current_step);
        let step = self.current_step.get();
        self.current_lr.set(self.schedule.evaluate_step(step));
        self.optimizer.set_lr(self.current_lr.get());
        log::trace!("step {step}: lr {}", self.current_lr.get());
    }

    fn get_last_lr(&self) -> f32 {
        self.last_lr.get()
    }

    fn get_current_lr(&self) -> f32 {
        self.current_lr.get()
    }

    fn set_current_step(&self, step: usize) {
        self.current_step.replace(step);
    }

    fn get_current_step(&self) -> usize {
        self.current_step.get()
    }
}
