//! Learning rate curves, for plotting and for checking a schedule against a recorded one.
//!
//! ```
//! use cyclical_lr::{diagnostics::Curve, CyclicalLR};
//!
//! let schedule = CyclicalLR::new(100, 8., 0.001, 0.006, "triangular").unwrap();
//! let curve = Curve::sample(&schedule, 10_000);
//!
//! let mut csv = Vec::new();
//! curve.write_csv(&mut csv).unwrap();
//! let golden = Curve::from_csv(csv.as_slice()).unwrap();
//! assert_eq!(curve.max_abs_diff(&golden), Some(0.));
//! ```
use std::{
    error::Error,
    io::{Read, Write},
};

use csv::{ReaderBuilder, WriterBuilder};
use ndarray::Array1;
use rayon::prelude::*;

use crate::CyclicalLR;

/// A sampled learning rate curve: one rate per step.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    steps: Array1<f32>,
    rates: Array1<f32>,
}

impl Curve {
    /// Evaluates `schedule` on every step in `0..num_steps`.
    pub fn sample(schedule: &CyclicalLR, num_steps: usize) -> Self {
        let (steps, rates): (Vec<f32>, Vec<f32>) = (0..num_steps)
            .into_par_iter()
            .map(|step| (step as f32, schedule.evaluate_step(step)))
            .unzip();

        Self {
            steps: Array1::from(steps),
            rates: Array1::from(rates),
        }
    }

    /// Evaluates `schedule` on arbitrary steps.
    pub fn at(schedule: &CyclicalLR, steps: Array1<f32>) -> Self {
        let rates = schedule.evaluate_array(&steps);

        Self { steps, rates }
    }

    pub fn steps(&self) -> &Array1<f32> {
        &self.steps
    }

    pub fn rates(&self) -> &Array1<f32> {
        &self.rates
    }

    /// Number of sampled points.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the largest absolute difference between the two curves' rates.
    ///
    /// Returns `None` if the curves are not sampled on the same steps. A NaN rate in either
    /// curve makes the result NaN.
    pub fn max_abs_diff(&self, other: &Curve) -> Option<f32> {
        if self.steps != other.steps {
            return None;
        }

        Some(
            self.rates
                .iter()
                .zip(other.rates.iter())
                .fold(0_f32, |acc, (a, b)| {
                    let diff = (a - b).abs();
                    if diff.is_nan() || diff > acc {
                        diff
                    } else {
                        acc
                    }
                }),
        )
    }

    /// Returns the `(step, rate)` pairs at the top of every cycle covered by the curve.
    ///
    /// Peaks sit at odd multiples of the schedule's stepsize.
    pub fn peaks(&self, schedule: &CyclicalLR) -> Vec<(f32, f32)> {
        let stepsize = schedule.stepsize();

        self.steps
            .iter()
            .zip(self.rates.iter())
            .filter(|(step, _)| {
                let half_cycles = *step / stepsize;
                half_cycles.fract() == 0. && half_cycles.rem_euclid(2.) == 1.
            })
            .map(|(step, rate)| (*step, *rate))
            .collect()
    }

    /// Writes the curve as `step,rate` CSV rows, with a header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), Box<dyn Error>> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        writer.write_record(["step", "rate"])?;
        for (step, rate) in self.steps.iter().zip(self.rates.iter()) {
            writer.serialize((step, rate))?;
        }
        writer.flush()?;
        log::debug!("wrote {} learning rate records", self.len());

        Ok(())
    }

    /// Reads a curve written by [`.write_csv()`](Self::write_csv()).
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, Box<dyn Error>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .from_reader(reader);

        let mut steps = Vec::new();
        let mut rates = Vec::new();
        for record in reader.deserialize() {
            let (step, rate): (f32, f32) = record?;
            steps.push(step);
            rates.push(rate);
        }
        log::debug!("read {} learning rate records", steps.len());

        Ok(Self {
            steps: Array1::from(steps),
            rates: Array1::from(rates),
        })
    }
}
