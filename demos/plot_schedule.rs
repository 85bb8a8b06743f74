//! Prints the learning rate of every policy over 10000 steps as CSV, ready to be plotted:
//!
//! ```text
//! cargo run --example plot_schedule > lr.csv
//! ```
use std::{error::Error, io};

use cyclical_lr::{diagnostics::Curve, CyclicalLRConfig, Policy};

const STEPS_PER_EPOCH: usize = 100;
const STEPS: usize = 10_000;

fn main() -> Result<(), Box<dyn Error>> {
    let curves = [Policy::Triangular, Policy::Triangular2, Policy::ExpRange]
        .into_iter()
        .map(|policy| -> cyclical_lr::Result<Curve> {
            let schedule = CyclicalLRConfig::new(STEPS_PER_EPOCH).policy(policy).build()?;
            Ok(Curve::sample(&schedule, STEPS))
        })
        .collect::<cyclical_lr::Result<Vec<_>>>()?;

    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    writer.write_record(["step", "triangular", "triangular2", "exp_range"])?;
    for step in 0..STEPS {
        writer.write_record(
            std::iter::once(step.to_string())
                .chain(curves.iter().map(|curve| curve.rates()[step].to_string())),
        )?;
    }
    writer.flush()?;

    Ok(())
}
