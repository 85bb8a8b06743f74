use approx::assert_abs_diff_eq;
use ndarray::{array, Array1};

use super::{CyclicalLR, CyclicalLRConfig, Policy};
use crate::ScheduleError;

fn schedule(policy: &str) -> CyclicalLR {
    CyclicalLR::new(100, 8., 0.001, 0.006, policy).unwrap()
}

#[test]
fn creation() {
    let lr = schedule("triangular");

    assert_abs_diff_eq!(lr.stepsize(), 800.);
    assert_abs_diff_eq!(lr.cycle_length(), 1600.);
    assert_abs_diff_eq!(lr.base_lr(), 0.001);
    assert_abs_diff_eq!(lr.max_lr(), 0.006);
    assert_eq!(lr.policy(), Policy::Triangular);
    assert_abs_diff_eq!(lr.t2_gamma(), 0.5);
    assert_abs_diff_eq!(lr.er_gamma(), 0.99994);
}

#[test]
fn invalid_policy() {
    let err = CyclicalLR::new(100, 8., 0.001, 0.006, "bogus").unwrap_err();

    assert_eq!(
        err,
        ScheduleError::InvalidPolicy {
            value: "bogus".to_owned(),
            allowed: &["triangular", "triangular2", "exp_range"],
        }
    );
    let message = err.to_string();
    assert!(message.contains("bogus"));
    for name in Policy::NAMES {
        assert!(message.contains(name), "{message} should list {name}");
    }
}

#[test]
fn degenerate_stepsize() {
    let err = CyclicalLR::new(0, 8., 0.001, 0.006, "triangular").unwrap_err();
    assert_eq!(err, ScheduleError::DegenerateStepsize(0.));

    let err = CyclicalLRConfig::new(100)
        .stepsize_factor(f32::NAN)
        .build()
        .unwrap_err();
    assert!(matches!(err, ScheduleError::DegenerateStepsize(stepsize) if stepsize.is_nan()));
}

#[test]
fn infinite_stepsize_stays_at_base_lr() {
    for stepsize_factor in [f32::INFINITY, f32::NEG_INFINITY] {
        let lr = CyclicalLRConfig::new(100)
            .stepsize_factor(stepsize_factor)
            .build()
            .unwrap();

        assert_eq!(lr.cycle(400.), 1.);
        assert_abs_diff_eq!(lr.evaluate(0.), 0.001);
        assert_abs_diff_eq!(lr.evaluate(400.), 0.001);
    }
}

#[test]
fn negative_stepsize_is_accepted() {
    let lr = CyclicalLRConfig::new(100)
        .stepsize_factor(-8.)
        .build()
        .unwrap();
    assert!(lr.evaluate(400.).is_finite());
}

#[test]
fn policy_names() {
    for name in Policy::NAMES {
        let policy: Policy = name.parse().unwrap();
        assert_eq!(policy.name(), *name);
        assert_eq!(policy.to_string(), *name);
        assert_eq!(Policy::try_from(String::from(*name)).unwrap(), policy);
    }
    assert_eq!(Policy::default(), Policy::Triangular);
    assert!(Policy::try_from("Triangular").is_err());
}

#[test]
fn cycle() {
    let lr = schedule("triangular");

    assert_abs_diff_eq!(lr.cycle(0.), 1.);
    assert_abs_diff_eq!(lr.cycle(1599.), 1.);
    assert_abs_diff_eq!(lr.cycle(1600.), 2.);
    assert_abs_diff_eq!(lr.cycle(4000.), 3.);
}

#[test]
fn triangular() {
    let lr = schedule("triangular");

    assert_abs_diff_eq!(lr.evaluate(0.), 0.001, epsilon = 1e-7);
    assert_abs_diff_eq!(lr.evaluate(400.), 0.0035, epsilon = 1e-7);
    assert_abs_diff_eq!(lr.evaluate(800.), 0.006, epsilon = 1e-7);
    assert_abs_diff_eq!(lr.evaluate(1200.), 0.0035, epsilon = 1e-7);
    assert_abs_diff_eq!(lr.evaluate(1600.), 0.001, epsilon = 1e-7);
    assert_abs_diff_eq!(lr.evaluate(2400.), 0.006, epsilon = 1e-7);
}

#[test]
fn triangular2() {
    let lr = schedule("triangular2");

    assert_abs_diff_eq!(lr.evaluate(0.), 0.001, epsilon = 1e-7);
    assert_abs_diff_eq!(lr.evaluate(800.), 0.006, epsilon = 1e-7);
    assert_abs_diff_eq!(lr.evaluate(1600.), 0.001, epsilon = 1e-7);
    assert_abs_diff_eq!(lr.evaluate(2400.), 0.0035, epsilon = 1e-7);
    assert_abs_diff_eq!(lr.evaluate(4000.), 0.00225, epsilon = 1e-7);
}

#[test]
fn triangular2_custom_gamma() {
    let lr = CyclicalLRConfig::new(100)
        .policy(Policy::Triangular2)
        .t2_gamma(0.1)
        .build()
        .unwrap();

    assert_abs_diff_eq!(lr.evaluate(2400.), 0.001 + 0.005 * 0.1, epsilon = 1e-7);
    assert_abs_diff_eq!(lr.evaluate(4000.), 0.001 + 0.005 * 0.01, epsilon = 1e-7);
}

#[test]
fn exp_range() {
    let lr = schedule("exp_range");
    let decay = 0.99994_f32.powf(800.);

    assert_abs_diff_eq!(lr.evaluate(0.), 0.001, epsilon = 1e-7);
    assert_abs_diff_eq!(lr.evaluate(800.), 0.001 + 0.005 * decay, epsilon = 1e-7);
    // Decays within a cycle, not only across cycles.
    assert!(lr.evaluate(2400.) < lr.evaluate(800.));
    assert_abs_diff_eq!(lr.evaluate(1_000_000. + 800.), 0.001, epsilon = 1e-7);
}

#[test]
fn fractional_steps() {
    let lr = schedule("triangular");

    assert_abs_diff_eq!(lr.evaluate(400.5), lr.evaluate(400.) + 0.005 / 1600., epsilon = 1e-7);
}

#[test]
fn evaluate_step() {
    let lr = schedule("triangular2");

    for step in [0, 1, 799, 800, 801, 2400, 12345] {
        assert_eq!(lr.evaluate_step(step), lr.evaluate(step as f32));
    }
}

#[test]
fn batched() {
    let lr = schedule("exp_range");
    let steps = Array1::range(0., 5000., 1.);

    let rates = lr.evaluate_array(&steps);
    let par_rates = lr.par_evaluate_array(&steps);
    let iter_rates = lr.evaluate_iter(0..5000);

    assert_eq!(rates.len(), 5000);
    assert_eq!(rates, par_rates);
    assert_eq!(rates.to_vec(), iter_rates);
    for (step, rate) in steps.iter().zip(rates.iter()) {
        assert_eq!(*rate, lr.evaluate(*step));
    }
}

#[test]
fn batched_preserves_shape() {
    let lr = schedule("triangular");
    let steps = array![[0_f32, 800.], [1600., 2400.]];

    let rates = lr.evaluate_array(&steps.view());
    assert_eq!(rates.shape(), &[2, 2]);
    assert_abs_diff_eq!(rates[[0, 1]], 0.006, epsilon = 1e-7);
    assert_abs_diff_eq!(rates[[1, 0]], 0.001, epsilon = 1e-7);
}

#[test]
fn config_defaults() {
    let config = CyclicalLRConfig::new(100);

    assert_eq!(config.steps_per_epoch, 100);
    assert_abs_diff_eq!(config.stepsize_factor, 8.);
    assert_abs_diff_eq!(config.base_lr, 0.001);
    assert_abs_diff_eq!(config.max_lr, 0.006);
    assert_eq!(config.policy, Policy::Triangular);
    assert_abs_diff_eq!(config.t2_gamma, 0.5);
    assert_abs_diff_eq!(config.er_gamma, 0.99994);
    assert_eq!(config.build().unwrap(), schedule("triangular"));
}

#[cfg(feature = "serialize")]
#[test]
fn config_from_json() {
    let config: CyclicalLRConfig = serde_json::from_str(
        r#"{ "steps_per_epoch": 50, "stepsize_factor": 2, "policy": "exp_range", "er_gamma": 0.9 }"#,
    )
    .unwrap();

    assert_eq!(
        config,
        CyclicalLRConfig::new(50)
            .stepsize_factor(2.)
            .policy(Policy::ExpRange)
            .er_gamma(0.9)
    );

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""policy":"exp_range""#));
    assert_eq!(
        serde_json::from_str::<CyclicalLRConfig>(&json).unwrap(),
        config
    );
}

#[cfg(feature = "serialize")]
#[test]
fn config_from_json_invalid_policy() {
    let err = serde_json::from_str::<CyclicalLRConfig>(r#"{ "steps_per_epoch": 50, "policy": "bogus" }"#)
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("bogus"));
    assert!(message.contains("triangular2"));
}

#[cfg(feature = "serialize")]
#[test]
fn config_requires_steps_per_epoch() {
    assert!(serde_json::from_str::<CyclicalLRConfig>(r#"{ "policy": "triangular" }"#).is_err());
}
