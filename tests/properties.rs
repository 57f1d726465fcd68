//! Property tests for the habitability model.
//!
//! These tests verify:
//! - Evaluation is total: every output is finite and inside its range
//! - Evaluation is deterministic
//! - The crop-yield branch and its downstream effect on hunger
//! - Slider edits never leave the slider range

use proptest::prelude::*;

use habitat::model::{bounds, evaluate, DependentVar, IndependentVar, IndependentVariables};
use habitat::session::{Session, SLIDER_MAX, SLIDER_MIN};

fn input_strategy() -> impl Strategy<Value = IndependentVariables> {
    (
        -1e6..1e6f64,
        -1e6..1e6f64,
        -1e6..1e6f64,
        -1e6..1e6f64,
    )
        .prop_map(|(t, h, w, p)| IndependentVariables::new(t, h, w, p))
}

fn slider_strategy() -> impl Strategy<Value = IndependentVariables> {
    (0.0..=100.0f64, 0.0..=100.0f64, 0.0..=100.0f64, 0.0..=100.0f64)
        .prop_map(|(t, h, w, p)| IndependentVariables::new(t, h, w, p))
}

fn var_strategy() -> impl Strategy<Value = IndependentVar> {
    prop_oneof![
        Just(IndependentVar::Temperature),
        Just(IndependentVar::Humidity),
        Just(IndependentVar::WindSpeed),
        Just(IndependentVar::Population),
    ]
}

proptest! {
    /// Any finite input yields in-range outputs.
    #[test]
    fn outputs_stay_in_range(inputs in input_strategy()) {
        let out = evaluate(&inputs);
        for (var, value) in out.iter() {
            prop_assert!(value.is_finite(), "{} = {}", var, value);
            prop_assert!(var.bounds().contains(value), "{} = {} outside range", var, value);
        }
        prop_assert!(out.first_out_of_bounds().is_none());
    }

    /// Non-finite inputs saturate instead of propagating.
    #[test]
    fn any_float_is_accepted(
        t in proptest::num::f64::ANY,
        h in proptest::num::f64::ANY,
        w in proptest::num::f64::ANY,
        p in proptest::num::f64::ANY,
    ) {
        let out = evaluate(&IndependentVariables::new(t, h, w, p));
        prop_assert!(out.first_out_of_bounds().is_none());
    }

    /// Same inputs, same outputs.
    #[test]
    fn evaluation_is_deterministic(inputs in input_strategy()) {
        prop_assert_eq!(evaluate(&inputs), evaluate(&inputs));
    }

    /// Without enough sun there is no crop, so hunger is the clamped population.
    #[test]
    fn low_sun_means_no_crop(
        solar in 0.0..=20.0f64,
        humidity in 0.0..=100.0f64,
        wind in 0.0..=100.0f64,
        population in -50.0..=150.0f64,
    ) {
        let out = evaluate(&IndependentVariables::new(solar, humidity, wind, population));
        prop_assert_eq!(out.crop_yield, 0.0);
        prop_assert_eq!(out.hunger, bounds::HUNGER.apply(population));
    }

    /// Slider-range inputs keep the model's fixed floors.
    #[test]
    fn slider_inputs_respect_floors(inputs in slider_strategy()) {
        let out = evaluate(&inputs);
        prop_assert!(out.carbon_dioxide >= 39.49);
        prop_assert!(out.asi >= out.carbon_dioxide.min(39.99));
        prop_assert!(out.water_resources >= 5.0);
        prop_assert!(out.get(DependentVar::Thirst) <= 100.0);
    }

    /// Slider edits are confined to 0-100 whatever the requested value.
    #[test]
    fn slider_set_is_confined(var in var_strategy(), value in proptest::num::f64::ANY) {
        let mut session = Session::new("unused.json");
        let applied = session.set(var, value);
        prop_assert!((SLIDER_MIN..=SLIDER_MAX).contains(&applied));
        prop_assert_eq!(session.variables.get(var), applied);
    }

    /// Variable names parse back to the same variable.
    #[test]
    fn variable_names_round_trip(var in var_strategy()) {
        let parsed: IndependentVar = var.to_string().parse().expect("Should parse");
        prop_assert_eq!(var, parsed);
    }
}

#[test]
fn every_derived_name_parses() {
    for var in DependentVar::ALL {
        let parsed: DependentVar = var.name().parse().expect("Should parse");
        assert_eq!(parsed, var);
    }
}
