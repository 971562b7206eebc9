// tests/property_test.rs
use bs_greeks::analytics::{price_and_greeks, sweep, Metric, OptionInputs, OptionType, SweepRange};
use proptest::prelude::*;

fn valid_market() -> impl Strategy<Value = (f64, f64, f64, f64, f64)> {
    (
        1.0f64..500.0,  // s
        1.0f64..500.0,  // k
        0.01f64..10.0,  // t
        -0.05f64..0.25, // r
        0.05f64..1.5,   // sigma
    )
}

fn option_type() -> impl Strategy<Value = OptionType> {
    prop_oneof![Just(OptionType::Call), Just(OptionType::Put)]
}

proptest! {
    #[test]
    fn prop_put_call_parity((s, k, t, r, sigma) in valid_market()) {
        let call = price_and_greeks(&OptionInputs::new(s, k, t, r, sigma, OptionType::Call)).unwrap();
        let put = price_and_greeks(&OptionInputs::new(s, k, t, r, sigma, OptionType::Put)).unwrap();

        let lhs = call.price - put.price;
        let rhs = s - k * (-r * t).exp();
        let scale = s.max(k);
        prop_assert!((lhs - rhs).abs() <= 1e-6 * scale, "parity broken: {} vs {}", lhs, rhs);
    }

    #[test]
    fn prop_gamma_vega_shared((s, k, t, r, sigma) in valid_market()) {
        let call = price_and_greeks(&OptionInputs::new(s, k, t, r, sigma, OptionType::Call)).unwrap();
        let put = price_and_greeks(&OptionInputs::new(s, k, t, r, sigma, OptionType::Put)).unwrap();

        prop_assert_eq!(call.gamma, put.gamma);
        prop_assert_eq!(call.vega, put.vega);
        prop_assert!(call.gamma >= 0.0);
        prop_assert!(call.vega >= 0.0);
    }

    #[test]
    fn prop_delta_bounds((s, k, t, r, sigma) in valid_market(), option_type in option_type()) {
        let greeks = price_and_greeks(&OptionInputs::new(s, k, t, r, sigma, option_type)).unwrap();
        match option_type {
            OptionType::Call => prop_assert!((0.0..=1.0).contains(&greeks.delta)),
            OptionType::Put => prop_assert!((-1.0..=0.0).contains(&greeks.delta)),
        }
    }

    #[test]
    fn prop_outputs_finite((s, k, t, r, sigma) in valid_market(), option_type in option_type()) {
        let greeks = price_and_greeks(&OptionInputs::new(s, k, t, r, sigma, option_type)).unwrap();
        for metric in Metric::ALL {
            prop_assert!(greeks.value(metric).is_finite(), "{} not finite", metric);
        }
    }

    #[test]
    fn prop_non_positive_inputs_rejected(
        (s, k, t, r, sigma) in valid_market(),
        bad in -100.0f64..=0.0,
        which in 0usize..4,
    ) {
        let mut inputs = OptionInputs::new(s, k, t, r, sigma, OptionType::Call);
        match which {
            0 => inputs.s = bad,
            1 => inputs.k = bad,
            2 => inputs.t = bad,
            _ => inputs.sigma = bad,
        }
        prop_assert!(price_and_greeks(&inputs).unwrap_err().is_invalid_input());
    }

    #[test]
    fn prop_sweep_consistency(
        (_, k, t, r, sigma) in valid_market(),
        option_type in option_type(),
        s_min in 1.0f64..100.0,
        width in 1.0f64..200.0,
        n_points in 2usize..60,
    ) {
        let fixed = OptionInputs::new(100.0, k, t, r, sigma, option_type);
        let range = SweepRange::new(s_min, s_min + width, n_points);
        let series = sweep(&range, &fixed, Metric::Price).unwrap();

        prop_assert_eq!(series.len(), n_points);
        prop_assert_eq!(series[0].0, s_min);
        prop_assert_eq!(series[n_points - 1].0, s_min + width);
        for (spot, price) in series {
            let direct = price_and_greeks(&fixed.with_spot(spot)).unwrap();
            prop_assert_eq!(price, direct.price);
        }
    }
}
