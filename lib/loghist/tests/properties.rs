use loghist::{float_eq, IndexMapping as _, Quantizer, QuantizerConfig, Scheme};
use proptest::prelude::*;

// Largest amount, relative to the value, that a lower bound may overstate the value by.
const TOLERANCE: f64 = 1.0e-9;

fn arb_config() -> impl Strategy<Value = QuantizerConfig> {
    (1.0e-3f64..1.0e3, 1u32..10, 2.0f64..100.0).prop_filter_map(
        "hybrid bounds only map back to their index when subdivisions is less than base",
        |(scale, subdivisions, base)| {
            QuantizerConfig::new(scale, subdivisions, base)
                .ok()
                .filter(|config| config.is_hybrid_invertible())
        },
    )
}

fn arb_large_base_config() -> impl Strategy<Value = QuantizerConfig> {
    (1.0e-3f64..1.0e3, 1u32..10, 3.0f64..100.0).prop_map(|(scale, subdivisions, exponent)| {
        QuantizerConfig::new(scale, subdivisions, 10.0f64.powf(exponent)).unwrap()
    })
}

fn arb_value() -> impl Strategy<Value = f64> {
    (-6.0f64..9.0).prop_map(|exponent| 10.0f64.powf(exponent))
}

proptest! {
    #[test]
    fn property_test_index_monotonic(config in arb_config(), value in arb_value(), factor in 1.0f64..10.0) {
        let quantizer = Quantizer::new(config);
        let larger = value * factor;

        prop_assert!(quantizer.index(value).unwrap() <= quantizer.index(larger).unwrap());
        prop_assert!(quantizer.index_log(value).unwrap() <= quantizer.index_log(larger).unwrap());
    }

    #[test]
    fn property_test_lower_bound_never_overstates(config in arb_config(), value in arb_value()) {
        let quantizer = Quantizer::new(config);

        let lower = quantizer.lower_bound(value).unwrap();
        prop_assert!(lower <= value * (1.0 + TOLERANCE), "hybrid: {} > {}", lower, value);

        let lower = quantizer.lower_bound_log(value).unwrap();
        prop_assert!(lower <= value * (1.0 + TOLERANCE), "logarithmic: {} > {}", lower, value);
    }

    #[test]
    fn property_test_lower_bound_never_overstates_large_base(
        config in arb_large_base_config(),
        decades in 0i32..3,
        shortfall in 2.0e-9f64..1.0e-6,
    ) {
        // Values just short of a decade boundary are the worst case for the boundary nudge.
        let quantizer = Quantizer::new(config);
        let value = config.scale() * config.base().powi(decades) * (1.0 - shortfall);

        let lower = quantizer.lower_bound(value).unwrap();
        prop_assert!(lower <= value * (1.0 + TOLERANCE), "hybrid: {} > {}", lower, value);

        let lower = quantizer.lower_bound_log(value).unwrap();
        prop_assert!(lower <= value * (1.0 + TOLERANCE), "logarithmic: {} > {}", lower, value);
    }

    #[test]
    fn property_test_value_below_next_bound(config in arb_config(), value in arb_value()) {
        let quantizer = Quantizer::new(config);

        let next = quantizer.bound(quantizer.index(value).unwrap() + 1).unwrap();
        prop_assert!(value < next, "hybrid: {} >= {}", value, next);

        let next = quantizer.bound_log(quantizer.index_log(value).unwrap() + 1).unwrap();
        prop_assert!(value < next, "logarithmic: {} >= {}", value, next);
    }

    #[test]
    fn property_test_decade_scaling(config in arb_config(), index in -50i64..50) {
        let quantizer = Quantizer::new(config);
        let subdivisions = i64::from(config.subdivisions());

        let lower = quantizer.bound(index).unwrap();
        let upper = quantizer.bound(index + subdivisions).unwrap();
        prop_assert!(float_eq(upper, lower * config.base()), "hybrid: {} != {} * {}", upper, lower, config.base());

        let lower = quantizer.bound_log(index).unwrap();
        let upper = quantizer.bound_log(index + subdivisions).unwrap();
        prop_assert!(float_eq(upper, lower * config.base()), "logarithmic: {} != {} * {}", upper, lower, config.base());
    }

    #[test]
    fn property_test_bucket_bounds_contain_value(config in arb_config(), value in arb_value()) {
        let quantizer = Quantizer::new(config);
        for scheme in [Scheme::Hybrid, Scheme::Logarithmic] {
            let range = quantizer.mapping(scheme).bucket_bounds(value).unwrap();
            prop_assert!(range.contains(&value), "{}: {:?} does not contain {}", scheme, range, value);
        }
    }
}

#[test]
fn round_trip_on_boundaries() {
    let configs = [
        QuantizerConfig::default(),
        QuantizerConfig::new(1.0, 3, 10.0).unwrap(),
        QuantizerConfig::new(0.001, 1, 2.0).unwrap(),
        QuantizerConfig::new(250.0, 7, 8.0).unwrap(),
        QuantizerConfig::new(1.0e-6, 9, 1000.0).unwrap(),
    ];

    for config in configs {
        let quantizer = Quantizer::new(config);
        for index in -50..50 {
            let bound = quantizer.bound(index).unwrap();
            assert_eq!(quantizer.index(bound).unwrap(), index, "hybrid {:?}, bound {}", config, bound);

            let bound = quantizer.bound_log(index).unwrap();
            assert_eq!(quantizer.index_log(bound).unwrap(), index, "logarithmic {:?}, bound {}", config, bound);
        }
    }
}

#[test]
fn lower_bound_just_below_huge_decade() {
    for base in [1.0e12, 1.0e100] {
        let quantizer = Quantizer::new(QuantizerConfig::new(1.0, 1, base).unwrap());
        let value = base * (1.0 - 2.0e-9);

        assert_eq!(quantizer.index(value).unwrap(), 0, "base {}", base);
        assert_eq!(quantizer.index_log(value).unwrap(), 0, "base {}", base);
        assert_eq!(quantizer.lower_bound(value).unwrap(), 1.0);
        assert_eq!(quantizer.lower_bound_log(value).unwrap(), 1.0);

        assert_eq!(quantizer.index(base).unwrap(), 1, "base {}", base);
        assert_eq!(quantizer.index_log(base).unwrap(), 1, "base {}", base);
    }
}

#[test]
fn round_trip_logarithmic_regardless_of_base() {
    // Unlike the hybrid scheme, the logarithmic scheme has no constraint tying subdivisions to the base.
    let quantizer = Quantizer::new(QuantizerConfig::new(1.0, 20, 2.0).unwrap());
    for index in -50..50 {
        let bound = quantizer.bound_log(index).unwrap();
        assert_eq!(quantizer.index_log(bound).unwrap(), index);
    }
}
