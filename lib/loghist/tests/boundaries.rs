//! Behavior of both schemes right around bucket boundaries.

use loghist::{BucketingDescriptor, IndexMapping, Quantizer, Scheme};

/// Returns `point` along with the `n` representable floats on either side of it.
fn floats_around(point: f64, n: u64) -> Vec<f64> {
    let bits = point.to_bits();
    ((bits - n)..=(bits + n)).map(f64::from_bits).collect()
}

fn check_boundaries(mapping: &dyn IndexMapping, indices: std::ops::Range<i64>) {
    for index in indices {
        let boundary = mapping.lower_bound(index).unwrap();

        // Everything at or just above the boundary lands in its bucket, and every bucket contains its value.
        for value in floats_around(boundary, 1000) {
            let range = mapping.bucket_bounds(value).unwrap();
            assert!(range.contains(&value), "{:?} does not contain {}", range, value);
            if value >= boundary {
                assert_eq!(mapping.index(value).unwrap(), index, "value {} above boundary {}", value, boundary);
            }
        }

        // Anything meaningfully below the boundary lands in the previous bucket.
        let below = boundary * (1.0 - 1.0e-6);
        assert_eq!(mapping.index(below).unwrap(), index - 1, "value {} below boundary {}", below, boundary);
    }
}

#[test]
fn hybrid_boundaries() {
    let quantizer: Quantizer = "logRegular/base/10/n/5/scale/0.1"
        .parse::<BucketingDescriptor>()
        .unwrap()
        .into_quantizer();
    check_boundaries(quantizer.mapping(Scheme::Hybrid), -10..21);
}

#[test]
fn logarithmic_boundaries() {
    let quantizer: Quantizer = "log?base=10&n=5&scale=0.1"
        .parse::<BucketingDescriptor>()
        .unwrap()
        .into_quantizer();
    check_boundaries(quantizer.mapping(Scheme::Logarithmic), -10..21);
}

#[test]
fn hybrid_boundaries_are_round_numbers() {
    let quantizer = Quantizer::default();
    for (value, index) in [(0.2, 1), (0.4, 2), (0.6, 3), (0.8, 4), (2.0, 6), (4.0, 7), (6.0, 8), (8.0, 9), (20.0, 11)] {
        assert_eq!(quantizer.index(value).unwrap(), index, "value {}", value);
    }
}

#[test]
fn schemes_pick_different_buckets_within_decade() {
    let quantizer = Quantizer::default();
    let value = 5.0;

    let hybrid = quantizer.lower_bound(value).unwrap();
    assert_eq!(quantizer.index(value).unwrap(), 7);
    assert_eq!(hybrid, quantizer.bound(7).unwrap());
    assert!(loghist::float_eq(hybrid, 4.0));

    let logarithmic = quantizer.lower_bound_log(value).unwrap();
    assert_eq!(quantizer.index_log(value).unwrap(), 8);
    assert_eq!(logarithmic, quantizer.bound_log(8).unwrap());
    assert!(loghist::float_eq(logarithmic, 10.0f64.powf(0.6)));
}
