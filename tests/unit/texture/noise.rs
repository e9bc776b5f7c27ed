use super::*;

fn grid() -> impl Iterator<Item = (f64, f64)> {
    (-40..40).flat_map(|i| (-40..40).map(move |j| (f64::from(i) * 0.731, f64::from(j) * 1.377)))
}

#[test]
fn hash_is_bounded() {
    for (x, y) in grid() {
        for seed in [0.0, 1.0, 2.0, 999.0, 12_345.0] {
            let v = hash(x, y, seed);
            assert!((-1.0..=1.0).contains(&v), "hash({x}, {y}, {seed}) = {v}");
        }
    }
}

#[test]
fn hash_is_deterministic() {
    for (x, y) in grid().take(200) {
        assert_eq!(hash(x, y, 3.0).to_bits(), hash(x, y, 3.0).to_bits());
    }
}

#[test]
fn hash_varies_with_seed_and_position() {
    assert_ne!(hash(1.0, 2.0, 0.0), hash(1.0, 2.0, 1.0));
    assert_ne!(hash(1.0, 2.0, 0.0), hash(2.0, 1.0, 0.0));
}

#[test]
fn fractal_is_bounded_for_all_octave_counts() {
    for octaves in 1..=6 {
        for (x, y) in grid() {
            let v = fractal(x * 0.07, y * 0.07, octaves);
            assert!((-1.0..=1.0).contains(&v), "fractal octaves={octaves} -> {v}");
        }
    }
}

#[test]
fn fractal_with_zero_octaves_is_flat() {
    assert_eq!(fractal(3.0, 4.0, 0), 0.0);
}

#[test]
fn fractal_single_octave_is_curved_hash() {
    let h = hash(0.3, 0.9, 0.0);
    let expected = h.signum() * h.abs().powf(0.75);
    assert!((fractal(0.3, 0.9, 1) - expected).abs() < 1e-12);
}

#[test]
fn fractal_pushes_values_towards_extremes() {
    // |v|^0.75 >= |v| on [0, 1], so the curve never shrinks a sample.
    for (x, y) in grid().take(500) {
        let raw = hash(x, y, 0.0);
        assert!(fractal(x, y, 1).abs() >= raw.abs() - 1e-12);
    }
}
