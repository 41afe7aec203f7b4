use approx::assert_relative_eq;
use scrolly_charts::core::{LinearScale, nice_ticks};

#[test]
fn scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((2015.0, 2026.0), (0.0, 600.0)).expect("valid scale");

    let original = 2020.5;
    let px = scale.domain_to_pixel(original).expect("to pixel");
    let recovered = scale.pixel_to_domain(px).expect("from pixel");

    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn zero_width_domain_is_rejected() {
    assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
    assert!(LinearScale::new((f64::NAN, 5.0), (0.0, 1.0)).is_err());
}

#[test]
fn single_year_extent_is_widened() {
    let scale = LinearScale::from_extent([2020.0, 2020.0], (0.0, 600.0)).expect("scale");
    assert_eq!(scale.domain(), (2019.5, 2020.5));
    assert_relative_eq!(scale.domain_to_pixel(2020.0).expect("mid"), 300.0);
}

#[test]
fn empty_extent_is_rejected() {
    assert!(LinearScale::from_extent(std::iter::empty(), (0.0, 1.0)).is_err());
}

#[test]
fn non_finite_values_are_rejected() {
    let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0)).expect("valid scale");
    assert!(scale.domain_to_pixel(f64::INFINITY).is_err());
    assert!(scale.pixel_to_domain(f64::NAN).is_err());
}

#[test]
fn crime_sized_domain_gets_round_ticks() {
    assert_eq!(
        nice_ticks(0.0, 1_133_000.0, 5),
        vec![0.0, 200_000.0, 400_000.0, 600_000.0, 800_000.0, 1_000_000.0]
    );
}

#[test]
fn nice_ticks_stay_inside_domain() {
    let ticks = nice_ticks(5_000_000.0, 8_820_000.0, 8);
    assert!(!ticks.is_empty());
    assert!(ticks.iter().all(|tick| (5_000_000.0..=8_820_000.0).contains(tick)));
    assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn fractional_ticks_are_exact_decimals() {
    let ticks = nice_ticks(0.0, 1.0, 10);
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[3], 0.3);
}
