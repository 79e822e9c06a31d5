use lps_digipot::OcpBand;
use lps_digipot::network::FeedbackNetwork;
use lps_digipot::ocp::{adaptive_current_limit, adaptive_current_limit_for_position};

#[test]
fn limits_per_band() {
    assert_eq!(adaptive_current_limit(5.0), 350.0);
    assert_eq!(adaptive_current_limit(8.0), 450.0);
    assert_eq!(adaptive_current_limit(12.0), 500.0);
}

#[test]
fn band_edges_belong_to_upper_band() {
    assert_eq!(OcpBand::from_voltage(6.999), OcpBand::Low);
    assert_eq!(OcpBand::from_voltage(7.0), OcpBand::Mid);
    assert_eq!(OcpBand::from_voltage(9.999), OcpBand::Mid);
    assert_eq!(OcpBand::from_voltage(10.0), OcpBand::High);
}

#[test]
fn out_of_range_inputs() {
    assert_eq!(adaptive_current_limit(-1.0), 350.0);
    assert_eq!(adaptive_current_limit(f32::INFINITY), 500.0);
    assert_eq!(OcpBand::from_voltage(f32::NAN), OcpBand::High);
}

#[test]
fn limit_follows_wiper_position() {
    let net = FeedbackNetwork::LPS_DEFAULT;
    // 5.00 V, 6.69 V, 7.91 V, then the ceiling.
    assert_eq!(adaptive_current_limit_for_position(&net, 0), 350.0);
    assert_eq!(adaptive_current_limit_for_position(&net, 1), 350.0);
    assert_eq!(adaptive_current_limit_for_position(&net, 2), 450.0);
    assert_eq!(adaptive_current_limit_for_position(&net, 255), 500.0);
}
