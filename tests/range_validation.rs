use lps_digipot::network::FeedbackNetwork;
use lps_digipot::validation::{MAX_POSITION_BAND, MIN_POSITION_BAND, check_range};
use lps_digipot::{Error, RangeFaults, validate_digipot_range};

#[test]
fn reference_constants_are_in_band() {
    assert!(validate_digipot_range());

    let report = check_range(&FeedbackNetwork::LPS_DEFAULT);
    assert!(report.is_ok());
    // 1.25 * (1 + 1100 / 240) - 2
    assert!((report.v_at_min - 4.979).abs() < 0.01, "{}", report.v_at_min);
    assert!((report.v_at_max - 15.19).abs() < 0.01, "{}", report.v_at_max);
    assert!(MIN_POSITION_BAND.contains(report.v_at_min));
    assert!(MAX_POSITION_BAND.contains(report.v_at_max));
}

#[test]
fn independent_derivation_agrees_with_forward_chain() {
    let net = FeedbackNetwork::LPS_DEFAULT;
    let report = check_range(&net);

    let lo = net.breakdown(0);
    let hi = net.breakdown(net.max_position());
    assert!((report.v_at_min - (lo.v_pre - net.v_headroom)).abs() < 1e-4);
    assert!((report.v_at_max - (hi.v_pre - net.v_headroom)).abs() < 1e-3);
}

#[test]
fn validate_returns_report_for_reference_set() {
    let report = FeedbackNetwork::LPS_DEFAULT.validate().unwrap();
    assert_eq!(report.faults, RangeFaults::empty());
}

#[test]
fn wider_shunt_overshoots_ceiling() {
    let net = FeedbackNetwork {
        r_shunt_ohm: 4_000.0,
        ..FeedbackNetwork::LPS_DEFAULT
    };
    let report = check_range(&net);
    assert_eq!(report.faults, RangeFaults::MAX_ABOVE_BAND);
    assert_eq!(
        net.validate(),
        Err(Error::OutOfRange(RangeFaults::MAX_ABOVE_BAND))
    );
}

#[test]
fn larger_fixed_resistor_lifts_both_ends() {
    let net = FeedbackNetwork {
        r_fixed_ohm: 2_000.0,
        ..FeedbackNetwork::LPS_DEFAULT
    };
    assert_eq!(
        check_range(&net).faults,
        RangeFaults::MIN_ABOVE_BAND | RangeFaults::MAX_ABOVE_BAND
    );
}

#[test]
fn extra_headroom_drops_both_ends() {
    let net = FeedbackNetwork {
        v_headroom: 3.0,
        ..FeedbackNetwork::LPS_DEFAULT
    };
    let report = check_range(&net);
    assert!(!report.is_ok());
    assert_eq!(
        report.faults,
        RangeFaults::MIN_BELOW_BAND | RangeFaults::MAX_BELOW_BAND
    );
}

#[test]
fn validate_checks_constants_first() {
    let net = FeedbackNetwork {
        r1_ohm: 0.0,
        ..FeedbackNetwork::LPS_DEFAULT
    };
    assert_eq!(net.validate(), Err(Error::InvalidConfig));
}

#[test]
fn error_display() {
    assert_eq!(
        Error::InvalidConfig.to_string(),
        "invalid feedback network constants"
    );
    assert_eq!(
        Error::OutOfRange(RangeFaults::MIN_BELOW_BAND | RangeFaults::MAX_ABOVE_BAND).to_string(),
        "output range out of band (faults: 0x09)"
    );
}
