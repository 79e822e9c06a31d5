//! Range check of the constant set at the two extreme wiper positions.
//!
//! The output at position 0 and at full scale is derived again here from the raw
//! constants instead of going through [`FeedbackNetwork::position_to_voltage`], so an
//! edit that breaks either the constants or the forward chain shows up as a band fault.

use crate::error::Error;
use crate::network::FeedbackNetwork;

/// Closed voltage interval `[low, high]`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoltageBand {
    pub low: f32,
    pub high: f32,
}

impl VoltageBand {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.low && v <= self.high
    }
}

/// Accepted unclamped output with the wiper at position 0.
pub const MIN_POSITION_BAND: VoltageBand = VoltageBand::new(4.5, 5.5);
/// Accepted unclamped output with the wiper at full scale.
pub const MAX_POSITION_BAND: VoltageBand = VoltageBand::new(14.5, 16.0);

bitflags::bitflags! {
    /// Band violations found by [`check_range`].
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct RangeFaults: u8 {
        const MIN_BELOW_BAND = 1 << 0;
        const MIN_ABOVE_BAND = 1 << 1;
        const MAX_BELOW_BAND = 1 << 2;
        const MAX_ABOVE_BAND = 1 << 3;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RangeFaults {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RangeFaults({=u8:#x})", self.bits())
    }
}

/// Outcome of [`check_range`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeCheck {
    /// Unclamped output at position 0.
    pub v_at_min: f32,
    /// Unclamped output at full scale.
    pub v_at_max: f32,
    pub faults: RangeFaults,
}

impl RangeCheck {
    pub fn is_ok(&self) -> bool {
        self.faults.is_empty()
    }
}

fn band_faults(v: f32, band: &VoltageBand, below: RangeFaults, above: RangeFaults) -> RangeFaults {
    // NaN counts as below.
    if !(v >= band.low) {
        below
    } else if v > band.high {
        above
    } else {
        RangeFaults::empty()
    }
}

/// Derive the extreme outputs of `net` and compare them against the fixed bands.
pub fn check_range(net: &FeedbackNetwork) -> RangeCheck {
    // Position 0: no wiper resistance, the shunt leg contributes nothing.
    let r2_min = net.r_fixed_ohm;
    let v_at_min = net.v_ref * (1.0 + r2_min / net.r1_ohm) - net.v_headroom;

    // Full scale: the whole track in parallel with the shunt.
    let r_wiper_max = net.r_digipot_full_ohm;
    let r_eff_max = (r_wiper_max * net.r_shunt_ohm) / (r_wiper_max + net.r_shunt_ohm);
    let r2_max = net.r_fixed_ohm + r_eff_max;
    let v_at_max = net.v_ref * (1.0 + r2_max / net.r1_ohm) - net.v_headroom;

    let faults = band_faults(
        v_at_min,
        &MIN_POSITION_BAND,
        RangeFaults::MIN_BELOW_BAND,
        RangeFaults::MIN_ABOVE_BAND,
    ) | band_faults(
        v_at_max,
        &MAX_POSITION_BAND,
        RangeFaults::MAX_BELOW_BAND,
        RangeFaults::MAX_ABOVE_BAND,
    );

    #[cfg(feature = "defmt")]
    if !faults.is_empty() {
        defmt::warn!(
            "digipot range out of band: {} V at 0, {} V at full scale, {}",
            v_at_min,
            v_at_max,
            faults
        );
    }

    RangeCheck {
        v_at_min,
        v_at_max,
        faults,
    }
}

impl FeedbackNetwork {
    /// [`check`](FeedbackNetwork::check) followed by [`check_range`].
    pub fn validate(&self) -> Result<RangeCheck, Error> {
        self.check()?;
        let report = check_range(self);
        if report.is_ok() {
            Ok(report)
        } else {
            Err(Error::OutOfRange(report.faults))
        }
    }
}

/// True when the reference constant set lands in both bands.
pub fn validate_digipot_range() -> bool {
    check_range(&FeedbackNetwork::LPS_DEFAULT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_are_inclusive() {
        assert!(MIN_POSITION_BAND.contains(4.5));
        assert!(MIN_POSITION_BAND.contains(5.5));
        assert!(!MIN_POSITION_BAND.contains(5.500_1));
        assert!(!MAX_POSITION_BAND.contains(f32::NAN));
    }

    #[test]
    fn nan_output_is_flagged_below() {
        let f = band_faults(
            f32::NAN,
            &MAX_POSITION_BAND,
            RangeFaults::MAX_BELOW_BAND,
            RangeFaults::MAX_ABOVE_BAND,
        );
        assert_eq!(f, RangeFaults::MAX_BELOW_BAND);
    }
}
