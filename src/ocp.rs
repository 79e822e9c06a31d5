//! Adaptive over-current threshold.
//!
//! Lower output voltages leave more drop across the pass transistor, so the limit is
//! tightest at the bottom of the range. Stateless: the band is reclassified on every call.

use crate::data_types::OcpBand;
use crate::network::FeedbackNetwork;

/// Upper (exclusive) edge of [`OcpBand::Low`].
pub const OCP_LOW_BAND_MAX_V: f32 = 7.0;
/// Upper (exclusive) edge of [`OcpBand::Mid`].
pub const OCP_MID_BAND_MAX_V: f32 = 10.0;

pub const OCP_LOW_LIMIT_MA: f32 = 350.0;
pub const OCP_MID_LIMIT_MA: f32 = 450.0;
pub const OCP_HIGH_LIMIT_MA: f32 = 500.0;

impl OcpBand {
    /// Classify an output voltage. NaN fails both comparisons and lands in `High`.
    pub fn from_voltage(v_out: f32) -> Self {
        if v_out < OCP_LOW_BAND_MAX_V {
            OcpBand::Low
        } else if v_out < OCP_MID_BAND_MAX_V {
            OcpBand::Mid
        } else {
            OcpBand::High
        }
    }

    pub fn limit_ma(self) -> f32 {
        match self {
            OcpBand::Low => OCP_LOW_LIMIT_MA,
            OcpBand::Mid => OCP_MID_LIMIT_MA,
            OcpBand::High => OCP_HIGH_LIMIT_MA,
        }
    }
}

/// Current limit (mA) for the present output voltage.
pub fn adaptive_current_limit(v_out: f32) -> f32 {
    OcpBand::from_voltage(v_out).limit_ma()
}

/// Current limit (mA) for the voltage a wiper position produces on `net`.
pub fn adaptive_current_limit_for_position(net: &FeedbackNetwork, position: u8) -> f32 {
    adaptive_current_limit(net.position_to_voltage(position))
}
