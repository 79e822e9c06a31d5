//! Feedback network constants and the digipot <-> output voltage transforms.
//!
//! The regulator's ADJ divider has R1 from ADJ to ground and, on the upper leg,
//! a fixed resistor in series with the digipot wiper shunted by a parallel resistor:
//!
//! ```text
//! V_PRE = V_REF * (1 + (R_FIXED + (R_WIPER || R_SHUNT)) / R1)
//! V_OUT = V_PRE - V_HEADROOM
//! ```
//!
//! `R_WIPER || R_SHUNT` never exceeds `R_SHUNT`, so the output reaches the ceiling
//! around mid-scale and every position above that maps to the same voltage. The
//! inverse is only faithful below [`FeedbackNetwork::saturation_position`].

use crate::data_types::{ConversionPoint, Region};
use crate::error::Error;

/// Fixed upper feedback resistor (Ω).
pub const R_FIXED_FB_OHM: f32 = 1_100.0;
/// R1, ADJ to ground (Ω).
pub const R1_FB_OHM: f32 = 240.0;
/// Resistor in parallel with the digipot wiper (Ω).
pub const R_SHUNT_FB_OHM: f32 = 2_000.0;
/// Digipot end-to-end resistance, MCP41100 (Ω).
pub const R_DIGIPOT_FULL_OHM: f32 = 100_000.0;
pub const DIGIPOT_STEPS: f32 = 255.0;
/// LM317 reference between OUT and ADJ.
pub const V_REF: f32 = 1.25;
/// Constant drop between the pre-regulator node and the output.
pub const V_HEADROOM: f32 = 2.0;
pub const V_OUT_MIN: f32 = 5.0;
pub const V_OUT_MAX_SET: f32 = 15.0;

/// Highest wiper position accepted by the digipot.
pub const DIGIPOT_MAX_POSITION: u8 = 255;

/// Physical constant set of the output-voltage feedback network.
///
/// Forward and inverse conversions are both methods on this type, so a round trip
/// always runs against one constant set.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedbackNetwork {
    pub r_fixed_ohm: f32,
    pub r1_ohm: f32,
    pub r_shunt_ohm: f32,
    pub r_digipot_full_ohm: f32,
    pub digipot_steps: f32,
    pub v_ref: f32,
    pub v_headroom: f32,
    pub v_out_min: f32,
    pub v_out_max: f32,
}

impl Default for FeedbackNetwork {
    fn default() -> Self {
        Self::LPS_DEFAULT
    }
}

impl FeedbackNetwork {
    /// Reference board values (5-15 V output).
    pub const LPS_DEFAULT: Self = Self {
        r_fixed_ohm: R_FIXED_FB_OHM,
        r1_ohm: R1_FB_OHM,
        r_shunt_ohm: R_SHUNT_FB_OHM,
        r_digipot_full_ohm: R_DIGIPOT_FULL_OHM,
        digipot_steps: DIGIPOT_STEPS,
        v_ref: V_REF,
        v_headroom: V_HEADROOM,
        v_out_min: V_OUT_MIN,
        v_out_max: V_OUT_MAX_SET,
    };

    /// Reject constant sets that cannot describe a real network.
    ///
    /// The fixed resistor and headroom may be zero; everything else must be positive,
    /// the step count must fit an 8-bit wiper and the output bounds must be ordered.
    pub fn check(&self) -> Result<(), Error> {
        let positive = [
            self.r1_ohm,
            self.r_shunt_ohm,
            self.r_digipot_full_ohm,
            self.v_ref,
        ];
        // `!(x > 0.0)` also rejects NaN.
        if positive.iter().any(|&x| !(x > 0.0)) {
            return Err(Error::InvalidConfig);
        }
        if !(self.r_fixed_ohm >= 0.0) || !(self.v_headroom >= 0.0) {
            return Err(Error::InvalidConfig);
        }
        if !(self.digipot_steps >= 1.0 && self.digipot_steps <= DIGIPOT_MAX_POSITION as f32) {
            return Err(Error::InvalidConfig);
        }
        if !(self.v_out_min < self.v_out_max) {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }

    /// Wiper resistance per digipot step (Ω).
    pub fn ohm_per_step(&self) -> f32 {
        self.r_digipot_full_ohm / self.digipot_steps
    }

    /// Last valid wiper position for this step count.
    pub fn max_position(&self) -> u8 {
        self.digipot_steps as u8
    }

    fn clamp_vout(&self, v: f32) -> f32 {
        if v < self.v_out_min {
            self.v_out_min
        } else if v > self.v_out_max {
            self.v_out_max
        } else {
            v
        }
    }

    /// Every intermediate of the forward chain for `position`.
    pub fn breakdown(&self, position: u8) -> ConversionPoint {
        let r_wiper = position as f32 * self.ohm_per_step();
        let r_eff = (r_wiper * self.r_shunt_ohm) / (r_wiper + self.r_shunt_ohm);
        let r2 = self.r_fixed_ohm + r_eff;
        let v_pre = self.v_ref * (1.0 + r2 / self.r1_ohm);
        ConversionPoint {
            position,
            r_wiper_ohm: r_wiper,
            r_eff_ohm: r_eff,
            v_pre,
            v_out: self.clamp_vout(v_pre - self.v_headroom),
        }
    }

    /// Output voltage for a wiper position, clamped to `[v_out_min, v_out_max]`.
    pub fn position_to_voltage(&self, position: u8) -> f32 {
        self.breakdown(position).v_out
    }

    /// Nearest wiper position for a target output voltage.
    ///
    /// The target is clamped first (NaN is treated as the floor). Targets the network
    /// cannot reach from below return 0; targets needing more than full-scale wiper
    /// resistance return the last position. Rounding is half-up.
    pub fn voltage_to_position(&self, v_out: f32) -> u8 {
        let v_out = if v_out.is_nan() {
            self.v_out_min
        } else {
            self.clamp_vout(v_out)
        };

        let v_pre = v_out + self.v_headroom;
        let r2 = (v_pre / self.v_ref - 1.0) * self.r1_ohm;
        let r_eff = r2 - self.r_fixed_ohm;
        if r_eff <= 0.0 {
            return 0;
        }

        // Diverges as r_eff approaches the shunt: that is the saturation knee.
        let r_wiper = (r_eff * self.r_shunt_ohm) / (self.r_shunt_ohm - r_eff);
        if r_wiper < 0.0 {
            return 0;
        }
        let max = self.max_position();
        if r_wiper > self.r_digipot_full_ohm {
            #[cfg(feature = "defmt")]
            defmt::trace!("{} V needs {} Ω wiper, capping at {}", v_out, r_wiper, max);
            return max;
        }

        // Truncating after +0.5 keeps round-half-up independent of the float library.
        let pos = (r_wiper / self.ohm_per_step() + 0.5) as i32;
        pos.clamp(0, max as i32) as u8
    }

    /// First position whose unclamped output reaches the ceiling, if any.
    pub fn saturation_position(&self) -> Option<u8> {
        (0..=self.max_position())
            .find(|&pos| self.breakdown(pos).v_pre - self.v_headroom >= self.v_out_max)
    }

    /// Classify a position as reversible or saturated.
    pub fn region(&self, position: u8) -> Region {
        match self.saturation_position() {
            Some(knee) if position >= knee => Region::Saturated,
            _ => Region::Reversible,
        }
    }

    /// Sample the forward chain at `0, stride, 2 * stride, ...`, capped at the last position.
    pub fn conversion_table<const N: usize>(&self, stride: u8) -> [ConversionPoint; N] {
        let max = self.max_position() as usize;
        core::array::from_fn(|i| {
            let pos = (i * stride as usize).min(max) as u8;
            self.breakdown(pos)
        })
    }

    /// Output voltage in millivolts, rounded half-up.
    pub fn position_to_vout_mv(&self, position: u8) -> u16 {
        (self.position_to_voltage(position) * 1000.0 + 0.5) as u16
    }

    /// Nearest wiper position for a target in millivolts.
    pub fn vout_mv_to_position(&self, mv: u16) -> u8 {
        self.voltage_to_position(mv as f32 / 1000.0)
    }
}

/// Output voltage for `position` on the reference network.
pub fn digipot_to_voltage(position: u8) -> f32 {
    FeedbackNetwork::LPS_DEFAULT.position_to_voltage(position)
}

/// Nearest reference-network position for `v_out`.
pub fn voltage_to_digipot(v_out: f32) -> u8 {
    FeedbackNetwork::LPS_DEFAULT.voltage_to_position(v_out)
}

/// Millivolt form of [`digipot_to_voltage`].
pub fn digipot_to_vout_mv(position: u8) -> u16 {
    FeedbackNetwork::LPS_DEFAULT.position_to_vout_mv(position)
}

/// Millivolt form of [`voltage_to_digipot`].
pub fn vout_mv_to_digipot(mv: u16) -> u8 {
    FeedbackNetwork::LPS_DEFAULT.vout_mv_to_position(mv)
}

/// Region of `position` on the reference network.
pub fn region(position: u8) -> Region {
    FeedbackNetwork::LPS_DEFAULT.region(position)
}
