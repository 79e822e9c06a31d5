//! Data types shared by the conversion, validation and OCP helpers.

/// Which part of the transfer curve a digipot position sits in.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Region {
    /// Output is below the ceiling; the inverse recovers the position within a few steps.
    Reversible,
    /// Output is clamped to the ceiling; many positions share one voltage.
    Saturated,
}

/// Voltage band used by the adaptive current limit.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OcpBand {
    /// Below 7 V.
    Low,
    /// 7 V up to (not including) 10 V.
    Mid,
    /// 10 V and above.
    High,
}

/// Intermediate quantities of the forward chain for one position.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConversionPoint {
    pub position: u8,
    pub r_wiper_ohm: f32,
    /// Wiper in parallel with the shunt.
    pub r_eff_ohm: f32,
    /// Regulator voltage before headroom, unclamped.
    pub v_pre: f32,
    /// Clamped output voltage.
    pub v_out: f32,
}
