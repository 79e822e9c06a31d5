//! Output-voltage model for a digipot-adjusted LM317 linear supply.
//!
//! Converts between MCP41100 wiper positions (0-255) and regulated output voltage,
//! checks that a constant set still spans the intended output range, and picks the
//! voltage-dependent over-current threshold. Everything here is a pure function of
//! [`FeedbackNetwork`] constants; no bus access, no state.

#![cfg_attr(not(test), no_std)]

pub mod data_types;
pub mod error;
pub mod network;
pub mod ocp;
pub mod validation;

pub use data_types::{ConversionPoint, OcpBand, Region};
pub use error::Error;
pub use network::{
    FeedbackNetwork, digipot_to_voltage, digipot_to_vout_mv, voltage_to_digipot,
    vout_mv_to_digipot,
};
pub use ocp::adaptive_current_limit;
pub use validation::{RangeCheck, RangeFaults, validate_digipot_range};
