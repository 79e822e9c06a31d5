//! Error definitions for the feedback network model.

use crate::validation::RangeFaults;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Constant set is not a physically meaningful network.
    InvalidConfig,
    /// Output at an extreme digipot position fell outside its tolerance band.
    OutOfRange(RangeFaults),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidConfig => write!(f, "invalid feedback network constants"),
            Error::OutOfRange(faults) => {
                write!(f, "output range out of band (faults: {:#04x})", faults.bits())
            }
        }
    }
}
