//! Error type shared by the watch face core

use core::fmt;

use crate::ui::resources::ResourceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Formatted text did not fit into its buffer
    Truncated { capacity: usize },
    /// No resource with this identifier is bundled
    ResourceNotFound(ResourceId),
    /// ADC sample outside of the 12 bit range
    InvalidMeasurement,
    /// The time reference cannot represent the current instant
    ClockUnavailable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Truncated { capacity } => {
                write!(f, "text does not fit into {} bytes", capacity)
            }
            Error::ResourceNotFound(id) => write!(f, "resource {} not found", id.0),
            Error::InvalidMeasurement => f.write_str("invalid battery measurement"),
            Error::ClockUnavailable => f.write_str("clock unavailable"),
        }
    }
}
