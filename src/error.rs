//! Error handling primitives for the ADXL312 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus could not address the device or a transfer failed.
    Interface(E),
    /// The identity register did not hold the expected device id.
    Communication {
        /// Identity byte required by the device profile.
        expected: u8,
        /// Identity byte returned by the device.
        found: u8,
    },
    /// No data-ready flag was observed within the poll budget.
    AcquisitionTimeout,
    /// A write targeted a read-only or unmapped register.
    WriteRejected(u8),
    /// The provided profile or configuration parameters are invalid.
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
