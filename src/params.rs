//! Strongly typed parameter enumerations for the ADXL312 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the register bitfields. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use adxl312::params::{DataRate, InterruptPin, Range};
//!
//! let rate = DataRate::Hz200;
//! let range = Range::G12;
//! let pin = InterruptPin::Int2;
//! let _ = (rate, range, pin);
//! ```

use modular_bitfield::prelude::Specifier;

/// Output data rate codes encoded in `BW_RATE[3:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum DataRate {
    /// 6.25 Hz output data rate.
    Hz6_25 = 0b0110,
    /// 12.5 Hz output data rate.
    Hz12_5 = 0b0111,
    /// 25 Hz output data rate.
    Hz25 = 0b1000,
    /// 50 Hz output data rate.
    Hz50 = 0b1001,
    /// 100 Hz output data rate.
    Hz100 = 0b1010,
    /// 200 Hz output data rate.
    Hz200 = 0b1011,
    /// 400 Hz output data rate.
    Hz400 = 0b1100,
    /// 800 Hz output data rate.
    Hz800 = 0b1101,
    /// 1600 Hz output data rate.
    Hz1600 = 0b1110,
    /// 3200 Hz output data rate.
    Hz3200 = 0b1111,
}

impl DataRate {
    /// Returns the output data rate in millihertz.
    pub const fn millihertz(self) -> u32 {
        match self {
            Self::Hz6_25 => 6_250,
            Self::Hz12_5 => 12_500,
            Self::Hz25 => 25_000,
            Self::Hz50 => 50_000,
            Self::Hz100 => 100_000,
            Self::Hz200 => 200_000,
            Self::Hz400 => 400_000,
            Self::Hz800 => 800_000,
            Self::Hz1600 => 1_600_000,
            Self::Hz3200 => 3_200_000,
        }
    }

    /// Returns `true` when the rate is available with `BW_RATE.LOW_POWER` set.
    pub const fn supports_low_power(self) -> bool {
        matches!(
            self,
            Self::Hz12_5 | Self::Hz25 | Self::Hz50 | Self::Hz100 | Self::Hz200 | Self::Hz400
        )
    }
}

/// Full-scale range selections encoded in `DATA_FORMAT[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Range {
    /// ±1.5 g.
    G1_5 = 0b00,
    /// ±3 g.
    G3 = 0b01,
    /// ±6 g.
    G6 = 0b10,
    /// ±12 g.
    G12 = 0b11,
}

impl Range {
    /// Returns the scale factor for this range.
    ///
    /// In full resolution mode the device keeps the base scale across ranges; in
    /// fixed 10-bit mode each range step doubles it.
    pub fn mg_per_lsb(self, base_mg_per_lsb: f32, full_resolution: bool) -> f32 {
        if full_resolution {
            base_mg_per_lsb
        } else {
            base_mg_per_lsb * (1u32 << (self as u8)) as f32
        }
    }
}

/// Interrupt pin routing bit used in `INT_MAP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum InterruptPin {
    /// Route the interrupt to the INT1 pin (bit cleared).
    Int1 = 0,
    /// Route the interrupt to the INT2 pin (bit set).
    Int2 = 1,
}

/// FIFO operating modes encoded in `FIFO_CTL[7:6]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum FifoMode {
    /// FIFO disabled; bypassed.
    Bypass = 0b00,
    /// FIFO collects up to 32 samples then stops.
    Fifo = 0b01,
    /// Streaming mode (circular buffer).
    Stream = 0b10,
    /// Trigger mode.
    Trigger = 0b11,
}

/// Sleep-mode sampling frequency encoded in `POWER_CTL[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum WakeUpRate {
    /// 8 Hz readings in sleep mode.
    Hz8 = 0b00,
    /// 4 Hz readings in sleep mode.
    Hz4 = 0b01,
    /// 2 Hz readings in sleep mode.
    Hz2 = 0b10,
    /// 1 Hz readings in sleep mode.
    Hz1 = 0b11,
}

/// Byte order of the two registers backing one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOrder {
    /// Low byte at the lower register address (`DATAx0` = LSB).
    LittleEndian,
    /// High byte at the lower register address.
    BigEndian,
}
