//! Register map definitions for the ADXL312 accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{DataRate, FifoMode, Range, WakeUpRate};

/// Register address of `DEVID`.
pub const REG_DEVID: u8 = 0x00;
/// Register address of `OFSX`.
pub const REG_OFSX: u8 = 0x1E;
/// Register address of `OFSY`.
pub const REG_OFSY: u8 = 0x1F;
/// Register address of `OFSZ`.
pub const REG_OFSZ: u8 = 0x20;
/// Register address of `THRESH_ACT`.
pub const REG_THRESH_ACT: u8 = 0x24;
/// Register address of `THRESH_INACT`.
pub const REG_THRESH_INACT: u8 = 0x25;
/// Register address of `TIME_INACT`.
pub const REG_TIME_INACT: u8 = 0x26;
/// Register address of `ACT_INACT_CTL`.
pub const REG_ACT_INACT_CTL: u8 = 0x27;
/// Register address of `BW_RATE`.
pub const REG_BW_RATE: u8 = 0x2C;
/// Register address of `POWER_CTL`.
pub const REG_POWER_CTL: u8 = 0x2D;
/// Register address of `INT_ENABLE`.
pub const REG_INT_ENABLE: u8 = 0x2E;
/// Register address of `INT_MAP`.
pub const REG_INT_MAP: u8 = 0x2F;
/// Register address of `INT_SOURCE`.
pub const REG_INT_SOURCE: u8 = 0x30;
/// Register address of `DATA_FORMAT`.
pub const REG_DATA_FORMAT: u8 = 0x31;
/// Register address of `DATAX0`.
pub const REG_DATAX0: u8 = 0x32;
/// Register address of `DATAX1`.
pub const REG_DATAX1: u8 = 0x33;
/// Register address of `DATAY0`.
pub const REG_DATAY0: u8 = 0x34;
/// Register address of `DATAY1`.
pub const REG_DATAY1: u8 = 0x35;
/// Register address of `DATAZ0`.
pub const REG_DATAZ0: u8 = 0x36;
/// Register address of `DATAZ1`.
pub const REG_DATAZ1: u8 = 0x37;
/// Register address of `FIFO_CTL`.
pub const REG_FIFO_CTL: u8 = 0x38;
/// Register address of `FIFO_STATUS`.
pub const REG_FIFO_STATUS: u8 = 0x39;

/// Content of `DEVID` on a genuine ADXL312.
pub const EXPECTED_DEVID: u8 = 0xE5;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
}

macro_rules! byte_register {
    ($name:ident) => {
        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                Self::from_bytes([value])
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.into_bytes()[0]
            }
        }
    };
}

/// Bitfield representation of the `BW_RATE` register.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandwidthRate {
    // Output data rate code (bits 3:0).
    pub rate: DataRate,
    // Reduced power operation (bit 4).
    pub low_power: bool,
    #[skip]
    __: B3,
}

byte_register!(BandwidthRate);

/// Bitfield representation of the `POWER_CTL` register.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerControl {
    // Sleep-mode reading frequency (bits 1:0).
    pub wake_up: WakeUpRate,
    // Sleep mode (bit 2).
    pub sleep: bool,
    // Measurement mode, standby when cleared (bit 3).
    pub measure: bool,
    // Automatic sleep on inactivity (bit 4).
    pub auto_sleep: bool,
    // Link activity and inactivity detection (bit 5).
    pub link: bool,
    #[skip]
    __: B2,
}

byte_register!(PowerControl);

/// Bitfield shared by `INT_ENABLE`, `INT_MAP` and `INT_SOURCE`.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptFlags {
    // FIFO overrun (bit 0).
    pub overrun: bool,
    // FIFO watermark reached (bit 1).
    pub watermark: bool,
    #[skip]
    __: B1,
    // Inactivity detected (bit 3).
    pub inactivity: bool,
    // Activity detected (bit 4).
    pub activity: bool,
    #[skip]
    __: B2,
    // New sample available (bit 7).
    pub data_ready: bool,
}

byte_register!(InterruptFlags);

/// Bitfield representation of the `DATA_FORMAT` register.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFormat {
    // Full-scale range (bits 1:0).
    pub range: Range,
    // Left-justified output (bit 2).
    pub justify: bool,
    // Full resolution, fixed scale across ranges (bit 3).
    pub full_resolution: bool,
    #[skip]
    __: B1,
    // Active-low interrupt pins (bit 5).
    pub int_invert: bool,
    // 3-wire SPI mode (bit 6).
    pub spi_3wire: bool,
    // Self-test force applied to the sensor (bit 7).
    pub self_test: bool,
}

byte_register!(DataFormat);

/// Bitfield representation of the `FIFO_CTL` register.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoControl {
    // Watermark or trigger sample count (bits 4:0).
    pub samples: B5,
    // Trigger event linked to INT2 instead of INT1 (bit 5).
    pub trigger_int2: bool,
    // FIFO operating mode (bits 7:6).
    pub mode: FifoMode,
}

byte_register!(FifoControl);

/// Bitfield representation of the `FIFO_STATUS` register.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoStatus {
    // Samples stored in the FIFO (bits 5:0).
    pub entries: B6,
    #[skip]
    __: B1,
    // Trigger event occurred (bit 7).
    pub triggered: bool,
}

byte_register!(FifoStatus);
