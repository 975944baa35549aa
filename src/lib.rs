//! `no_std` polling driver for the Analog Devices ADXL312 accelerometer.
#![cfg_attr(not(test), no_std)]

mod log;

mod error;

pub mod calibration;
pub mod config;
pub mod device;
pub mod interface;
pub mod orientation;
pub mod params;
pub mod profile;
pub mod registers;
pub mod sample;
pub mod self_test;

#[cfg(test)]
mod test_support;

pub use crate::device::Adxl312;
pub use crate::error::{Error, Result};
pub use crate::orientation::Orientation;
pub use crate::profile::DeviceProfile;
pub use crate::sample::RawSample;
