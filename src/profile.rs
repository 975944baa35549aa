//! Static description of one accelerometer model.
//!
//! A [`DeviceProfile`] gathers everything the driver needs to know about a
//! particular part: where its registers live, which identity byte it answers
//! with, how raw counts scale to milli-g, how long configuration changes take
//! to settle, the datasheet self-test envelope and how the sensor is mounted
//! relative to the body frame. The profile is `Copy`, so several sessions can
//! share the same description.

use crate::config::ConfigError;
use crate::params::ByteOrder;
use crate::registers::*;
use crate::sample::RawSample;

/// Register addresses used by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterMap {
    /// Device identity register.
    pub device_id: u8,
    /// Per-axis offset registers (X, Y, Z).
    pub offsets: [u8; 3],
    /// Activity threshold.
    pub thresh_act: u8,
    /// Inactivity threshold.
    pub thresh_inact: u8,
    /// Inactivity time.
    pub time_inact: u8,
    /// Axis enable for activity/inactivity detection.
    pub act_inact_ctl: u8,
    /// Data rate and power mode control.
    pub bw_rate: u8,
    /// Power-saving features control.
    pub power_ctl: u8,
    /// Interrupt enable control.
    pub int_enable: u8,
    /// Interrupt mapping control.
    pub int_map: u8,
    /// Interrupt source, read-only.
    pub int_source: u8,
    /// Data format control.
    pub data_format: u8,
    /// Axis data registers in bus order (X0, X1, Y0, Y1, Z0, Z1).
    pub data: [u8; 6],
    /// FIFO control.
    pub fifo_ctl: u8,
    /// FIFO status, read-only.
    pub fifo_status: u8,
}

impl RegisterMap {
    /// ADXL312 register layout.
    pub const ADXL312: Self = Self {
        device_id: REG_DEVID,
        offsets: [REG_OFSX, REG_OFSY, REG_OFSZ],
        thresh_act: REG_THRESH_ACT,
        thresh_inact: REG_THRESH_INACT,
        time_inact: REG_TIME_INACT,
        act_inact_ctl: REG_ACT_INACT_CTL,
        bw_rate: REG_BW_RATE,
        power_ctl: REG_POWER_CTL,
        int_enable: REG_INT_ENABLE,
        int_map: REG_INT_MAP,
        int_source: REG_INT_SOURCE,
        data_format: REG_DATA_FORMAT,
        data: [
            REG_DATAX0, REG_DATAX1, REG_DATAY0, REG_DATAY1, REG_DATAZ0, REG_DATAZ1,
        ],
        fifo_ctl: REG_FIFO_CTL,
        fifo_status: REG_FIFO_STATUS,
    };

    /// Classifies `register`, or returns `None` when it is not part of the map.
    pub fn access(&self, register: u8) -> Option<RegisterAccess> {
        let read_only = register == self.device_id
            || register == self.int_source
            || register == self.fifo_status
            || self.data.contains(&register);
        if read_only {
            return Some(RegisterAccess::ReadOnly);
        }

        let read_write = self.offsets.contains(&register)
            || [
                self.thresh_act,
                self.thresh_inact,
                self.time_inact,
                self.act_inact_ctl,
                self.bw_rate,
                self.power_ctl,
                self.int_enable,
                self.int_map,
                self.data_format,
                self.fifo_ctl,
            ]
            .contains(&register);
        read_write.then_some(RegisterAccess::ReadWrite)
    }

    /// Returns `true` if the driver may write `register`.
    pub fn is_writable(&self, register: u8) -> bool {
        self.access(register) == Some(RegisterAccess::ReadWrite)
    }

    fn is_contiguous(registers: &[u8]) -> bool {
        registers
            .windows(2)
            .all(|pair| pair[0].checked_add(1) == Some(pair[1]))
    }

    /// Checks that burst-accessed blocks occupy consecutive addresses.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if !Self::is_contiguous(&self.data) || !Self::is_contiguous(&self.offsets) {
            return Err(ConfigError::NonContiguousBurst);
        }

        Ok(())
    }
}

/// Inclusive acceptance window for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisBounds {
    /// Smallest accepted value.
    pub min: i16,
    /// Largest accepted value.
    pub max: i16,
}

impl AxisBounds {
    /// Creates a new window.
    pub const fn new(min: i16, max: i16) -> Self {
        Self { min, max }
    }

    /// Returns `true` when `value` lies inside the window.
    pub fn contains(&self, value: i32) -> bool {
        (i32::from(self.min)..=i32::from(self.max)).contains(&value)
    }
}

/// Datasheet limits on the self-test response, in LSB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfTestEnvelope {
    /// X-axis window.
    pub x: AxisBounds,
    /// Y-axis window.
    pub y: AxisBounds,
    /// Z-axis window.
    pub z: AxisBounds,
}

impl SelfTestEnvelope {
    /// Checks each axis of a `stimulated - baseline` delta against its window.
    pub fn accepts(&self, delta: [i32; 3]) -> bool {
        self.x.contains(delta[0]) && self.y.contains(delta[1]) && self.z.contains(delta[2])
    }
}

/// Sensor axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Sensor X axis.
    X,
    /// Sensor Y axis.
    Y,
    /// Sensor Z axis.
    Z,
}

/// Sensor axis feeding one body axis, optionally negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignedAxis {
    /// Source axis in the sensor frame.
    pub axis: Axis,
    /// Invert the sign of the source value.
    pub negate: bool,
}

impl SignedAxis {
    /// Uses `axis` as-is.
    pub const fn positive(axis: Axis) -> Self {
        Self {
            axis,
            negate: false,
        }
    }

    /// Uses `axis` with its sign flipped.
    pub const fn negative(axis: Axis) -> Self {
        Self { axis, negate: true }
    }

    fn pick(&self, sample: RawSample) -> f32 {
        let value = match self.axis {
            Axis::X => sample.x,
            Axis::Y => sample.y,
            Axis::Z => sample.z,
        };
        let value = f32::from(value);
        if self.negate { -value } else { value }
    }
}

/// Mapping from the sensor frame to the body frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisRemap {
    /// Source of body X.
    pub x: SignedAxis,
    /// Source of body Y.
    pub y: SignedAxis,
    /// Source of body Z.
    pub z: SignedAxis,
}

impl AxisRemap {
    /// Sensor frame equals body frame.
    pub const IDENTITY: Self = Self {
        x: SignedAxis::positive(Axis::X),
        y: SignedAxis::positive(Axis::Y),
        z: SignedAxis::positive(Axis::Z),
    };

    /// Applies the mapping, returning body-frame `[x, y, z]`.
    pub fn apply(&self, sample: RawSample) -> [f32; 3] {
        [self.x.pick(sample), self.y.pick(sample), self.z.pick(sample)]
    }

    /// Checks that every sensor axis is used exactly once.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        let axes = [self.x.axis, self.y.axis, self.z.axis];
        let is_permutation = [Axis::X, Axis::Y, Axis::Z]
            .iter()
            .all(|axis| axes.contains(axis));
        if !is_permutation {
            return Err(ConfigError::InvalidAxisRemap);
        }

        Ok(())
    }
}

/// Complete description of one accelerometer model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceProfile {
    /// 7-bit slave address with `ALT ADDRESS` tied low.
    ///
    /// Describes the part only; the I2C constructors take the address from
    /// the caller's [`SlaveAddress`](crate::interface::SlaveAddress).
    pub address: u8,
    /// Expected content of the identity register.
    pub device_id: u8,
    /// Register addresses.
    pub registers: RegisterMap,
    /// Full-resolution scale factor in mg per LSB.
    pub scale_mg_per_lsb: f32,
    /// Delay after a configuration change before readings are valid.
    pub settle_time_ms: u32,
    /// Byte order of each axis register pair.
    pub byte_order: ByteOrder,
    /// Accepted self-test response per axis.
    pub self_test: SelfTestEnvelope,
    /// Mounting of the sensor relative to the body frame.
    pub axis_remap: AxisRemap,
    /// Z reading of a level, resting sensor used by offset calibration.
    pub calibration_z_bias_lsb: i16,
}

impl DeviceProfile {
    /// ADXL312 mounted with `x' = -z`, `y' = -y`, `z' = -x`.
    pub const ADXL312: Self = Self {
        address: 0x53,
        device_id: EXPECTED_DEVID,
        registers: RegisterMap::ADXL312,
        scale_mg_per_lsb: 2.9,
        settle_time_ms: 15,
        byte_order: ByteOrder::LittleEndian,
        self_test: SelfTestEnvelope {
            x: AxisBounds::new(68, 764),
            y: AxisBounds::new(-764, -32),
            z: AxisBounds::new(101, 1241),
        },
        axis_remap: AxisRemap {
            x: SignedAxis::negative(Axis::Z),
            y: SignedAxis::negative(Axis::Y),
            z: SignedAxis::negative(Axis::X),
        },
        calibration_z_bias_lsb: 256,
    };

    /// Returns a copy of the profile with a different mounting.
    pub const fn with_axis_remap(mut self, axis_remap: AxisRemap) -> Self {
        self.axis_remap = axis_remap;
        self
    }

    /// Checks internal consistency of the profile.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        self.registers.validate()?;
        self.axis_remap.validate()?;

        let bounds = [self.self_test.x, self.self_test.y, self.self_test.z];
        if bounds.iter().any(|axis| axis.min > axis.max) {
            return Err(ConfigError::InvalidEnvelope);
        }

        if self.scale_mg_per_lsb.is_nan() || self.scale_mg_per_lsb <= 0.0 {
            return Err(ConfigError::InvalidScale);
        }

        Ok(())
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::ADXL312
    }
}
