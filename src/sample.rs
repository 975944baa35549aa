//! Decoded accelerometer readings.

use crate::params::ByteOrder;

/// Number of consecutive bytes spanning X, Y, Z axis samples.
pub const SAMPLE_BYTES: usize = 6;

/// One accelerometer reading in device LSB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// X-axis reading.
    pub x: i16,
    /// Y-axis reading.
    pub y: i16,
    /// Z-axis reading.
    pub z: i16,
}

impl RawSample {
    /// Creates a sample from its three components.
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    #[inline]
    fn unpack_axis(first: u8, second: u8, order: ByteOrder) -> i16 {
        let (low, high) = match order {
            ByteOrder::LittleEndian => (first, second),
            ByteOrder::BigEndian => (second, first),
        };
        ((u16::from(high) << 8) | u16::from(low)) as i16
    }

    /// Decodes a burst read of the six data registers.
    pub fn from_bytes(raw: [u8; SAMPLE_BYTES], order: ByteOrder) -> Self {
        Self {
            x: Self::unpack_axis(raw[0], raw[1], order),
            y: Self::unpack_axis(raw[2], raw[3], order),
            z: Self::unpack_axis(raw[4], raw[5], order),
        }
    }

    /// Scales the reading to g using `mg_per_lsb`.
    pub fn to_acceleration(self, mg_per_lsb: f32) -> Acceleration {
        let scale = mg_per_lsb / 1000.0;
        Acceleration {
            x: f32::from(self.x) * scale,
            y: f32::from(self.y) * scale,
            z: f32::from(self.z) * scale,
        }
    }
}

/// Acceleration expressed in g.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    /// X-axis acceleration.
    pub x: f32,
    /// Y-axis acceleration.
    pub y: f32,
    /// Z-axis acceleration.
    pub z: f32,
}

/// Running per-axis sum used to average a batch of samples.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SampleAccumulator {
    sum: [i32; 3],
    count: i32,
}

impl SampleAccumulator {
    pub(crate) fn push(&mut self, sample: RawSample) {
        self.sum[0] += i32::from(sample.x);
        self.sum[1] += i32::from(sample.y);
        self.sum[2] += i32::from(sample.z);
        self.count += 1;
    }

    /// Mean truncated toward zero, or `None` for an empty batch.
    pub(crate) fn mean(&self) -> Option<RawSample> {
        if self.count == 0 {
            return None;
        }

        let axis = |sum: i32| (sum / self.count) as i16;
        Some(RawSample::new(
            axis(self.sum[0]),
            axis(self.sum[1]),
            axis(self.sum[2]),
        ))
    }
}
