//! Attitude from a single static gravity vector.
//!
//! Every angle measures how far one body axis tilts out of the plane spanned
//! by the other two. This only holds while gravity is the sole acceleration
//! acting on the sensor.

use crate::profile::AxisRemap;
use crate::sample::RawSample;

/// Roll, pitch and yaw relative to gravity, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    /// Tilt of body Y out of the XZ plane.
    pub roll: f32,
    /// Tilt of body X out of the YZ plane.
    pub pitch: f32,
    /// Tilt of body Z out of the XY plane.
    pub yaw: f32,
}

impl Orientation {
    /// Returns the same angles in degrees.
    pub fn to_degrees(self) -> Self {
        Self {
            roll: self.roll.to_degrees(),
            pitch: self.pitch.to_degrees(),
            yaw: self.yaw.to_degrees(),
        }
    }
}

/// Angle between `primary` and the plane spanned by the two other axes.
///
/// Equals `atan(primary / sqrt(other1² + other2²))`; the all-zero vector
/// yields `0.0` instead of NaN.
pub fn derive_angle(primary: f32, other1: f32, other2: f32) -> f32 {
    let root = libm::sqrtf(other1 * other1 + other2 * other2);
    libm::atan2f(primary, root)
}

/// Remaps `sample` into the body frame and derives roll, pitch and yaw.
pub fn derive_orientation(sample: RawSample, remap: &AxisRemap) -> Orientation {
    let [x, y, z] = remap.apply(sample);

    Orientation {
        roll: derive_angle(y, x, z),
        pitch: derive_angle(x, y, z),
        yaw: derive_angle(z, x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DeviceProfile;
    use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPS: f32 = 1e-5;

    #[test]
    fn gravity_off_axis_is_zero() {
        assert!(derive_angle(0.0, 1.0, 0.0).abs() < EPS);
    }

    #[test]
    fn gravity_on_axis_is_right_angle() {
        assert!((derive_angle(1.0, 0.0, 0.0) - FRAC_PI_2).abs() < EPS);
        assert!((derive_angle(-1.0, 0.0, 0.0) + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn equal_split_is_forty_five_degrees() {
        assert!((derive_angle(1.0, 0.6, 0.8) - FRAC_PI_4).abs() < EPS);
    }

    #[test]
    fn zero_vector_is_defined() {
        assert_eq!(derive_angle(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn flat_and_level_has_no_roll_or_pitch() {
        // Gravity along sensor -X lands on body +Z with the ADXL312 mounting.
        let rest = RawSample::new(-345, 0, 0);
        let orientation = derive_orientation(rest, &DeviceProfile::ADXL312.axis_remap);
        assert!(orientation.roll.abs() < EPS);
        assert!(orientation.pitch.abs() < EPS);
        assert!((orientation.yaw - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn sensor_z_feeds_body_pitch() {
        // Body X is the negated sensor Z axis.
        let sample = RawSample::new(-256, 0, -256);
        let orientation = derive_orientation(sample, &DeviceProfile::ADXL312.axis_remap);
        assert!((orientation.pitch - FRAC_PI_4).abs() < EPS);
        assert!(orientation.roll.abs() < EPS);
        assert!((orientation.yaw - FRAC_PI_4).abs() < EPS);
    }

    #[test]
    fn remap_table_changes_mounting() {
        let sample = RawSample::new(0, 0, 256);
        let orientation = derive_orientation(sample, &AxisRemap::IDENTITY);
        assert!((orientation.yaw - FRAC_PI_2).abs() < EPS);
        assert!(orientation.roll.abs() < EPS);
        assert!(orientation.pitch.abs() < EPS);
    }

    #[test]
    fn converts_to_degrees() {
        let orientation = Orientation {
            roll: FRAC_PI_2,
            pitch: -FRAC_PI_4,
            yaw: 0.0,
        }
        .to_degrees();
        assert!((orientation.roll - 90.0).abs() < 1e-3);
        assert!((orientation.pitch + 45.0).abs() < 1e-3);
    }
}
