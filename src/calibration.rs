//! Offset calibration for a sensor resting flat and level.

use crate::device::Adxl312;
use crate::error::Result;
use crate::interface::Adxl312Interface;
use crate::sample::RawSample;
use embedded_hal::delay::DelayNs;

/// Samples averaged to estimate the resting bias.
pub const CALIBRATION_SAMPLES: u32 = 100;

// One offset LSB spans four output LSB in full resolution.
const OUTPUT_LSB_PER_OFFSET_LSB: i32 = 4;

/// Result produced by the calibration routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationReport {
    /// The offset registers were written.
    pub applied: bool,
    /// Mean resting output, if it could be sampled.
    pub mean: Option<RawSample>,
    /// Offset codes written to `OFSX`, `OFSY`, `OFSZ`.
    pub offsets: [i8; 3],
}

/// Offset codes cancelling `mean`, with `z_bias_lsb` expected on Z at rest.
///
/// Each code is `-(m / 4)` with truncating division, saturated to `i8`.
pub fn offsets_for(mean: RawSample, z_bias_lsb: i16) -> [i8; 3] {
    let code = |axis: i32| {
        let offset = -(axis / OUTPUT_LSB_PER_OFFSET_LSB);
        offset.clamp(i32::from(i8::MIN), i32::from(i8::MAX)) as i8
    };

    [
        code(i32::from(mean.x)),
        code(i32::from(mean.y)),
        code(i32::from(mean.z) - i32::from(z_bias_lsb)),
    ]
}

/// Averages the resting output and programs the offset registers in one burst.
///
/// The written codes are not read back; callers wanting confirmation can use
/// [`Adxl312::read_offsets`]. A data-ready timeout skips the write and reports
/// `applied == false`.
pub fn calibrate<IFACE, CommE>(
    device: &mut Adxl312<IFACE>,
    delay: &mut impl DelayNs,
) -> Result<CalibrationReport, CommE>
where
    IFACE: Adxl312Interface<Error = CommE>,
{
    let Some(mean) = device.mean_sample(CALIBRATION_SAMPLES, delay)? else {
        warn!("calibration aborted: no data");
        return Ok(CalibrationReport::default());
    };

    let offsets = offsets_for(mean, device.profile().calibration_z_bias_lsb);
    device.write_offsets(offsets)?;
    info!("offsets programmed: x={} y={} z={}", offsets[0], offsets[1], offsets[2]);

    Ok(CalibrationReport {
        applied: true,
        mean: Some(mean),
        offsets,
    })
}
