//! Datasheet self-test routine for the ADXL312 driver.
//!
//! The electrostatic self-test force shifts the output of every axis by a
//! known amount. The routine averages a baseline, averages again with the force
//! applied and checks the per-axis difference against the profile envelope.

use crate::device::Adxl312;
use crate::error::Result;
use crate::interface::Adxl312Interface;
use crate::sample::RawSample;
use embedded_hal::delay::DelayNs;

/// Samples averaged for each phase of the self-test.
pub const SELF_TEST_SAMPLES: u32 = 100;

/// Result produced by the self-test routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfTestReport {
    /// Indicates whether the self-test passed.
    pub passed: bool,
    /// Mean output without the self-test force, if it could be sampled.
    pub baseline: Option<RawSample>,
    /// Mean output with the self-test force, if it could be sampled.
    pub stimulated: Option<RawSample>,
}

impl SelfTestReport {
    /// Per-axis `stimulated - baseline`, when both phases completed.
    pub fn delta(&self) -> Option<[i32; 3]> {
        let (baseline, stimulated) = (self.baseline?, self.stimulated?);
        Some([
            i32::from(stimulated.x) - i32::from(baseline.x),
            i32::from(stimulated.y) - i32::from(baseline.y),
            i32::from(stimulated.z) - i32::from(baseline.z),
        ])
    }
}

/// Executes the self-test sequence as described in the datasheet.
///
/// A data-ready timeout produces a failed report rather than an error; only bus
/// failures are returned as errors. The self-test force is switched off again
/// whenever it was switched on.
pub fn run_self_test<IFACE, CommE>(
    device: &mut Adxl312<IFACE>,
    delay: &mut impl DelayNs,
) -> Result<SelfTestReport, CommE>
where
    IFACE: Adxl312Interface<Error = CommE>,
{
    let register = device.profile().registers.data_format;
    let settle_ms = device.profile().settle_time_ms;
    let envelope = device.profile().self_test;
    let format = device.data_format();

    let Some(baseline) = device.mean_sample(SELF_TEST_SAMPLES, delay)? else {
        warn!("self-test aborted: no baseline data");
        return Ok(SelfTestReport::default());
    };

    device.write_register(register, u8::from(format.with_self_test(true)))?;
    delay.delay_ms(settle_ms);

    let stimulated = device.mean_sample(SELF_TEST_SAMPLES, delay);
    let restored = device.write_register(register, u8::from(format));
    delay.delay_ms(settle_ms);
    let stimulated = stimulated?;
    restored?;

    let mut report = SelfTestReport {
        passed: false,
        baseline: Some(baseline),
        stimulated,
    };

    match report.delta() {
        Some(delta) => {
            debug!("self-test response x={} y={} z={}", delta[0], delta[1], delta[2]);
            report.passed = envelope.accepts(delta);
        }
        None => warn!("self-test aborted: no data with self-test force applied"),
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, PollBudget};
    use crate::error::Error;
    use crate::registers::*;
    use crate::test_support::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::{CheckedDelay, NoopDelay, Transaction as DelayTransaction};
    use embedded_hal_mock::eh1::i2c::Mock as I2cMock;

    fn self_test_run(baseline: RawSample, stimulated: RawSample) -> SelfTestReport {
        let mut expectations = repeated_samples(baseline, 100);
        expectations.push(write(REG_DATA_FORMAT, 0x8B));
        expectations.extend(repeated_samples(stimulated, 100));
        expectations.push(write(REG_DATA_FORMAT, 0x0B));
        let mut i2c = I2cMock::new(&expectations);
        let mut device = session(&i2c, Config::default());

        let report = run_self_test(&mut device, &mut NoopDelay::new()).unwrap();
        i2c.done();
        report
    }

    #[test]
    fn response_inside_envelope_passes() {
        let report = self_test_run(RawSample::new(10, 20, 345), RawSample::new(410, -380, 945));
        assert!(report.passed);
        assert_eq!(report.delta(), Some([400, -400, 600]));
    }

    #[test]
    fn one_axis_outside_envelope_fails() {
        // X and Y respond normally; Z only moves by 100 LSB.
        let report = self_test_run(RawSample::new(0, 0, 0), RawSample::new(400, -400, 100));
        assert!(!report.passed);
        assert_eq!(report.delta(), Some([400, -400, 100]));
    }

    #[test]
    fn response_on_the_bounds_passes() {
        let report = self_test_run(RawSample::new(0, 0, 0), RawSample::new(68, -32, 1241));
        assert!(report.passed);
    }

    #[test]
    fn settles_after_applying_and_after_removing_force() {
        let mut expectations = repeated_samples(RawSample::new(0, 0, 0), 100);
        expectations.push(write(REG_DATA_FORMAT, 0x8B));
        expectations.extend(repeated_samples(RawSample::new(400, -400, 600), 100));
        expectations.push(write(REG_DATA_FORMAT, 0x0B));
        let mut i2c = I2cMock::new(&expectations);
        let mut device = session(&i2c, Config::default());
        let mut delay = CheckedDelay::new(&[
            DelayTransaction::delay_ms(15),
            DelayTransaction::delay_ms(15),
        ]);

        assert!(run_self_test(&mut device, &mut delay).unwrap().passed);
        delay.done();
        i2c.done();
    }

    #[test]
    fn baseline_timeout_fails_without_touching_stimulus() {
        let expectations = [read(REG_INT_SOURCE, &[0x00])];
        let mut i2c = I2cMock::new(&expectations);
        let mut device = session(&i2c, Config::new().poll_budget(PollBudget::new(1, 1)).build());

        let report = run_self_test(&mut device, &mut NoopDelay::new()).unwrap();
        assert_eq!(report, SelfTestReport::default());
        i2c.done();
    }

    #[test]
    fn stimulated_timeout_still_restores_format() {
        let mut expectations = repeated_samples(RawSample::new(0, 0, 0), 100);
        expectations.push(write(REG_DATA_FORMAT, 0x8B));
        expectations.push(read(REG_INT_SOURCE, &[0x00]));
        expectations.push(write(REG_DATA_FORMAT, 0x0B));
        let mut i2c = I2cMock::new(&expectations);
        let mut device = session(&i2c, Config::new().poll_budget(PollBudget::new(1, 1)).build());

        let report = run_self_test(&mut device, &mut NoopDelay::new()).unwrap();
        assert!(!report.passed);
        assert_eq!(report.stimulated, None);
        assert_eq!(report.delta(), None);
        i2c.done();
    }

    #[test]
    fn bus_error_with_force_applied_still_restores_format() {
        let mut expectations = repeated_samples(RawSample::new(0, 0, 0), 100);
        expectations.push(write(REG_DATA_FORMAT, 0x8B));
        expectations.push(read(REG_INT_SOURCE, &[0x00]).with_error(ErrorKind::Other));
        expectations.push(write(REG_DATA_FORMAT, 0x0B));
        let mut i2c = I2cMock::new(&expectations);
        let mut device = session(&i2c, Config::default());

        let result = run_self_test(&mut device, &mut NoopDelay::new());
        assert_eq!(result, Err(Error::Interface(ErrorKind::Other)));
        i2c.done();
    }
}
