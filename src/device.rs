//! High-level ADXL312 session: bring-up, polling acquisition and teardown.

use crate::calibration::{CalibrationReport, calibrate};
use crate::config::{Config, PollBudget};
use crate::error::{Error, Result};
use crate::interface::{Adxl312Interface, I2cInterface, SlaveAddress, SpiInterface};
use crate::orientation::{Orientation, derive_orientation};
use crate::params::{FifoMode, InterruptPin};
use crate::profile::DeviceProfile;
use crate::registers::{BandwidthRate, DataFormat, FifoControl, InterruptFlags, PowerControl};
use crate::sample::{Acceleration, RawSample, SAMPLE_BYTES, SampleAccumulator};
use crate::self_test::{SelfTestReport, run_self_test};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

/// Synchronous polling driver owning one ADXL312 on one bus interface.
///
/// The interface is held by value, so a bus handle can back at most one
/// session. [`close`](Self::close) powers the sensor down and hands the
/// interface back.
pub struct Adxl312<IFACE> {
    interface: IFACE,
    profile: DeviceProfile,
    config: Config,
}

/// Decoded view of the `INT_SOURCE` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptSource {
    /// INT_SOURCE[7] DATA_READY.
    pub data_ready: bool,
    /// INT_SOURCE[4] Activity.
    pub activity: bool,
    /// INT_SOURCE[3] Inactivity.
    pub inactivity: bool,
    /// INT_SOURCE[1] Watermark.
    pub watermark: bool,
    /// INT_SOURCE[0] Overrun.
    pub overrun: bool,
}

impl From<InterruptFlags> for InterruptSource {
    fn from(flags: InterruptFlags) -> Self {
        Self {
            data_ready: flags.data_ready(),
            activity: flags.activity(),
            inactivity: flags.inactivity(),
            watermark: flags.watermark(),
            overrun: flags.overrun(),
        }
    }
}

impl<IFACE> Adxl312<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Wraps an interface without touching the bus.
    ///
    /// Use [`open`](Self::open) to bring the sensor up; this constructor suits
    /// a device that a previous session already initialized.
    pub fn new(interface: IFACE, profile: DeviceProfile, config: Config) -> Self {
        Self {
            interface,
            profile,
            config,
        }
    }

    /// Consumes the driver and returns the owned interface, leaving the
    /// sensor in its current power state.
    pub fn release(self) -> IFACE {
        self.interface
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns the device profile in use.
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scale factor applied to raw samples under the active configuration.
    pub fn mg_per_lsb(&self) -> f32 {
        self.config
            .range
            .mg_per_lsb(self.profile.scale_mg_per_lsb, self.config.full_resolution)
    }
}

impl<I2C> Adxl312<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Opens an ADXL312 at `address` with the stock profile and configuration.
    pub fn open_i2c(
        i2c: I2C,
        address: SlaveAddress,
        delay: &mut impl DelayNs,
        run_self_test: bool,
    ) -> Result<Self, I2C::Error> {
        let interface = I2cInterface::new(i2c, u8::from(address));
        Self::open(
            interface,
            DeviceProfile::ADXL312,
            Config::default(),
            delay,
            run_self_test,
        )
    }

    /// Powers the sensor down and returns the I2C bus.
    pub fn close_i2c(self) -> Result<I2C, I2C::Error> {
        Ok(self.close()?.release())
    }
}

impl<SPI> Adxl312<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Opens an ADXL312 on an SPI device with the stock profile and configuration.
    pub fn open_spi(
        spi: SPI,
        delay: &mut impl DelayNs,
        run_self_test: bool,
    ) -> Result<Self, SPI::Error> {
        Self::open(
            SpiInterface::new(spi),
            DeviceProfile::ADXL312,
            Config::default(),
            delay,
            run_self_test,
        )
    }

    /// Powers the sensor down and returns the SPI device.
    pub fn close_spi(self) -> Result<SPI, SPI::Error> {
        Ok(self.close()?.release())
    }
}

impl<IFACE, CommE> Adxl312<IFACE>
where
    IFACE: Adxl312Interface<Error = CommE>,
{
    // ==================================================================
    // == Session Lifecycle =============================================
    // ==================================================================
    /// Brings the sensor up and verifies its identity.
    ///
    /// Runs the power-up sequence, then reads the identity register. A bus
    /// failure yields [`Error::Interface`] and a wrong identity byte yields
    /// [`Error::Communication`]. Any failure after validation is followed by a
    /// best-effort power-down. With `run_self_test` the self-test verdict is
    /// logged but never fails the open; bus errors during it do.
    pub fn open(
        interface: IFACE,
        profile: DeviceProfile,
        config: Config,
        delay: &mut impl DelayNs,
        run_self_test: bool,
    ) -> Result<Self, CommE> {
        profile.validate().map_err(|err| {
            error!("rejected device profile: {:?}", err);
            Error::InvalidConfig
        })?;
        config.validate().map_err(|err| {
            error!("rejected configuration: {:?}", err);
            Error::InvalidConfig
        })?;

        let mut device = Self::new(interface, profile, config);
        if let Err(err) = device.bring_up(delay, run_self_test) {
            // Best effort: the sensor may already be measuring.
            if device.set_measuring(false).is_err() {
                warn!("power-down after failed open did not complete");
            }
            return Err(err);
        }

        Ok(device)
    }

    fn bring_up(&mut self, delay: &mut impl DelayNs, run_self_test: bool) -> Result<(), CommE> {
        self.init(delay)?;
        self.check_id()?;

        if run_self_test {
            let report = self.run_self_test(delay)?;
            if report.passed {
                info!("self-test passed");
            } else {
                warn!("self-test failed: {:?}", report.delta());
            }
        }

        Ok(())
    }

    /// Stops measurement and returns the interface.
    ///
    /// If the power-down write fails the interface is dropped with the error.
    pub fn close(mut self) -> Result<IFACE, CommE> {
        self.set_measuring(false)?;
        debug!("sensor powered down");
        Ok(self.interface)
    }

    /// Programs the fixed power-up sequence and waits for the sensor to settle.
    ///
    /// Measurement is only enabled by the last write, so every earlier register
    /// is programmed while the sensor sits in standby.
    fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        let registers = self.profile.registers;

        self.write_register(registers.act_inact_ctl, 0x00)?;

        let rate = BandwidthRate::new()
            .with_rate(self.config.data_rate)
            .with_low_power(self.config.low_power);
        self.write_register(registers.bw_rate, u8::from(rate))?;

        self.write_register(registers.data_format, u8::from(self.data_format()))?;

        let enable = InterruptFlags::new().with_data_ready(true);
        self.write_register(registers.int_enable, u8::from(enable))?;

        // INT_MAP: a set bit routes the source to INT2.
        let map = InterruptFlags::new()
            .with_data_ready(matches!(self.config.data_ready_pin, InterruptPin::Int2));
        self.write_register(registers.int_map, u8::from(map))?;

        let fifo = FifoControl::new().with_mode(FifoMode::Bypass);
        self.write_register(registers.fifo_ctl, u8::from(fifo))?;

        self.set_measuring(true)?;
        delay.delay_ms(self.profile.settle_time_ms);

        debug!(
            "sensor configured at {} mHz: {:?}",
            self.config.data_rate.millihertz(),
            self.config
        );
        Ok(())
    }

    /// `DATA_FORMAT` value matching the active configuration.
    pub(crate) fn data_format(&self) -> DataFormat {
        DataFormat::new()
            .with_range(self.config.range)
            .with_full_resolution(self.config.full_resolution)
    }

    /// Switches between measurement and standby.
    pub fn set_measuring(&mut self, measuring: bool) -> Result<(), CommE> {
        let power = PowerControl::new().with_measure(measuring);
        self.write_register(self.profile.registers.power_ctl, u8::from(power))
    }

    // ==================================================================
    // == Identification & Register Access ==============================
    // ==================================================================
    /// Reads the identity register.
    pub fn device_id(&mut self) -> Result<u8, CommE> {
        self.read_register(self.profile.registers.device_id)
    }

    /// Verifies the identity register against the profile.
    pub fn check_id(&mut self) -> Result<(), CommE> {
        let found = self.device_id()?;
        let expected = self.profile.device_id;
        if found != expected {
            error!("unexpected device id {} (expected {})", found, expected);
            return Err(Error::Communication { expected, found });
        }

        Ok(())
    }

    /// Reads one register.
    pub fn read_register(&mut self, register: u8) -> Result<u8, CommE> {
        self.interface
            .read_register(register)
            .map_err(Error::from)
    }

    /// Writes one register after checking the profile allows it.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), CommE> {
        self.ensure_writable(register)?;
        self.interface
            .write_register(register, value)
            .map_err(Error::from)
    }

    fn ensure_writable(&self, register: u8) -> Result<(), CommE> {
        if !self.profile.registers.is_writable(register) {
            error!("refusing to write register {}", register);
            return Err(Error::WriteRejected(register));
        }

        Ok(())
    }

    /// Returns a snapshot of `INT_SOURCE`.
    ///
    /// Reading the register does not clear the data-ready flag; only reading
    /// the data registers does.
    pub fn interrupt_source(&mut self) -> Result<InterruptSource, CommE> {
        let raw = self.read_register(self.profile.registers.int_source)?;
        Ok(InterruptSource::from(InterruptFlags::from(raw)))
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Polls for the data-ready flag using the configured budget.
    pub fn wait_for_data_ready(&mut self, delay: &mut impl DelayNs) -> Result<bool, CommE> {
        self.wait_for_data_ready_with(self.config.poll_budget, delay)
    }

    /// Polls `INT_SOURCE` up to `budget.polls` times.
    ///
    /// Returns `Ok(true)` on the first read showing data ready and `Ok(false)`
    /// once the budget is spent.
    pub fn wait_for_data_ready_with(
        &mut self,
        budget: PollBudget,
        delay: &mut impl DelayNs,
    ) -> Result<bool, CommE> {
        let register = self.profile.registers.int_source;
        for poll in 0..budget.polls {
            let source = InterruptFlags::from(self.read_register(register)?);
            if source.data_ready() {
                trace!("data ready after {} ms", poll.saturating_mul(budget.interval_ms));
                return Ok(true);
            }

            if poll + 1 < budget.polls {
                delay.delay_ms(budget.interval_ms);
            }
        }

        warn!("no data ready within {} polls", budget.polls);
        Ok(false)
    }

    /// Waits for data ready and reads one sample.
    ///
    /// `Ok(None)` means the poll budget ran out; it is never confused with a
    /// genuine all-zero reading.
    pub fn read_raw_sample(&mut self, delay: &mut impl DelayNs) -> Result<Option<RawSample>, CommE> {
        if !self.wait_for_data_ready(delay)? {
            return Ok(None);
        }

        let mut raw = [0u8; SAMPLE_BYTES];
        self.interface
            .read_many(self.profile.registers.data[0], &mut raw)
            .map_err(Error::from)?;
        trace!("data registers: {:?}", raw);

        Ok(Some(RawSample::from_bytes(raw, self.profile.byte_order)))
    }

    /// Like [`read_raw_sample`](Self::read_raw_sample), reporting a timeout as
    /// [`Error::AcquisitionTimeout`].
    pub fn read_raw_sample_or_timeout(&mut self, delay: &mut impl DelayNs) -> Result<RawSample, CommE> {
        self.read_raw_sample(delay)?
            .ok_or(Error::AcquisitionTimeout)
    }

    /// Reads one sample scaled to g.
    pub fn read_acceleration(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<Option<Acceleration>, CommE> {
        let scale = self.mg_per_lsb();
        Ok(self
            .read_raw_sample(delay)?
            .map(|sample| sample.to_acceleration(scale)))
    }

    /// Averages `count` consecutive samples, or `None` if any of them timed out.
    pub(crate) fn mean_sample(
        &mut self,
        count: u32,
        delay: &mut impl DelayNs,
    ) -> Result<Option<RawSample>, CommE> {
        let mut accumulator = SampleAccumulator::default();
        for _ in 0..count {
            match self.read_raw_sample(delay)? {
                Some(sample) => accumulator.push(sample),
                None => return Ok(None),
            }
        }

        Ok(accumulator.mean())
    }

    // ==================================================================
    // == Orientation ===================================================
    // ==================================================================
    /// Reads one sample and derives roll, pitch and yaw from it.
    pub fn orientation(&mut self, delay: &mut impl DelayNs) -> Result<Option<Orientation>, CommE> {
        let Some(sample) = self.read_raw_sample(delay)? else {
            return Ok(None);
        };

        let orientation = derive_orientation(sample, &self.profile.axis_remap);
        debug!(
            "gravity {:?} g, attitude {:?} deg",
            sample.to_acceleration(self.mg_per_lsb()),
            orientation.to_degrees()
        );
        Ok(Some(orientation))
    }

    // ==================================================================
    // == Self-Test & Calibration =======================================
    // ==================================================================
    /// Executes the datasheet self-test routine.
    pub fn run_self_test(&mut self, delay: &mut impl DelayNs) -> Result<SelfTestReport, CommE> {
        run_self_test(self, delay)
    }

    /// Measures the resting bias and programs the offset registers.
    pub fn calibrate(&mut self, delay: &mut impl DelayNs) -> Result<CalibrationReport, CommE> {
        calibrate(self, delay)
    }

    /// Reads the offset registers.
    pub fn read_offsets(&mut self) -> Result<[i8; 3], CommE> {
        let mut raw = [0u8; 3];
        self.interface
            .read_many(self.profile.registers.offsets[0], &mut raw)
            .map_err(Error::from)?;
        Ok(raw.map(|byte| byte as i8))
    }

    /// Writes all three offset registers in one burst.
    pub fn write_offsets(&mut self, offsets: [i8; 3]) -> Result<(), CommE> {
        let registers = self.profile.registers.offsets;
        for register in registers {
            self.ensure_writable(register)?;
        }

        self.interface
            .write_many(registers[0], &offsets.map(|offset| offset as u8))
            .map_err(Error::from)
    }
}
