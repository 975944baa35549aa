//! Shared I2C mock fixtures for the driver tests.

use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

use crate::config::Config;
use crate::device::Adxl312;
use crate::interface::I2cInterface;
use crate::profile::DeviceProfile;
use crate::registers::*;
use crate::sample::RawSample;

pub(crate) const ADDR: u8 = DeviceProfile::ADXL312.address;

pub(crate) fn write(register: u8, value: u8) -> I2cTransaction {
    I2cTransaction::write(ADDR, vec![register, value])
}

pub(crate) fn read(register: u8, response: &[u8]) -> I2cTransaction {
    I2cTransaction::write_read(ADDR, vec![register], response.to_vec())
}

/// Register writes issued by `open` with the default configuration.
pub(crate) fn init_sequence() -> Vec<I2cTransaction> {
    vec![
        write(REG_ACT_INACT_CTL, 0x00),
        write(REG_BW_RATE, 0x0B),
        write(REG_DATA_FORMAT, 0x0B),
        write(REG_INT_ENABLE, 0x80),
        write(REG_INT_MAP, 0x80),
        write(REG_FIFO_CTL, 0x00),
        write(REG_POWER_CTL, 0x08),
    ]
}

/// One data-ready poll followed by the burst read of `sample`.
pub(crate) fn sample_reads(sample: RawSample) -> Vec<I2cTransaction> {
    let mut bytes = Vec::with_capacity(6);
    for axis in [sample.x, sample.y, sample.z] {
        bytes.extend_from_slice(&axis.to_le_bytes());
    }
    vec![read(REG_INT_SOURCE, &[0x80]), read(REG_DATAX0, &bytes)]
}

pub(crate) fn repeated_samples(sample: RawSample, count: usize) -> Vec<I2cTransaction> {
    (0..count).flat_map(|_| sample_reads(sample)).collect()
}

/// Session over an already-initialized sensor.
pub(crate) fn session(i2c: &I2cMock, config: Config) -> Adxl312<I2cInterface<I2cMock>> {
    Adxl312::new(
        I2cInterface::new(i2c.clone(), ADDR),
        DeviceProfile::ADXL312,
        config,
    )
}
