//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.

use embedded_hal::spi::{Operation, SpiDevice};

use super::Adxl312Interface;

// Address byte flags: bit 7 selects a read, bit 6 enables auto-increment.
const SPI_READ: u8 = 0x80;
const SPI_MULTI_BYTE: u8 = 0x40;
const SPI_ADDRESS_MASK: u8 = 0x3F;

/// SPI-based interface implementation for the ADXL312 driver.
///
/// Expects 4-wire mode (`DATA_FORMAT.SPI` cleared), clock polarity and phase
/// both high.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Builds the address byte that opens a register transfer.
    fn command_byte(register: u8, is_read: bool, len: usize) -> u8 {
        let mut command = register & SPI_ADDRESS_MASK;
        if is_read {
            command |= SPI_READ;
        }
        if len > 1 {
            command |= SPI_MULTI_BYTE;
        }
        command
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Adxl312Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.write_many(register, core::slice::from_ref(&value))
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        let command = [Self::command_byte(register, true, buf.len())];
        let mut operations = [Operation::Write(&command), Operation::Read(buf)];
        self.spi.transaction(&mut operations)
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }

        let command = [Self::command_byte(register, false, data.len())];
        let mut operations = [Operation::Write(&command), Operation::Write(data)];
        self.spi.transaction(&mut operations)
    }
}
