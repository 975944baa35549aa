//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::{AddressMode, I2c, SevenBitAddress};

use super::Adxl312Interface;

// Register bytes sent after the address byte in one write transfer.
const MAX_WRITE_CHUNK: usize = 8;

/// Selectable 7-bit slave addresses, set by the `ALT ADDRESS` pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlaveAddress {
    /// `ALT ADDRESS` tied low (`0x53`).
    AltLow,
    /// `ALT ADDRESS` tied high (`0x1D`).
    AltHigh,
}

impl From<SlaveAddress> for u8 {
    fn from(address: SlaveAddress) -> Self {
        match address {
            SlaveAddress::AltLow => 0x53,
            SlaveAddress::AltHigh => 0x1D,
        }
    }
}

/// I2C-based interface implementation for the ADXL312 driver.
///
/// `A` selects 7-bit or 10-bit addressing through the bus's [`AddressMode`].
pub struct I2cInterface<I2C, A = SevenBitAddress> {
    i2c: I2C,
    address: A,
}

impl<I2C, A> I2cInterface<I2C, A>
where
    A: AddressMode + Copy,
{
    /// Creates a new interface talking to `address` on the provided bus.
    pub const fn new(i2c: I2C, address: A) -> Self {
        Self { i2c, address }
    }

    /// Returns the slave address in use.
    pub fn address(&self) -> A {
        self.address
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, A> Adxl312Interface for I2cInterface<I2C, A>
where
    I2C: I2c<A>,
    A: AddressMode + Copy,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
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

        self.i2c.write_read(self.address, &[register], buf)
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        // The device auto-increments the register pointer within one transfer.
        let mut frame = [0u8; MAX_WRITE_CHUNK + 1];
        let mut start = register;
        for chunk in data.chunks(MAX_WRITE_CHUNK) {
            frame[0] = start;
            frame[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &frame[..=chunk.len()])?;
            start = start.wrapping_add(chunk.len() as u8);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x53;

    #[test]
    fn slave_addresses_follow_alt_pin() {
        assert_eq!(u8::from(SlaveAddress::AltLow), 0x53);
        assert_eq!(u8::from(SlaveAddress::AltHigh), 0x1D);
    }

    #[test]
    fn read_many_writes_register_then_reads() {
        let expectations = [I2cTransaction::write_read(
            ADDR,
            vec![0x32],
            vec![1, 2, 3, 4, 5, 6],
        )];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone(), ADDR);

        let mut buffer = [0u8; 6];
        interface.read_many(0x32, &mut buffer).unwrap();
        assert_eq!(buffer, [1, 2, 3, 4, 5, 6]);
        i2c.done();
    }

    #[test]
    fn write_register_prefixes_address_byte() {
        let expectations = [I2cTransaction::write(ADDR, vec![0x2D, 0x08])];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone(), ADDR);

        interface.write_register(0x2D, 0x08).unwrap();
        i2c.done();
    }

    #[test]
    fn write_many_is_one_transfer_for_short_bursts() {
        let expectations = [I2cTransaction::write(ADDR, vec![0x1E, 0xE7, 0x02, 0x40])];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone(), ADDR);

        interface.write_many(0x1E, &[0xE7, 0x02, 0x40]).unwrap();
        i2c.done();
    }

    #[test]
    fn write_many_splits_long_bursts() {
        let data: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x10, 0, 1, 2, 3, 4, 5, 6, 7]),
            I2cTransaction::write(ADDR, vec![0x18, 8, 9]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone(), ADDR);

        interface.write_many(0x10, &data).unwrap();
        i2c.done();
    }

    #[test]
    fn empty_transfers_skip_the_bus() {
        let expectations: [I2cTransaction; 0] = [];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone(), ADDR);

        interface.read_many(0x32, &mut []).unwrap();
        interface.write_many(0x1E, &[]).unwrap();
        i2c.done();
    }

    #[test]
    fn bus_errors_are_returned() {
        let expectations =
            [I2cTransaction::write_read(ADDR, vec![0x00], vec![0x00]).with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone(), ADDR);

        assert_eq!(interface.read_register(0x00), Err(ErrorKind::Other));
        i2c.done();
    }
}
