//! Configuration primitives for the ADXL312 driver.

use crate::params::{DataRate, InterruptPin, Range};

/// Bounded busy-wait used while waiting for the data-ready flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollBudget {
    /// Maximum number of `INT_SOURCE` reads.
    pub polls: u32,
    /// Pause between two reads, in milliseconds.
    pub interval_ms: u32,
}

impl PollBudget {
    /// Creates a new budget.
    pub const fn new(polls: u32, interval_ms: u32) -> Self {
        Self { polls, interval_ms }
    }
}

impl Default for PollBudget {
    /// 10 000 polls spaced 1 ms apart, roughly a 10 s ceiling.
    fn default() -> Self {
        Self::new(10_000, 1)
    }
}

/// User-facing configuration for the ADXL312 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Output data rate selection.
    pub data_rate: DataRate,
    /// Reduced power operation.
    pub low_power: bool,
    /// Full-scale range selection.
    pub range: Range,
    /// Keep the profile scale factor across ranges.
    pub full_resolution: bool,
    /// Pin the data-ready interrupt is routed to.
    pub data_ready_pin: InterruptPin,
    /// Data-ready wait budget.
    pub poll_budget: PollBudget,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.low_power && !self.data_rate.supports_low_power() {
            return Err(ConfigError::LowPowerRate);
        }

        if self.poll_budget.polls == 0 {
            return Err(ConfigError::EmptyPollBudget);
        }

        Ok(())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the output data rate.
    pub fn data_rate(mut self, data_rate: DataRate) -> Self {
        self.config.data_rate = data_rate;
        self
    }

    /// Enables or disables reduced power operation.
    pub fn low_power(mut self, low_power: bool) -> Self {
        self.config.low_power = low_power;
        self
    }

    /// Overrides the full-scale range.
    pub fn range(mut self, range: Range) -> Self {
        self.config.range = range;
        self
    }

    /// Selects full resolution or fixed 10-bit output.
    pub fn full_resolution(mut self, full_resolution: bool) -> Self {
        self.config.full_resolution = full_resolution;
        self
    }

    /// Routes the data-ready interrupt.
    pub fn data_ready_pin(mut self, pin: InterruptPin) -> Self {
        self.config.data_ready_pin = pin;
        self
    }

    /// Overrides the data-ready wait budget.
    pub fn poll_budget(mut self, budget: PollBudget) -> Self {
        self.config.poll_budget = budget;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_rate: DataRate::Hz200,
            low_power: false,
            range: Range::G12,
            full_resolution: true,
            data_ready_pin: InterruptPin::Int2,
            poll_budget: PollBudget::default(),
        }
    }
}

/// Validation errors generated while verifying a [`Config`] or a device profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Low-power mode requested at a rate the device cannot sustain in it.
    LowPowerRate,
    /// The poll budget allows no read at all.
    EmptyPollBudget,
    /// Data or offset registers are not consecutive.
    NonContiguousBurst,
    /// The axis remap does not use each sensor axis exactly once.
    InvalidAxisRemap,
    /// A self-test window has `min > max`.
    InvalidEnvelope,
    /// The scale factor is not a positive number.
    InvalidScale,
}
