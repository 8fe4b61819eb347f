//! Temperature/humidity sensor trait

/// Errors that can occur while acquiring a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor never answered the start signal
    NoResponse,
    /// An expected edge did not arrive in time
    Timeout,
    /// Received data failed its checksum
    Checksum,
    /// Value is NaN or infinite
    NotFinite,
    /// Value lies outside what the sensor can report
    OutOfRange,
    /// Queried before `initialize`
    NotReady,
    /// Data line could not be driven or read
    Bus,
}

/// Trait for combined temperature and humidity sensors
///
/// The two quantities are queried independently and either may fail on
/// its own.
pub trait ClimateSensor {
    /// Prepare the sensor interface (idle the data line, etc.)
    fn initialize(&mut self);

    /// Read the temperature in degrees Celsius
    ///
    /// Takes `&mut self` because a read drives the data line.
    fn read_temperature(&mut self) -> Result<f32, SensorError>;

    /// Read the relative humidity in percent
    fn read_humidity(&mut self) -> Result<f32, SensorError>;
}

impl<T: ClimateSensor + ?Sized> ClimateSensor for &mut T {
    fn initialize(&mut self) {
        (**self).initialize()
    }

    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        (**self).read_temperature()
    }

    fn read_humidity(&mut self) -> Result<f32, SensorError> {
        (**self).read_humidity()
    }
}
