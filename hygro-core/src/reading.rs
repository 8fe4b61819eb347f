//! Reading model
//!
//! A `Reading` is built once per cycle from two independent sensor
//! queries. It is either fully valid or invalid; a `Measurement` can only
//! be constructed from finite values inside the sensor's range.

use core::ops::RangeInclusive;

use crate::traits::SensorError;

/// Temperatures a DHT11 transfer can encode (sign + 255 + 15/10)
pub const TEMPERATURE_RANGE_C: RangeInclusive<f32> = -256.5..=256.5;

/// Humidities a DHT11 transfer can encode (255 + 255/10)
pub const HUMIDITY_RANGE_PCT: RangeInclusive<f32> = 0.0..=280.5;

/// Which quantity a sensor query was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Quantity {
    Temperature,
    Humidity,
}

/// A validated temperature/humidity pair
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    temperature_c: f32,
    humidity_pct: f32,
}

impl Measurement {
    /// Build a measurement, rejecting non-finite and out-of-range values
    pub fn new(temperature_c: f32, humidity_pct: f32) -> Result<Self, InvalidReading> {
        let temperature_c = check_temperature(temperature_c)
            .map_err(|e| InvalidReading::new(Quantity::Temperature, e))?;
        let humidity_pct =
            check_humidity(humidity_pct).map_err(|e| InvalidReading::new(Quantity::Humidity, e))?;
        Ok(Self {
            temperature_c,
            humidity_pct,
        })
    }

    /// Temperature in degrees Celsius
    pub fn temperature_c(&self) -> f32 {
        self.temperature_c
    }

    /// Relative humidity in percent
    pub fn humidity_pct(&self) -> f32 {
        self.humidity_pct
    }
}

/// Why a reading was rejected
///
/// Names the first quantity that failed; temperature is checked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidReading {
    pub quantity: Quantity,
    pub error: SensorError,
    /// The other quantity failed as well
    pub both: bool,
}

impl InvalidReading {
    fn new(quantity: Quantity, error: SensorError) -> Self {
        Self {
            quantity,
            error,
            both: false,
        }
    }
}

/// One cycle's sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    Valid(Measurement),
    Invalid(InvalidReading),
}

impl Reading {
    /// Combine the results of the temperature and humidity queries
    pub fn from_samples(
        temperature: Result<f32, SensorError>,
        humidity: Result<f32, SensorError>,
    ) -> Self {
        let temperature = temperature.and_then(check_temperature);
        let humidity = humidity.and_then(check_humidity);

        match (temperature, humidity) {
            (Ok(temperature_c), Ok(humidity_pct)) => Reading::Valid(Measurement {
                temperature_c,
                humidity_pct,
            }),
            (Err(error), Ok(_)) => Reading::Invalid(InvalidReading::new(Quantity::Temperature, error)),
            (Ok(_), Err(error)) => Reading::Invalid(InvalidReading::new(Quantity::Humidity, error)),
            (Err(error), Err(_)) => Reading::Invalid(InvalidReading {
                quantity: Quantity::Temperature,
                error,
                both: true,
            }),
        }
    }

    /// Check if both quantities were acquired
    pub fn is_valid(&self) -> bool {
        matches!(self, Reading::Valid(_))
    }

    /// The measurement, if valid
    pub fn measurement(&self) -> Option<&Measurement> {
        match self {
            Reading::Valid(m) => Some(m),
            Reading::Invalid(_) => None,
        }
    }
}

fn check(value: f32, range: RangeInclusive<f32>) -> Result<f32, SensorError> {
    if !value.is_finite() {
        Err(SensorError::NotFinite)
    } else if !range.contains(&value) {
        Err(SensorError::OutOfRange)
    } else {
        Ok(value)
    }
}

fn check_temperature(value: f32) -> Result<f32, SensorError> {
    check(value, TEMPERATURE_RANGE_C)
}

fn check_humidity(value: f32) -> Result<f32, SensorError> {
    check(value, HUMIDITY_RANGE_PCT)
}
