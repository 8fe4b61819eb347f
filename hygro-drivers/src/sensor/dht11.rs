//! DHT11 temperature/humidity sensor
//!
//! Single-wire protocol on an open-drain line with a pull-up:
//!
//! ```text
//! host:   ‾‾‾\____ >=18ms ____/‾‾ release
//! sensor:                          \__80us__/‾‾80us‾‾\ then 40 bits:
//! bit:    \__50us__/‾‾26-28us‾‾\  = 0
//!         \__50us__/‾‾‾‾70us‾‾‾‾\ = 1
//! ```
//!
//! Pulse widths are measured by polling the line once per microsecond.
//! A bit is 1 when its high phase outlasts the preceding low phase, so a
//! uniformly slow poll loop still decodes correctly.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use hygro_core::traits::{ClimateSensor, SensorError};

/// Host start signal length in ms (datasheet minimum is 18)
pub const START_SIGNAL_MS: u32 = 20;

/// Wait after releasing the line before looking for the response, in µs
pub const RELEASE_US: u32 = 30;

/// Longest pulse accepted, in polls (~1 ms)
pub const PULSE_TIMEOUT_POLLS: u32 = 1000;

/// Number of data bits in one transfer
const BITS: usize = 40;

/// One decoded transfer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Decode the five data bytes of a transfer
///
/// Layout: humidity integer, humidity decimal, temperature integer,
/// temperature decimal (bit 7 = negative), checksum.
pub fn decode(bytes: &[u8; 5]) -> Result<Sample, SensorError> {
    let sum = bytes[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != bytes[4] {
        return Err(SensorError::Checksum);
    }

    let humidity_pct = f32::from(bytes[0]) + f32::from(bytes[1]) / 10.0;

    let magnitude = f32::from(bytes[2]) + f32::from(bytes[3] & 0x0F) / 10.0;
    let temperature_c = if bytes[3] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    Ok(Sample {
        temperature_c,
        humidity_pct,
    })
}

/// Pack measured (low, high) poll counts into bytes, MSB first
pub fn bits_to_bytes(pulses: &[(u32, u32); BITS]) -> [u8; 5] {
    let mut bytes = [0u8; 5];
    for (i, &(low, high)) in pulses.iter().enumerate() {
        bytes[i / 8] <<= 1;
        if high > low {
            bytes[i / 8] |= 1;
        }
    }
    bytes
}

/// DHT11 driver
///
/// `P` must be an open-drain pin that can also be read back.
pub struct Dht11<P, D> {
    pin: P,
    delay: D,
    ready: bool,
    /// Result of the transfer made for the last temperature query
    pending: Option<Result<Sample, SensorError>>,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Create a new DHT11 driver
    ///
    /// The line is not touched until [`ClimateSensor::initialize`].
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            ready: false,
            pending: None,
        }
    }

    /// Release the pin and delay
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// Run one transfer and decode it
    pub fn measure(&mut self) -> Result<Sample, SensorError> {
        if !self.ready {
            return Err(SensorError::NotReady);
        }
        let bytes = self.transfer()?;
        decode(&bytes)
    }

    fn transfer(&mut self) -> Result<[u8; 5], SensorError> {
        // Start signal, then let the pull-up take the line
        self.pin.set_low().map_err(|_| SensorError::Bus)?;
        self.delay.delay_ms(START_SIGNAL_MS);
        self.pin.set_high().map_err(|_| SensorError::Bus)?;
        self.delay.delay_us(RELEASE_US);

        // Response: line pulled low ~80us, then high ~80us
        let no_response = |e| match e {
            SensorError::Timeout => SensorError::NoResponse,
            other => other,
        };
        self.pulse(true).map_err(no_response)?;
        self.pulse(false).map_err(no_response)?;
        self.pulse(true).map_err(no_response)?;

        let mut pulses = [(0u32, 0u32); BITS];
        for pulse in pulses.iter_mut() {
            pulse.0 = self.pulse(false)?;
            pulse.1 = self.pulse(true)?;
        }

        Ok(bits_to_bytes(&pulses))
    }

    /// Count polls while the line stays at `high`
    fn pulse(&mut self, high: bool) -> Result<u32, SensorError> {
        let mut polls = 0u32;
        while self.pin.is_high().map_err(|_| SensorError::Bus)? == high {
            polls += 1;
            if polls > PULSE_TIMEOUT_POLLS {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
        }
        Ok(polls)
    }
}

impl<P, D> ClimateSensor for Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn initialize(&mut self) {
        // Idle state is released (pulled high)
        self.ready = self.pin.set_high().is_ok();
        self.pending = None;
    }

    /// Transfers a fresh sample and keeps it for the humidity query
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        let sample = self.measure();
        self.pending = Some(sample);
        sample.map(|s| s.temperature_c)
    }

    /// Uses the sample from the preceding temperature query if there is
    /// one, so a cycle costs a single transfer
    fn read_humidity(&mut self) -> Result<f32, SensorError> {
        let sample = match self.pending.take() {
            Some(sample) => sample,
            None => self.measure(),
        };
        sample.map(|s| s.humidity_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use heapless::Vec;

    /// Data line replaying a scripted waveform
    ///
    /// Each `(level, polls)` segment answers `polls` reads with `level`.
    /// Once the script runs out the line reads `idle`.
    struct ScriptedLine {
        segments: Vec<(bool, u32), 96>,
        index: usize,
        used: u32,
        idle: bool,
        released: bool,
        start_signals: u32,
    }

    impl ScriptedLine {
        fn new(idle: bool) -> Self {
            Self {
                segments: Vec::new(),
                index: 0,
                used: 0,
                idle,
                released: false,
                start_signals: 0,
            }
        }

        fn segment(mut self, level: bool, polls: u32) -> Self {
            self.segments.push((level, polls)).unwrap();
            self
        }

        /// Waveform of a full transfer carrying `bytes`
        fn transfer(bytes: [u8; 5]) -> Self {
            let mut line = Self::new(true)
                .segment(true, 5)
                .segment(false, 80)
                .segment(true, 80);
            for byte in bytes {
                for bit in (0..8).rev() {
                    let one = byte & (1 << bit) != 0;
                    line = line.segment(false, 50).segment(true, if one { 70 } else { 27 });
                }
            }
            line.segment(false, 50)
        }
    }

    impl embedded_hal::digital::ErrorType for ScriptedLine {
        type Error = Infallible;
    }

    impl InputPin for ScriptedLine {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            match self.segments.get(self.index) {
                Some(&(level, polls)) => {
                    self.used += 1;
                    if self.used >= polls {
                        self.index += 1;
                        self.used = 0;
                    }
                    Ok(level)
                }
                None => Ok(self.idle),
            }
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.is_high().map(|h| !h)
        }
    }

    impl OutputPin for ScriptedLine {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.start_signals += 1;
            self.released = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.released = true;
            Ok(())
        }
    }

    /// Delay that returns immediately
    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn sensor(line: ScriptedLine) -> Dht11<ScriptedLine, NoDelay> {
        let mut dht = Dht11::new(line, NoDelay);
        dht.initialize();
        dht
    }

    #[test]
    fn test_decode_positive() {
        // 41.0 %RH, 23.5 °C
        let sample = decode(&[41, 0, 23, 5, 69]).unwrap();
        assert_eq!(sample.humidity_pct, 41.0);
        assert_eq!(sample.temperature_c, 23.5);
    }

    #[test]
    fn test_decode_negative_temperature() {
        let sample = decode(&[60, 0, 2, 0x85, 60 + 2 + 0x85]).unwrap();
        assert_eq!(sample.temperature_c, -2.5);
    }

    #[test]
    fn test_decode_checksum_mismatch() {
        assert_eq!(decode(&[41, 0, 23, 5, 70]), Err(SensorError::Checksum));
    }

    #[test]
    fn test_decode_checksum_wraps() {
        // 200 + 100 = 300 -> 44 mod 256
        assert!(decode(&[200, 0, 100, 0, 44]).is_ok());
    }

    #[test]
    fn test_bits_to_bytes() {
        let mut pulses = [(50, 27); BITS];
        // MSB of first byte and LSB of last byte
        pulses[0] = (50, 70);
        pulses[39] = (50, 70);
        assert_eq!(bits_to_bytes(&pulses), [0x80, 0, 0, 0, 0x01]);
    }

    #[test]
    fn test_scaled_timing_still_decodes() {
        // Everything twice as slow: only the ratio matters
        let mut pulses = [(100, 54); BITS];
        pulses[7] = (100, 140);
        assert_eq!(bits_to_bytes(&pulses), [0x01, 0, 0, 0, 0]);
    }

    #[test]
    fn test_full_transfer() {
        let mut dht = sensor(ScriptedLine::transfer([41, 0, 23, 5, 69]));

        let sample = dht.measure().unwrap();

        assert_eq!(sample.temperature_c, 23.5);
        assert_eq!(sample.humidity_pct, 41.0);
        let (line, _) = dht.release();
        assert_eq!(line.start_signals, 1);
        assert!(line.released);
    }

    #[test]
    fn test_one_transfer_per_cycle() {
        let mut dht = sensor(ScriptedLine::transfer([55, 0, 19, 0, 74]));

        assert_eq!(dht.read_temperature(), Ok(19.0));
        assert_eq!(dht.read_humidity(), Ok(55.0));

        let (line, _) = dht.release();
        assert_eq!(line.start_signals, 1);
    }

    #[test]
    fn test_failed_transfer_fails_both_queries() {
        let mut dht = sensor(ScriptedLine::transfer([41, 0, 23, 5, 0]));

        assert_eq!(dht.read_temperature(), Err(SensorError::Checksum));
        assert_eq!(dht.read_humidity(), Err(SensorError::Checksum));
    }

    #[test]
    fn test_no_response() {
        // Line never pulled low by the sensor
        let mut dht = sensor(ScriptedLine::new(true));
        assert_eq!(dht.measure(), Err(SensorError::NoResponse));
    }

    #[test]
    fn test_stuck_line_times_out() {
        // Response arrives, then the line sticks high mid-transfer
        let line = ScriptedLine::new(true)
            .segment(true, 5)
            .segment(false, 80)
            .segment(true, 80)
            .segment(false, 50)
            .segment(true, 27);
        let mut dht = sensor(line);
        assert_eq!(dht.measure(), Err(SensorError::Timeout));
    }

    #[test]
    fn test_not_ready_before_initialize() {
        let mut dht = Dht11::new(ScriptedLine::transfer([41, 0, 23, 5, 69]), NoDelay);
        assert_eq!(dht.read_temperature(), Err(SensorError::NotReady));
        assert_eq!(dht.read_humidity(), Err(SensorError::NotReady));
    }
}
