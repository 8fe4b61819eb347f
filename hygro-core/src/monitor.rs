//! Startup and the sample-render cycle
//!
//! [`Monitor::start`] runs once: it brings the display online, shows the
//! splash and waits out its dwell. The returned monitor then runs
//! [`Monitor::step`] forever (or until an injected stop condition says
//! otherwise).
//!
//! ```text
//! start:  sensor.initialize -> display.initialize --err--> Halted
//!                                   |ok
//!                              splash, dwell
//! step:   pause -> read T -> read H -> validate -> render -> flush
//! ```

use crate::config::MonitorConfig;
use crate::reading::Reading;
use crate::render;
use crate::state::{Event, RenderOutcome, State};
use crate::traits::{ClimateSensor, DiagnosticSink, DisplayError, FrameDisplay, Pacer};

/// Line sent to the diagnostic sink when the display cannot be reached
pub const DISPLAY_FAILURE_MESSAGE: &str = "SSD1306 allocation failed";

/// Fatal startup errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    /// Display did not come online; the caller must halt
    DisplayUnavailable(DisplayError),
}

/// Summary of one completed cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// 1-based cycle number (wraps)
    pub iteration: u32,
    pub reading: Reading,
    pub outcome: RenderOutcome,
}

/// Run one sample-render cycle on borrowed devices
///
/// Pacing comes first, so two calls can never sample closer together
/// than `config.pacing_interval_ms`.
pub fn sample_and_render<S, D, P>(
    sensor: &mut S,
    display: &mut D,
    pacer: &mut P,
    config: &MonitorConfig,
) -> (Reading, RenderOutcome)
where
    S: ClimateSensor,
    D: FrameDisplay,
    P: Pacer,
{
    pacer.pause_ms(config.pacing_interval_ms);

    let temperature = sensor.read_temperature();
    let humidity = sensor.read_humidity();
    let reading = Reading::from_samples(temperature, humidity);

    let outcome = render::render_reading(display, &reading, config.decimal_places);
    (reading, outcome)
}

/// The running monitor
///
/// Owns the sensor, display and pacer for the rest of the program.
pub struct Monitor<S, D, P> {
    sensor: S,
    display: D,
    pacer: P,
    config: MonitorConfig,
    state: State,
    iterations: u32,
}

impl<S, D, P> Monitor<S, D, P>
where
    S: ClimateSensor,
    D: FrameDisplay,
    P: Pacer,
{
    /// Bring up the devices and show the splash
    ///
    /// On `Err` no sensor query has been issued and none may be: the
    /// caller is expected to halt.
    pub fn start<G: DiagnosticSink>(
        mut sensor: S,
        mut display: D,
        mut pacer: P,
        diagnostics: &mut G,
        config: MonitorConfig,
    ) -> Result<Self, StartupError> {
        let mut state = State::Startup;

        sensor.initialize();

        let online = display
            .initialize(
                config.display_width,
                config.display_height,
                config.display_address,
            )
            .and_then(|()| render::render_splash(&mut display));

        if let Err(e) = online {
            diagnostics.report(DISPLAY_FAILURE_MESSAGE);
            state = state.transition(Event::DisplayFailed);
            debug_assert!(state.is_halted());
            return Err(StartupError::DisplayUnavailable(e));
        }
        state = state.transition(Event::DisplayReady);

        pacer.pause_ms(config.splash_dwell_ms);
        state = state.transition(Event::DwellElapsed);

        Ok(Self {
            sensor,
            display,
            pacer,
            config,
            state,
            iterations: 0,
        })
    }

    /// Run one cycle
    pub fn step(&mut self) -> CycleReport {
        let (reading, outcome) = sample_and_render(
            &mut self.sensor,
            &mut self.display,
            &mut self.pacer,
            &self.config,
        );

        self.state = self.state.transition(Event::Rendered(outcome));
        self.iterations = self.iterations.wrapping_add(1);

        CycleReport {
            iteration: self.iterations,
            reading,
            outcome,
        }
    }

    /// Run cycles until `stop` returns true
    ///
    /// `stop` is checked once per cycle, after the frame is flushed.
    /// Returns the number of cycles run by this call.
    pub fn run_until<F>(&mut self, mut stop: F) -> u32
    where
        F: FnMut(&CycleReport) -> bool,
    {
        let mut count = 0u32;
        loop {
            let report = self.step();
            count = count.wrapping_add(1);
            if stop(&report) {
                return count;
            }
        }
    }

    /// Run forever
    pub fn run(&mut self) -> ! {
        loop {
            self.run_until(|_| false);
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Cycles completed so far
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
