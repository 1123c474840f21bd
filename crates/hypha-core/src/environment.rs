//! The environment model: ambient parameters and the growth-factor function.
//!
//! The environment is an explicit value owned by the simulation engine and
//! passed by reference into [`growth_factor`], never as ambient or global
//! state. All setters clamp to the documented bounded ranges, so an
//! `Environment` is always internally valid.
//!
//! # Determinism
//!
//! [`growth_factor`] is a pure function: two calls with identical inputs
//! return bit-identical output. The engine relies on this for replay.

use crate::species::{SpeciesProfile, Tolerance};

/// Bounds for pH: `[4.0, 10.0]`.
pub const PH_RANGE: (f32, f32) = (4.0, 10.0);
/// Bounds for temperature in °F: `[32.0, 110.0]`.
pub const TEMPERATURE_RANGE: (f32, f32) = (32.0, 110.0);
/// Bounds for relative humidity in percent: `[0.0, 100.0]`.
pub const HUMIDITY_RANGE: (f32, f32) = (0.0, 100.0);
/// Bounds for the presentation-only speed multiplier: `[0.1, 10.0]`.
pub const SPEED_RANGE: (f32, f32) = (0.1, 10.0);

/// Default optimal pH for profiles that declare none.
pub const DEFAULT_PH: f32 = 6.5;
/// Tolerance band applied to the pH axis.
pub const PH_TOLERANCE: f32 = 2.5;
/// Default temperature band (°F) for profiles that declare none.
pub const DEFAULT_TEMPERATURE: Tolerance = Tolerance {
    optimal: 70.0,
    tolerance: 20.0,
};
/// Default humidity band (%) for profiles that declare none.
pub const DEFAULT_HUMIDITY: Tolerance = Tolerance {
    optimal: 80.0,
    tolerance: 20.0,
};

/// Ambient parameters shared by every organism in a world.
///
/// Mutable only through the command surface; the engine passes it by
/// reference into growth computations. `speed` is a tick-rate hint for
/// the host's driver and is read by nothing inside the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
    ph: f32,
    temperature: f32,
    humidity: f32,
    substrate: String,
    speed: f32,
}

impl Environment {
    /// Create an environment at the default operating point on the given
    /// substrate: pH 6.5, 70 °F, 80 % humidity, speed 1.
    pub fn new(substrate: impl Into<String>) -> Self {
        Self {
            ph: DEFAULT_PH,
            temperature: DEFAULT_TEMPERATURE.optimal,
            humidity: DEFAULT_HUMIDITY.optimal,
            substrate: substrate.into(),
            speed: 1.0,
        }
    }

    /// Current pH.
    pub fn ph(&self) -> f32 {
        self.ph
    }

    /// Current temperature in °F.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Current relative humidity in percent.
    pub fn humidity(&self) -> f32 {
        self.humidity
    }

    /// Name of the active substrate.
    pub fn substrate(&self) -> &str {
        &self.substrate
    }

    /// Presentation-only speed multiplier.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the pH, clamped to [`PH_RANGE`].
    pub fn set_ph(&mut self, ph: f32) {
        self.ph = ph.clamp(PH_RANGE.0, PH_RANGE.1);
    }

    /// Set the temperature, clamped to [`TEMPERATURE_RANGE`].
    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = temperature.clamp(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1);
    }

    /// Set the humidity, clamped to [`HUMIDITY_RANGE`].
    pub fn set_humidity(&mut self, humidity: f32) {
        self.humidity = humidity.clamp(HUMIDITY_RANGE.0, HUMIDITY_RANGE.1);
    }

    /// Record the active substrate name. The caller is responsible for
    /// validating the name against the substrate registry first.
    pub fn set_substrate(&mut self, substrate: impl Into<String>) {
        self.substrate = substrate.into();
    }

    /// Set the speed multiplier, clamped to [`SPEED_RANGE`].
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1);
    }

    /// Apply a partial update; `None` fields retain their prior value.
    pub fn apply(&mut self, update: &EnvironmentUpdate) {
        if let Some(ph) = update.ph {
            self.set_ph(ph);
        }
        if let Some(temperature) = update.temperature {
            self.set_temperature(temperature);
        }
        if let Some(humidity) = update.humidity {
            self.set_humidity(humidity);
        }
        if let Some(speed) = update.speed {
            self.set_speed(speed);
        }
    }
}

/// Partial environment update; unset fields keep their prior value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnvironmentUpdate {
    /// New pH, if changing.
    pub ph: Option<f32>,
    /// New temperature (°F), if changing.
    pub temperature: Option<f32>,
    /// New relative humidity (%), if changing.
    pub humidity: Option<f32>,
    /// New speed multiplier, if changing.
    pub speed: Option<f32>,
}

/// Suitability of one environment axis: 1 at the optimum, falling off
/// linearly to 0 at the edge of the tolerance band.
fn axis_suitability(actual: f32, optimal: f32, tolerance: f32) -> f32 {
    (1.0 - (actual - optimal).abs() / tolerance).max(0.0)
}

/// Dimensionless growth multiplier in [0, 1] for a species under the
/// current environment.
///
/// The product of three independent suitability terms, one per axis
/// (pH, temperature, humidity). A profile with no declared optimum for an
/// axis uses the documented defaults ([`DEFAULT_PH`], [`DEFAULT_TEMPERATURE`],
/// [`DEFAULT_HUMIDITY`]). Returns 0 when any axis is fully outside
/// tolerance.
pub fn growth_factor(profile: &SpeciesProfile, env: &Environment) -> f32 {
    let ph = axis_suitability(
        env.ph(),
        profile.optimal_ph.unwrap_or(DEFAULT_PH),
        PH_TOLERANCE,
    );
    let temperature = {
        let band = profile.optimal_temperature.unwrap_or(DEFAULT_TEMPERATURE);
        axis_suitability(env.temperature(), band.optimal, band.tolerance)
    };
    let humidity = {
        let band = profile.optimal_humidity.unwrap_or(DEFAULT_HUMIDITY);
        axis_suitability(env.humidity(), band.optimal, band.tolerance)
    };
    ph * temperature * humidity
}
