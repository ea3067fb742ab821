// Vital-Signs Generator Module
// Correlated mean-reverting signal model producing clinically bounded readings

pub mod noise;
pub mod reading;

use std::time::Instant;

use chrono::Utc;

use noise::{GaussianNoise, NoiseSource};
use reading::Reading;

/// Floor applied to the elapsed time between ticks, in seconds
const MIN_DT_SECS: f64 = 0.1;

/// Minimum plausible spread between systolic and diastolic pressure
const MIN_PULSE_PRESSURE: f64 = 25.0;

/// Parameters of one discretized Ornstein-Uhlenbeck process
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuParams {
    /// Lower clamp bound
    pub lo: f64,
    /// Upper clamp bound
    pub hi: f64,
    /// Target mean the signal reverts toward
    pub mu: f64,
    /// Mean-reversion rate (larger = faster return to the mean)
    pub theta: f64,
    /// Noise scale
    pub sigma: f64,
}

/// Heart rate: moderate drift around a resting pulse
pub const HEART_RATE: OuParams = OuParams {
    lo: 60.0,
    hi: 100.0,
    mu: 75.0,
    theta: 0.6,
    sigma: 1.5,
};

/// ECG: fastest reversion, largest noise; mu is replaced with the live heart rate each tick
pub const ECG: OuParams = OuParams {
    lo: 55.0,
    hi: 110.0,
    mu: 75.0,
    theta: 1.8,
    sigma: 3.0,
};

/// Respiration: slow, loosely coupled to the pulse; mu is recomputed each tick
pub const RESPIRATORY_RATE: OuParams = OuParams {
    lo: 12.0,
    hi: 20.0,
    mu: 14.0,
    theta: 0.35,
    sigma: 0.25,
};

/// Systolic pressure: slow and stable
pub const SYSTOLIC: OuParams = OuParams {
    lo: 105.0,
    hi: 130.0,
    mu: 118.0,
    theta: 0.18,
    sigma: 0.7,
};

/// Diastolic pressure: slow and stable, corrected against systolic after each step
pub const DIASTOLIC: OuParams = OuParams {
    lo: 65.0,
    hi: 85.0,
    mu: 78.0,
    theta: 0.18,
    sigma: 0.5,
};

/// Temperature: slowest process, tight healthy band
pub const TEMPERATURE: OuParams = OuParams {
    lo: 36.5,
    hi: 37.2,
    mu: 36.8,
    theta: 0.06,
    sigma: 0.03,
};

/// SpO2: near constant
pub const SPO2: OuParams = OuParams {
    lo: 96.0,
    hi: 100.0,
    mu: 98.5,
    theta: 0.25,
    sigma: 0.12,
};

/// One discretized Ornstein-Uhlenbeck update, clamped into the clinical band
///
/// `x' = clamp(x + theta*(mu - x)*dt + sigma*sqrt(dt)*noise, lo, hi)`
pub fn ou_step(x: f64, params: &OuParams, dt: f64, noise: f64) -> f64 {
    let drifted = x + params.theta * (params.mu - x) * dt + params.sigma * dt.sqrt() * noise;
    drifted.clamp(params.lo, params.hi)
}

/// Respiratory target mean derived from the current heart rate
fn respiratory_target(heart_rate: f64) -> f64 {
    (14.0 + (heart_rate - 75.0) * 0.05).clamp(12.0, 18.0)
}

/// Current value of every simulated signal
#[derive(Debug, Clone, PartialEq)]
pub struct SignalState {
    pub systolic: f64,
    pub diastolic: f64,
    pub heart_rate: f64,
    pub respiratory_rate: f64,
    pub temperature: f64,
    pub spo2: f64,
    pub ecg: f64,
}

impl Default for SignalState {
    /// Resting-healthy baseline
    fn default() -> Self {
        Self {
            systolic: 118.0,
            diastolic: 78.0,
            heart_rate: 74.0,
            respiratory_rate: 15.0,
            temperature: 36.8,
            spo2: 98.0,
            ecg: 74.0,
        }
    }
}

/// Vital-signs generator
/// Owns the signal state and the monotonic tick clock; one instance per simulated device
pub struct VitalSignsGenerator<N: NoiseSource = GaussianNoise> {
    state: SignalState,
    last_tick: Instant,
    noise: N,
}

impl VitalSignsGenerator<GaussianNoise> {
    /// Create a generator with an entropy-seeded noise source
    pub fn new() -> Self {
        Self::with_noise(GaussianNoise::new())
    }
}

impl Default for VitalSignsGenerator<GaussianNoise> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NoiseSource> VitalSignsGenerator<N> {
    /// Create a generator with an injected noise source
    pub fn with_noise(noise: N) -> Self {
        Self::with_noise_at(noise, Instant::now())
    }

    /// Create a generator whose tick clock starts at `start`
    pub fn with_noise_at(noise: N, start: Instant) -> Self {
        Self {
            state: SignalState::default(),
            last_tick: start,
            noise,
        }
    }

    /// Read-only view of the raw signal state
    pub fn state(&self) -> &SignalState {
        &self.state
    }

    /// Advance every signal by the elapsed time and render a Reading
    ///
    /// Ordering matters: the heart rate feeds the ECG mean and the respiratory
    /// target, and systolic must be advanced before the diastolic correction.
    pub fn generate_reading(&mut self, now: Instant) -> Reading {
        let dt = now
            .saturating_duration_since(self.last_tick)
            .as_secs_f64()
            .max(MIN_DT_SECS);

        let noise = self.noise.sample();
        self.state.heart_rate = ou_step(self.state.heart_rate, &HEART_RATE, dt, noise);

        // ECG tracks the live pulse with more visual jitter
        let ecg_params = OuParams {
            mu: self.state.heart_rate,
            ..ECG
        };
        let noise = self.noise.sample();
        self.state.ecg = ou_step(self.state.ecg, &ecg_params, dt, noise);

        let rr_params = OuParams {
            mu: respiratory_target(self.state.heart_rate),
            ..RESPIRATORY_RATE
        };
        let noise = self.noise.sample();
        self.state.respiratory_rate = ou_step(self.state.respiratory_rate, &rr_params, dt, noise);

        let noise = self.noise.sample();
        self.state.systolic = ou_step(self.state.systolic, &SYSTOLIC, dt, noise);
        let noise = self.noise.sample();
        self.state.diastolic = ou_step(self.state.diastolic, &DIASTOLIC, dt, noise);

        // Keep pulse pressure plausible: diastolic stays a margin below systolic
        if self.state.diastolic > self.state.systolic - MIN_PULSE_PRESSURE {
            self.state.diastolic = (self.state.systolic - MIN_PULSE_PRESSURE).clamp(60.0, 90.0);
        }

        let noise = self.noise.sample();
        self.state.temperature = ou_step(self.state.temperature, &TEMPERATURE, dt, noise);
        let noise = self.noise.sample();
        self.state.spo2 = ou_step(self.state.spo2, &SPO2, dt, noise);

        self.last_tick = now;

        Reading::from_state(&self.state, Utc::now().timestamp())
    }
}
