// Rendered reading record
// The exact wire shape the monitoring display expects under devices/<id>/readings

use serde::{Deserialize, Serialize};

use super::SignalState;

/// Nested blood-pressure pair, rendered as integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
}

/// One rendered reading, produced fresh each tick and handed to the sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub blood_pressure: BloodPressure,
    pub heart_rate: u32,
    pub respiratory_rate: u32,
    /// Degrees Celsius, one decimal place
    pub temperature: f64,
    pub spo2: u32,
    pub ecg: u32,
    /// Unix epoch seconds (wall clock)
    pub last_updated: i64,
}

impl Reading {
    /// Render the raw signal state into the wire record
    pub fn from_state(state: &SignalState, timestamp: i64) -> Self {
        Self {
            blood_pressure: BloodPressure {
                systolic: state.systolic.round() as u32,
                diastolic: state.diastolic.round() as u32,
            },
            heart_rate: state.heart_rate.round() as u32,
            respiratory_rate: state.respiratory_rate.round() as u32,
            temperature: (state.temperature * 10.0).round() / 10.0,
            spo2: state.spo2.round() as u32,
            ecg: state.ecg.round() as u32,
            last_updated: timestamp,
        }
    }
}
