//! Message boundary between the engine and whatever hosts it.
//!
//! A host sends one [`SimRequest`] and gets back zero or more progress
//! messages followed by exactly one completion message.

use crate::constants::{DEFAULT_RADIANCE_CHANCES, DEFAULT_SAMPLE_GROUP_SIZE};
use crate::error::{SimError, SimResult};
use crate::rng::RandomSource;
use crate::simulator::{SimConfig, SimReport, SimulationEngine};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimRequest {
    /// Kept as a raw JSON number so fractional or negative input can be
    /// reported as an invalid argument rather than a decode failure.
    pub num_trials: serde_json::Number,
    #[serde(default)]
    pub radiance_chances: Option<Vec<f64>>,
    #[serde(default, alias = "sampleGroupSize")]
    pub sample_size: Option<u32>,
}

impl SimRequest {
    pub fn new(num_trials: u64) -> Self {
        Self {
            num_trials: num_trials.into(),
            radiance_chances: None,
            sample_size: None,
        }
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Positive whole number of trials. Integral floats such as `1e6` are accepted.
    pub fn num_trials(&self) -> SimResult<u64> {
        let invalid = || {
            SimError::InvalidArgument(format!(
                "numTrials must be a positive integer, got {}",
                self.num_trials
            ))
        };
        if let Some(n) = self.num_trials.as_u64() {
            return if n > 0 { Ok(n) } else { Err(invalid()) };
        }
        match self.num_trials.as_f64() {
            Some(f) if f >= 1.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(f as u64),
            _ => Err(invalid()),
        }
    }

    /// Engine configuration with defaults for anything the request leaves out.
    pub fn config(&self) -> SimConfig {
        SimConfig {
            radiance_chances: self
                .radiance_chances
                .clone()
                .unwrap_or_else(|| DEFAULT_RADIANCE_CHANCES.to_vec()),
            sample_group_size: self.sample_size.unwrap_or(DEFAULT_SAMPLE_GROUP_SIZE),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HostMessage {
    Progress { percent: u8 },
    Complete { results: Box<SimReport> },
}

impl HostMessage {
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Builds an engine for `request`, runs it and forwards everything to `sink`.
///
/// On error nothing but already-sent progress reaches the sink; no partial
/// result is produced.
pub fn run_request<S, F>(request: &SimRequest, source: S, mut sink: F) -> SimResult<()>
where
    S: RandomSource,
    F: FnMut(HostMessage),
{
    let engine = SimulationEngine::new(request.config(), source)?;
    let num_trials = request.num_trials()?;
    let report = engine.run_with_progress(num_trials, &mut |percent: u8| {
        sink(HostMessage::Progress { percent })
    })?;
    sink(HostMessage::Complete {
        results: Box::new(report),
    });
    Ok(())
}
