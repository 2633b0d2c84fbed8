//! Gacha Sim - Monte Carlo analysis of pity, 50/50 and Radiance mechanics
//!
//! This crate exposes the simulation engine for the headless binary, for
//! tests and for any other host that wants to drive it.

pub mod constants;
pub mod error;
pub mod host;
pub mod pity;
pub mod radiance;
pub mod rng;
pub mod simulator;

pub use error::{SimError, SimResult};
pub use host::{run_request, HostMessage, SimRequest};
pub use pity::PityCurve;
pub use radiance::{Allocation, AllocationMachine, AllocationState, AllocationStats};
pub use rng::{RandomSource, RngSource, ScriptedSource};
pub use simulator::{
    NoProgress, ProgressObserver, SampleStats, SimConfig, SimReport, SimulationEngine,
};
