//! Uniform random sources driving pulls and allocation rolls.

use rand::Rng;

/// Anything that can hand out uniform floats in `[0, 1)`.
///
/// The engine only ever asks for one value at a time, so a scripted source
/// can replay an exact sequence of pulls in tests.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSource<rand::rngs::ThreadRng> {
    /// Source backed by the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Number of values handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
