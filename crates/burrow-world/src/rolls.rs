//! Injectable uniform random source.
//!
//! Terrain generation rolls ore and hazard kinds, and the fluid simulator
//! flips a coin for lateral spill. Both draw from a [`RollSource`] handed
//! in by the caller, so a seeded source makes them reproducible and an
//! entropy-seeded one keeps them varied from run to run.

/// Source of uniform draws in `[0, 1)`.
pub trait RollSource {
    /// Returns the next uniform value in `[0, 1)`.
    fn roll(&mut self) -> f64;
}

impl RollSource for fastrand::Rng {
    fn roll(&mut self) -> f64 {
        self.f64()
    }
}

impl<R: RollSource + ?Sized> RollSource for &mut R {
    fn roll(&mut self) -> f64 {
        (**self).roll()
    }
}

/// Builds an RNG from an optional seed; `None` seeds from entropy.
#[must_use]
pub fn rng_from(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    }
}

/// Replays a fixed sequence of rolls, cycling when exhausted.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRolls {
    rolls: Vec<f64>,
    next: usize,
}

#[cfg(test)]
impl ScriptedRolls {
    /// Creates a source replaying `rolls` in order.
    ///
    /// An empty script always rolls `0.0`.
    #[must_use]
    pub(crate) fn new(rolls: impl Into<Vec<f64>>) -> Self {
        Self {
            rolls: rolls.into(),
            next: 0,
        }
    }

    /// Number of rolls drawn so far.
    #[must_use]
    pub(crate) const fn drawn(&self) -> usize {
        self.next
    }
}

#[cfg(test)]
impl RollSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        let value = if self.rolls.is_empty() {
            0.0
        } else {
            self.rolls[self.next % self.rolls.len()]
        };
        self.next += 1;
        value
    }
}
