//! Random variables underpin the stochastic simulation behaviors.  The
//! time-slice engine decides arrivals and departures with Bernoulli trials,
//! so only the boolean random variable is provided, wrapped in an enum with
//! its common parameterization.

use rand::distributions::Distribution;
use rand_distr::Bernoulli;
use serde::{Deserialize, Serialize};

use super::dynamic_rng::DynRng;
use crate::utils::errors::SimulationError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Boolean {
    Bernoulli { p: f64 },
}

impl Boolean {
    /// The generation of random variates drives stochastic behaviors during
    /// simulation execution.  This function requires the random number
    /// generator of the simulation, and produces a boolean random variate.
    pub fn random_variate(&mut self, uniform_rng: &DynRng) -> Result<bool, SimulationError> {
        match self {
            Boolean::Bernoulli { p } => {
                Ok(Bernoulli::new(*p)?.sample(&mut *uniform_rng.borrow_mut()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_modeling::dynamic_rng::dyn_rng;

    #[test]
    fn bernoulli_samples_match_expectation() {
        let mut variable = Boolean::Bernoulli { p: 0.3 };
        let rng = dyn_rng(rand_pcg::Pcg64Mcg::new(42));
        let successes = (0..10000)
            .filter(|_| variable.random_variate(&rng).unwrap())
            .count();
        assert!((successes as f64 / 10000.0 - 0.3).abs() < 0.025);
    }

    #[test]
    fn degenerate_probabilities_are_deterministic() {
        let rng = dyn_rng(rand_pcg::Pcg64Mcg::new(42));
        let mut always = Boolean::Bernoulli { p: 1.0 };
        let mut never = Boolean::Bernoulli { p: 0.0 };
        (0..100).for_each(|_| {
            assert!(always.random_variate(&rng).unwrap());
            assert!(!never.random_variate(&rng).unwrap());
        });
    }

    #[test]
    fn invalid_probability_is_an_error() {
        let rng = dyn_rng(rand_pcg::Pcg64Mcg::new(42));
        let mut variable = Boolean::Bernoulli { p: 1.5 };
        assert!(variable.random_variate(&rng).is_err());
    }
}
