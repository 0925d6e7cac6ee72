use thiserror::Error;

/// `SimulationError` enumerates all possible errors returned by queuelab
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Transparent Bernoulli distribution errors - a trial probability
    /// outside [0, 1], which surfaces a time step too coarse for the
    /// configured rates
    #[error(transparent)]
    BernoulliError(#[from] rand_distr::BernoulliError),

    /// Transparent serde_json errors
    #[error(transparent)]
    JSONError(#[from] serde_json::error::Error),
}
