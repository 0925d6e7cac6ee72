//! The input modeling module provides a foundation for the stochastic
//! behaviors of the simulation engine.  The module includes the Bernoulli
//! random variable behind the per-step arrival and departure trials, and a
//! structure around random number generation.

pub mod dynamic_rng;
pub mod random_variable;

pub use dynamic_rng::dyn_rng;
pub use random_variable::Boolean as BooleanRandomVariable;
