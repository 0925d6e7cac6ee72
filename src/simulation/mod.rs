//! The simulation module provides a stochastic, fixed-timestep
//! approximation of the continuous-time birth-death process behind the
//! M/M/c and M/M/c/K models.  Each step runs independent Bernoulli trials
//! for one potential arrival and for per-server departures, which is a
//! valid approximation only while the time step is small relative to the
//! mean interarrival and service times - at most one arrival can occur per
//! step, so accuracy degrades as `arrival_rate * time_step` approaches one.
//!
//! The engine is an exclusively-owned, single-writer resource: a single
//! `step` operation mutates the state, `reset` replaces it wholesale, and
//! the read accessors return copies, never live references.

use serde::{Deserialize, Serialize};

use crate::input_modeling::dynamic_rng::{default_rng, DynRng};
use crate::input_modeling::BooleanRandomVariable;
use crate::utils::errors::SimulationError;

/// Configured rates are per minute, while the time step is in seconds -
/// the engine converts on every step.
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Live configuration of the simulation engine.  The configuration may be
/// updated between steps without resetting accumulated state, and changes
/// apply prospectively to future steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Mean arrivals per minute
    pub arrival_rate: f64,
    /// Mean completions per server per minute
    pub service_rate: f64,
    pub num_servers: usize,
    /// Seconds of simulated time per step; must be positive
    pub time_step: f64,
    /// Capacity bound on waiting plus in-service customers; `None` models
    /// infinite waiting room
    #[serde(default)]
    pub max_capacity: Option<usize>,
}

/// A partial configuration, for live re-parameterization.  Fields left
/// `None` keep their current values.  A configured capacity bound can be
/// changed this way but not removed; removing it is a reset-scale change.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfigUpdate {
    #[serde(default)]
    pub arrival_rate: Option<f64>,
    #[serde(default)]
    pub service_rate: Option<f64>,
    #[serde(default)]
    pub num_servers: Option<usize>,
    #[serde(default)]
    pub time_step: Option<f64>,
    #[serde(default)]
    pub max_capacity: Option<usize>,
}

impl SimulationConfigUpdate {
    pub fn apply_to(&self, config: &mut SimulationConfig) {
        if let Some(arrival_rate) = self.arrival_rate {
            config.arrival_rate = arrival_rate;
        }
        if let Some(service_rate) = self.service_rate {
            config.service_rate = service_rate;
        }
        if let Some(num_servers) = self.num_servers {
            config.num_servers = num_servers;
        }
        if let Some(time_step) = self.time_step {
            config.time_step = time_step;
        }
        if let Some(max_capacity) = self.max_capacity {
            config.max_capacity = Some(max_capacity);
        }
    }
}

/// Running state and cumulative statistics of the engine.  Customers are
/// tracked only as aggregate counts, so FIFO discipline reduces to the
/// accounting invariant that `total_served` never exceeds `total_arrivals`
/// and departures draw from the queue count without distinguishing
/// identity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub current_time: f64,
    pub queue_length: usize,
    pub servers_busy: usize,
    /// Admitted arrivals; rejected arrivals are counted in
    /// `total_rejected` instead
    pub total_arrivals: usize,
    pub total_served: usize,
    /// Arrivals turned away by the capacity bound
    pub total_rejected: usize,
    /// Sum of `queue_length` sampled at every step, for averaging
    pub cumulative_queue_length: usize,
    pub time_steps: usize,
}

/// The `QueueSimulation` struct is the core of the stochastic side of
/// queuelab - a time-slice simulation of a multi-server queue, holding its
/// configuration, its running state, and a random number generator.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSimulation {
    config: SimulationConfig,
    #[serde(default)]
    state: SimulationState,
    #[serde(skip, default = "default_rng")]
    rng: DynRng,
}

impl QueueSimulation {
    /// This constructor method creates a simulation from a supplied
    /// configuration, with zero-initialized state and an entropy-seeded
    /// random number generator.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            state: SimulationState::default(),
            rng: default_rng(),
        }
    }

    /// This constructor method creates a simulation with a caller-supplied
    /// random number generator, for deterministic replications.
    pub fn with_rng(config: SimulationConfig, rng: DynRng) -> Self {
        Self {
            config,
            state: SimulationState::default(),
            rng,
        }
    }

    /// An accessor method for the live configuration.
    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    /// An accessor method providing a snapshot of the simulation state - a
    /// copy, never a live reference.
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// An accessor method for the current queue length.
    pub fn queue_length(&self) -> usize {
        self.state.queue_length
    }

    /// An accessor method for the simulation clock, in seconds.
    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    /// The running average queue length - the per-step queue length samples
    /// averaged over all steps taken so far, or 0.0 before the first step.
    pub fn average_queue_length(&self) -> f64 {
        if self.state.time_steps == 0 {
            return 0.0;
        }
        self.state.cumulative_queue_length as f64 / self.state.time_steps as f64
    }

    /// This method merges a partial configuration into the live
    /// configuration, leaving the accumulated state untouched.  Changes
    /// apply prospectively, to future steps only.
    pub fn update_config(&mut self, update: SimulationConfigUpdate) {
        update.apply_to(&mut self.config);
    }

    /// To start a fresh run, the reset method replaces the state with the
    /// zero-initialized record.  The random number generator is retained,
    /// so back-to-back replications do not repeat their random streams.
    pub fn reset(&mut self) {
        self.state = SimulationState::default();
    }

    /// This method executes a single fixed-width time step: one arrival
    /// Bernoulli trial, an admission check against any capacity bound, an
    /// independent departure Bernoulli trial per busy server, and the
    /// statistics and clock updates.  A trial probability outside [0, 1]
    /// (a time step too coarse for the configured rates) is returned as an
    /// error rather than clamped.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        let arrival_probability =
            self.config.arrival_rate / SECONDS_PER_MINUTE * self.config.time_step;
        let departure_probability =
            self.config.service_rate / SECONDS_PER_MINUTE * self.config.time_step;
        let mut arrival_trial = BooleanRandomVariable::Bernoulli {
            p: arrival_probability,
        };
        let mut departure_trial = BooleanRandomVariable::Bernoulli {
            p: departure_probability,
        };
        if arrival_trial.random_variate(&self.rng)? {
            let at_capacity = self
                .config
                .max_capacity
                .map(|capacity| self.state.queue_length + self.state.servers_busy >= capacity)
                .unwrap_or(false);
            if at_capacity {
                self.state.total_rejected += 1;
            } else {
                self.state.total_arrivals += 1;
                self.state.queue_length += 1;
            }
        }
        // As many servers are busy as there are waiting-or-in-service
        // customers, capped at capacity
        let servers_currently_busy =
            (self.state.queue_length + self.state.servers_busy).min(self.config.num_servers);
        let completions = (0..servers_currently_busy).try_fold(
            0_usize,
            |completions, _| -> Result<usize, SimulationError> {
                Ok(completions + departure_trial.random_variate(&self.rng)? as usize)
            },
        )?;
        // Served customers can never outrun admitted arrivals, even when a
        // stale busy-server count lets extra departure trials run
        let completions = completions.min(self.state.total_arrivals - self.state.total_served);
        self.state.total_served += completions;
        self.state.queue_length -= self.state.queue_length.min(completions);
        self.state.servers_busy = servers_currently_busy.saturating_sub(completions);
        self.state.cumulative_queue_length += self.state.queue_length;
        self.state.time_steps += 1;
        self.state.current_time += self.config.time_step;
        Ok(())
    }

    /// This method executes simulation `step` calls until the clock has
    /// advanced by the requested duration, in seconds.  The per-step queue
    /// length samples are returned, for use in output analysis.
    pub fn simulate(&mut self, duration: f64) -> Result<Vec<usize>, SimulationError> {
        let until = self.state.current_time + duration;
        let mut samples = Vec::new();
        while self.state.current_time < until {
            self.step()?;
            samples.push(self.state.queue_length);
        }
        Ok(samples)
    }
}
