//! The analytic module provides closed-form evaluation of the M/M/c and
//! M/M/c/K queueing models.  Both models share the parameter structures and
//! metric structures defined here, along with the utilization and stability
//! helpers.  The evaluators are pure and stateless - each call is
//! independent, and no references are retained across calls.

use serde::{Deserialize, Serialize};

pub mod mmc;
pub mod mmck;

/// Parameters of an M/M/c queueing system - Poisson arrivals at rate
/// `arrival_rate`, exponential service at rate `service_rate` per server,
/// and `num_servers` parallel identical servers.  Rates must be positive
/// and the server count at least one; this is a caller contract, and is not
/// validated defensively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueingParameters {
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub num_servers: usize,
}

impl QueueingParameters {
    pub fn new(arrival_rate: f64, service_rate: f64, num_servers: usize) -> Self {
        Self {
            arrival_rate,
            service_rate,
            num_servers,
        }
    }

    /// The offered load a = lambda/mu, in Erlangs.
    pub fn offered_load(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    /// The utilization rho = lambda/(c*mu), the fraction of aggregate
    /// service capacity consumed.
    pub fn utilization(&self) -> f64 {
        self.arrival_rate / (self.service_rate * self.num_servers as f64)
    }

    /// An infinite-capacity system is stable only for rho strictly below
    /// one.  At rho exactly one the queue grows without bound.
    pub fn is_stable(&self) -> bool {
        self.utilization() < 1.0
    }
}

/// Parameters of an M/M/c/K queueing system - the M/M/c parameters plus a
/// capacity bound `max_capacity` on the total number of customers in the
/// system (waiting plus in service).  K >= c is a caller contract; K = c
/// means no waiting room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiniteQueueingParameters {
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub num_servers: usize,
    pub max_capacity: usize,
}

impl FiniteQueueingParameters {
    pub fn new(
        arrival_rate: f64,
        service_rate: f64,
        num_servers: usize,
        max_capacity: usize,
    ) -> Self {
        Self {
            arrival_rate,
            service_rate,
            num_servers,
            max_capacity,
        }
    }

    /// The shared M/M/c portion of the parameters.
    pub fn base(&self) -> QueueingParameters {
        QueueingParameters {
            arrival_rate: self.arrival_rate,
            service_rate: self.service_rate,
            num_servers: self.num_servers,
        }
    }

    pub fn offered_load(&self) -> f64 {
        self.base().offered_load()
    }

    pub fn utilization(&self) -> f64 {
        self.base().utilization()
    }
}

/// Steady-state metrics of an M/M/c queueing system.  When `is_stable` is
/// false, the four derived quantities are positive infinity - never NaN,
/// and never a finite number - while `utilization` still reports the real
/// (possibly above one) value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMetrics {
    /// rho = lambda/(c*mu)
    pub utilization: f64,
    /// Lq - mean number of customers waiting
    pub average_queue_length: f64,
    /// L - mean number of customers in the system
    pub average_system_length: f64,
    /// Wq - mean time spent waiting
    pub average_wait_time: f64,
    /// W - mean time spent in the system
    pub average_system_time: f64,
    pub is_stable: bool,
}

/// Steady-state metrics of an M/M/c/K queueing system.  Finite capacity
/// guarantees boundedness, so `is_stable` is always true and every numeric
/// field is finite.  The effective arrival rate lambda*(1 - Pb) is derived
/// from `rejection_probability`, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiniteQueueMetrics {
    pub utilization: f64,
    pub average_queue_length: f64,
    pub average_system_length: f64,
    pub average_wait_time: f64,
    pub average_system_time: f64,
    pub is_stable: bool,
    /// Pb - probability an arriving customer finds the system at capacity
    /// and is turned away
    pub rejection_probability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utilization_divides_load_across_servers() {
        let params = QueueingParameters::new(6.0, 10.0, 1);
        assert!((params.utilization() - 0.6).abs() < 1.0e-12);
        let params = QueueingParameters::new(10.0, 8.0, 2);
        assert!((params.utilization() - 0.625).abs() < 1.0e-12);
    }

    #[test]
    fn critical_utilization_is_unstable() {
        let params = QueueingParameters::new(10.0, 10.0, 1);
        assert!((params.utilization() - 1.0).abs() < 1.0e-12);
        assert!(!params.is_stable());
    }

    #[test]
    fn subcritical_utilization_is_stable() {
        let params = QueueingParameters::new(9.999, 10.0, 1);
        assert!(params.is_stable());
    }

    #[test]
    fn finite_parameters_share_base_ratios() {
        let params = FiniteQueueingParameters::new(6.0, 10.0, 2, 5);
        assert!((params.offered_load() - 0.6).abs() < 1.0e-12);
        assert!((params.utilization() - 0.3).abs() < 1.0e-12);
    }

    #[test]
    fn parameters_deserialize_from_camel_case() {
        let params: QueueingParameters =
            serde_json::from_str(r#"{"arrivalRate":6.0,"serviceRate":10.0,"numServers":1}"#)
                .unwrap();
        assert_eq!(params, QueueingParameters::new(6.0, 10.0, 1));
    }
}
