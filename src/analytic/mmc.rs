//! Closed-form evaluation of the infinite-capacity M/M/c queueing model.
//! The Erlang-C formula gives the probability an arriving customer must
//! wait, and the remaining steady-state metrics follow from it and from
//! Little's Law.

use std::f64::INFINITY;

use super::{QueueMetrics, QueueingParameters};
use crate::utils::factorial;

/// The Erlang-C probability that an arriving customer finds all servers
/// busy and must wait.  For an unstable or critical system (offered load at
/// or above the server count), waiting is certain and the result is exactly
/// 1.0 - a policy short-circuit rather than a value of the series.  The
/// result is within [0, 1] for every stable input.
pub fn erlang_c(params: &QueueingParameters) -> f64 {
    let a = params.offered_load();
    let c = params.num_servers;
    if a >= c as f64 {
        return 1.0;
    }
    let numerator = a.powi(c as i32) / factorial(c) * (c as f64 / (c as f64 - a));
    let denominator = (0..c).fold(0.0, |sum, k| sum + a.powi(k as i32) / factorial(k)) + numerator;
    numerator / denominator
}

/// Steady-state M/M/c metrics.  An unstable system reports its real
/// utilization alongside infinite queue lengths and times.  For a stable
/// system, Lq comes from the Erlang-C wait probability, and L, Wq, and W
/// are derived from Lq so that the Little's Law identities L = lambda*W
/// and Lq = lambda*Wq hold algebraically.
pub fn metrics(params: &QueueingParameters) -> QueueMetrics {
    let utilization = params.utilization();
    if !params.is_stable() {
        return QueueMetrics {
            utilization,
            average_queue_length: INFINITY,
            average_system_length: INFINITY,
            average_wait_time: INFINITY,
            average_system_time: INFINITY,
            is_stable: false,
        };
    }
    let average_queue_length = erlang_c(params) * utilization / (1.0 - utilization);
    let average_system_length = average_queue_length + params.offered_load();
    QueueMetrics {
        utilization,
        average_queue_length,
        average_system_length,
        average_wait_time: average_queue_length / params.arrival_rate,
        average_system_time: average_system_length / params.arrival_rate,
        is_stable: true,
    }
}
