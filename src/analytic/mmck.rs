//! Closed-form evaluation of the finite-capacity M/M/c/K queueing model.
//! The truncated state space makes the system stable by construction, at
//! the cost of rejecting arrivals that find all K positions occupied.  The
//! general formulas divide by (1 - rho) or its square, which is singular at
//! rho = 1, so each computation carries an explicit degenerate branch with
//! the correct limiting value.

use super::{FiniteQueueMetrics, FiniteQueueingParameters};
use crate::utils::factorial;

/// The geometric-series closed forms are singular at rho = 1, and the two
/// branches do not approach each other numerically for extreme K, so the
/// degenerate branch is selected by tolerance rather than by exact
/// floating-point equality.
const CRITICAL_UTILIZATION_TOLERANCE: f64 = 1.0e-10;

fn is_critical(utilization: f64) -> bool {
    (utilization - 1.0).abs() < CRITICAL_UTILIZATION_TOLERANCE
}

/// The probability P0 that the system is empty.  The normalization constant
/// combines the Erlang finite-server sum over states 0..c with a truncated
/// geometric tail over states c..K; at rho = 1 the tail degenerates to a
/// linear term.
pub fn empty_probability(params: &FiniteQueueingParameters) -> f64 {
    let a = params.offered_load();
    let rho = params.utilization();
    let c = params.num_servers;
    let k = params.max_capacity;
    let sum1 = (0..c).fold(0.0, |sum, n| sum + a.powi(n as i32) / factorial(n));
    let tail_term = a.powi(c as i32) / factorial(c);
    let sum2 = if is_critical(rho) {
        tail_term * (k - c + 1) as f64
    } else {
        tail_term * (1.0 - rho.powi((k - c + 1) as i32)) / (1.0 - rho)
    };
    1.0 / (sum1 + sum2)
}

/// The probability Pb that an arriving customer finds the system holding
/// exactly K customers and is rejected.  By the PASTA property this equals
/// the steady-state probability of state K.  With K <= c no queue exists
/// and the state probability is the pure Erlang-B-style truncation term.
pub fn rejection_probability(params: &FiniteQueueingParameters) -> f64 {
    let a = params.offered_load();
    let rho = params.utilization();
    let c = params.num_servers;
    let k = params.max_capacity;
    let p0 = empty_probability(params);
    if k <= c {
        p0 * a.powi(k as i32) / factorial(k)
    } else {
        p0 * a.powi(c as i32) / factorial(c) * rho.powi((k - c) as i32)
    }
}

/// The mean number of waiting customers Lq, over the truncated state space.
/// At rho = 1 the general formula degenerates to an arithmetic series over
/// the n = K - c waiting positions.
pub fn average_queue_length(params: &FiniteQueueingParameters) -> f64 {
    let a = params.offered_load();
    let rho = params.utilization();
    let c = params.num_servers;
    let n = (params.max_capacity - c) as f64;
    let p0 = empty_probability(params);
    let term = a.powi(c as i32) / factorial(c);
    if is_critical(rho) {
        term * p0 * n * (n + 1.0) / 2.0
    } else {
        term * rho * p0 * (1.0 - rho.powf(n + 1.0) - (n + 1.0) * rho.powf(n) * (1.0 - rho))
            / ((1.0 - rho) * (1.0 - rho))
    }
}

/// Steady-state M/M/c/K metrics.  Only admitted customers occupy servers
/// and accumulate waiting time, so the derivations run on the effective
/// arrival rate lambda*(1 - Pb) rather than the offered lambda: L = Lq +
/// lambda_eff/mu, Wq = Lq/lambda_eff, and W = L/lambda_eff.  A fully
/// rejecting system has lambda_eff = 0, and the times are defined as 0
/// rather than dividing by zero.
pub fn metrics(params: &FiniteQueueingParameters) -> FiniteQueueMetrics {
    let rejection = rejection_probability(params);
    let average_queue_length = average_queue_length(params);
    let effective_arrival_rate = params.arrival_rate * (1.0 - rejection);
    let average_system_length =
        average_queue_length + effective_arrival_rate / params.service_rate;
    let (average_wait_time, average_system_time) = if effective_arrival_rate == 0.0 {
        (0.0, 0.0)
    } else {
        (
            average_queue_length / effective_arrival_rate,
            average_system_length / effective_arrival_rate,
        )
    };
    FiniteQueueMetrics {
        utilization: params.utilization(),
        average_queue_length,
        average_system_length,
        average_wait_time,
        average_system_time,
        is_stable: true,
        rejection_probability: rejection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epsilon() -> f64 {
        1.0e-9
    }

    #[test]
    fn mm1k_rejection_matches_closed_form() {
        // M/M/1/K: Pb = (1-rho) rho^K / (1 - rho^(K+1))
        let params = FiniteQueueingParameters::new(6.0, 10.0, 1, 5);
        let rho: f64 = 0.6;
        let expected = (1.0 - rho) * rho.powi(5) / (1.0 - rho.powi(6));
        assert!((rejection_probability(&params) - expected).abs() < epsilon());
        assert!((rejection_probability(&params) - 0.0326).abs() < 1.0e-4);
    }

    #[test]
    fn mm1k_empty_probability_matches_closed_form() {
        // M/M/1/K: P0 = (1-rho)/(1 - rho^(K+1))
        let params = FiniteQueueingParameters::new(6.0, 10.0, 1, 5);
        let rho: f64 = 0.6;
        let expected = (1.0 - rho) / (1.0 - rho.powi(6));
        assert!((empty_probability(&params) - expected).abs() < epsilon());
    }

    #[test]
    fn state_probabilities_sum_to_one() {
        let params = FiniteQueueingParameters::new(10.0, 8.0, 2, 7);
        let a = params.offered_load();
        let p0 = empty_probability(&params);
        let total: f64 = (0..=params.max_capacity)
            .map(|n| {
                if n <= params.num_servers {
                    p0 * a.powi(n as i32) / crate::utils::factorial(n)
                } else {
                    p0 * a.powi(params.num_servers as i32)
                        / crate::utils::factorial(params.num_servers)
                        * params
                            .utilization()
                            .powi((n - params.num_servers) as i32)
                }
            })
            .sum();
        assert!((total - 1.0).abs() < epsilon());
    }

    #[test]
    fn overloaded_system_stays_stable_and_finite() {
        let params = FiniteQueueingParameters::new(30.0, 10.0, 1, 8);
        let metrics = metrics(&params);
        assert!(metrics.is_stable);
        assert!(metrics.utilization > 1.0);
        assert!(metrics.average_queue_length.is_finite());
        assert!(metrics.average_system_length.is_finite());
        assert!(metrics.average_wait_time.is_finite());
        assert!(metrics.average_system_time.is_finite());
        assert!(metrics.rejection_probability > 0.0 && metrics.rejection_probability < 1.0);
    }

    #[test]
    fn critical_utilization_uses_degenerate_branch() {
        // rho exactly 1: P0 and Lq come from the linear/arithmetic limits
        let params = FiniteQueueingParameters::new(10.0, 10.0, 1, 4);
        // M/M/1/K at rho=1 has uniform state probabilities: P0 = 1/(K+1)
        assert!((empty_probability(&params) - 0.2).abs() < epsilon());
        // Lq = sum_{n=2..K} (n-1)/(K+1) = (1+2+3)/5
        assert!((average_queue_length(&params) - 1.2).abs() < epsilon());
        let metrics = metrics(&params);
        assert!(metrics.is_stable);
        assert!(metrics.average_wait_time.is_finite());
    }

    #[test]
    fn no_waiting_room_has_empty_queue_but_rejections() {
        let params = FiniteQueueingParameters::new(6.0, 10.0, 2, 2);
        let metrics = metrics(&params);
        assert!(metrics.average_queue_length.abs() < epsilon());
        assert!(metrics.rejection_probability > 0.0);
    }

    #[test]
    fn large_capacity_converges_to_infinite_model() {
        let finite = FiniteQueueingParameters::new(6.0, 10.0, 1, 1000);
        let infinite = super::super::mmc::metrics(&finite.base());
        let metrics = metrics(&finite);
        assert!(metrics.rejection_probability < 1.0e-12);
        assert!((metrics.average_queue_length - infinite.average_queue_length).abs() < 1.0e-6);
        assert!((metrics.average_system_length - infinite.average_system_length).abs() < 1.0e-6);
    }

    #[test]
    fn littles_law_holds_against_effective_arrival_rate() {
        let cases = [
            FiniteQueueingParameters::new(6.0, 10.0, 1, 5),
            FiniteQueueingParameters::new(10.0, 8.0, 2, 6),
            FiniteQueueingParameters::new(30.0, 10.0, 2, 4),
            FiniteQueueingParameters::new(10.0, 10.0, 1, 7),
        ];
        cases.iter().for_each(|params| {
            let metrics = metrics(params);
            let effective_arrival_rate =
                params.arrival_rate * (1.0 - metrics.rejection_probability);
            assert!(
                (metrics.average_system_length
                    - effective_arrival_rate * metrics.average_system_time)
                    .abs()
                    < epsilon()
            );
            assert!(
                (metrics.average_queue_length
                    - effective_arrival_rate * metrics.average_wait_time)
                    .abs()
                    < epsilon()
            );
        });
    }
}
