//! The web module provides JS/WASM-compatible interfaces to the analytic
//! evaluators and the core `QueueSimulation` struct, for npm-based teaching
//! tools.  For additional insight on these methods, refer to the associated
//! core functions and methods.  Following the crate convention for the web
//! interfaces, errors are unwrapped, instead of returned.
//!
//! Note that the unstable M/M/c metrics are infinite, and JSON has no
//! infinity literal - `serde_json` renders those fields as `null`, which
//! the consuming UI is expected to display as unbounded.

use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::analytic::{mmc, mmck, FiniteQueueingParameters, QueueingParameters};
use crate::simulation::{QueueSimulation, SimulationConfigUpdate};
use crate::utils::set_panic_hook;

/// A JS/WASM interface for `analytic::mmc::metrics`, which uses JSON
/// representations of the queueing parameters and the resulting metrics.
#[wasm_bindgen]
pub fn mmc_metrics_json(params: &str) -> String {
    set_panic_hook();
    let params: QueueingParameters = serde_json::from_str(params).unwrap();
    serde_json::to_string(&mmc::metrics(&params)).unwrap()
}

/// A JS/WASM interface for `analytic::mmc::erlang_c`.
#[wasm_bindgen]
pub fn mmc_wait_probability_json(params: &str) -> f64 {
    set_panic_hook();
    let params: QueueingParameters = serde_json::from_str(params).unwrap();
    mmc::erlang_c(&params)
}

/// A JS/WASM interface for `analytic::mmck::metrics`, which uses JSON
/// representations of the finite-capacity queueing parameters and the
/// resulting metrics.
#[wasm_bindgen]
pub fn mmck_metrics_json(params: &str) -> String {
    set_panic_hook();
    let params: FiniteQueueingParameters = serde_json::from_str(params).unwrap();
    serde_json::to_string(&mmck::metrics(&params)).unwrap()
}

/// The web `Simulation` provides JS/WASM-compatible interfaces to the core
/// `QueueSimulation` struct.
#[wasm_bindgen]
pub struct Simulation {
    simulation: QueueSimulation,
}

#[wasm_bindgen]
impl Simulation {
    /// A JS/WASM interface for `QueueSimulation::new`, which uses a JSON
    /// representation of the simulation configuration.
    pub fn post_json(config: &str) -> Self {
        set_panic_hook();
        Self {
            simulation: QueueSimulation::new(serde_json::from_str(config).unwrap()),
        }
    }

    /// Get a JSON representation of the live configuration.
    pub fn get_config_json(&self) -> String {
        serde_json::to_string(&self.simulation.config()).unwrap()
    }

    /// An interface to `QueueSimulation::step`.
    pub fn step(&mut self) {
        self.simulation.step().unwrap();
    }

    /// A JS/WASM interface for `QueueSimulation::simulate`, which converts
    /// the queue-length samples to a JavaScript Array.
    pub fn simulate_js(&mut self, duration: f64) -> Array {
        self.simulation
            .simulate(duration)
            .unwrap()
            .into_iter()
            .map(|sample| JsValue::from_f64(sample as f64))
            .collect()
    }

    /// An interface to `QueueSimulation::reset`.
    pub fn reset(&mut self) {
        self.simulation.reset();
    }

    /// A JS/WASM interface for `QueueSimulation::update_config`, which uses
    /// a JSON representation of the partial configuration.
    pub fn update_config_json(&mut self, update: &str) {
        let update: SimulationConfigUpdate = serde_json::from_str(update).unwrap();
        self.simulation.update_config(update);
    }

    /// A JS/WASM interface for `QueueSimulation::state`, which converts the
    /// state snapshot to a JSON string.
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(&self.simulation.state()).unwrap()
    }

    /// An interface to `QueueSimulation::queue_length`.
    pub fn get_queue_length(&self) -> usize {
        self.simulation.queue_length()
    }

    /// An interface to `QueueSimulation::current_time`.
    pub fn get_current_time(&self) -> f64 {
        self.simulation.current_time()
    }

    /// An interface to `QueueSimulation::average_queue_length`.
    pub fn get_average_queue_length(&self) -> f64 {
        self.simulation.average_queue_length()
    }
}

impl Simulation {
    /// Construct the web wrapper around a prepared core simulation - for
    /// Rust-side callers that configure the engine (for example with an
    /// injected random number generator) before handing it to JS.
    pub fn from_core(simulation: QueueSimulation) -> Self {
        Self { simulation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_modeling::dyn_rng;
    use crate::simulation::QueueSimulation;

    #[test]
    fn analytic_metrics_round_trip_as_json() {
        let metrics = mmc_metrics_json(r#"{"arrivalRate":6.0,"serviceRate":10.0,"numServers":1}"#);
        let metrics: serde_json::Value = serde_json::from_str(&metrics).unwrap();
        assert!((metrics["utilization"].as_f64().unwrap() - 0.6).abs() < 1.0e-9);
        assert!(metrics["isStable"].as_bool().unwrap());
        let finite = mmck_metrics_json(
            r#"{"arrivalRate":6.0,"serviceRate":10.0,"numServers":1,"maxCapacity":5}"#,
        );
        let finite: serde_json::Value = serde_json::from_str(&finite).unwrap();
        assert!((finite["rejectionProbability"].as_f64().unwrap() - 0.0326).abs() < 1.0e-4);
    }

    #[test]
    fn unstable_metrics_serialize_infinities_as_null() {
        let metrics =
            mmc_metrics_json(r#"{"arrivalRate":10.0,"serviceRate":10.0,"numServers":1}"#);
        let metrics: serde_json::Value = serde_json::from_str(&metrics).unwrap();
        assert!(!metrics["isStable"].as_bool().unwrap());
        assert!(metrics["averageQueueLength"].is_null());
    }

    #[test]
    fn simulation_wrapper_drives_the_core_engine() {
        let core = QueueSimulation::with_rng(
            serde_json::from_str(
                r#"{"arrivalRate":6.0,"serviceRate":10.0,"numServers":1,"timeStep":0.1}"#,
            )
            .unwrap(),
            dyn_rng(rand_pcg::Pcg64Mcg::new(42)),
        );
        let mut simulation = Simulation::from_core(core);
        (0..100).for_each(|_| simulation.step());
        assert!((simulation.get_current_time() - 10.0).abs() < 1.0e-9);
        let state: serde_json::Value =
            serde_json::from_str(&simulation.get_state_json()).unwrap();
        assert_eq!(state["timeSteps"].as_u64().unwrap(), 100);
        simulation.update_config_json(r#"{"arrivalRate":12.0}"#);
        let config: serde_json::Value =
            serde_json::from_str(&simulation.get_config_json()).unwrap();
        assert!((config["arrivalRate"].as_f64().unwrap() - 12.0).abs() < 1.0e-9);
        simulation.reset();
        assert_eq!(simulation.get_queue_length(), 0);
        assert_eq!(simulation.get_average_queue_length(), 0.0);
    }
}
