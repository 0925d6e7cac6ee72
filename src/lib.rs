//! # Overview
//! Queuelab provides the computational core of a queueing theory teaching
//! tool, for Rust- and npm-based products and projects.  Closed-form
//! analytic queueing models sit next to a stochastic simulation engine that
//! empirically approximates the same systems, so the two can be displayed
//! side by side as the simulation converges.
//!
//! This repository contains:
//!
//! * Analytic evaluators for the M/M/c (infinite capacity) and M/M/c/K
//! (finite capacity) queueing models, including Erlang-C wait
//! probabilities and Erlang-B-style rejection probabilities.
//! * A fixed-timestep stochastic simulation engine, advancing a
//! birth-death queueing process with per-step Bernoulli trials.
//! * Random variable and random number generation structures, for the
//! stochastic simulation behaviors.
//! * Output analysis framework, for analyzing simulation outputs
//! statistically and judging convergence toward the analytic values.
//!
//! Queuelab is compatible with a wide variety of compilation targets,
//! including WASM.  Queuelab does not require nightly Rust.
pub mod analytic;
pub mod input_modeling;
pub mod output_analysis;
pub mod simulation;
pub mod utils;
pub mod web;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator, for smaller WASM binaries.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;
