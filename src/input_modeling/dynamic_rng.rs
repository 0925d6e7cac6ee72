use std::{cell::RefCell, rc::Rc};

use rand::SeedableRng;

pub trait SimulationRng: std::fmt::Debug + rand_core::RngCore {}
impl<T: std::fmt::Debug + rand_core::RngCore> SimulationRng for T {}
pub type DynRng = Rc<RefCell<dyn SimulationRng>>;

/// Simulation runs are stochastic approximations, and reproducibility
/// across runs is not a goal - the default generator is seeded from OS
/// entropy.  Deterministic behavior, for tests and replications, comes from
/// injecting a seeded generator through `dyn_rng`.
pub(crate) fn default_rng() -> DynRng {
    Rc::new(RefCell::new(rand_pcg::Pcg64Mcg::from_entropy()))
}

pub fn dyn_rng<Rng: SimulationRng + 'static>(rng: Rng) -> DynRng {
    Rc::new(RefCell::new(rng))
}
