pub mod core;
pub mod runner;

pub use self::core::{compute_twaps, ComputationResult, EngineError, PairDiagnostic, RunOutcome};
pub use runner::{run, RunInputs};
