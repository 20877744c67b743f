pub mod engine;
pub mod input;
pub mod report;
pub mod storage;
pub mod twap;
pub mod types;
pub mod utils;

pub use crate::types::*;
