pub mod math;
pub mod serde_int;
pub mod time;
