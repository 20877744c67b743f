pub mod logger;
pub mod table;

pub use table::render_ranking;
