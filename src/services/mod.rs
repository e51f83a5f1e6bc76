pub mod processing;
pub mod ranking;

pub use processing::ProcessingService;
pub use ranking::RankingService;
