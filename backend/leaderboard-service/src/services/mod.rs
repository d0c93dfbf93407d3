pub mod keys;
pub mod neighborhood;
pub mod rank_service;

pub use keys::LeaderboardSelector;
pub use rank_service::RankService;
