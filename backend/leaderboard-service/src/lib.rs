pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::RankError;
pub use services::{LeaderboardSelector, RankService};
pub use store::{LeaderboardStore, MemoryLeaderboardStore, RedisLeaderboardStore};
