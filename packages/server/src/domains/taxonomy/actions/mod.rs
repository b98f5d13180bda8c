pub mod manage;
pub mod seed;

pub use manage::*;
pub use seed::seed_taxonomy;
