pub mod manage;

pub use manage::*;
