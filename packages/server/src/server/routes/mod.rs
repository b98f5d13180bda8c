// HTTP routes
pub mod graphql;
pub mod health;
pub mod join;

pub use graphql::*;
pub use health::*;
pub use join::*;
