// Group Directory - API Core
//
// Backend for a moderated directory of WhatsApp group invite links.
// Domains live under domains/*; each has models, actions and GraphQL data types.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
