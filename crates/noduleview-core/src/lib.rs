pub mod client;
pub mod config;
pub mod consts;
pub mod display;
pub mod error;
pub mod handle;
pub mod imaging;
pub mod orchestrator;
pub mod resolver;
pub mod result;
pub mod source;
pub mod viewport;
