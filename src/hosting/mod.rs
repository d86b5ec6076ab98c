mod bridge;
mod config;
mod handlers;
mod registry;
mod server;

pub use bridge::*;
pub use config::*;
pub use handlers::*;
pub use registry::*;
pub use server::*;
