pub mod chat;
pub mod client;
pub mod error;
pub mod message;
pub mod room;
pub mod session;
pub mod status;
pub mod table;

pub use chat::*;
pub use client::*;
pub use error::*;
pub use message::*;
pub use room::*;
pub use session::*;
pub use status::*;
pub use table::*;
