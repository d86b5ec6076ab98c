pub mod action;
pub use action::*;

pub mod claim;
pub use claim::*;

pub mod error;
pub use error::*;

pub mod game;
pub use game::*;

pub mod lane;
pub use lane::*;

pub mod phase;
pub use phase::*;

pub mod view;
pub use view::*;
