pub mod card;
pub use card::*;

pub mod deck;
pub use deck::*;

pub mod formation;
pub use formation::*;

pub mod suit;
pub use suit::*;
