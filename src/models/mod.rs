pub mod layout;
pub mod word;

pub use layout::{Direction, Placement};
pub use word::Word;
