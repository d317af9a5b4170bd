mod action;
mod phases;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use phases::Outcome;
pub use position::Position;
pub use types::{Board, Cell, Mark};
