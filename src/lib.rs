mod board;
mod solver;

pub use board::{Board, BoardError};
