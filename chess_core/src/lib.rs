//! Chess rules and search core.
//!
//! `logic` holds the board, the legality rules, move generation and the game
//! state machine. `engine` holds the minimax search that plays the automated
//! side. `session` ties both together behind the calls a front end makes.

pub mod engine;
pub mod logic;
pub mod session;
