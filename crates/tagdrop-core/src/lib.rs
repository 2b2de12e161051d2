//! tagdrop-core: quiz model, placement state, and grading.
//!
//! This crate defines the data model, placement state machine, and grading
//! logic the rest of the tagdrop system builds on. It renders nothing:
//! front ends project its state and feed intents back in.

pub mod error;
pub mod grading;
pub mod model;
pub mod parser;
pub mod session;
pub mod state;
pub mod traits;
