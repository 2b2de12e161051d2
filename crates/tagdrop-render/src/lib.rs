//! tagdrop-render: stateless projections of quiz sessions.
//!
//! Nothing here mutates a session. Every renderer recomputes its output
//! from the state it is handed, so a front end can redraw at any time.

pub mod snapshot;
pub mod text;
