//! # Utilities Module
//!
//! Distance and step-cost helpers shared by the planner and the rendezvous
//! solver.

pub mod math;

pub use math::*;
