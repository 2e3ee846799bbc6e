//! Army Builder - hierarchical unit structure for strategy-game armies

pub mod army;
pub mod core;
pub mod notify;
pub mod recruitment;
