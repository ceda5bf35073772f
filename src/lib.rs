//! Arcade snake - a real-time snake game with modes, power-ups, and combos
//!
//! This library provides:
//! - Core game logic: the frame-driven loop, mode rules, effects (game module)
//! - Terminal input mapping (input module)
//! - TUI rendering over read-only snapshots (render module)
//! - The interactive execution mode hosting the loop (modes module)
//! - Session metrics and profile persistence (metrics module)
//! - Sound/haptic collaborator seam (feedback module)

pub mod feedback;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
