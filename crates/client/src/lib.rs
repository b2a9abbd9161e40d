//! Terminal frontend for the grid tactics battle.
//!
//! The binary reads [`ClientConfig`] from the environment, builds a battle
//! with [`BattleBuilder`] and hands it to [`App`], which drives the battle
//! scene once per frame from keyboard input and draws it with `ratatui`.
pub mod app;
pub mod builder;
pub mod config;
pub mod input;
pub mod logging;
pub mod messages;
pub mod render;
pub mod terminal;

pub use app::App;
pub use builder::BattleBuilder;
pub use config::ClientConfig;
pub use input::{KeyAction, KeyboardState};
pub use messages::MessageLog;
pub use render::{TuiRenderer, grid_lines, render_battle};
