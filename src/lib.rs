pub mod apple;
pub mod arbiter;
pub mod config;
pub mod error;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod opponent;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
