pub mod app;
pub mod input;
pub mod panel;
pub mod render;
pub mod scroll;
pub mod service;
pub mod theme;
pub mod wrap;

pub use app::run;
