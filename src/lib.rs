pub mod io;
pub mod matrix;
pub mod model;
pub mod tui;
