pub mod cell;
pub mod grid;
pub mod layout;

pub use cell::*;
pub use grid::*;
pub use layout::*;
