pub mod config;
pub mod entity;
pub mod ids;
pub mod notify;
pub mod novel;
pub mod section;

#[cfg(test)]
pub mod fixtures;

pub use config::*;
pub use entity::*;
pub use ids::*;
pub use notify::*;
pub use novel::*;
pub use section::*;
