//! CLI command implementations.

pub mod control;
pub mod credit;
pub mod device;
pub mod vendors;
pub mod wallpaper;
