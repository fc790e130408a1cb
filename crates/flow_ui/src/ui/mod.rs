//! UI modules for the station flow map.

pub mod app_shell;
pub mod constants;
pub mod controls;
pub mod map_view;
pub mod rendering;
pub mod utils;
