pub mod config;
pub mod controller;
pub mod data;
pub mod filter;
pub mod flow;
pub mod map;
pub mod markers;
pub mod scale;
pub mod station;
pub mod time_of_day;
pub mod traffic;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
