pub mod common;
pub mod competition;
pub mod ranking;
pub mod region;
