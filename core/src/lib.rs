pub mod batch;
pub mod fs;
pub mod network;
pub mod platform;
pub mod tasks;
