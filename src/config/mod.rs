mod loader;
pub use loader::{Config, HostConfig, default_host};

#[cfg(test)]
mod loader_tests;
