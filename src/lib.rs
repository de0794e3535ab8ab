pub mod config;
pub mod content;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod paths;
pub mod session;
pub mod state;
pub mod study;

#[cfg(test)]
pub mod testing;
