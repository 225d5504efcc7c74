pub mod config;
pub mod feed;
pub mod format;
pub mod teams;
pub mod tools;
