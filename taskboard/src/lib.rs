pub mod access_token;
pub mod auth;
pub mod bin_constants;
pub mod config;
pub mod data;
pub mod db;
pub mod hasher;
mod lib_constants;
pub mod logging;
pub mod service;
pub mod util;
#[cfg(test)] mod test;
