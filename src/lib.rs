pub mod client;
pub mod config;
pub mod geo;
pub mod upstream;
pub mod web;
