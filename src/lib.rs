pub mod app;
pub mod auth;
pub mod clients;
pub mod community;
pub mod config;
pub mod db;
pub mod errors;
pub mod history;
pub mod recommend;
pub mod state;
