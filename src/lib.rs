pub mod auth;
pub mod config;
pub mod controller;
pub mod db;
pub mod jokes;
pub mod shell;
