//! A small web application for keeping a list of sports teams, their
//! rosters and their logos.

pub mod api;
pub mod config;
pub mod db;
pub mod imaging;
pub mod middleware;
pub mod view;
