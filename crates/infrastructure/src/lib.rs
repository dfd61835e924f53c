//! Ferrous Hosts Infrastructure Layer
pub mod database;
pub mod repositories;
pub mod sources;
