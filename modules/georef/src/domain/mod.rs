pub mod address;
pub mod catalog;
pub mod csv;
pub mod error;
pub mod place;
pub mod planner;
pub mod ports;
pub mod query;
pub mod service;
