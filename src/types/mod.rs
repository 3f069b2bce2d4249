pub mod agent;
pub mod anomaly;
pub mod config;
pub mod dashboard;
pub mod icon;
pub mod view;
