pub mod config;
pub mod geocode;
pub mod history;
pub mod operation;
pub mod site;
