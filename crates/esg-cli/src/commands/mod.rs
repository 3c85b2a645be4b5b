pub mod config;
pub mod context;
pub mod generate;
pub mod history;
pub mod logging;
pub mod output;
pub mod selection;
