pub mod cli;
pub mod command;
pub mod input;
pub mod today;
