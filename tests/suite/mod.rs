mod config;
mod operator_log;
mod submission;
