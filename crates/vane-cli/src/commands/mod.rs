pub mod action;
pub mod get;
pub mod workload;
