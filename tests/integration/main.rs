//! Integration tests

mod config_test;
mod data_test;
mod pipeline_test;
