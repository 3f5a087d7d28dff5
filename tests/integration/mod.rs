//! Integration tests for the scoped configuration export

mod cli_export;
mod config_integration;
mod document_export;
mod test_utils;
