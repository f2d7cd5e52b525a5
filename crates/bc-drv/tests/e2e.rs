#[path = "e2e/cli_tests.rs"]
mod cli_tests;
