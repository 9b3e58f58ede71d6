//! Resolution engine integration tests

mod bootstrap_tests;
