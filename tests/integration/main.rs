//! Integration tests for Booster-Crack
//!
//! These tests use wiremock to stand in for the Scryfall API and drive the
//! real HTTP fetcher end-to-end.

mod client_tests;
mod collection_tests;
mod collector_tests;
