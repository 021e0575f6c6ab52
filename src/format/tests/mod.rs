//! Unit tests for label mapping file formats.
//!
//! These tests verify reading and writing of each format, the validation
//! errors they raise, and round-trips through the native JSON format.

mod json_tests;
mod roundtrip_tests;
