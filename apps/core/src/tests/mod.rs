//! Test Module
//!
//! Cross-module test suite for the routing core. Unit tests live beside
//! their modules; everything here spans several components at once.
//!
//! ## Test Categories
//! - `pipeline_tests`: Full request flows through detection, dispatch,
//!   responders and response screening, backed by the seeded in-memory
//!   knowledge store.
