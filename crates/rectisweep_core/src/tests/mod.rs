//! Integration tests for the sweep runner
//!
//! Tests are organized by topic:
//! - `support` - Recording stub collaborator used by the other modules
//! - `sweep` - Grid coverage, series ordering, metrics, and failure handling

mod support;
