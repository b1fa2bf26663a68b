
/// Helper functions for writing JSON via serde
pub mod json_io;
/// Helper functions for the solver spinner
pub mod progress_bar;
