
/// Command line interface functionality
pub mod cli;
/// Contains various shared data types
pub mod data_types;
/// Runs a resolved configuration through a solver and packages the outcome
pub mod dispatch;
/// Turns a selection snapshot into a validated resolution
pub mod resolver;
/// The option screens and their typed configuration builders
pub mod screens;
/// The solver contract and the subprocess implementation
pub mod solver;
/// Various utility functions that tend to be very generic
pub mod util;
