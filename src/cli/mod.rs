/*!
# CLI module
Command line interface functionality; each subcommand fills in the selections for one screen.
*/

/// The main CLI module that contains the top-level CLI parser, help text, and shared solver options
pub mod core;
/// The simplify CLI subcommand
pub mod simplify;
/// The view and inspect CLI subcommands
pub mod view;
