/*!
# Solver module
The contract with the external VCF-Simplify solver, which does all of the actual VCF work.
*/

/// Renders a resolved configuration into solver command line arguments
pub mod arguments;
/// Solver implementation that drives the VCF-Simplify program as a child process
pub mod subprocess;

use serde::Serialize;
use std::io::Write;

use crate::data_types::resolved_config::ResolvedConfig;

/// The operations the solver can perform
#[derive(Clone, Copy, Debug, strum_macros::Display, Eq, Hash, PartialEq, Serialize)]
pub enum SolverCommand {
    /// Collapse genotype fields into haplotype strings
    SimplifyToHaplotype,
    /// Collapse genotype fields into a table
    SimplifyToTable,
    /// Print metadata sections, write nothing
    ViewMetadata,
    /// Write metadata sections in the requested formats
    ViewExport
}

impl SolverCommand {
    /// The sub-command name the solver program expects
    pub fn program_name(&self) -> &'static str {
        match self {
            SolverCommand::SimplifyToHaplotype |
            SolverCommand::SimplifyToTable => "SimplifyVCF",
            SolverCommand::ViewMetadata |
            SolverCommand::ViewExport => "ViewVCF"
        }
    }
}

/// Anything that can carry out a resolved configuration.
/// A single call either performs its effect and returns, or signals a failure through the error.
pub trait Solver {
    /// Runs one command to completion.
    /// # Arguments
    /// * `command` - which operation to perform
    /// * `config` - the validated configuration
    /// * `diagnostics` - sink for any text the solver emits, written in emission order
    /// # Errors
    /// * any internal solver failure; the error text is shown to the user as-is
    fn solve(&self, command: SolverCommand, config: &ResolvedConfig, diagnostics: &mut dyn Write) -> anyhow::Result<()>;
}
