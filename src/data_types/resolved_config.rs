
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::data_types::value_enums::{Action, ExportFormat, MetadataSection, TableMode};
use crate::solver::SolverCommand;

/// Options that only apply to haplotype output
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct HaplotypeOptions {
    /// Genotype base representations, e.g. "GT:numeric"
    pub gtbase: IndexSet<String>,
    /// Phased genotype fields, e.g. "PG"
    pub pg: IndexSet<String>,
    /// Phase index fields, e.g. "PI"
    pub pi: IndexSet<String>,
    /// If true, unphased genotypes are kept in the haplotype output
    pub include_unphased: bool,
    /// Header file name, present whenever the header output was requested
    pub header_name: Option<String>
}

/// Options that only apply to table output
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TableOptions {
    pub samples: IndexSet<String>,
    /// Fixed VCF columns ahead of the per-sample fields
    pub preheader: IndexSet<String>,
    pub infos: IndexSet<String>,
    pub formats: IndexSet<String>,
    /// Table layout; None leaves the choice to the solver
    pub mode: Option<TableMode>,
    /// Header file name, present whenever the header output was requested
    pub header_name: Option<String>
}

/// The typed, command-specific part of a resolved configuration
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum ResolvedCommand {
    /// Simplify to haplotype strings
    Haplotype(HaplotypeOptions),
    /// Simplify to a table
    Table(TableOptions),
    /// Print the selected metadata sections without writing anything
    InspectMetadata { metadata: IndexSet<MetadataSection> },
    /// Export the selected metadata sections in every requested format
    Export { metadata: IndexSet<MetadataSection>, formats: IndexSet<ExportFormat> }
}

impl ResolvedCommand {
    /// The solver command this configuration is intended for
    pub fn solver_command(&self) -> SolverCommand {
        match self {
            ResolvedCommand::Haplotype(_) => SolverCommand::SimplifyToHaplotype,
            ResolvedCommand::Table(_) => SolverCommand::SimplifyToTable,
            ResolvedCommand::InspectMetadata { .. } => SolverCommand::ViewMetadata,
            ResolvedCommand::Export { .. } => SolverCommand::ViewExport
        }
    }
}

/// A validated, backend-ready description of one requested operation.
/// Only the resolver creates these; there is no partially resolved state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResolvedConfig {
    /// The action this configuration was resolved for
    action: Action,
    input_path: PathBuf,
    /// Absent for read-only actions
    output_path: Option<PathBuf>,
    command: ResolvedCommand,
    /// Text fields keyed by group name; a gated field is only present when its toggle was on
    auxiliary_text_fields: IndexMap<String, String>,
    /// Groups that carried a selection but do not apply to the chosen command
    ignored_groups: Vec<String>
}

impl ResolvedConfig {
    pub(crate) fn new(
        action: Action, input_path: PathBuf, output_path: Option<PathBuf>, command: ResolvedCommand,
        auxiliary_text_fields: IndexMap<String, String>, ignored_groups: Vec<String>
    ) -> Self {
        Self {
            action,
            input_path,
            output_path,
            command,
            auxiliary_text_fields,
            ignored_groups
        }
    }

    // getters
    pub fn action(&self) -> Action {
        self.action
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn command(&self) -> &ResolvedCommand {
        &self.command
    }

    pub fn solver_command(&self) -> SolverCommand {
        self.command.solver_command()
    }

    pub fn auxiliary_text_fields(&self) -> &IndexMap<String, String> {
        &self.auxiliary_text_fields
    }

    pub fn auxiliary_text(&self, field: &str) -> Option<&str> {
        self.auxiliary_text_fields.get(field).map(|s| s.as_str())
    }

    pub fn ignored_groups(&self) -> &[String] {
        &self.ignored_groups
    }
}
