
use strum::IntoEnumIterator;

use crate::data_types::option_model::{OptionGroup, OptionMember, OptionModel, OptionModelError};
use crate::data_types::resolved_config::{HaplotypeOptions, ResolvedCommand, ResolvedConfig, TableOptions};
use crate::data_types::selection::SelectionSnapshot;
use crate::data_types::value_enums::{Action, OutputType, TableMode};
use crate::resolver::{resolve, ValidationFailed, ValidationReason};
use crate::screens::{ignored_groups, parse_choice, string_set, Screen};

pub const SCREEN_NAME: &str = "simplify";

// group names, in presentation order
pub const OUTPUT_TYPE: &str = "output type";
pub const OUTPUT_HEADER: &str = "output header";
pub const HEADER_NAME: &str = "header name";
pub const GTBASE: &str = "GTbase";
pub const PG: &str = "PG";
pub const PI: &str = "PI";
pub const INCLUDE_UNPHASED: &str = "include unphased";
pub const SAMPLES: &str = "samples";
pub const PREHEADER: &str = "preHeader";
pub const INFOS: &str = "INFO tags";
pub const FORMATS: &str = "FORMAT tags";
pub const MODE: &str = "mode";

/// Member value that selects everything in a group
pub const ALL: &str = "all";

const HAPLOTYPE_GROUPS: [&str; 4] = [GTBASE, PG, PI, INCLUDE_UNPHASED];
const TABLE_GROUPS: [&str; 5] = [SAMPLES, PREHEADER, INFOS, FORMATS, MODE];

fn members(values: &[&str]) -> Vec<OptionMember> {
    values.iter().map(|&v| v.into()).collect()
}

/// Builds the option model for the simplify screen
/// # Errors
/// * if the declared groups are inconsistent, which is a programming error
pub fn simplify_model() -> Result<OptionModel, OptionModelError> {
    let output_types = OutputType::iter()
        .map(|t| OptionMember::new(t.label(), &t.to_string()))
        .collect();
    let modes = TableMode::iter()
        .map(|m| OptionMember::new(m.label(), &m.to_string()))
        .collect();

    OptionModel::new(SCREEN_NAME, vec![
        OptionGroup::exclusive(OUTPUT_TYPE, output_types),
        OptionGroup::toggle(OUTPUT_HEADER),
        OptionGroup::free_text(HEADER_NAME).gated_by(OUTPUT_HEADER),
        // haplotype options
        OptionGroup::multi(GTBASE, members(&["GT:numeric", "GT:iupac", "PG:iupac"])),
        OptionGroup::multi(PG, members(&["PG", "PG:iupac"])),
        OptionGroup::multi(PI, members(&["PI", "CHROM"])),
        OptionGroup::toggle(INCLUDE_UNPHASED),
        // table options
        OptionGroup::multi(SAMPLES, members(&[ALL]))
            .with_custom_values()
            .with_catch_all(ALL),
        OptionGroup::multi(PREHEADER, members(&["CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", ALL]))
            .with_catch_all(ALL),
        OptionGroup::multi(INFOS, members(&["AC", "AF", "AN", ALL]))
            .with_custom_values()
            .with_catch_all(ALL),
        OptionGroup::multi(FORMATS, members(&["GT", "PG", "PI", ALL]))
            .with_custom_values()
            .with_catch_all(ALL),
        OptionGroup::exclusive(MODE, modes),
    ])
}

/// Collapses haplotype/genotype fields into haplotype strings or tables; only supports the run action
#[derive(Clone, Debug)]
pub struct SimplifyScreen {
    model: OptionModel
}

impl SimplifyScreen {
    /// Constructor
    /// # Errors
    /// * if the option model is malformed
    pub fn new() -> Result<Self, OptionModelError> {
        Ok(Self {
            model: simplify_model()?
        })
    }
}

impl Screen for SimplifyScreen {
    fn model(&self) -> &OptionModel {
        &self.model
    }

    fn resolve(&self, snapshot: &SelectionSnapshot, action: Action) -> Result<ResolvedConfig, ValidationFailed> {
        if action != Action::Run {
            return Err(ValidationFailed::new(vec![ValidationReason::UnsupportedAction {
                screen: SCREEN_NAME.to_string(), action
            }]));
        }

        let resolution = resolve(&self.model, snapshot, action)?;
        let to_failure = |reason: ValidationReason| ValidationFailed::new(vec![reason]);

        // no output type marked means table output
        let output_type: OutputType = parse_choice(&resolution, OUTPUT_TYPE)
            .map_err(to_failure)?
            .unwrap_or(OutputType::Table);
        let header_name = resolution.auxiliary_text_fields().get(HEADER_NAME).cloned();

        let (command, ignored) = match output_type {
            OutputType::Haplotype => {
                let options = HaplotypeOptions {
                    gtbase: string_set(&resolution, GTBASE),
                    pg: string_set(&resolution, PG),
                    pi: string_set(&resolution, PI),
                    include_unphased: resolution.toggle(INCLUDE_UNPHASED),
                    header_name
                };
                (ResolvedCommand::Haplotype(options), ignored_groups(&resolution, &TABLE_GROUPS))
            },
            OutputType::Table => {
                let options = TableOptions {
                    samples: string_set(&resolution, SAMPLES),
                    preheader: string_set(&resolution, PREHEADER),
                    infos: string_set(&resolution, INFOS),
                    formats: string_set(&resolution, FORMATS),
                    mode: parse_choice(&resolution, MODE).map_err(to_failure)?,
                    header_name
                };
                (ResolvedCommand::Table(options), ignored_groups(&resolution, &HAPLOTYPE_GROUPS))
            }
        };

        Ok(ResolvedConfig::new(
            action,
            resolution.input_path().to_path_buf(),
            resolution.output_path().map(|p| p.to_path_buf()),
            command,
            resolution.auxiliary_text_fields().clone(),
            ignored
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;
    use std::path::Path;

    fn set(values: &[&str]) -> IndexSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_model_shape() {
        let screen = SimplifyScreen::new().unwrap();
        let names: Vec<&str> = screen.model().groups().iter().map(|g| g.name()).collect();
        assert_eq!(names, vec![
            OUTPUT_TYPE, OUTPUT_HEADER, HEADER_NAME, GTBASE, PG, PI, INCLUDE_UNPHASED,
            SAMPLES, PREHEADER, INFOS, FORMATS, MODE
        ]);
        let labels: Vec<&str> = screen.model().group(OUTPUT_TYPE).unwrap().members().iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["Haplotype", "Table"]);
    }

    #[test]
    fn test_haplotype() {
        let screen = SimplifyScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("in.vcf", "out.txt")
            .with_values(OUTPUT_TYPE, ["haplotype"])
            .with_values(PG, ["PG:iupac", "PG"])
            .with_toggle(INCLUDE_UNPHASED, true)
            .with_values(INFOS, ["AF"]);
        let config = screen.resolve(&snapshot, Action::Run).unwrap();

        assert_eq!(config.input_path(), Path::new("in.vcf"));
        assert_eq!(config.output_path(), Some(Path::new("out.txt")));
        assert_eq!(config.command(), &ResolvedCommand::Haplotype(HaplotypeOptions {
            gtbase: set(&[]),
            pg: set(&["PG", "PG:iupac"]),
            pi: set(&[]),
            include_unphased: true,
            header_name: None
        }));
        assert_eq!(config.ignored_groups(), &[INFOS.to_string()]);
        assert!(config.auxiliary_text_fields().is_empty());
    }

    #[test]
    fn test_table() {
        let screen = SimplifyScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("in.vcf", "out.txt")
            .with_values(OUTPUT_TYPE, ["table"])
            .with_values(SAMPLES, ["ms02g", "ms01e"])
            .with_values(PREHEADER, ["POS", "all"])
            .with_values(FORMATS, ["GT", "AD"])
            .with_values(MODE, ["long", "wide"])
            .with_values(GTBASE, ["GT:numeric"])
            .with_toggle(OUTPUT_HEADER, true)
            .with_text(HEADER_NAME, "table_header");
        let config = screen.resolve(&snapshot, Action::Run).unwrap();

        assert_eq!(config.command(), &ResolvedCommand::Table(TableOptions {
            samples: set(&["ms02g", "ms01e"]),
            preheader: set(&["all"]),
            infos: set(&[]),
            formats: set(&["GT", "AD"]),
            // both marked, first declared wins
            mode: Some(TableMode::Wide),
            header_name: Some("table_header".to_string())
        }));
        assert_eq!(config.ignored_groups(), &[GTBASE.to_string()]);
        assert_eq!(config.auxiliary_text(HEADER_NAME), Some("table_header"));
    }

    #[test]
    fn test_header_toggle_off() {
        let screen = SimplifyScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("in.vcf", "out.txt")
            .with_values(OUTPUT_TYPE, ["table"])
            .with_toggle(OUTPUT_HEADER, false)
            .with_text(HEADER_NAME, "stale text");
        let config = screen.resolve(&snapshot, Action::Run).unwrap();
        assert_eq!(config.auxiliary_text(HEADER_NAME), None);
        match config.command() {
            ResolvedCommand::Table(options) => assert_eq!(options.header_name, None),
            command => panic!("unexpected command: {command:?}")
        };
    }

    #[test]
    fn test_header_toggle_empty_text() {
        let screen = SimplifyScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("in.vcf", "out.txt")
            .with_values(OUTPUT_TYPE, ["haplotype"])
            .with_toggle(OUTPUT_HEADER, true);
        let config = screen.resolve(&snapshot, Action::Run).unwrap();
        assert_eq!(config.auxiliary_text(HEADER_NAME), Some(""));
        match config.command() {
            ResolvedCommand::Haplotype(options) => assert_eq!(options.header_name.as_deref(), Some("")),
            command => panic!("unexpected command: {command:?}")
        };
    }

    #[test]
    fn test_default_output_type() {
        let screen = SimplifyScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("in.vcf", "out.txt");
        let config = screen.resolve(&snapshot, Action::Run).unwrap();
        assert_eq!(config.command(), &ResolvedCommand::Table(TableOptions::default()));
        assert!(config.ignored_groups().is_empty());

        // an empty selection list behaves the same as no entry at all
        let snapshot = snapshot.with_values(OUTPUT_TYPE, Vec::<String>::new());
        let config = screen.resolve(&snapshot, Action::Run).unwrap();
        assert_eq!(config.solver_command(), crate::solver::SolverCommand::SimplifyToTable);

        let snapshot = snapshot.with_values(OUTPUT_TYPE, ["haplotype"]);
        let config = screen.resolve(&snapshot, Action::Run).unwrap();
        assert_eq!(config.solver_command(), crate::solver::SolverCommand::SimplifyToHaplotype);
    }

    #[test]
    fn test_unknown_values() {
        let screen = SimplifyScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("in.vcf", "out.txt")
            .with_values(OUTPUT_TYPE, ["vcf"])
            .with_values(PREHEADER, ["CHROM", "INFO"]);
        let failure = screen.resolve(&snapshot, Action::Run).unwrap_err();
        assert_eq!(failure.reasons(), &[
            ValidationReason::UnknownValue { group: OUTPUT_TYPE.to_string(), value: "vcf".to_string() },
            ValidationReason::UnknownValue { group: PREHEADER.to_string(), value: "INFO".to_string() },
        ]);
    }

    #[test]
    fn test_inspect_unsupported() {
        let screen = SimplifyScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("in.vcf", "").with_values(OUTPUT_TYPE, ["table"]);
        let failure = screen.resolve(&snapshot, Action::Inspect).unwrap_err();
        assert_eq!(failure.reasons(), &[ValidationReason::UnsupportedAction {
            screen: SCREEN_NAME.to_string(), action: Action::Inspect
        }]);
    }
}
