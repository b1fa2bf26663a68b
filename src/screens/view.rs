
use indexmap::IndexSet;
use strum::IntoEnumIterator;

use crate::data_types::option_model::{OptionGroup, OptionMember, OptionModel, OptionModelError, Requirement};
use crate::data_types::resolved_config::{ResolvedCommand, ResolvedConfig};
use crate::data_types::selection::SelectionSnapshot;
use crate::data_types::value_enums::{Action, ExportFormat, MetadataSection};
use crate::resolver::{resolve, ValidationFailed, ValidationReason};
use crate::screens::{ignored_groups, parse_set, Screen};

pub const SCREEN_NAME: &str = "view";

pub const OUTPUT_FORMATS: &str = "output formats";
pub const METADATA: &str = "metadata";

/// Builds the option model for the view screen.
/// Output formats are only needed for a full run, metadata sections are always needed.
pub fn view_model() -> Result<OptionModel, OptionModelError> {
    let formats = ExportFormat::iter()
        .map(|f| OptionMember::new(f.label(), &f.to_string()))
        .collect();
    let sections = MetadataSection::iter()
        .map(|m| OptionMember::new(m.label(), &m.to_string()))
        .collect();

    OptionModel::new(SCREEN_NAME, vec![
        OptionGroup::multi(OUTPUT_FORMATS, formats).with_requirement(Requirement::OnRun),
        OptionGroup::multi(METADATA, sections).with_requirement(Requirement::Always),
    ])
}

/// Inspects VCF metadata, or exports selected sections to one or more formats
#[derive(Clone, Debug)]
pub struct ViewScreen {
    model: OptionModel
}

impl ViewScreen {
    /// Constructor
    /// # Errors
    /// * if the option model is malformed
    pub fn new() -> Result<Self, OptionModelError> {
        Ok(Self {
            model: view_model()?
        })
    }
}

impl Screen for ViewScreen {
    fn model(&self) -> &OptionModel {
        &self.model
    }

    fn resolve(&self, snapshot: &SelectionSnapshot, action: Action) -> Result<ResolvedConfig, ValidationFailed> {
        let resolution = resolve(&self.model, snapshot, action)?;
        let to_failure = |reason: ValidationReason| ValidationFailed::new(vec![reason]);

        let metadata: IndexSet<MetadataSection> = parse_set(&resolution, METADATA).map_err(to_failure)?;
        let (command, ignored) = match action {
            Action::Inspect => (
                ResolvedCommand::InspectMetadata { metadata },
                ignored_groups(&resolution, &[OUTPUT_FORMATS])
            ),
            Action::Run => {
                let formats = parse_set(&resolution, OUTPUT_FORMATS).map_err(to_failure)?;
                (ResolvedCommand::Export { metadata, formats }, vec![])
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
    use std::path::Path;

    #[test]
    fn test_inspect() {
        let screen = ViewScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("sample.vcf", "")
            .with_values(METADATA, ["contig", "samples"]);
        let config = screen.resolve(&snapshot, Action::Inspect).unwrap();

        assert_eq!(config.action(), Action::Inspect);
        assert_eq!(config.input_path(), Path::new("sample.vcf"));
        assert_eq!(config.output_path(), None);
        assert_eq!(config.command(), &ResolvedCommand::InspectMetadata {
            metadata: IndexSet::from([MetadataSection::Contig, MetadataSection::Samples])
        });
        assert!(config.ignored_groups().is_empty());
    }

    #[test]
    fn test_inspect_ignores_formats() {
        let screen = ViewScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("sample.vcf", "out")
            .with_values(OUTPUT_FORMATS, ["json"])
            .with_values(METADATA, ["INFO"]);
        let config = screen.resolve(&snapshot, Action::Inspect).unwrap();
        assert_eq!(config.output_path(), None);
        assert_eq!(config.ignored_groups(), &[OUTPUT_FORMATS.to_string()]);
    }

    #[test]
    fn test_export() {
        let screen = ViewScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("sample.vcf", "meta_out")
            .with_values(OUTPUT_FORMATS, ["dict", "json", "table"])
            .with_values(METADATA, ["GVCFBlock", "VCFspec"]);
        let config = screen.resolve(&snapshot, Action::Run).unwrap();
        assert_eq!(config.output_path(), Some(Path::new("meta_out")));
        assert_eq!(config.command(), &ResolvedCommand::Export {
            metadata: IndexSet::from([MetadataSection::VcfSpec, MetadataSection::GvcfBlock]),
            formats: IndexSet::from([ExportFormat::Table, ExportFormat::Json, ExportFormat::Dict])
        });
    }

    #[test]
    fn test_run_requirements() {
        let screen = ViewScreen::new().unwrap();

        // empty metadata on run, named and nothing else
        let snapshot = SelectionSnapshot::new("sample.vcf", "out")
            .with_values(OUTPUT_FORMATS, ["json"])
            .with_values(METADATA, Vec::<String>::new());
        let failure = screen.resolve(&snapshot, Action::Run).unwrap_err();
        assert_eq!(failure.reasons(), &[ValidationReason::MissingSelection { group: METADATA.to_string() }]);

        // everything missing
        let failure = screen.resolve(&SelectionSnapshot::default(), Action::Run).unwrap_err();
        assert_eq!(failure.reasons(), &[
            ValidationReason::MissingInputPath,
            ValidationReason::MissingOutputPath,
            ValidationReason::MissingSelection { group: OUTPUT_FORMATS.to_string() },
            ValidationReason::MissingSelection { group: METADATA.to_string() },
        ]);

        // inspect only needs the input and metadata
        let failure = screen.resolve(&SelectionSnapshot::default(), Action::Inspect).unwrap_err();
        assert_eq!(failure.reasons(), &[
            ValidationReason::MissingInputPath,
            ValidationReason::MissingSelection { group: METADATA.to_string() },
        ]);
    }
}
