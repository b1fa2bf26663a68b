
use clap::Args;
use log::info;

use crate::cli::core::{check_solver_settings, SolverSettings, AFTER_HELP, FULL_VERSION};
use crate::data_types::selection::SelectionSnapshot;
use crate::data_types::value_enums::Action;
use crate::screens::view::{METADATA, OUTPUT_FORMATS};

#[derive(Args, Clone, Debug, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct ViewSettings {
    /// Input variant call file (VCF)
    #[clap(short = 'i')]
    #[clap(long = "input-vcf")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "", hide_default_value = true)]
    pub input_vcf: String,

    /// Output file prefix; not used by inspect
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "", hide_default_value = true)]
    pub output_file: String,

    /// Output formats (table, json, dict); not used by inspect
    #[clap(long = "out-type")]
    #[clap(value_name = "FORMAT")]
    #[clap(num_args = 1..)]
    #[clap(help_heading = Some("Input/Output"))]
    pub out_types: Vec<String>,

    /// Metadata sections (VCFspec, reference, contig, samples, INFO, FORMAT, FILTER, GATKCommandLine, GVCFBlock)
    #[clap(short = 'm')]
    #[clap(long = "metadata")]
    #[clap(value_name = "SECTION")]
    #[clap(num_args = 1..)]
    #[clap(help_heading = Some("Input/Output"))]
    pub metadata: Vec<String>,

    #[clap(flatten)]
    pub solver: SolverSettings,
}

impl ViewSettings {
    /// Captures the settings as a selection snapshot for the view screen
    pub fn to_snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot::new(&self.input_vcf, &self.output_file)
            .with_values(OUTPUT_FORMATS, self.out_types.iter().cloned())
            .with_values(METADATA, self.metadata.iter().cloned())
    }
}

/// Logs the settings and checks the solver options; selections are validated later by the resolver
pub fn check_view_settings(settings: ViewSettings, action: Action) -> anyhow::Result<ViewSettings> {
    info!("vcfsimplify version: {:?}", &*FULL_VERSION);
    info!("Sub-command: {}", match action {
        Action::Inspect => "inspect",
        Action::Run => "view"
    });
    info!("Inputs:");
    info!("\tInput VCF: {:?}", settings.input_vcf);
    info!("\tMetadata: {:?}", settings.metadata);
    if action.writes_output() {
        info!("Outputs:");
        info!("\tOutput file: {:?}", settings.output_file);
        info!("\tFormats: {:?}", settings.out_types);
    } else if !settings.output_file.is_empty() || !settings.out_types.is_empty() {
        info!("Output options are not used when inspecting.");
    }

    check_solver_settings(&settings.solver)?;
    Ok(settings)
}
