
use clap::Args;
use log::info;

use crate::cli::core::{check_solver_settings, SolverSettings, AFTER_HELP, FULL_VERSION};
use crate::data_types::selection::SelectionSnapshot;
use crate::data_types::value_enums::{OutputType, TableMode};
use crate::screens::simplify::*;

#[derive(Args, Clone, Debug, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct SimplifySettings {
    /// Input variant call file (VCF)
    #[clap(short = 'i')]
    #[clap(long = "input-vcf")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "", hide_default_value = true)]
    pub input_vcf: String,

    /// Output file
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "", hide_default_value = true)]
    pub output_file: String,

    /// Output type [default: table]
    #[clap(short = 't')]
    #[clap(long = "to-type")]
    #[clap(value_name = "TYPE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub to_type: Option<OutputType>,

    /// Writes a header file alongside the output
    #[clap(long = "output-header")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_header: bool,

    /// Name of the header file, only used with --output-header
    #[clap(long = "header-name")]
    #[clap(value_name = "NAME")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "", hide_default_value = true)]
    pub header_name: String,

    /// Genotype base representations (GT:numeric, GT:iupac, PG:iupac)
    #[clap(long = "gtbase")]
    #[clap(value_name = "OPT")]
    #[clap(num_args = 1..)]
    #[clap(help_heading = Some("Haplotype options"))]
    pub gtbase: Vec<String>,

    /// Phased genotype fields (PG, PG:iupac)
    #[clap(long = "pg")]
    #[clap(value_name = "OPT")]
    #[clap(num_args = 1..)]
    #[clap(help_heading = Some("Haplotype options"))]
    pub pg: Vec<String>,

    /// Phase index fields (PI, CHROM)
    #[clap(long = "pi")]
    #[clap(value_name = "OPT")]
    #[clap(num_args = 1..)]
    #[clap(help_heading = Some("Haplotype options"))]
    pub pi: Vec<String>,

    /// Keeps unphased genotypes in the haplotype output
    #[clap(long = "include-unphased")]
    #[clap(help_heading = Some("Haplotype options"))]
    pub include_unphased: bool,

    /// Samples to keep, by name, or "all"
    #[clap(long = "samples")]
    #[clap(value_name = "SAMPLE")]
    #[clap(num_args = 1..)]
    #[clap(help_heading = Some("Table options"))]
    pub samples: Vec<String>,

    /// Fixed VCF columns to keep (CHROM, POS, ID, REF, ALT, QUAL, FILTER, all)
    #[clap(long = "preheader")]
    #[clap(value_name = "COLUMN")]
    #[clap(num_args = 1..)]
    #[clap(help_heading = Some("Table options"))]
    pub preheader: Vec<String>,

    /// INFO tags to keep, or "all"
    #[clap(long = "infos")]
    #[clap(value_name = "TAG")]
    #[clap(num_args = 1..)]
    #[clap(help_heading = Some("Table options"))]
    pub infos: Vec<String>,

    /// FORMAT tags to keep, or "all"
    #[clap(long = "formats")]
    #[clap(value_name = "TAG")]
    #[clap(num_args = 1..)]
    #[clap(help_heading = Some("Table options"))]
    pub formats: Vec<String>,

    /// Table layout
    #[clap(long = "mode")]
    #[clap(value_name = "MODE")]
    #[clap(help_heading = Some("Table options"))]
    pub mode: Option<TableMode>,

    #[clap(flatten)]
    pub solver: SolverSettings,
}

impl SimplifySettings {
    /// Captures the settings as a selection snapshot for the simplify screen
    pub fn to_snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot::new(&self.input_vcf, &self.output_file)
            .with_values(OUTPUT_TYPE, self.to_type.iter().map(|t| t.to_string()))
            .with_toggle(OUTPUT_HEADER, self.output_header)
            .with_text(HEADER_NAME, &self.header_name)
            .with_values(GTBASE, self.gtbase.iter().cloned())
            .with_values(PG, self.pg.iter().cloned())
            .with_values(PI, self.pi.iter().cloned())
            .with_toggle(INCLUDE_UNPHASED, self.include_unphased)
            .with_values(SAMPLES, self.samples.iter().cloned())
            .with_values(PREHEADER, self.preheader.iter().cloned())
            .with_values(INFOS, self.infos.iter().cloned())
            .with_values(FORMATS, self.formats.iter().cloned())
            .with_values(MODE, self.mode.iter().map(|m| m.to_string()))
    }
}

/// Logs the settings and checks the solver options; selections are validated later by the resolver
pub fn check_simplify_settings(settings: SimplifySettings) -> anyhow::Result<SimplifySettings> {
    info!("vcfsimplify version: {:?}", &*FULL_VERSION);
    info!("Sub-command: simplify");
    info!("Inputs:");
    info!("\tInput VCF: {:?}", settings.input_vcf);
    info!("Outputs:");
    info!("\tOutput file: {:?}", settings.output_file);
    match settings.to_type {
        Some(to_type) => info!("\tOutput type: {to_type}"),
        None => info!("\tOutput type: {} (default)", OutputType::Table)
    };
    if settings.output_header {
        info!("\tHeader name: {:?}", settings.header_name);
    }

    match settings.to_type {
        Some(OutputType::Haplotype) => {
            info!("Haplotype options:");
            info!("\tGTbase: {:?}", settings.gtbase);
            info!("\tPG: {:?}", settings.pg);
            info!("\tPI: {:?}", settings.pi);
            info!("\tUnphased genotypes: {}", if settings.include_unphased { "INCLUDED" } else { "EXCLUDED" });
        },
        Some(OutputType::Table) | None => {
            info!("Table options:");
            info!("\tSamples: {:?}", settings.samples);
            info!("\tPreHeader: {:?}", settings.preheader);
            info!("\tINFO tags: {:?}", settings.infos);
            info!("\tFORMAT tags: {:?}", settings.formats);
            info!("\tMode: {}", settings.mode.map(|m| m.to_string()).unwrap_or_else(|| "solver default".to_string()));
        }
    };

    check_solver_settings(&settings.solver)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::selection::Selection;

    #[test]
    fn test_to_snapshot() {
        let settings = SimplifySettings {
            input_vcf: "in.vcf".to_string(),
            output_file: "out.tsv".to_string(),
            to_type: Some(OutputType::Table),
            header_name: "leftover".to_string(),
            infos: vec!["AF".to_string(), "DP".to_string()],
            mode: Some(TableMode::Long),
            ..Default::default()
        };
        let snapshot = settings.to_snapshot();
        assert_eq!(snapshot.input_path(), "in.vcf");
        assert_eq!(snapshot.output_path(), "out.tsv");
        assert_eq!(snapshot.get(OUTPUT_TYPE), Some(&Selection::Values(vec!["table".to_string()])));
        assert_eq!(snapshot.get(OUTPUT_HEADER), Some(&Selection::Toggle(false)));
        assert_eq!(snapshot.get(HEADER_NAME), Some(&Selection::Text("leftover".to_string())));
        assert_eq!(snapshot.get(MODE), Some(&Selection::Values(vec!["long".to_string()])));
        assert_eq!(snapshot.get(GTBASE), Some(&Selection::Values(vec![])));
    }

    #[test]
    fn test_check_settings() {
        let mut settings = SimplifySettings {
            to_type: Some(OutputType::Haplotype),
            ..Default::default()
        };
        settings.solver.program = "VcfSimplify".to_string();
        assert!(check_simplify_settings(settings.clone()).is_ok());

        settings.solver.timeout_seconds = Some(-1.0);
        assert!(check_simplify_settings(settings).is_err());
    }
}
