
use indexmap::IndexSet;
use std::ffi::OsString;
use std::fmt::Display;

use crate::data_types::resolved_config::{ResolvedCommand, ResolvedConfig};

/// Builds the argument list for the VCF-Simplify program, starting with the sub-command name.
/// Empty option sets are left off so the solver falls back to its own defaults.
/// # Arguments
/// * `config` - the configuration to render
pub fn build_arguments(config: &ResolvedConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![config.solver_command().program_name().into()];

    match config.command() {
        ResolvedCommand::Haplotype(options) => {
            push_flag(&mut args, "-toType", "haplotype");
            push_paths(&mut args, config);
            push_header(&mut args, options.header_name.as_deref());
            push_set(&mut args, "-GTbase", &options.gtbase);
            push_set(&mut args, "-PG", &options.pg);
            push_set(&mut args, "-PI", &options.pi);
            push_flag(&mut args, "-includeUnphased", if options.include_unphased { "yes" } else { "no" });
        },
        ResolvedCommand::Table(options) => {
            push_flag(&mut args, "-toType", "table");
            push_paths(&mut args, config);
            push_header(&mut args, options.header_name.as_deref());
            push_set(&mut args, "-samples", &options.samples);
            push_set(&mut args, "-preHeader", &options.preheader);
            push_set(&mut args, "-infos", &options.infos);
            push_set(&mut args, "-formats", &options.formats);
            if let Some(mode) = options.mode {
                push_flag(&mut args, "-mode", mode);
            }
        },
        ResolvedCommand::InspectMetadata { metadata } => {
            push_paths(&mut args, config);
            push_set(&mut args, "-metadata", metadata);
        },
        ResolvedCommand::Export { metadata, formats } => {
            push_paths(&mut args, config);
            push_set(&mut args, "-outType", formats);
            push_set(&mut args, "-metadata", metadata);
        }
    };

    args
}

fn push_flag(args: &mut Vec<OsString>, flag: &str, value: impl Display) {
    args.push(flag.into());
    args.push(value.to_string().into());
}

fn push_paths(args: &mut Vec<OsString>, config: &ResolvedConfig) {
    args.push("-inVCF".into());
    args.push(config.input_path().into());
    if let Some(output_path) = config.output_path() {
        args.push("-outFile".into());
        args.push(output_path.into());
    }
}

fn push_header(args: &mut Vec<OsString>, header_name: Option<&str>) {
    if let Some(header) = header_name {
        push_flag(args, "-outHeaderName", header);
    }
}

fn push_set<T: Display>(args: &mut Vec<OsString>, flag: &str, values: &IndexSet<T>) {
    if !values.is_empty() {
        args.push(flag.into());
        args.extend(values.iter().map(|v| OsString::from(v.to_string())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::selection::SelectionSnapshot;
    use crate::data_types::value_enums::Action;
    use crate::screens::Screen;
    use crate::screens::simplify::*;
    use crate::screens::view::*;

    fn to_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter().map(|a| a.into_string().unwrap()).collect()
    }

    #[test]
    fn test_haplotype_arguments() {
        let screen = SimplifyScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("in.vcf", "out.txt")
            .with_values(OUTPUT_TYPE, ["haplotype"])
            .with_toggle(OUTPUT_HEADER, true)
            .with_text(HEADER_NAME, "hap_header")
            .with_values(GTBASE, ["GT:iupac", "GT:numeric"])
            .with_values(PI, ["PI"]);
        let config = screen.resolve(&snapshot, Action::Run).unwrap();
        assert_eq!(to_strings(build_arguments(&config)), vec![
            "SimplifyVCF", "-toType", "haplotype", "-inVCF", "in.vcf", "-outFile", "out.txt",
            "-outHeaderName", "hap_header", "-GTbase", "GT:numeric", "GT:iupac", "-PI", "PI",
            "-includeUnphased", "no"
        ]);
    }

    #[test]
    fn test_table_arguments() {
        let screen = SimplifyScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("in.vcf", "out.tsv")
            .with_values(OUTPUT_TYPE, ["table"])
            .with_values(SAMPLES, ["ms01e", "ms02g"])
            .with_values(PREHEADER, ["POS", "CHROM"])
            .with_values(INFOS, ["AF", "DP"])
            .with_values(FORMATS, ["GT"])
            .with_values(MODE, ["long"]);
        let config = screen.resolve(&snapshot, Action::Run).unwrap();
        assert_eq!(to_strings(build_arguments(&config)), vec![
            "SimplifyVCF", "-toType", "table", "-inVCF", "in.vcf", "-outFile", "out.tsv",
            "-samples", "ms01e", "ms02g", "-preHeader", "CHROM", "POS", "-infos", "AF", "DP",
            "-formats", "GT", "-mode", "long"
        ]);
    }

    #[test]
    fn test_header_from_options() {
        use crate::data_types::resolved_config::TableOptions;
        use std::path::PathBuf;

        // the header comes from the typed options, not from the text fields
        let options = TableOptions {
            header_name: Some("tbl_header".to_string()),
            ..Default::default()
        };
        let config = ResolvedConfig::new(
            Action::Run, PathBuf::from("in.vcf"), Some(PathBuf::from("out.tsv")),
            ResolvedCommand::Table(options), Default::default(), vec![]
        );
        assert_eq!(to_strings(build_arguments(&config)), vec![
            "SimplifyVCF", "-toType", "table", "-inVCF", "in.vcf", "-outFile", "out.tsv",
            "-outHeaderName", "tbl_header"
        ]);
    }

    #[test]
    fn test_view_arguments() {
        let screen = ViewScreen::new().unwrap();
        let snapshot = SelectionSnapshot::new("sample.vcf", "meta_out")
            .with_values(OUTPUT_FORMATS, ["dict", "table"])
            .with_values(METADATA, ["samples", "contig"]);

        let config = screen.resolve(&snapshot, Action::Inspect).unwrap();
        assert_eq!(to_strings(build_arguments(&config)), vec![
            "ViewVCF", "-inVCF", "sample.vcf", "-metadata", "contig", "samples"
        ]);

        let config = screen.resolve(&snapshot, Action::Run).unwrap();
        assert_eq!(to_strings(build_arguments(&config)), vec![
            "ViewVCF", "-inVCF", "sample.vcf", "-outFile", "meta_out", "-outType", "table", "dict",
            "-metadata", "contig", "samples"
        ]);
    }
}
