
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// The two user actions a screen can trigger
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq, Serialize)]
pub enum Action {
    /// Read-only look at the input, nothing gets written
    #[strum(serialize = "inspect")]
    Inspect,
    /// Full run that writes to the output path
    #[strum(serialize = "run")]
    Run
}

impl Action {
    /// Returns true if this action writes an output file
    pub fn writes_output(&self) -> bool {
        match self {
            Action::Inspect => false,
            Action::Run => true
        }
    }
}

/// Output type for the simplify screen
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Serialize, clap::ValueEnum)]
pub enum OutputType {
    /// Haplotype strings built from phased genotypes
    #[strum(ascii_case_insensitive, serialize = "haplotype")]
    #[serde(rename = "haplotype")]
    #[clap(name = "haplotype")]
    Haplotype,
    /// One row per record with the selected fields
    #[strum(ascii_case_insensitive, serialize = "table")]
    #[serde(rename = "table")]
    #[clap(name = "table")]
    Table
}

impl OutputType {
    pub fn label(&self) -> &'static str {
        match self {
            OutputType::Haplotype => "Haplotype",
            OutputType::Table => "Table"
        }
    }
}

/// Table layout for the simplify screen
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Serialize, clap::ValueEnum)]
pub enum TableMode {
    #[strum(ascii_case_insensitive, serialize = "wide")]
    #[serde(rename = "wide")]
    #[clap(name = "wide")]
    Wide,
    #[strum(ascii_case_insensitive, serialize = "long")]
    #[serde(rename = "long")]
    #[clap(name = "long")]
    Long
}

impl TableMode {
    pub fn label(&self) -> &'static str {
        match self {
            TableMode::Wide => "Wide",
            TableMode::Long => "Long"
        }
    }
}

/// Export formats for the view screen; more than one may be requested in a single run
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Serialize)]
pub enum ExportFormat {
    #[strum(ascii_case_insensitive, serialize = "table")]
    #[serde(rename = "table")]
    Table,
    #[strum(ascii_case_insensitive, serialize = "json")]
    #[serde(rename = "json")]
    Json,
    #[strum(ascii_case_insensitive, serialize = "dict")]
    #[serde(rename = "dict")]
    Dict
}

impl ExportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Table => "Table",
            ExportFormat::Json => "JSON",
            ExportFormat::Dict => "Dict"
        }
    }
}

/// VCF header sections the view screen can inspect or export.
/// The serialized values are the exact keys the solver expects, which are not consistently cased.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Serialize)]
pub enum MetadataSection {
    /// ##fileformat line
    #[strum(serialize = "VCFspec")]
    #[serde(rename = "VCFspec")]
    VcfSpec,
    /// ##reference line
    #[strum(serialize = "reference")]
    #[serde(rename = "reference")]
    Reference,
    /// ##contig lines
    #[strum(serialize = "contig")]
    #[serde(rename = "contig")]
    Contig,
    /// Sample names from the #CHROM line
    #[strum(serialize = "samples")]
    #[serde(rename = "samples")]
    Samples,
    #[strum(serialize = "INFO")]
    #[serde(rename = "INFO")]
    Info,
    #[strum(serialize = "FORMAT")]
    #[serde(rename = "FORMAT")]
    Format,
    #[strum(serialize = "FILTER")]
    #[serde(rename = "FILTER")]
    Filter,
    #[strum(serialize = "GATKCommandLine")]
    #[serde(rename = "GATKCommandLine")]
    GatkCommandLine,
    #[strum(serialize = "GVCFBlock")]
    #[serde(rename = "GVCFBlock")]
    GvcfBlock
}

impl MetadataSection {
    pub fn label(&self) -> &'static str {
        match self {
            MetadataSection::VcfSpec => "VCFspec",
            MetadataSection::Reference => "Reference",
            MetadataSection::Contig => "Contig",
            MetadataSection::Samples => "Samples",
            MetadataSection::Info => "INFO",
            MetadataSection::Format => "FORMAT",
            MetadataSection::Filter => "FILTER",
            MetadataSection::GatkCommandLine => "GATKCommandLine",
            MetadataSection::GvcfBlock => "GVCFBlock"
        }
    }
}
