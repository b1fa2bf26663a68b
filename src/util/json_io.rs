
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Opens a file for writing, gzip compressed if the name ends in ".gz"
/// # Errors
/// * if the file cannot be created
fn create_writer(out_filename: &Path) -> anyhow::Result<BufWriter<Box<dyn Write>>> {
    let file = File::create(out_filename)
        .with_context(|| format!("Error while creating {out_filename:?}:"))?;
    let inner: Box<dyn Write> = if out_filename.extension().unwrap_or_default() == "gz" {
        Box::new(flate2::write::GzEncoder::new(file, flate2::Compression::best()))
    } else {
        Box::new(file)
    };
    Ok(BufWriter::new(inner))
}

/// Saves any serializable value as pretty-printed JSON, e.g. a resolved configuration for later inspection.
/// # Arguments
/// * `data` - the data in memory
/// * `out_filename` - user provided path to write to
/// # Errors
/// * if opening or writing to the file throw errors
/// * if JSON serialization throws errors
pub fn save_json<T: serde::Serialize>(data: &T, out_filename: &Path) -> anyhow::Result<()> {
    let mut writer = create_writer(out_filename)?;
    serde_json::to_writer_pretty(&mut writer, data)
        .with_context(|| format!("Error while serializing {out_filename:?}:"))?;
    writer.flush()
        .with_context(|| format!("Error while flushing output to {out_filename:?}:"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use crate::data_types::selection::SelectionSnapshot;
    use crate::data_types::value_enums::Action;
    use crate::screens::Screen;
    use crate::screens::view::{ViewScreen, METADATA, OUTPUT_FORMATS};

    fn export_config() -> crate::data_types::resolved_config::ResolvedConfig {
        let snapshot = SelectionSnapshot::new("sample.vcf", "meta_out")
            .with_values(OUTPUT_FORMATS, ["json"])
            .with_values(METADATA, ["FILTER"]);
        ViewScreen::new().unwrap().resolve(&snapshot, Action::Run).unwrap()
    }

    #[test]
    fn test_save_plain() {
        let tmp = tempfile::tempdir().unwrap();
        let out_fn = tmp.path().join("config.json");
        save_json(&export_config(), &out_fn).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out_fn).unwrap()).unwrap();
        assert_eq!(value["action"], "Run");
        assert_eq!(value["input_path"], "sample.vcf");
        assert_eq!(value["output_path"], "meta_out");
        assert_eq!(value["command"]["Export"]["formats"][0], "json");
        assert_eq!(value["command"]["Export"]["metadata"][0], "FILTER");
    }

    #[test]
    fn test_save_gzip() {
        let tmp = tempfile::tempdir().unwrap();
        let out_fn = tmp.path().join("config.json.gz");
        save_json(&export_config(), &out_fn).unwrap();

        let mut text = String::new();
        flate2::read::MultiGzDecoder::new(File::open(&out_fn).unwrap())
            .read_to_string(&mut text).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["input_path"], "sample.vcf");
    }

    #[test]
    fn test_missing_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let out_fn = tmp.path().join("missing").join("config.json");
        assert!(save_json(&export_config(), &out_fn).is_err());
    }
}
