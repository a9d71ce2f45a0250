//! Report output: the JSON array of results, to stdout or a file.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::OutputTarget;
use crate::domain::CheckResult;

/// Serialize `results` as one JSON array followed by a newline.
pub fn write_results<W: Write>(mut writer: W, results: &[CheckResult], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, results)?;
    } else {
        serde_json::to_writer(&mut writer, results)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write the report to its configured destination.
pub fn emit(results: &[CheckResult], pretty: bool, target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => write_results(io::stdout().lock(), results, pretty),
        OutputTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_results(BufWriter::new(file), results, pretty)?;
            info!(path = %path.display(), results = results.len(), "Report written");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CheckResult> {
        vec![
            CheckResult::failed("a.ton", "boom"),
            CheckResult::failed("b.ton", "bang"),
        ]
    }

    #[test]
    fn test_compact_output() {
        let mut buf = Vec::new();
        write_results(&mut buf, &sample(), false).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[{\"domainName\":\"a.ton\",\"error\":\"boom\"},{\"domainName\":\"b.ton\",\"error\":\"bang\"}]\n"
        );
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let mut buf = Vec::new();
        write_results(&mut buf, &sample(), true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("[\n  {\n    \"domainName\": \"a.ton\""));
    }

    #[test]
    fn test_empty_report_is_empty_array() {
        let mut buf = Vec::new();
        write_results(&mut buf, &[], false).unwrap();
        assert_eq!(buf, b"[]\n");
    }

    #[test]
    fn test_file_output() {
        let path = std::env::temp_dir().join(format!("tondns-report-{}.json", std::process::id()));
        emit(&sample(), false, &OutputTarget::File(path.clone())).unwrap();
        let back: Vec<CheckResult> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, sample());
        std::fs::remove_file(path).unwrap();
    }
}
