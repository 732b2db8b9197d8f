use std::path::{Path, PathBuf};

use crate::catalog::builder::RawRow;
use crate::catalog::source::{IngestError, RowSource};

/// A cross-reference table on disk (CSV or TSV with a header row)
#[derive(Debug, Clone)]
pub struct TabularFileSource {
    path: PathBuf,
    backup_path: Option<PathBuf>,
    delimiter: Option<u8>,
}

impl TabularFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_path: None,
            delimiter: None,
        }
    }

    /// File to read when the primary table exists but cannot be read
    #[must_use]
    pub fn with_backup(mut self, backup_path: impl Into<PathBuf>) -> Self {
        self.backup_path = Some(backup_path.into());
        self
    }

    /// Override the delimiter detected from the file extension
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    fn delimiter_for(&self, path: &Path) -> u8 {
        self.delimiter.unwrap_or_else(|| detect_delimiter(path))
    }

    fn read_table(&self, path: &Path) -> Result<Vec<RawRow>, IngestError> {
        let content = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rows = parse_table_text(&content, self.delimiter_for(path))?;
        if rows.is_empty() {
            return Err(IngestError::Empty(path.to_path_buf()));
        }
        Ok(rows)
    }
}

impl RowSource for TabularFileSource {
    fn load_rows(&self) -> Result<Vec<RawRow>, IngestError> {
        if !self.path.exists() {
            return Err(IngestError::MissingFile(self.path.clone()));
        }

        match self.read_table(&self.path) {
            Ok(rows) => Ok(rows),
            Err(primary_error) => {
                let Some(backup) = self.backup_path.as_deref().filter(|p| p.exists()) else {
                    return Err(primary_error);
                };
                tracing::warn!(
                    "Failed to read {}: {}; trying backup {}",
                    self.path.display(),
                    primary_error,
                    backup.display()
                );
                self.read_table(backup)
            }
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick a delimiter from the file extension: tab for `.tsv`/`.tab`/`.txt`,
/// comma otherwise
#[must_use]
pub fn detect_delimiter(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("tsv" | "tab" | "txt") => b'\t',
        _ => b',',
    }
}

/// Parse table text into rows keyed by header name.
///
/// Blank header cells are named `__EMPTY`, `__EMPTY_1`, ... in order, the
/// way spreadsheet exports of merged header cells name them. Cells are
/// trimmed; rows may be shorter or longer than the header. Fully blank rows
/// are dropped.
///
/// # Errors
///
/// Returns `IngestError::Csv` if the text is not valid delimited data.
pub fn parse_table_text(text: &str, delimiter: u8) -> Result<Vec<RawRow>, IngestError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = name_headers(reader.headers()?);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

fn name_headers(headers: &csv::StringRecord) -> Vec<String> {
    let mut blank_count = 0usize;
    headers
        .iter()
        .map(|header| {
            if !header.is_empty() {
                return header.to_string();
            }
            let name = if blank_count == 0 {
                "__EMPTY".to_string()
            } else {
                format!("__EMPTY_{blank_count}")
            };
            blank_count += 1;
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_csv_text() {
        let csv = "original_model,replacement_model,notes\n\
                   STM32F103C8T6,GD32F103C8T6,P2P\n\
                   NE555 , TS555,\n";

        let rows = parse_table_text(csv, b',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["original_model"], "STM32F103C8T6");
        assert_eq!(rows[1]["original_model"], "NE555");
        assert!(!rows[1].contains_key("notes"));
    }

    #[test]
    fn test_parse_tsv_text() {
        let tsv = "original_model\treplacement_model\nLM358\tLM358A\n\n";
        let rows = parse_table_text(tsv, b'\t').unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["replacement_model"], "LM358A");
    }

    #[test]
    fn test_blank_headers_are_named_like_workbook_exports() {
        let csv = "目标料(客户提供),,,,替代料(由FAE填写),,,\n\
                   型号,品牌,功能,用量,品牌,型号,备注,优势\n\
                   TLV73333PDBVR,TI,LDO,,3peak,TPL730F33-5TR,P2P,\n";

        let rows = parse_table_text(csv, b',').unwrap();
        assert_eq!(rows.len(), 2);
        let data = &rows[1];
        assert_eq!(data["目标料(客户提供)"], "TLV73333PDBVR");
        assert_eq!(data["__EMPTY"], "TI");
        assert_eq!(data["__EMPTY_1"], "LDO");
        assert!(!data.contains_key("__EMPTY_2"));
        assert_eq!(data["替代料(由FAE填写)"], "3peak");
        assert_eq!(data["__EMPTY_3"], "TPL730F33-5TR");
        assert_eq!(data["__EMPTY_4"], "P2P");
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter(Path::new("table.tsv")), b'\t');
        assert_eq!(detect_delimiter(Path::new("table.CSV")), b',');
        assert_eq!(detect_delimiter(Path::new("table")), b',');
    }

    #[test]
    fn test_missing_file() {
        let source = TabularFileSource::new("/definitely/not/here.csv");
        assert!(matches!(
            source.load_rows(),
            Err(IngestError::MissingFile(_))
        ));
    }

    #[test]
    fn test_load_rows_from_file() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(file, "original_model\treplacement_model").unwrap();
        writeln!(file, "NE555\tTS555").unwrap();

        let rows = TabularFileSource::new(file.path()).load_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["replacement_model"], "TS555");
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "original_model,replacement_model").unwrap();

        let result = TabularFileSource::new(file.path()).load_rows();
        assert!(matches!(result, Err(IngestError::Empty(_))));
    }

    #[test]
    fn test_backup_used_when_primary_unreadable() {
        let primary = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        // Invalid UTF-8 makes the primary unreadable as text
        std::fs::write(primary.path(), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let mut backup = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(backup, "original_model,replacement_model").unwrap();
        writeln!(backup, "NE555,TS555").unwrap();

        let rows = TabularFileSource::new(primary.path())
            .with_backup(backup.path())
            .load_rows()
            .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
