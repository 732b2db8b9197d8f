use std::io::Write;

use crate::core::record::CrossReferenceRecord;

/// Column headers of exported result tables
pub const EXPORT_HEADERS: [&str; 6] = [
    "序号",
    "原型号",
    "替代型号",
    "厂牌",
    "功能",
    "替代类型",
];

/// Write records as delimited text with a header row.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_records<W: Write>(
    records: &[CrossReferenceRecord],
    writer: W,
    delimiter: u8,
) -> Result<(), csv::Error> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(EXPORT_HEADERS)?;
    for (i, record) in records.iter().enumerate() {
        let index = (i + 1).to_string();
        out.write_record([
            index.as_str(),
            record.original_model.as_str(),
            record.replacement_model.as_str(),
            record.replacement_brand.as_str(),
            record.function.as_str(),
            record.replace_type.label(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Default export file name: `<stem>_<timestamp>.<ext>`
#[must_use]
pub fn timestamped_file_name(stem: &str, extension: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%dT%H-%M-%S");
    format!("{stem}_{timestamp}.{extension}")
}
