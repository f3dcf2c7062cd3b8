/// Artifact key names shared between the pipeline tasks and storage.
/// These match the wire names the artifacts are stored under.

pub const EXTRACTED_DATA_KEY: &str = "extractedData";
pub const PROFILING_RESULTS_KEY: &str = "profilingResults";
pub const TRANSFORMED_DATA_KEY: &str = "transformedData";
pub const VALIDATION_RESULTS_KEY: &str = "validationResults";

/// Default filename for CSV exports.
pub const EXPORT_FILENAME: &str = "datacleaner_export.csv";

/// MIME type a download surface should attach to exported CSV.
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";
