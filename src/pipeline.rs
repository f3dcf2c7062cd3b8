use crate::config::Config;
use crate::types::{Dataset, ProfileReport, Row, ValidationReport};
use crate::{extractor, profiler, serializer, transformer, validator};
use metrics::{counter, histogram};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, instrument};

/// Result of a complete pipeline run. Field names mirror the artifact keys
/// the results are stored under.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    pub extracted_data: Dataset,
    pub profiling_results: ProfileReport,
    pub transformed_data: Dataset,
    pub validation_results: ValidationReport,
}

/// The extraction → profiling → transformation → validation pipeline.
///
/// A pure synchronous function of its input: stages run in strict sequence,
/// the output of each being the exclusive input of the next. Stages never
/// fail on data-shape anomalies; structural absence degrades to empty results.
pub struct Pipeline;

impl Pipeline {
    #[instrument(skip(html, config))]
    pub fn run(html: &str, config: &Config) -> PipelineOutput {
        counter!("datacleaner_pipeline_runs_total").increment(1);
        let t_pipeline = Instant::now();

        let t_stage = Instant::now();
        let extracted_data = extractor::extract_tables(html);
        histogram!("datacleaner_extract_duration_seconds").record(t_stage.elapsed().as_secs_f64());

        let t_stage = Instant::now();
        let profiling_results = profiler::profile(&extracted_data);
        histogram!("datacleaner_profile_duration_seconds").record(t_stage.elapsed().as_secs_f64());

        // The extracted artifact is returned as-is; transforms run on a copy.
        let t_stage = Instant::now();
        let transformed_data = transformer::transform(extracted_data.clone(), &config.transform);
        histogram!("datacleaner_transform_duration_seconds").record(t_stage.elapsed().as_secs_f64());

        // Validation runs over one flat row sequence across all tables, so
        // row indices in messages count from the start of the dataset.
        let t_stage = Instant::now();
        let flattened: Vec<Row> = transformed_data.iter().flatten().cloned().collect();
        let validation_results = validator::validate(&flattened, &config.validation);
        histogram!("datacleaner_validate_duration_seconds").record(t_stage.elapsed().as_secs_f64());

        let violations: usize = validation_results.iter().map(|entry| entry.len()).sum();
        info!(
            tables = profiling_results.total_tables,
            rows = profiling_results.total_rows,
            missing = profiling_results.missing_values,
            violations,
            "pipeline finished in {:.3}s",
            t_pipeline.elapsed().as_secs_f64()
        );
        histogram!("datacleaner_pipeline_duration_seconds").record(t_pipeline.elapsed().as_secs_f64());

        PipelineOutput {
            extracted_data,
            profiling_results,
            transformed_data,
            validation_results,
        }
    }

    /// Runs the full pipeline and renders the transformed tables as CSV.
    #[instrument(skip(html, config))]
    pub fn export(html: &str, config: &Config) -> String {
        let output = Self::run(html, config);
        let t_stage = Instant::now();
        let csv = serializer::to_csv(&output.transformed_data);
        histogram!("datacleaner_serialize_duration_seconds").record(t_stage.elapsed().as_secs_f64());
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;

    const SAMPLE: &str = "<table>\
        <tr><th>age</th><th>score</th></tr>\
        <tr><td>36</td><td>90</td></tr>\
        <tr><td></td><td>150</td></tr>\
    </table>";

    #[test]
    fn run_produces_all_four_artifacts() {
        let config = Config::default();
        let output = Pipeline::run(SAMPLE, &config);

        assert_eq!(output.extracted_data.len(), 1);
        assert_eq!(output.profiling_results.total_rows, 2);
        assert_eq!(output.profiling_results.missing_values, 1);
        assert_eq!(output.transformed_data, output.extracted_data);

        assert!(output.validation_results[0].is_empty());
        assert_eq!(
            output.validation_results[1]["age"],
            "Value is required (Row: 2, Column: age)"
        );
        assert_eq!(
            output.validation_results[1]["score"],
            "Value should be between 0 and 100 (Row: 2, Column: score)"
        );
    }

    #[test]
    fn transforms_do_not_leak_into_extracted_artifact() {
        let config = Config {
            transform: TransformConfig {
                fill_missing_values: true,
                default_value: "N/A".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let output = Pipeline::run(SAMPLE, &config);
        assert_eq!(output.extracted_data[0][1]["age"], "");
        assert_eq!(output.transformed_data[0][1]["age"], "N/A");
    }

    #[test]
    fn export_renders_transformed_csv() {
        let config = Config {
            transform: TransformConfig {
                fill_missing_values: true,
                default_value: "N/A".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let csv = Pipeline::export(SAMPLE, &config);
        assert_eq!(csv, "age,score\n\"36\",\"90\"\n\"N/A\",\"150\"");
    }

    #[test]
    fn empty_document_degrades_to_empty_output() {
        let config = Config::default();
        let output = Pipeline::run("<p>no tables</p>", &config);
        assert!(output.extracted_data.is_empty());
        assert_eq!(output.profiling_results.total_tables, 0);
        assert!(output.validation_results.is_empty());
        assert_eq!(Pipeline::export("<p>no tables</p>", &config), "");
    }
}
