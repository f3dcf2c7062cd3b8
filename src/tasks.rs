use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{Pipeline, PipelineOutput};
use crate::storage::{ArtifactKey, Storage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct ExtractDataParams {
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportDataParams {
    pub html: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDataResult {
    pub csv_data: String,
}

async fn save_artifacts(storage: &dyn Storage, output: &PipelineOutput) -> Result<()> {
    storage
        .save(ArtifactKey::ExtractedData, serde_json::to_value(&output.extracted_data)?)
        .await?;
    storage
        .save(ArtifactKey::ProfilingResults, serde_json::to_value(&output.profiling_results)?)
        .await?;
    storage
        .save(ArtifactKey::TransformedData, serde_json::to_value(&output.transformed_data)?)
        .await?;
    storage
        .save(ArtifactKey::ValidationResults, serde_json::to_value(&output.validation_results)?)
        .await?;
    Ok(())
}

/// The `extractData` request: runs the full pipeline, persists all four
/// artifacts, and returns them. A save failure surfaces to the caller.
pub async fn extract_data(
    storage: Arc<dyn Storage>,
    config: &Config,
    params: ExtractDataParams,
) -> Result<PipelineOutput> {
    let output = Pipeline::run(&params.html, config);
    save_artifacts(&*storage, &output).await?;
    info!("extract_data: saved all artifacts");
    Ok(output)
}

/// The `exportData` request: runs the full pipeline and returns the
/// transformed tables as CSV text. Nothing is persisted on this path.
pub async fn export_data(config: &Config, params: ExportDataParams) -> Result<ExportDataResult> {
    let csv_data = Pipeline::export(&params.html, config);
    Ok(ExportDataResult { csv_data })
}

/// A request at the system edge, carrying its single-shot response channel.
pub enum Request {
    ExtractData {
        params: ExtractDataParams,
        reply: oneshot::Sender<Result<PipelineOutput>>,
    },
    ExportData {
        params: ExportDataParams,
        reply: oneshot::Sender<Result<ExportDataResult>>,
    },
}

/// Spawns the request dispatcher: requests are processed sequentially, each
/// answered at most once over its reply channel. The pipeline itself runs
/// synchronously inside the handler; once a run starts it always completes,
/// the caller may drop the receiver and discard the result.
pub fn spawn_dispatcher(storage: Arc<dyn Storage>, config: Config) -> mpsc::Sender<Request> {
    let (tx, mut rx) = mpsc::channel::<Request>(16);

    tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            match request {
                Request::ExtractData { params, reply } => {
                    let result = extract_data(storage.clone(), &config, params).await;
                    if let Err(e) = &result {
                        error!("extract_data failed: {}", e);
                    }
                    let _ = reply.send(result);
                }
                Request::ExportData { params, reply } => {
                    let result = export_data(&config, params).await;
                    if let Err(e) = &result {
                        error!("export_data failed: {}", e);
                    }
                    let _ = reply.send(result);
                }
            }
        }
    });

    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    const SAMPLE: &str = "<table>\
        <tr><th>age</th></tr>\
        <tr><td>42</td></tr>\
    </table>";

    #[tokio::test]
    async fn extract_data_persists_all_four_artifacts() {
        let storage = Arc::new(InMemoryStorage::new());
        let config = Config::default();

        let output = extract_data(
            storage.clone(),
            &config,
            ExtractDataParams { html: SAMPLE.to_string() },
        )
        .await
        .unwrap();
        assert_eq!(output.profiling_results.total_rows, 1);

        for key in [
            ArtifactKey::ExtractedData,
            ArtifactKey::ProfilingResults,
            ArtifactKey::TransformedData,
            ArtifactKey::ValidationResults,
        ] {
            assert!(storage.load(key).await.is_ok(), "missing {}", key.as_str());
        }

        let profile = storage.load(ArtifactKey::ProfilingResults).await.unwrap();
        assert_eq!(profile["totalRows"], 1);
        assert_eq!(profile["columnStats"]["age"]["uniqueValues"], 1);
    }

    #[tokio::test]
    async fn export_data_does_not_persist() {
        let storage = Arc::new(InMemoryStorage::new());
        let config = Config::default();

        let result = export_data(&config, ExportDataParams { html: SAMPLE.to_string() })
            .await
            .unwrap();
        assert_eq!(result.csv_data, "age\n\"42\"");
        assert!(storage.load(ArtifactKey::ExtractedData).await.is_err());
    }

    #[tokio::test]
    async fn dispatcher_answers_over_reply_channel() {
        let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
        let requests = spawn_dispatcher(storage, Config::default());

        let (reply, response) = oneshot::channel();
        requests
            .send(Request::ExportData {
                params: ExportDataParams { html: SAMPLE.to_string() },
                reply,
            })
            .await
            .unwrap();

        let result = response.await.unwrap().unwrap();
        assert_eq!(result.csv_data, "age\n\"42\"");
    }
}
