// src/api_client.rs
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use reqwest::multipart;

use crate::data_types::{ImportRequest, ImportResponse, ValidateResponse, Workbook};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_VALIDATE_PATH: &str = "/api/validate";
const DEFAULT_IMPORT_PATH: &str = "/api/import";

const SPREADSHEET_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Client for the two endpoints of the import service. The service does all
/// parsing, validation and persistence; this side only ships bytes out and
/// decodes what comes back.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    validate_url: String,
    import_url: String,
}

impl ApiClient {
    /// Reads `API_BASE_URL`, `VALIDATE_ENDPOINT` and `IMPORT_ENDPOINT`,
    /// falling back to local-development defaults.
    pub fn from_env() -> Self {
        let base = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let validate =
            env::var("VALIDATE_ENDPOINT").unwrap_or_else(|_| DEFAULT_VALIDATE_PATH.to_string());
        let import =
            env::var("IMPORT_ENDPOINT").unwrap_or_else(|_| DEFAULT_IMPORT_PATH.to_string());
        ApiClient::new(&base, &validate, &import)
    }

    pub fn new(base_url: &str, validate_path: &str, import_path: &str) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            validate_url: join_url(base_url, validate_path),
            import_url: join_url(base_url, import_path),
        }
    }

    /// Uploads the workbook file as a multipart form for parsing and
    /// validation.
    pub async fn validate_file(&self, path: PathBuf) -> Result<ValidateResponse> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("workbook.xlsx"));
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        log::info!(
            "uploading {} ({} bytes) to {}",
            file_name,
            bytes.len(),
            self.validate_url
        );

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(SPREADSHEET_MIME)
            .context("building upload form")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&self.validate_url)
            .multipart(form)
            .send()
            .await
            .context("validation request failed")?;
        // The service reports row errors in the body whatever the HTTP
        // status, so the status itself is not checked.
        response
            .json::<ValidateResponse>()
            .await
            .context("unexpected validation response")
    }

    /// Submits the whole (possibly edited) workbook for import.
    pub async fn import(&self, workbook: Workbook) -> Result<ImportResponse> {
        log::info!(
            "importing {} sheet(s) via {}",
            workbook.sheets.len(),
            self.import_url
        );
        let response = self
            .http
            .post(&self.import_url)
            .json(&ImportRequest { data: &workbook })
            .send()
            .await
            .context("import request failed")?;
        response
            .json::<ImportResponse>()
            .await
            .context("unexpected import response")
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
