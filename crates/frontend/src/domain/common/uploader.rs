use super::submitter::file_blob;
use crate::shared::api_utils::{api_url, authorized, check, ApiError};
use async_trait::async_trait;
use contracts::shared::api::{DataResponse, UploadedFile};
use contracts::shared::forms::StoredFile;
use forms::{FileRef, FileUploader};
use gloo_net::http::Request;
use web_sys::FormData;

const UPLOAD_PATH: &str = "/api/uploads";
const UPLOAD_FIELD: &str = "file";

/// Uploads picked images ahead of the form submission
#[derive(Clone, Copy, Default)]
pub struct RestUploader;

async fn upload(file: &FileRef) -> Result<UploadedFile, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    let blob = file_blob(file).map_err(ApiError::Network)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.name)
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

    let request = authorized(Request::post(&api_url(UPLOAD_PATH)))?
        .body(form)
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = check(response).await?;
    response
        .json::<DataResponse<UploadedFile>>()
        .await
        .map(|envelope| envelope.data)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl FileUploader for RestUploader {
    async fn upload(&self, file: &FileRef) -> Result<StoredFile, String> {
        log::debug!("uploading {} ({} bytes)", file.name, file.bytes.len());
        let uploaded = upload(file).await.map_err(|e| e.user_message())?;
        Ok(StoredFile {
            id: uploaded.id.to_string(),
            url: uploaded.url,
        })
    }
}
