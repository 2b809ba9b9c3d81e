use crate::shared::api_utils::{api_url, authorized, check, ApiError};
use async_trait::async_trait;
use forms::{FileRef, Payload, PayloadPart, SubmitFailure, Submitter};
use gloo_net::http::Request;
use js_sys::{Array, Uint8Array};
use web_sys::{Blob, BlobPropertyBag, FormData};

/// Sends form payloads as multipart POSTs
///
/// Updates go to `{endpoint}/{id}`; the payload already carries the method
/// override field.
#[derive(Clone, Debug)]
pub struct RestSubmitter {
    endpoint: String,
    record_id: Option<String>,
}

impl RestSubmitter {
    pub fn new(endpoint: impl Into<String>, record_id: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            record_id,
        }
    }

    pub fn path(&self, is_edit: bool) -> String {
        match (&self.record_id, is_edit) {
            (Some(id), true) => format!("{}/{}", self.endpoint, urlencoding::encode(id)),
            _ => self.endpoint.clone(),
        }
    }
}

/// Wraps picked file bytes into a `Blob`
pub(crate) fn file_blob(file: &FileRef) -> Result<Blob, String> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(file.bytes.as_slice()));
    let bag = BlobPropertyBag::new();
    if let Some(content_type) = &file.content_type {
        bag.set_type(content_type);
    }
    Blob::new_with_u8_array_sequence_and_options(&parts, &bag).map_err(|e| format!("{:?}", e))
}

fn form_data(payload: &Payload) -> Result<FormData, String> {
    let form = FormData::new().map_err(|e| format!("{:?}", e))?;
    for (name, part) in payload.parts() {
        let appended = match part {
            PayloadPart::Text(value) => form.append_with_str(name, value),
            PayloadPart::File(file) => {
                let blob = file_blob(file)?;
                form.append_with_blob_and_filename(name, &blob, &file.name)
            }
        };
        appended.map_err(|e| format!("{:?}", e))?;
    }
    Ok(form)
}

impl From<ApiError> for SubmitFailure {
    fn from(err: ApiError) -> Self {
        match &err {
            ApiError::Http { body, .. } => SubmitFailure {
                message: err.user_message(),
                field_errors: body.first_field_errors(),
            },
            _ => SubmitFailure::new(err.user_message()),
        }
    }
}

#[async_trait(?Send)]
impl Submitter for RestSubmitter {
    async fn submit(&self, payload: Payload, is_edit: bool) -> Result<(), SubmitFailure> {
        let path = self.path(is_edit);
        let form = form_data(&payload).map_err(SubmitFailure::new)?;
        let request = authorized(Request::post(&api_url(&path)))?
            .body(form)
            .map_err(|e| SubmitFailure::new(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check(response).await?;
        log::info!("saved {}", path);
        Ok(())
    }
}
