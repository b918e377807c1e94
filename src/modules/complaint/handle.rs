use actix_multipart::Multipart;
use actix_web::web;
use futures_util::TryStreamExt;
use log::debug;
use serde::Serialize;

use crate::api::{error, report::SubmissionReport, success};
use crate::api::error::SystemError;
use crate::modules::complaint::{
    model::{FormSnapshot, FormState, UploadedFile},
    schema::FormMetadata,
    service::ComplaintService,
    submitter::Submitter,
};

#[derive(Serialize)]
pub struct FormResponse {
    pub form: FormSnapshot,
    pub metadata: FormMetadata,
}

/// Empty form and the limits the page should advertise.
pub async fn get_form() -> success::Success<FormResponse> {
    let response =
        FormResponse { form: FormState::default().snapshot(), metadata: FormMetadata::default() };
    success::Success::ok(Some(response)).message("Form retrieved successfully")
}

/// Submit complaint handler
pub async fn submit_complaint<S>(
    payload: Multipart,
    service: web::Data<ComplaintService<S>>,
) -> Result<SubmissionReport, error::Error>
where
    S: Submitter + Send + Sync + 'static,
{
    let mut form = read_form(payload).await?;
    let result = service.submit(&mut form).await;
    Ok(SubmissionReport::new(&result, &form))
}

/// Collects text parts into the form fields and file parts into uploads.
async fn read_form(mut payload: Multipart) -> Result<FormState, SystemError> {
    let mut form = FormState::default();

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|f| f.to_string());
        let content_type = field.content_type().map(|m| m.to_string());

        // Read part bytes
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            bytes.extend_from_slice(&chunk);
        }

        if let Some(filename) = filename {
            // file input with nothing selected
            if filename.is_empty() && bytes.is_empty() {
                continue;
            }
            let content_type = content_type
                .or_else(|| mime_guess::from_path(&filename).first_raw().map(str::to_string));
            form.files.push(UploadedFile { filename, content_type, bytes });
            continue;
        }

        let value = String::from_utf8(bytes)
            .map_err(|_| SystemError::bad_request(format!("Field '{name}' is not valid UTF-8")))?;
        match name.as_str() {
            "name" => form.name = value,
            "email" => form.email = value,
            "subject" => form.subject = value,
            "complaint" => form.complaint = value,
            "priority" => form.priority = value,
            _ => debug!("Ignoring unknown form field '{}'", name),
        }
    }

    Ok(form)
}
