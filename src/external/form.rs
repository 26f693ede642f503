//! Form encodings used by the vendor HTTP APIs.
//!
//! Both helpers return the raw response body. Interpreting it is left to the
//! provider because each vendor reports success through a different field.

use std::collections::BTreeMap;

use reqwest::multipart::{Form, Part};

use super::client::HTTP_CLIENT;

/// Ordered form fields as sent on the wire
pub type FormFields = Vec<(&'static str, String)>;

/// Multipart field name every attachment part is sent under
pub const ATTACHMENT_FIELD: &str = "attachments";

/// Content type declared on every attachment part
pub const ATTACHMENT_MIME: &str = "application/octet-stream";

/// Builds a `multipart/form-data` body from text fields and optional file parts
pub fn multipart_form(
    fields: &[(&'static str, String)],
    attachments: &BTreeMap<String, Vec<u8>>,
) -> Result<Form, reqwest::Error> {
    let mut form = Form::new();
    for (filename, content) in attachments {
        let part = Part::bytes(content.clone())
            .file_name(filename.clone())
            .mime_str(ATTACHMENT_MIME)?;
        form = form.part(ATTACHMENT_FIELD, part);
    }

    Ok(fields.iter().fold(form, |form, (name, value)| {
        form.text(*name, value.clone())
    }))
}

/// POSTs a multipart form and returns the response body
pub async fn post_multipart(
    url: &str,
    fields: &[(&'static str, String)],
    attachments: &BTreeMap<String, Vec<u8>>,
) -> Result<String, reqwest::Error> {
    HTTP_CLIENT
        .post(url)
        .multipart(multipart_form(fields, attachments)?)
        .send()
        .await?
        .text()
        .await
}

/// POSTs an `application/x-www-form-urlencoded` body and returns the response body
pub async fn post_urlencoded(
    url: &str,
    fields: &[(&'static str, String)],
) -> Result<String, reqwest::Error> {
    HTTP_CLIENT
        .post(url)
        .form(fields)
        .send()
        .await?
        .text()
        .await
}
