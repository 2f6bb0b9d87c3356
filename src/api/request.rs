//! Request types for the paystub API.
//!
//! This module extracts the `multipart/form-data` fields of the
//! `/process` endpoint.

use axum::extract::Multipart;

use super::response::ApiError;

/// Form fields of a `/process` upload.
///
/// All fields are optional at this stage; the handler decides which
/// absences are errors. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessForm {
    /// Country code, `do` or `USA`.
    pub country: Option<String>,
    /// `<user>+<password>`.
    pub credentials: Option<String>,
    /// Issuing company.
    pub company: Option<String>,
    /// The uploaded CSV.
    pub file: Option<Vec<u8>>,
}

impl ProcessForm {
    /// Reads every field of `multipart`.
    ///
    /// # Errors
    ///
    /// Returns a `MALFORMED_MULTIPART` error if the body cannot be read
    /// or a text field is not UTF-8.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::malformed_multipart(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "file" => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::malformed_multipart(e.body_text()))?;
                    form.file = Some(bytes.to_vec());
                }
                "country" | "credentials" | "company" => {
                    let text = field.text().await.map_err(|e| {
                        ApiError::malformed_multipart(format!("field '{}': {}", name, e.body_text()))
                    })?;
                    match name.as_str() {
                        "country" => form.country = Some(text),
                        "credentials" => form.credentials = Some(text),
                        _ => form.company = Some(text),
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }
}
