use axum::extract::Multipart;

/// Form field carrying the PDF.
pub const PDF_FIELD: &str = "pdf";

const PDF_MAGIC: &[u8] = b"%PDF-";

/// An uploaded PDF with its original filename.
pub struct UploadedPdf {
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum UploadError {
    /// The form could not be read.
    Malformed(String),
    /// No `pdf` field was present.
    Missing,
    /// The field was present but is not a PDF.
    NotPdf(String),
}

/// Read the `pdf` field from a multipart form. Other fields are drained and
/// ignored.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedPdf, UploadError> {
    let mut file: Option<UploadedPdf> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Malformed(format!("Failed to read form field: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != PDF_FIELD {
            let _ = field.bytes().await;
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| UploadError::Malformed(format!("Failed to read file data: {e}")))?
            .to_vec();

        validate_pdf(&filename, &data)?;
        file = Some(UploadedPdf { filename, data });
    }

    file.ok_or(UploadError::Missing)
}

/// Accept only data carrying the PDF magic bytes, whatever the extension says.
fn validate_pdf(filename: &str, data: &[u8]) -> Result<(), UploadError> {
    if data.starts_with(PDF_MAGIC) {
        return Ok(());
    }
    if filename.to_lowercase().ends_with(".pdf") {
        return Err(UploadError::NotPdf(format!(
            "{filename} has a .pdf extension but doesn't appear to be a valid PDF"
        )));
    }
    Err(UploadError::NotPdf(format!("{filename} is not a PDF")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pdf() {
        assert!(validate_pdf("a.pdf", b"%PDF-1.7\n...").is_ok());
        assert!(validate_pdf("renamed.bin", b"%PDF-1.4").is_ok());
        assert!(matches!(
            validate_pdf("fake.pdf", b"PK\x03\x04"),
            Err(UploadError::NotPdf(_))
        ));
        assert!(matches!(
            validate_pdf("notes.txt", b"hello"),
            Err(UploadError::NotPdf(_))
        ));
    }
}
