use crate::error::ValidationError;

pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

pub const ACCEPTED_RESUME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_resume(&self.mime_type, self.bytes.len())
    }
}

/// Checks a resume by its declared type and size, before any bytes are read.
/// Type is checked before size, so an oversized text file reports the type.
pub fn check_resume(mime_type: &str, size_bytes: usize) -> Result<(), ValidationError> {
    let normalized = mime_type.trim().to_ascii_lowercase();
    if !ACCEPTED_RESUME_TYPES.contains(&normalized.as_str()) {
        return Err(ValidationError::UnsupportedFileType {
            mime_type: mime_type.to_string(),
        });
    }
    if size_bytes > MAX_RESUME_BYTES {
        return Err(ValidationError::FileTooLarge { size_bytes });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_each_document_type() {
        for mime_type in ACCEPTED_RESUME_TYPES {
            let file = ResumeFile::new("cv", mime_type, vec![0; 16]);
            assert_eq!(file.validate(), Ok(()), "{mime_type}");
        }
    }

    #[test]
    fn rejects_plain_text() {
        let file = ResumeFile::new("cv.txt", "text/plain", b"hello".to_vec());
        assert!(matches!(
            file.validate(),
            Err(ValidationError::UnsupportedFileType { .. })
        ));
    }

    #[test]
    fn size_limit_is_inclusive() {
        let at_limit = ResumeFile::new("cv.pdf", "application/pdf", vec![0; MAX_RESUME_BYTES]);
        assert_eq!(at_limit.validate(), Ok(()));

        let over = ResumeFile::new("cv.pdf", "application/pdf", vec![0; MAX_RESUME_BYTES + 1]);
        assert_eq!(
            over.validate(),
            Err(ValidationError::FileTooLarge {
                size_bytes: MAX_RESUME_BYTES + 1
            })
        );
    }

    #[test]
    fn declared_size_is_checked_without_bytes() {
        assert_eq!(check_resume("application/pdf", MAX_RESUME_BYTES), Ok(()));
        assert_eq!(
            check_resume("application/pdf", 3 * 1024 * 1024 * 1024),
            Err(ValidationError::FileTooLarge {
                size_bytes: 3 * 1024 * 1024 * 1024
            })
        );
        assert!(matches!(
            check_resume("text/plain", 10 * MAX_RESUME_BYTES),
            Err(ValidationError::UnsupportedFileType { .. })
        ));
    }
}
