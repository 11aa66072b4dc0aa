/*!
 * Tests for error types and conversions
 */

use netplus_ingest::errors::{ApiError, AppError, SubtitleError, UploadError};

#[test]
fn test_apiError_apiError_shouldDisplayStatusAndMessage() {
    let error = ApiError::ApiError {
        status_code: 422,
        message: "VALIDATION_ERROR: Invalid request.".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("422"));
    assert!(display.contains("Invalid request."));
}

#[test]
fn test_uploadError_rejected_shouldIncludeLabelAndMessage() {
    let error = UploadError::Rejected {
        label: "Video".to_string(),
        status_code: 400,
        message: "Invalid Signature".to_string(),
    };
    assert_eq!(error.to_string(), "Video upload failed: Invalid Signature");
}

#[test]
fn test_uploadError_missingSecureUrl_shouldBeDistinctFromTransport() {
    let missing = UploadError::MissingSecureUrl("Video".to_string());
    assert_eq!(missing.to_string(), "Video secure_url missing");

    let transport = UploadError::Transport("connection reset".to_string());
    assert!(transport.to_string().contains("connection reset"));
    assert!(!transport.to_string().contains("secure_url"));
}

#[test]
fn test_subtitleError_nothingToUpload_shouldDisplayOperatorMessage() {
    assert_eq!(SubtitleError::NothingToUpload.to_string(), "No subtitle lines to upload.");
}

#[test]
fn test_appError_fromUploadError_shouldWrapCorrectly() {
    let app_error: AppError = UploadError::MissingSecureUrl("Thumbnail".to_string()).into();
    assert!(matches!(app_error, AppError::Upload(UploadError::MissingSecureUrl(_))));
    assert!(app_error.to_string().contains("Thumbnail secure_url missing"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_uploadError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let upload_error: UploadError = io_error.into();
    assert!(matches!(upload_error, UploadError::File(_)));
}
