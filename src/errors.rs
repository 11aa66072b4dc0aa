/*!
 * Error types for the netplus-ingest application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the NetPlus ingest API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Error when sending the request fails before a response arrives
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication (401/403)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while uploading media to signed storage
#[derive(Error, Debug)]
pub enum UploadError {
    /// The storage endpoint could not be reached
    #[error("Upload request failed: {0}")]
    Transport(String),

    /// The storage endpoint rejected a chunk or a single-shot upload
    #[error("{label} upload failed: {message}")]
    Rejected {
        /// Which kind of asset was being uploaded
        label: String,
        /// HTTP status code
        status_code: u16,
        /// Message extracted from the provider response
        message: String,
    },

    /// All ranges went through but the provider never returned a URL
    #[error("{0} secure_url missing")]
    MissingSecureUrl(String),

    /// The provider answered with a body that is not the expected JSON
    #[error("Failed to parse upload response: {0}")]
    ParseError(String),

    /// The local file could not be read
    #[error("File error: {0}")]
    File(String),
}

/// Errors that stop a subtitle ingest before anything is sent
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// One or more pasted lines could not be parsed
    #[error("{0}")]
    InvalidLines(String),

    /// The input parsed cleanly but contained nothing
    #[error("No subtitle lines to upload.")]
    NothingToUpload,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// An action was started without something it needs
    #[error("{0}")]
    InvalidInput(String),

    /// Error from the ingest API
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Error from a media upload
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<std::io::Error> for UploadError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(error.to_string())
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
