//! Shared error types for the order board service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Missing environment variable: {name}")]
    MissingEnvVar { name: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
