// src/error.rs
use std::fmt;

#[derive(Debug)]
pub enum Error {
    NotFound(String),
    AlreadyExists(String),
    Unauthorized(String),
    Identity(String),
    Serialize(String),
    Deserialize(String),
    Storage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Asset not found: {}", id),
            Self::AlreadyExists(id) => write!(f, "Asset already exists: {}", id),
            Self::Unauthorized(reason) => write!(f, "Unauthorized: {}", reason),
            Self::Identity(msg) => write!(f, "Identity resolution error: {}", msg),
            Self::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            Self::Deserialize(msg) => write!(f, "Deserialization error: {}", msg),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
