use std::io;
use thiserror::Error;
use venuemap_core::{repositories::Error as RepoError, usecases::Error as ParameterError};

pub use venuemap_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] ::csv::Error),
    #[error(transparent)]
    Timestamp(#[from] time::error::Format),
}

impl AppError {
    /// Whether the error should be brought to the user's attention.
    pub fn is_user_visible(&self) -> bool {
        match self {
            Self::Business(BError::Parameter(err)) => err.is_user_visible(),
            Self::Business(BError::Repo(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}
