use crate::errors::{AppError, StoreError};

pub type AppResult<T> = Result<T, AppError>;

pub type StoreResult<T> = Result<T, StoreError>;
