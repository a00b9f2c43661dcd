//! AWS SDK error mapping.
//!
//! Read-path failures become `Error::Repository`; write-path and service
//! failures become `Error::Aws`, keeping the service error code for the
//! response body.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};

use inkpost_core::Error;

/// Map a read-path SDK error (GetItem, Scan) to a repository error.
pub fn map_query_error<E, R>(err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + Debug,
    R: Debug,
{
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{err:?}"));
    Error::Repository(message)
}

/// Map a write-path SDK error (PutItem, UpdateItem, DeleteItem, PutObject,
/// Publish) to an AWS error keyed by the failing record.
pub fn map_write_error<E, R>(err: SdkError<E, R>, id: impl Into<String>) -> Error
where
    E: ProvideErrorMetadata + Debug,
    R: Debug,
{
    let code = err.code().unwrap_or("Unknown").to_string();
    Error::Aws {
        code,
        id: id.into(),
    }
}
