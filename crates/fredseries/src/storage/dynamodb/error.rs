//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `fredseries_core::storage`.

use std::error::Error as StdError;
use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::query::QueryError;
use fredseries_core::storage::RepositoryError;

/// Network-level failures that never reached the service.
fn connection_error<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError>
where
    E: StdError + 'static,
    R: Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Some(
            RepositoryError::ConnectionFailed(DisplayErrorContext(err).to_string()),
        ),
        _ => None,
    }
}

/// Map a DescribeTable SDK error to RepositoryError.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
    table_name: &str,
) -> RepositoryError {
    if let Some(conn) = connection_error(&err) {
        return conn;
    }
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => RepositoryError::TableNotFound {
            table_name: table_name.to_string(),
        },
        DescribeTableError::InternalServerError(_) => {
            RepositoryError::ProvisioningFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::ProvisioningFailed(format!("DescribeTable failed: {:?}", err)),
    }
}

/// Map a CreateTable SDK error to RepositoryError.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
) -> RepositoryError {
    if let Some(conn) = connection_error(&err) {
        return conn;
    }
    match err.into_service_error() {
        CreateTableError::LimitExceededException(_) => {
            RepositoryError::ProvisioningFailed("Table limit exceeded".to_string())
        }
        CreateTableError::InternalServerError(_) => {
            RepositoryError::ProvisioningFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::ProvisioningFailed(format!("CreateTable failed: {:?}", err)),
    }
}

/// Map a BatchWriteItem SDK error to RepositoryError.
pub fn map_batch_write_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<BatchWriteItemError, R>,
    table_name: &str,
) -> RepositoryError {
    if let Some(conn) = connection_error(&err) {
        return conn;
    }
    match err.into_service_error() {
        BatchWriteItemError::ResourceNotFoundException(_) => RepositoryError::TableNotFound {
            table_name: table_name.to_string(),
        },
        BatchWriteItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::WriteFailed("Throughput exceeded".to_string())
        }
        BatchWriteItemError::RequestLimitExceeded(_) => {
            RepositoryError::WriteFailed("Request limit exceeded".to_string())
        }
        BatchWriteItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::WriteFailed("Item collection size limit exceeded".to_string())
        }
        BatchWriteItemError::InternalServerError(_) => {
            RepositoryError::WriteFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::WriteFailed(format!("BatchWriteItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
    table_name: &str,
) -> RepositoryError {
    if let Some(conn) = connection_error(&err) {
        return conn;
    }
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => RepositoryError::TableNotFound {
            table_name: table_name.to_string(),
        },
        QueryError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded".to_string())
        }
        QueryError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::error::{
        LimitExceededException, ProvisionedThroughputExceededException, ResourceNotFoundException,
    };

    fn not_found() -> ResourceNotFoundException {
        ResourceNotFoundException::builder()
            .message("Requested resource not found")
            .build()
    }

    #[test]
    fn test_describe_not_found_maps_to_table_not_found() {
        let err = SdkError::<DescribeTableError, ()>::service_error(
            DescribeTableError::ResourceNotFoundException(not_found()),
            (),
        );

        assert_eq!(
            map_describe_table_error(err, "FREDdata"),
            RepositoryError::TableNotFound {
                table_name: "FREDdata".to_string()
            }
        );
    }

    #[test]
    fn test_describe_timeout_maps_to_connection_failed() {
        let err = SdkError::<DescribeTableError, ()>::timeout_error("connect timed out");

        assert!(matches!(
            map_describe_table_error(err, "FREDdata"),
            RepositoryError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_create_limit_exceeded() {
        let err = SdkError::<CreateTableError, ()>::service_error(
            CreateTableError::LimitExceededException(LimitExceededException::builder().build()),
            (),
        );

        assert_eq!(
            map_create_table_error(err),
            RepositoryError::ProvisioningFailed("Table limit exceeded".to_string())
        );
    }

    #[test]
    fn test_batch_write_errors() {
        let missing = SdkError::<BatchWriteItemError, ()>::service_error(
            BatchWriteItemError::ResourceNotFoundException(not_found()),
            (),
        );
        assert_eq!(
            map_batch_write_error(missing, "FREDdata"),
            RepositoryError::TableNotFound {
                table_name: "FREDdata".to_string()
            }
        );

        let throttled = SdkError::<BatchWriteItemError, ()>::service_error(
            BatchWriteItemError::ProvisionedThroughputExceededException(
                ProvisionedThroughputExceededException::builder().build(),
            ),
            (),
        );
        assert_eq!(
            map_batch_write_error(throttled, "FREDdata"),
            RepositoryError::WriteFailed("Throughput exceeded".to_string())
        );
    }

    #[test]
    fn test_query_errors() {
        let missing = SdkError::<QueryError, ()>::service_error(
            QueryError::ResourceNotFoundException(not_found()),
            (),
        );
        assert_eq!(
            map_query_error(missing, "FREDdata"),
            RepositoryError::TableNotFound {
                table_name: "FREDdata".to_string()
            }
        );

        let throttled = SdkError::<QueryError, ()>::service_error(
            QueryError::ProvisionedThroughputExceededException(
                ProvisionedThroughputExceededException::builder().build(),
            ),
            (),
        );
        assert_eq!(
            map_query_error(throttled, "FREDdata"),
            RepositoryError::QueryFailed("Throughput exceeded".to_string())
        );
    }
}
