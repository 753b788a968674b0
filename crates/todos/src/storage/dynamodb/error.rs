//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `todos_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use todos_core::storage::RepositoryError;

/// Map failures that happened before DynamoDB answered.
fn map_transport_error<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError> {
    match err {
        SdkError::DispatchFailure(failure) => {
            Some(RepositoryError::ConnectionFailed(format!("{:?}", failure)))
        }
        SdkError::TimeoutError(_) => Some(RepositoryError::ConnectionFailed(
            "Request to DynamoDB timed out".to_string(),
        )),
        _ => None,
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    if let Some(err) = map_transport_error(&err) {
        return err;
    }
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table or index not found".to_string())
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        QueryError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> RepositoryError {
    if let Some(err) = map_transport_error(&err) {
        return err;
    }
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => {
            RepositoryError::WriteFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::WriteFailed("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            RepositoryError::WriteFailed("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::WriteFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            RepositoryError::WriteFailed("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            RepositoryError::WriteFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::WriteFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map an UpdateItem SDK error to RepositoryError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
) -> RepositoryError {
    if let Some(err) = map_transport_error(&err) {
        return err;
    }
    match err.into_service_error() {
        UpdateItemError::ResourceNotFoundException(_) => {
            RepositoryError::WriteFailed("Table not found".to_string())
        }
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::WriteFailed("Throughput exceeded, please retry".to_string())
        }
        UpdateItemError::RequestLimitExceeded(_) => {
            RepositoryError::WriteFailed("Request limit exceeded, please retry".to_string())
        }
        UpdateItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::WriteFailed("Item collection size limit exceeded".to_string())
        }
        UpdateItemError::TransactionConflictException(_) => {
            RepositoryError::WriteFailed("Transaction conflict, please retry".to_string())
        }
        UpdateItemError::InternalServerError(_) => {
            RepositoryError::WriteFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::WriteFailed(format!("UpdateItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> RepositoryError {
    if let Some(err) = map_transport_error(&err) {
        return err;
    }
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => {
            RepositoryError::WriteFailed("Table not found".to_string())
        }
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::WriteFailed("Throughput exceeded, please retry".to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            RepositoryError::WriteFailed("Request limit exceeded, please retry".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            RepositoryError::WriteFailed("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            RepositoryError::WriteFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::WriteFailed(format!("DeleteItem failed: {:?}", err)),
    }
}
