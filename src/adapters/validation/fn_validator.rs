//! Closure-backed validators.
//!
//! `FnValidator` wraps a synchronous check; `AsyncFnValidator` wraps one
//! that suspends, such as a lookup against an external service.

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::domain::conversation::{ExtractedEntity, Memory};
use crate::ports::{EntityValidator, ValidationRejection};

/// Validator backed by a synchronous closure.
pub struct FnValidator<F> {
    check: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&ExtractedEntity, &Memory) -> Result<Value, ValidationRejection> + Send + Sync,
{
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

#[async_trait]
impl<F> EntityValidator for FnValidator<F>
where
    F: Fn(&ExtractedEntity, &Memory) -> Result<Value, ValidationRejection> + Send + Sync,
{
    async fn validate(
        &self,
        entity: &ExtractedEntity,
        memory: &Memory,
    ) -> Result<Value, ValidationRejection> {
        (self.check)(entity, memory)
    }
}

/// Validator backed by a closure returning a boxed future.
///
/// The closure receives owned copies so the future may outlive the call
/// site's borrows.
pub struct AsyncFnValidator<F> {
    check: F,
}

impl<F> AsyncFnValidator<F>
where
    F: Fn(ExtractedEntity, Memory) -> BoxFuture<'static, Result<Value, ValidationRejection>>
        + Send
        + Sync,
{
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

#[async_trait]
impl<F> EntityValidator for AsyncFnValidator<F>
where
    F: Fn(ExtractedEntity, Memory) -> BoxFuture<'static, Result<Value, ValidationRejection>>
        + Send
        + Sync,
{
    async fn validate(
        &self,
        entity: &ExtractedEntity,
        memory: &Memory,
    ) -> Result<Value, ValidationRejection> {
        (self.check)(entity.clone(), memory.clone()).await
    }
}
