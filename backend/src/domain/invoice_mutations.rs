//! Invoice create, update and delete pipelines.
//!
//! Stage order is validate, execute, invalidate, report. Invoices carry no
//! attachment and no uniqueness rule, so those stages are skipped.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{CacheInvalidator, InvoiceRepository, InvoiceRepositoryError};
use crate::domain::{
    FormField, InvoiceId, InvoiceRecord, MutationError, MutationKind, MutationPipeline,
    PipelineResult, RawInvoiceForm, ValidationError, reporter, validate_invoice,
};

/// Input accepted by [`InvoiceMutationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceMutation {
    /// Create a new invoice dated today.
    Create(RawInvoiceForm),
    /// Replace the fields of the invoice with id `id`.
    Update { id: String, form: RawInvoiceForm },
    /// Remove the invoice with id `id`.
    Delete { id: String },
}

impl InvoiceMutation {
    /// Storage mutation this input maps to.
    pub fn kind(&self) -> MutationKind {
        match self {
            Self::Create(_) => MutationKind::CreateInvoice,
            Self::Update { .. } => MutationKind::UpdateInvoice,
            Self::Delete { .. } => MutationKind::DeleteInvoice,
        }
    }
}

/// Runs invoice mutations against the repository and cache ports.
#[derive(Clone)]
pub struct InvoiceMutationService<R: ?Sized, C: ?Sized> {
    repo: Arc<R>,
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized, C: ?Sized> InvoiceMutationService<R, C> {
    /// Create a new service.
    pub fn new(repo: Arc<R>, cache: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, cache, clock }
    }
}

fn parse_invoice_id(raw: &str) -> Result<InvoiceId, MutationError> {
    raw.parse::<InvoiceId>()
        .map_err(|_| MutationError::not_found("invoice", raw.trim()))
}

fn map_repository_error(kind: MutationKind, error: InvoiceRepositoryError) -> MutationError {
    match error {
        InvoiceRepositoryError::UnknownCustomer { .. } => {
            ValidationError::new(FormField::CustomerId, "The customer does not exist").into()
        }
        other => MutationError::persistence(kind, other.to_string()),
    }
}

impl<R, C> InvoiceMutationService<R, C>
where
    R: InvoiceRepository + ?Sized,
    C: CacheInvalidator + ?Sized,
{
    async fn run(&self, mutation: InvoiceMutation) -> Result<(), MutationError> {
        let kind = mutation.kind();
        match mutation {
            InvoiceMutation::Create(form) => {
                let draft = validate_invoice(&form)?;
                debug!(mutation = %kind, "invoice input validated");
                let record =
                    InvoiceRecord::from_draft(InvoiceId::random(), draft, self.clock.utc().date_naive());
                self.repo
                    .insert(&record)
                    .await
                    .map_err(|err| map_repository_error(kind, err))?;
                debug!(mutation = %kind, invoice_id = %record.id, "invoice inserted");
            }
            InvoiceMutation::Update { id, form } => {
                let draft = validate_invoice(&form)?;
                let invoice_id = parse_invoice_id(&id)?;
                debug!(mutation = %kind, invoice_id = %invoice_id, "invoice input validated");
                let matched = self
                    .repo
                    .update(&invoice_id, &draft)
                    .await
                    .map_err(|err| map_repository_error(kind, err))?;
                if !matched {
                    return Err(MutationError::not_found("invoice", invoice_id));
                }
                debug!(mutation = %kind, invoice_id = %invoice_id, "invoice updated");
            }
            InvoiceMutation::Delete { id } => {
                let invoice_id = parse_invoice_id(&id)?;
                let matched = self
                    .repo
                    .delete(&invoice_id)
                    .await
                    .map_err(|err| map_repository_error(kind, err))?;
                if !matched {
                    return Err(MutationError::not_found("invoice", invoice_id));
                }
                debug!(mutation = %kind, invoice_id = %invoice_id, "invoice deleted");
            }
        }
        self.cache.invalidate(&kind.affected_path()).await;
        Ok(())
    }
}

#[async_trait]
impl<R, C> MutationPipeline for InvoiceMutationService<R, C>
where
    R: InvoiceRepository + ?Sized,
    C: CacheInvalidator + ?Sized,
{
    type Input = InvoiceMutation;

    async fn execute(&self, input: Self::Input) -> PipelineResult {
        let kind = input.kind();
        reporter::report(kind, self.run(input).await)
    }
}

#[cfg(test)]
#[path = "invoice_mutations_tests.rs"]
mod tests;
