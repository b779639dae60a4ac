//! Turns a stage outcome into what the client sees.

use tracing::{error, info};

use super::{CachePath, MutationError, MutationKind, NavigationTarget, PipelineResult};

/// Final pipeline stage.
///
/// Validation, conflict and not-found messages pass through verbatim. Upload
/// and persistence failures are replaced by a generic message per mutation
/// and their cause is logged instead.
pub fn report(kind: MutationKind, outcome: Result<(), MutationError>) -> PipelineResult {
    match outcome {
        Ok(()) => PipelineResult::Success {
            navigation: success_navigation(kind),
        },
        Err(err) => {
            let failure = err.kind();
            let message = match err {
                MutationError::Validation(inner) => {
                    info!(mutation = %kind, field = %inner.field(), "mutation rejected by validation");
                    inner.message().to_owned()
                }
                MutationError::Conflict { fields, message } => {
                    info!(mutation = %kind, ?fields, "mutation rejected by uniqueness guard");
                    message
                }
                MutationError::NotFound { entity, id } => {
                    info!(mutation = %kind, entity, id = %id, "mutation target missing");
                    format!("The {entity} does not exist")
                }
                MutationError::Upload { cause } => {
                    error!(mutation = %kind, cause = %cause, "asset upload failed");
                    kind.upload_message().to_owned()
                }
                MutationError::Persistence { kind: failed, cause } => {
                    error!(mutation = %failed, cause = %cause, "storage mutation failed");
                    failed.persistence_message().to_owned()
                }
            };
            PipelineResult::Failure {
                message,
                kind: failure,
            }
        }
    }
}

fn success_navigation(kind: MutationKind) -> Option<NavigationTarget> {
    match kind {
        MutationKind::CreateCustomer => None,
        MutationKind::CreateInvoice | MutationKind::UpdateInvoice | MutationKind::DeleteInvoice => {
            Some(NavigationTarget::to(CachePath::INVOICES))
        }
    }
}
