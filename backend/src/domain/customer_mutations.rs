//! Customer creation pipeline.
//!
//! Creation walks a fixed sequence of stages. Any stage may fail, which ends
//! the run; nothing already applied is undone, so a failure after the upload
//! leaves the stored image orphaned.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    AssetStore, CacheInvalidator, CustomerRepository, CustomerRepositoryError,
};
use crate::domain::{
    CustomerDraft, CustomerField, CustomerId, CustomerRecord, MutationError, MutationKind,
    MutationPipeline, PipelineResult, RawCustomerForm, UploadedAsset, reporter,
    validate_customer,
};

/// Stage of one customer creation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreationStage {
    Idle,
    Validating,
    CheckingUniqueness,
    Uploading,
    Persisting,
    Invalidating,
    Done,
    Failed,
}

impl CreationStage {
    /// Stage entered when the current one succeeds.
    ///
    /// `Done` and `Failed` are terminal and map to themselves.
    pub const fn next(self) -> Self {
        match self {
            Self::Idle => Self::Validating,
            Self::Validating => Self::CheckingUniqueness,
            Self::CheckingUniqueness => Self::Uploading,
            Self::Uploading => Self::Persisting,
            Self::Persisting => Self::Invalidating,
            Self::Invalidating | Self::Done => Self::Done,
            Self::Failed => Self::Failed,
        }
    }

    /// Whether the run has stopped.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::CheckingUniqueness => "checking_uniqueness",
            Self::Uploading => "uploading",
            Self::Persisting => "persisting",
            Self::Invalidating => "invalidating",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CreationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the current stage and logs each transition.
struct CreationRun {
    stage: CreationStage,
    uploaded: Option<UploadedAsset>,
}

impl CreationRun {
    fn start() -> Self {
        Self {
            stage: CreationStage::Idle,
            uploaded: None,
        }
    }

    fn advance(&mut self) {
        let next = self.stage.next();
        debug!(from = %self.stage, to = %next, "customer creation stage");
        self.stage = next;
    }

    fn fail(&mut self, error: &MutationError) {
        debug!(stage = %self.stage, error = %error, "customer creation failed");
        if let Some(asset) = &self.uploaded {
            warn!(
                stage = %self.stage,
                url = %asset.url,
                "customer image uploaded but no customer was stored; asset is orphaned"
            );
        }
        self.stage = CreationStage::Failed;
    }
}

/// Runs customer creation against storage, the object store and the cache.
#[derive(Clone)]
pub struct CustomerMutationService<R: ?Sized, A: ?Sized, C: ?Sized> {
    repo: Arc<R>,
    assets: Arc<A>,
    cache: Arc<C>,
}

impl<R: ?Sized, A: ?Sized, C: ?Sized> CustomerMutationService<R, A, C> {
    /// Create a new service.
    pub fn new(repo: Arc<R>, assets: Arc<A>, cache: Arc<C>) -> Self {
        Self {
            repo,
            assets,
            cache,
        }
    }
}

fn conflict_message(draft: &CustomerDraft, fields: &[CustomerField]) -> String {
    let name = fields.contains(&CustomerField::Name);
    let email = fields.contains(&CustomerField::Email);
    match (name, email) {
        (true, false) => format!("The name {} is already in the database!", draft.name),
        (false, true) => format!("The email {} is already in the database!", draft.email),
        _ => format!(
            "The name {} and the email {} are already in the database!",
            draft.name, draft.email
        ),
    }
}

impl<R, A, C> CustomerMutationService<R, A, C>
where
    R: CustomerRepository + ?Sized,
    A: AssetStore + ?Sized,
    C: CacheInvalidator + ?Sized,
{
    async fn run(&self, run: &mut CreationRun, form: RawCustomerForm) -> Result<(), MutationError> {
        let kind = MutationKind::CreateCustomer;

        run.advance();
        let validated = validate_customer(form)?;
        let draft = validated.draft;

        run.advance();
        let conflicts = self
            .repo
            .find_conflicts(&draft.name, &draft.email)
            .await
            .map_err(|err| MutationError::persistence(kind, err.to_string()))?;
        if !conflicts.is_empty() {
            let message = conflict_message(&draft, &conflicts);
            return Err(MutationError::conflict(conflicts, message));
        }

        run.advance();
        let uploaded = self
            .assets
            .upload(&validated.image)
            .await
            .map_err(|err| MutationError::upload(err.to_string()))?;
        run.uploaded = Some(uploaded.clone());

        run.advance();
        let record = CustomerRecord::from_draft(CustomerId::random(), draft.clone(), uploaded.url);
        self.repo.insert(&record).await.map_err(|err| match err {
            CustomerRepositoryError::Duplicate { field } => {
                MutationError::conflict(vec![field], conflict_message(&draft, &[field]))
            }
            other => MutationError::persistence(kind, other.to_string()),
        })?;
        run.uploaded = None;

        run.advance();
        self.cache.invalidate(&kind.affected_path()).await;

        run.advance();
        Ok(())
    }
}

#[async_trait]
impl<R, A, C> MutationPipeline for CustomerMutationService<R, A, C>
where
    R: CustomerRepository + ?Sized,
    A: AssetStore + ?Sized,
    C: CacheInvalidator + ?Sized,
{
    type Input = RawCustomerForm;

    async fn execute(&self, input: Self::Input) -> PipelineResult {
        let mut run = CreationRun::start();
        let outcome = self.run(&mut run, input).await;
        if let Err(err) = &outcome {
            run.fail(err);
        }
        reporter::report(MutationKind::CreateCustomer, outcome)
    }
}

#[cfg(test)]
#[path = "customer_mutations_tests.rs"]
mod tests;
