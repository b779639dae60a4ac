//! Tests for the invoice mutation pipelines.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use mockall::Sequence;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockCacheInvalidator, MockInvoiceRepository};
use crate::domain::{CachePath, FailureKind, InvoiceStatus, NavigationTarget};

const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";
const INVOICE: &str = "cc27c14a-0acf-4f4a-a6c9-d45682c144b9";

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[fixture]
fn clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: Utc
            .with_ymd_and_hms(2026, 10, 18, 23, 30, 0)
            .single()
            .expect("valid fixture timestamp"),
    })
}

fn form(amount: &str, status: &str) -> RawInvoiceForm {
    RawInvoiceForm {
        customer_id: Some(CUSTOMER.to_owned()),
        amount: Some(amount.to_owned()),
        status: Some(status.to_owned()),
    }
}

fn make_service(
    repo: MockInvoiceRepository,
    cache: MockCacheInvalidator,
    clock: Arc<dyn Clock>,
) -> InvoiceMutationService<MockInvoiceRepository, MockCacheInvalidator> {
    InvoiceMutationService::new(Arc::new(repo), Arc::new(cache), clock)
}

fn invoices_navigation() -> PipelineResult {
    PipelineResult::Success {
        navigation: Some(NavigationTarget::to(CachePath::INVOICES)),
    }
}

#[rstest]
#[tokio::test]
async fn create_inserts_then_invalidates_once(clock: Arc<dyn Clock>) {
    let mut seq = Sequence::new();
    let mut repo = MockInvoiceRepository::new();
    let mut cache = MockCacheInvalidator::new();

    repo.expect_insert()
        .withf(|record| {
            record.amount.get() == 1235
                && record.status == InvoiceStatus::Pending
                && record.date == NaiveDate::from_ymd_opt(2026, 10, 18).expect("date")
                && record.customer_id.to_string() == CUSTOMER
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    cache
        .expect_invalidate()
        .withf(|path| *path == CachePath::INVOICES)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let service = make_service(repo, cache, clock);
    let result = service
        .execute(InvoiceMutation::Create(form("12.345", "pending")))
        .await;
    assert_eq!(result, invoices_navigation());
}

#[rstest]
#[tokio::test]
async fn validation_failure_skips_storage_and_cache(clock: Arc<dyn Clock>) {
    let mut repo = MockInvoiceRepository::new();
    let mut cache = MockCacheInvalidator::new();
    repo.expect_insert().never();
    cache.expect_invalidate().never();

    let service = make_service(repo, cache, clock);
    let result = service
        .execute(InvoiceMutation::Create(form("12", "overdue")))
        .await;
    assert_eq!(
        result,
        PipelineResult::Failure {
            message: "status must be one of: pending, paid".to_owned(),
            kind: FailureKind::Validation,
        }
    );
}

#[rstest]
#[tokio::test]
async fn storage_failure_hides_cause_and_skips_cache(clock: Arc<dyn Clock>) {
    let mut repo = MockInvoiceRepository::new();
    let mut cache = MockCacheInvalidator::new();
    repo.expect_insert()
        .times(1)
        .returning(|_| Err(InvoiceRepositoryError::query("deadlock detected on invoices_pkey")));
    cache.expect_invalidate().never();

    let service = make_service(repo, cache, clock);
    let result = service
        .execute(InvoiceMutation::Create(form("10", "paid")))
        .await;
    let PipelineResult::Failure { message, kind } = result else {
        panic!("expected failure");
    };
    assert_eq!(kind, FailureKind::Persistence);
    assert_eq!(message, "There is a problem creating an invoice");
    assert!(!message.contains("deadlock"));
}

#[rstest]
#[tokio::test]
async fn unknown_customer_is_reported_against_the_field(clock: Arc<dyn Clock>) {
    let mut repo = MockInvoiceRepository::new();
    let mut cache = MockCacheInvalidator::new();
    repo.expect_insert()
        .times(1)
        .returning(|_| Err(InvoiceRepositoryError::unknown_customer("fk violation")));
    cache.expect_invalidate().never();

    let service = make_service(repo, cache, clock);
    let result = service
        .execute(InvoiceMutation::Create(form("10", "paid")))
        .await;
    assert_eq!(
        result,
        PipelineResult::Failure {
            message: "The customer does not exist".to_owned(),
            kind: FailureKind::Validation,
        }
    );
}

#[rstest]
#[tokio::test]
async fn update_applies_draft_to_the_given_id(clock: Arc<dyn Clock>) {
    let mut repo = MockInvoiceRepository::new();
    let mut cache = MockCacheInvalidator::new();
    repo.expect_update()
        .withf(|id, draft| {
            id.to_string() == INVOICE && draft.amount.get() == 5000 && draft.status == InvoiceStatus::Paid
        })
        .times(1)
        .returning(|_, _| Ok(true));
    cache.expect_invalidate().times(1).return_const(());

    let service = make_service(repo, cache, clock);
    let result = service
        .execute(InvoiceMutation::Update {
            id: INVOICE.to_owned(),
            form: form("50", "paid"),
        })
        .await;
    assert_eq!(result, invoices_navigation());
}

#[rstest]
#[case(InvoiceMutation::Update { id: INVOICE.to_owned(), form: form("1", "paid") })]
#[case(InvoiceMutation::Delete { id: INVOICE.to_owned() })]
#[tokio::test]
async fn missing_invoice_is_not_found(clock: Arc<dyn Clock>, #[case] mutation: InvoiceMutation) {
    let mut repo = MockInvoiceRepository::new();
    let mut cache = MockCacheInvalidator::new();
    repo.expect_update().returning(|_, _| Ok(false));
    repo.expect_delete().returning(|_| Ok(false));
    cache.expect_invalidate().never();

    let service = make_service(repo, cache, clock);
    let result = service.execute(mutation).await;
    assert_eq!(
        result,
        PipelineResult::Failure {
            message: "The invoice does not exist".to_owned(),
            kind: FailureKind::NotFound,
        }
    );
}

#[rstest]
#[tokio::test]
async fn malformed_id_never_reaches_storage(clock: Arc<dyn Clock>) {
    let mut repo = MockInvoiceRepository::new();
    let mut cache = MockCacheInvalidator::new();
    repo.expect_delete().never();
    cache.expect_invalidate().never();

    let service = make_service(repo, cache, clock);
    let result = service
        .execute(InvoiceMutation::Delete {
            id: "not-an-id".to_owned(),
        })
        .await;
    assert!(matches!(
        result,
        PipelineResult::Failure {
            kind: FailureKind::NotFound,
            ..
        }
    ));
}

#[rstest]
#[tokio::test]
async fn delete_failure_uses_delete_message(clock: Arc<dyn Clock>) {
    let mut repo = MockInvoiceRepository::new();
    let mut cache = MockCacheInvalidator::new();
    repo.expect_delete()
        .times(1)
        .returning(|_| Err(InvoiceRepositoryError::connection("pool timed out")));
    cache.expect_invalidate().never();

    let service = make_service(repo, cache, clock);
    let result = service
        .execute(InvoiceMutation::Delete {
            id: INVOICE.to_owned(),
        })
        .await;
    assert_eq!(
        result,
        PipelineResult::Failure {
            message: "There is a problem deleting an invoice".to_owned(),
            kind: FailureKind::Persistence,
        }
    );
}
