//! Invoice aggregate and its value types.
//!
//! Amounts are held in integer cents. The conversion from the decimal form
//! input happens once, in [`AmountCents::parse_decimal`], using exact decimal
//! arithmetic so inputs such as `"0.005"` round to a cent instead of
//! collapsing to zero.

use std::fmt;
use std::str::FromStr;

use bigdecimal::num_bigint::Sign;
use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CustomerId;

/// Invoice identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(Uuid);

impl InvoiceId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for InvoiceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Payment state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Awaiting payment.
    Pending,
    /// Settled.
    Paid,
}

impl InvoiceStatus {
    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of: pending, paid")]
pub struct InvoiceStatusParseError;

impl FromStr for InvoiceStatus {
    type Err = InvoiceStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(InvoiceStatusParseError),
        }
    }
}

/// Failures converting a decimal string into cents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// Input is not a decimal number.
    #[error("amount must be a number")]
    NotANumber,
    /// Input is below zero.
    #[error("amount must not be negative")]
    Negative,
    /// Input does not fit the storage column.
    #[error("amount is too large")]
    TooLarge,
}

/// Non-negative invoice amount in integer cents.
///
/// # Examples
/// ```
/// use dashboard_backend::domain::AmountCents;
///
/// assert_eq!(AmountCents::parse_decimal("12.345").unwrap().get(), 1235);
/// assert_eq!(AmountCents::parse_decimal("0.004").unwrap().get(), 0);
/// assert_eq!(AmountCents::parse_decimal("0.005").unwrap().get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmountCents(i64);

impl AmountCents {
    /// Largest amount the `invoices.amount` column accepts.
    pub const MAX: i64 = i32::MAX as i64;

    /// Integer digits of the largest amount in currency units.
    const MAX_INTEGER_DIGITS: i64 = 8;

    /// Parse a decimal amount in currency units and round half-up to cents.
    pub fn parse_decimal(raw: &str) -> Result<Self, AmountError> {
        let decimal = BigDecimal::from_str(raw.trim()).map_err(|_| AmountError::NotANumber)?;
        if decimal.sign() == Sign::Minus {
            return Err(AmountError::Negative);
        }
        // Rescaling materialises 10^exponent, so the magnitude is bounded
        // from the digit count and scale first.
        let (_, scale) = decimal.as_bigint_and_exponent();
        let magnitude = i64::try_from(decimal.digits())
            .unwrap_or(i64::MAX)
            .saturating_sub(scale);
        if magnitude > Self::MAX_INTEGER_DIGITS {
            return Err(AmountError::TooLarge);
        }
        if magnitude <= -3 {
            return Ok(Self(0));
        }
        let cents = (decimal * BigDecimal::from(100)).with_scale_round(0, RoundingMode::HalfUp);
        let value = cents.to_i64().ok_or(AmountError::TooLarge)?;
        Self::from_cents(value)
    }

    /// Wrap a cent value, enforcing the range invariant.
    pub fn from_cents(value: i64) -> Result<Self, AmountError> {
        if value < 0 {
            return Err(AmountError::Negative);
        }
        if value > Self::MAX {
            return Err(AmountError::TooLarge);
        }
        Ok(Self(value))
    }

    /// Raw cent value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Validated invoice fields awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub customer_id: CustomerId,
    pub amount: AmountCents,
    pub status: InvoiceStatus,
}

/// Persisted invoice row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    #[serde(rename = "amountCents")]
    pub amount: AmountCents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl InvoiceRecord {
    /// Assemble a new record from a draft, an identifier and the issue date.
    pub fn from_draft(id: InvoiceId, draft: InvoiceDraft, date: NaiveDate) -> Self {
        let InvoiceDraft {
            customer_id,
            amount,
            status,
        } = draft;
        Self {
            id,
            customer_id,
            amount,
            status,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Amount coercion and status parsing.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12.345", 1235)]
    #[case("12.344", 1234)]
    #[case("0.005", 1)]
    #[case("0.01", 1)]
    #[case("10", 1000)]
    #[case(" 7.5 ", 750)]
    #[case("0", 0)]
    #[case("1e2", 10_000)]
    #[case("21474836.47", 2_147_483_647)]
    #[case("1e-20000000", 0)]
    #[case("0.0009", 0)]
    fn parse_decimal_rounds_half_up(#[case] raw: &str, #[case] expected: i64) {
        let amount = AmountCents::parse_decimal(raw).expect("valid amount");
        assert_eq!(amount.get(), expected);
    }

    #[rstest]
    #[case("", AmountError::NotANumber)]
    #[case("abc", AmountError::NotANumber)]
    #[case("12,50", AmountError::NotANumber)]
    #[case("-1", AmountError::Negative)]
    #[case("99999999999", AmountError::TooLarge)]
    #[case("123456789", AmountError::TooLarge)]
    #[case("21474836.48", AmountError::TooLarge)]
    #[case("1e20000000", AmountError::TooLarge)]
    #[case("-1e20000000", AmountError::Negative)]
    #[case("-0.001", AmountError::Negative)]
    fn parse_decimal_rejects_invalid_input(#[case] raw: &str, #[case] expected: AmountError) {
        assert_eq!(AmountCents::parse_decimal(raw), Err(expected));
    }

    #[rstest]
    #[case("pending", Ok(InvoiceStatus::Pending))]
    #[case("paid", Ok(InvoiceStatus::Paid))]
    #[case("PAID", Err(InvoiceStatusParseError))]
    #[case("overdue", Err(InvoiceStatusParseError))]
    fn status_accepts_closed_set(
        #[case] raw: &str,
        #[case] expected: Result<InvoiceStatus, InvoiceStatusParseError>,
    ) {
        assert_eq!(raw.parse::<InvoiceStatus>(), expected);
    }

    #[rstest]
    fn record_serialises_amount_in_cents() {
        let record = InvoiceRecord::from_draft(
            InvoiceId::from_uuid(Uuid::nil()),
            InvoiceDraft {
                customer_id: CustomerId::from_uuid(Uuid::nil()),
                amount: AmountCents::from_cents(1235).expect("in range"),
                status: InvoiceStatus::Paid,
            },
            NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date"),
        );
        let value = serde_json::to_value(&record).expect("serialise");
        assert_eq!(value["amountCents"], 1235);
        assert_eq!(value["status"], "paid");
        assert_eq!(value["date"], "2026-10-18");
    }
}
