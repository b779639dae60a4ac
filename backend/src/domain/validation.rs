//! Coercion of raw form input into typed drafts.
//!
//! Inbound adapters collect form fields into the `Raw*` structs without
//! interpreting them. The functions here are the only place those fields are
//! checked, and they stop at the first violated field in form order.

use std::fmt;

use super::{
    AmountCents, AssetPayload, CustomerDraft, CustomerId, CustomerName, CustomerValidationError,
    EmailAddress, InvoiceDraft, InvoiceStatus,
};

const FILL_IN_ALL_FIELDS: &str = "Please fill in all fields and select an image!";

/// Form field names as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    CustomerId,
    Amount,
    Status,
    Name,
    Email,
    UserImage,
}

impl FormField {
    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CustomerId => "customerId",
            Self::Amount => "amount",
            Self::Status => "status",
            Self::Name => "name",
            Self::Email => "email",
            Self::UserImage => "userImage",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First field that failed validation, with a message fit for the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    field: FormField,
    message: String,
}

impl ValidationError {
    /// Build an error for `field`.
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Offending field.
    pub fn field(&self) -> FormField {
        self.field
    }

    /// Message shown to the user.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Uninterpreted invoice form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInvoiceForm {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Uploaded file as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAttachment {
    pub bytes: Vec<u8>,
    /// Size reported by the transport, which may exceed `bytes.len()` when
    /// the adapter stopped buffering early.
    pub declared_size: usize,
    pub content_type: Option<String>,
}

/// Uninterpreted customer form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCustomerForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub user_image: Option<RawAttachment>,
}

/// Customer input that is ready for the uniqueness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCustomer {
    pub draft: CustomerDraft,
    pub image: AssetPayload,
}

fn required(field: FormField, value: Option<&str>) -> Result<&str, ValidationError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ValidationError::new(field, format!("{field} is required"))),
    }
}

/// Validate the three invoice fields.
///
/// # Examples
/// ```
/// use dashboard_backend::domain::{RawInvoiceForm, validate_invoice};
///
/// let form = RawInvoiceForm {
///     customer_id: Some("3958dc9e-712f-4377-85e9-fec4b6a6442a".into()),
///     amount: Some("12.345".into()),
///     status: Some("pending".into()),
/// };
/// assert_eq!(validate_invoice(&form).unwrap().amount.get(), 1235);
/// ```
pub fn validate_invoice(form: &RawInvoiceForm) -> Result<InvoiceDraft, ValidationError> {
    let customer_id = required(FormField::CustomerId, form.customer_id.as_deref())?
        .parse::<CustomerId>()
        .map_err(|_| ValidationError::new(FormField::CustomerId, "customerId must be a valid id"))?;
    let amount = AmountCents::parse_decimal(required(FormField::Amount, form.amount.as_deref())?)
        .map_err(|err| ValidationError::new(FormField::Amount, err.to_string()))?;
    let status = form
        .status
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .parse::<InvoiceStatus>()
        .map_err(|err| ValidationError::new(FormField::Status, err.to_string()))?;
    Ok(InvoiceDraft {
        customer_id,
        amount,
        status,
    })
}

/// Validate the customer form including its attachment.
pub fn validate_customer(form: RawCustomerForm) -> Result<ValidatedCustomer, ValidationError> {
    let RawCustomerForm {
        name,
        email,
        user_image,
    } = form;

    let name = CustomerName::new(name.unwrap_or_default())
        .map_err(|_| ValidationError::new(FormField::Name, FILL_IN_ALL_FIELDS))?;
    let email = EmailAddress::new(email.unwrap_or_default()).map_err(|err| match err {
        CustomerValidationError::InvalidEmail => {
            ValidationError::new(FormField::Email, err.to_string())
        }
        _ => ValidationError::new(FormField::Email, FILL_IN_ALL_FIELDS),
    })?;
    let RawAttachment {
        bytes,
        declared_size,
        content_type,
    } = user_image.unwrap_or_default();
    let image = AssetPayload::try_new(bytes, declared_size, content_type.as_deref().unwrap_or(""))
        .map_err(|err| ValidationError::new(FormField::UserImage, err.to_string()))?;

    Ok(ValidatedCustomer {
        draft: CustomerDraft { name, email },
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

    fn invoice_form(customer_id: Option<&str>, amount: Option<&str>, status: Option<&str>) -> RawInvoiceForm {
        RawInvoiceForm {
            customer_id: customer_id.map(str::to_owned),
            amount: amount.map(str::to_owned),
            status: status.map(str::to_owned),
        }
    }

    #[fixture]
    fn png() -> RawAttachment {
        RawAttachment {
            bytes: vec![0x89; 128],
            declared_size: 128,
            content_type: Some("image/png".to_owned()),
        }
    }

    #[rstest]
    fn invoice_draft_carries_typed_values() {
        let draft = validate_invoice(&invoice_form(Some(CUSTOMER), Some("12.345"), Some("paid")))
            .expect("valid form");
        assert_eq!(draft.customer_id.to_string(), CUSTOMER);
        assert_eq!(draft.amount.get(), 1235);
        assert_eq!(draft.status, InvoiceStatus::Paid);
    }

    #[rstest]
    #[case(" paid", InvoiceStatus::Paid)]
    #[case("pending\t", InvoiceStatus::Pending)]
    fn padded_invoice_fields_are_trimmed(#[case] status: &str, #[case] expected: InvoiceStatus) {
        let padded_customer = format!(" {CUSTOMER} ");
        let draft = validate_invoice(&invoice_form(
            Some(&padded_customer),
            Some(" 7.5 "),
            Some(status),
        ))
        .expect("padding is ignored");
        assert_eq!(draft.status, expected);
        assert_eq!(draft.amount.get(), 750);
    }

    #[rstest]
    #[case(invoice_form(None, Some("1"), Some("paid")), FormField::CustomerId)]
    #[case(invoice_form(Some("  "), Some("1"), Some("paid")), FormField::CustomerId)]
    #[case(invoice_form(Some("cust-1"), Some("1"), Some("paid")), FormField::CustomerId)]
    #[case(invoice_form(Some(CUSTOMER), None, Some("paid")), FormField::Amount)]
    #[case(invoice_form(Some(CUSTOMER), Some("ten"), Some("paid")), FormField::Amount)]
    #[case(invoice_form(Some(CUSTOMER), Some("-3"), Some("paid")), FormField::Amount)]
    #[case(invoice_form(Some(CUSTOMER), Some("3"), None), FormField::Status)]
    #[case(invoice_form(Some(CUSTOMER), Some("3"), Some("overdue")), FormField::Status)]
    #[case(invoice_form(None, Some("bad"), Some("overdue")), FormField::CustomerId)]
    fn invoice_reports_first_bad_field(#[case] form: RawInvoiceForm, #[case] field: FormField) {
        let err = validate_invoice(&form).expect_err("invalid form");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn status_message_lists_allowed_values() {
        let err = validate_invoice(&invoice_form(Some(CUSTOMER), Some("3"), Some("overdue")))
            .expect_err("invalid status");
        assert_eq!(err.message(), "status must be one of: pending, paid");
    }

    #[rstest]
    fn customer_form_produces_draft_and_payload(png: RawAttachment) {
        let validated = validate_customer(RawCustomerForm {
            name: Some(" Ada Lovelace ".to_owned()),
            email: Some("ada@example.com".to_owned()),
            user_image: Some(png),
        })
        .expect("valid form");
        assert_eq!(validated.draft.name.as_str(), "Ada Lovelace");
        assert_eq!(validated.image.size(), 128);
    }

    #[rstest]
    fn missing_name_uses_fill_in_message(png: RawAttachment) {
        let err = validate_customer(RawCustomerForm {
            name: None,
            email: Some("ada@example.com".to_owned()),
            user_image: Some(png),
        })
        .expect_err("missing name");
        assert_eq!(err.field(), FormField::Name);
        assert_eq!(err.message(), FILL_IN_ALL_FIELDS);
    }

    #[rstest]
    fn malformed_email_is_reported_as_such(png: RawAttachment) {
        let err = validate_customer(RawCustomerForm {
            name: Some("Ada".to_owned()),
            email: Some("ada-at-example".to_owned()),
            user_image: Some(png),
        })
        .expect_err("bad email");
        assert_eq!(err.field(), FormField::Email);
        assert_eq!(err.message(), "Invalid email");
    }

    #[rstest]
    #[case(None, FILL_IN_ALL_FIELDS)]
    #[case(Some(RawAttachment::default()), FILL_IN_ALL_FIELDS)]
    #[case(
        Some(RawAttachment { bytes: vec![0; 10_001], declared_size: 10_001, content_type: Some("image/png".to_owned()) }),
        "The size of the file is too large!"
    )]
    #[case(
        Some(RawAttachment { bytes: vec![0; 5_000], declared_size: 5_000, content_type: Some("image/gif".to_owned()) }),
        "This is not an image file"
    )]
    fn attachment_rules_apply_before_upload(
        #[case] user_image: Option<RawAttachment>,
        #[case] expected: &str,
    ) {
        let err = validate_customer(RawCustomerForm {
            name: Some("Ada".to_owned()),
            email: Some("ada@example.com".to_owned()),
            user_image,
        })
        .expect_err("bad attachment");
        assert_eq!(err.field(), FormField::UserImage);
        assert_eq!(err.message(), expected);
    }
}
