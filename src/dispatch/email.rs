//! Paystub email composition.

use serde::{Deserialize, Serialize};

use crate::models::{LocaleSelection, PayrollRecord};
use crate::render::{LabelKey, labels};

/// Returns the attachment file name for an employee's paystub.
///
/// Whitespace runs in the name collapse to a single underscore.
///
/// # Examples
///
/// ```
/// use paystub_engine::dispatch::attachment_name;
///
/// assert_eq!(attachment_name("John  Q\tDoe"), "paystub-John_Q_Doe.pdf");
/// ```
pub fn attachment_name(full_name: &str) -> String {
    let mut stem = String::with_capacity(full_name.len());
    let mut in_whitespace = false;
    for c in full_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
        } else {
            stem.push(c);
            in_whitespace = false;
        }
    }
    format!("paystub-{}.pdf", stem)
}

/// A composed paystub email, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaystubEmail {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Attachment file name.
    pub attachment_name: String,
    /// Locale tag the email was written in.
    pub locale: String,
    /// Issuing company.
    pub company: String,
}

impl PaystubEmail {
    /// Composes the email that carries `record`'s paystub.
    pub fn compose(
        from: &str,
        record: &PayrollRecord,
        entity: &str,
        locale: LocaleSelection,
    ) -> Self {
        let body = match locale {
            LocaleSelection::Domestic => "Adjunto su comprobante de pago.",
            LocaleSelection::English => "Please find attached your paystub.",
        };

        Self {
            from: from.to_string(),
            to: record.email.clone(),
            subject: format!(
                "{} - {}",
                labels(locale).get(LabelKey::PaystubTitle),
                entity
            ),
            body: body.to_string(),
            attachment_name: attachment_name(&record.full_name),
            locale: locale.tag().to_string(),
            company: entity.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn create_test_record() -> PayrollRecord {
        PayrollRecord {
            full_name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            position: "Engineer".to_string(),
            health_discount_amount: Decimal::ZERO,
            social_discount_amount: Decimal::ZERO,
            taxes_discount_amount: Decimal::ZERO,
            other_discount_amount: Decimal::ZERO,
            gross_salary: Decimal::ZERO,
            gross_payment: Decimal::ZERO,
            net_payment: Decimal::ZERO,
            period: "2024-01".to_string(),
        }
    }

    #[test]
    fn test_compose_domestic_email() {
        let email = PaystubEmail::compose(
            "payroll@acme.test",
            &create_test_record(),
            "TestCompany",
            LocaleSelection::Domestic,
        );

        assert_eq!(email.from, "payroll@acme.test");
        assert_eq!(email.to, "john@example.com");
        assert_eq!(email.subject, "Comprobante de Pago - TestCompany");
        assert_eq!(email.body, "Adjunto su comprobante de pago.");
        assert_eq!(email.attachment_name, "paystub-John_Doe.pdf");
        assert_eq!(email.locale, "es-DO");
    }

    #[test]
    fn test_compose_english_email() {
        let email = PaystubEmail::compose(
            "payroll@acme.test",
            &create_test_record(),
            "TestCompany",
            LocaleSelection::English,
        );

        assert_eq!(email.subject, "Paystub Payment - TestCompany");
        assert_eq!(email.body, "Please find attached your paystub.");
        assert_eq!(email.locale, "en");
    }

    #[test]
    fn test_attachment_name_collapses_whitespace() {
        assert_eq!(attachment_name("Mary Jane Watson"), "paystub-Mary_Jane_Watson.pdf");
        assert_eq!(attachment_name("Ana   María"), "paystub-Ana_María.pdf");
        assert_eq!(attachment_name("Solo"), "paystub-Solo.pdf");
    }
}
