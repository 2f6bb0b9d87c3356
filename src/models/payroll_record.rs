//! Payroll record model.
//!
//! A [`PayrollRecord`] is one employee's pay period as read from a single
//! CSV row. All monetary amounts arrive pre-computed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee's pay period, immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// The employee's full name as printed on the paystub.
    pub full_name: String,
    /// Recipient address for the paystub.
    pub email: String,
    /// Job title or position.
    pub position: String,
    /// Health insurance discount.
    pub health_discount_amount: Decimal,
    /// Social security discount.
    pub social_discount_amount: Decimal,
    /// Income tax discount.
    pub taxes_discount_amount: Decimal,
    /// Any other discount.
    pub other_discount_amount: Decimal,
    /// Gross salary for the period.
    pub gross_salary: Decimal,
    /// Gross payment for the period.
    pub gross_payment: Decimal,
    /// Net payment after discounts.
    pub net_payment: Decimal,
    /// Free-text period label (e.g. "2024-01").
    pub period: String,
}

impl PayrollRecord {
    /// Returns the sum of the four discount amounts.
    ///
    /// # Examples
    ///
    /// ```
    /// use paystub_engine::models::PayrollRecord;
    /// use rust_decimal::Decimal;
    ///
    /// let record = PayrollRecord {
    ///     full_name: "John Doe".to_string(),
    ///     email: "john@example.com".to_string(),
    ///     position: "Engineer".to_string(),
    ///     health_discount_amount: Decimal::new(10050, 2),
    ///     social_discount_amount: Decimal::new(20075, 2),
    ///     taxes_discount_amount: Decimal::new(30025, 2),
    ///     other_discount_amount: Decimal::new(5000, 2),
    ///     gross_salary: Decimal::new(500000, 2),
    ///     gross_payment: Decimal::new(450000, 2),
    ///     net_payment: Decimal::new(384850, 2),
    ///     period: "2024-01".to_string(),
    /// };
    /// assert_eq!(record.total_discounts(), Decimal::new(65150, 2));
    /// ```
    ///
    /// Saturates at [`Decimal::MAX`]; records from
    /// [`parse_records`](crate::ingest::parse_records) never reach it.
    pub fn total_discounts(&self) -> Decimal {
        self.checked_total_discounts().unwrap_or(Decimal::MAX)
    }

    /// Sum of the four discounts, or `None` if it overflows.
    pub fn checked_total_discounts(&self) -> Option<Decimal> {
        self.health_discount_amount
            .checked_add(self.social_discount_amount)?
            .checked_add(self.taxes_discount_amount)?
            .checked_add(self.other_discount_amount)
    }
}
