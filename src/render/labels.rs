//! Localized display strings for paystubs.

use serde::Serialize;

use crate::models::LocaleSelection;

/// The closed set of localized labels a paystub uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKey {
    /// Document title, followed by the period.
    PaystubTitle,
    /// Gross salary row.
    GrossSalary,
    /// Gross payment row.
    GrossPayment,
    /// Net payment footer.
    NetPayment,
    /// Health insurance discount.
    Health,
    /// Social security discount.
    Social,
    /// Income tax discount.
    Taxes,
    /// Other discounts.
    Others,
}

impl LabelKey {
    /// Every key, in declaration order.
    pub const ALL: [LabelKey; 8] = [
        LabelKey::PaystubTitle,
        LabelKey::GrossSalary,
        LabelKey::GrossPayment,
        LabelKey::NetPayment,
        LabelKey::Health,
        LabelKey::Social,
        LabelKey::Taxes,
        LabelKey::Others,
    ];

    /// The key's wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            LabelKey::PaystubTitle => "paystub_title",
            LabelKey::GrossSalary => "gross_salary",
            LabelKey::GrossPayment => "gross_payment",
            LabelKey::NetPayment => "net_payment",
            LabelKey::Health => "health",
            LabelKey::Social => "social",
            LabelKey::Taxes => "taxes",
            LabelKey::Others => "others",
        }
    }
}

/// Immutable label lookup for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSet {
    locale: LocaleSelection,
}

impl LabelSet {
    /// The locale these labels belong to.
    pub fn locale(&self) -> LocaleSelection {
        self.locale
    }

    /// Returns the display string for `key`.
    pub fn get(&self, key: LabelKey) -> &'static str {
        let english = self.locale == LocaleSelection::English;
        match key {
            LabelKey::PaystubTitle if english => "Paystub Payment",
            LabelKey::PaystubTitle => "Comprobante de Pago",
            LabelKey::GrossSalary if english => "Gross Salary",
            LabelKey::GrossSalary => "Salario Bruto",
            LabelKey::GrossPayment if english => "Gross Payment",
            LabelKey::GrossPayment => "Pago Bruto",
            LabelKey::NetPayment if english => "Net Payment",
            LabelKey::NetPayment => "Pago Neto",
            LabelKey::Health if english => "Health Insurance",
            LabelKey::Health => "SFS",
            LabelKey::Social if english => "Social Security",
            LabelKey::Social => "AFP",
            LabelKey::Taxes if english => "Taxes",
            LabelKey::Taxes => "ISR",
            LabelKey::Others if english => "Others",
            LabelKey::Others => "Otros",
        }
    }

    /// Iterates `(key, value)` pairs for every key.
    pub fn iter(&self) -> impl Iterator<Item = (LabelKey, &'static str)> + '_ {
        LabelKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

/// Returns the label set for `locale`.
///
/// # Examples
///
/// ```
/// use paystub_engine::models::LocaleSelection;
/// use paystub_engine::render::{LabelKey, labels};
///
/// assert_eq!(labels(LocaleSelection::English).get(LabelKey::NetPayment), "Net Payment");
/// assert_eq!(labels(LocaleSelection::Domestic).get(LabelKey::NetPayment), "Pago Neto");
/// ```
pub fn labels(locale: LocaleSelection) -> LabelSet {
    LabelSet { locale }
}
