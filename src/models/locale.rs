//! Country and locale selection.
//!
//! A batch carries exactly one [`LocaleSelection`], derived from the
//! [`Country`] code supplied with the upload.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The locale every label lookup in a batch is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleSelection {
    /// Spanish as used in the Dominican Republic.
    Domestic,
    /// English.
    English,
}

impl LocaleSelection {
    /// Returns the locale tag handed to dispatch sinks.
    pub fn tag(self) -> &'static str {
        match self {
            LocaleSelection::Domestic => "es-DO",
            LocaleSelection::English => "en",
        }
    }
}

impl fmt::Display for LocaleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Country codes accepted on the batch endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    /// Dominican Republic, wire code `do`.
    #[serde(rename = "DO")]
    DominicanRepublic,
    /// United States, wire code `USA`.
    #[serde(rename = "US")]
    UnitedStates,
}

impl Country {
    /// The country assumed when the caller sends none.
    pub const DEFAULT_CODE: &'static str = "do";

    /// Parses a wire code. Matching is exact and case-sensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use paystub_engine::models::{Country, LocaleSelection};
    ///
    /// let country = Country::from_code("USA").unwrap();
    /// assert_eq!(country.locale(), LocaleSelection::English);
    /// assert!(Country::from_code("usa").is_err());
    /// ```
    pub fn from_code(code: &str) -> EngineResult<Self> {
        match code {
            "do" => Ok(Country::DominicanRepublic),
            "USA" => Ok(Country::UnitedStates),
            other => Err(EngineError::UnknownCountry {
                code: other.to_string(),
            }),
        }
    }

    /// Returns the wire code for this country.
    pub fn code(self) -> &'static str {
        match self {
            Country::DominicanRepublic => "do",
            Country::UnitedStates => "USA",
        }
    }

    /// Returns the locale used for paystubs issued in this country.
    pub fn locale(self) -> LocaleSelection {
        match self {
            Country::DominicanRepublic => LocaleSelection::Domestic,
            Country::UnitedStates => LocaleSelection::English,
        }
    }
}
