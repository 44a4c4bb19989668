//! Country-aware phone number value.

use phonenumber::Mode;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppErrorKind, AppResult};

/// Shortest national significant number considered possible
const MIN_NATIONAL_LENGTH: usize = 2;
/// Longest national significant number considered possible
const MAX_NATIONAL_LENGTH: usize = 17;

/// A parsed phone number with a resolved country.
///
/// Field names follow the shape the policy expects (`number` is the E.164
/// form, `country` the ISO 3166-1 alpha-2 region).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPhoneNumber {
    /// E.164 representation, e.g. `+18135555555`
    #[serde(rename = "number")]
    pub e164_number: String,
    /// Calling code without '+', e.g. `1`
    pub country_calling_code: String,
    /// ISO region, e.g. `US`
    #[serde(rename = "country")]
    pub iso_country: String,
    /// National significant number
    pub national_number: String,
    pub carrier_code: Option<String>,
    pub is_valid: bool,
    pub is_possible: bool,
}

impl NormalizedPhoneNumber {
    /// Parse a raw phone number.
    ///
    /// Fails with `USER_PHONE_NUMBER_IS_INVALID` when the input cannot be
    /// parsed or no country can be resolved for it.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let invalid = || {
            AppError::input(
                AppErrorKind::UserPhoneNumberIsInvalid,
                "user phone number is not valid",
            )
        };

        let number = phonenumber::parse(None, raw.trim()).map_err(|_| invalid())?;
        let iso_country = number
            .country()
            .id()
            .map(|id| format!("{:?}", id))
            .ok_or_else(invalid)?;

        let national_number = number.national().to_string();
        let is_valid = phonenumber::is_valid(&number);
        let is_possible = is_valid
            || (MIN_NATIONAL_LENGTH..=MAX_NATIONAL_LENGTH).contains(&national_number.len());

        Ok(Self {
            e164_number: number.format().mode(Mode::E164).to_string(),
            country_calling_code: number.code().value().to_string(),
            iso_country,
            national_number,
            carrier_code: number.carrier().map(|carrier| carrier.to_string()),
            is_valid,
            is_possible,
        })
    }
}
