//! Validated string scalars
//!
//! Both scalars reject malformed input while the request is being resolved, so an
//! invalid `register` mutation never reaches the database.

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid email regex")
});

// E.164: leading +, no leading zero, 7 to 15 ASCII digits in total.
// `\d` would also accept other Unicode digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9][0-9]{6,14}$").expect("valid phone regex"));

/// An email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(pub String);

impl EmailAddress {
    pub fn is_valid(s: &str) -> bool {
        EMAIL_RE.is_match(s)
    }
}

#[Scalar(name = "EmailAddress")]
impl ScalarType for EmailAddress {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) if Self::is_valid(s) => Ok(EmailAddress(s.clone())),
            Value::String(s) => Err(InputValueError::custom(format!(
                "Value is not a valid email address: {}",
                s
            ))),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}

/// A phone number in E.164 form, e.g. `+17895551234`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(pub String);

impl PhoneNumber {
    pub fn is_valid(s: &str) -> bool {
        PHONE_RE.is_match(s)
    }
}

#[Scalar(name = "PhoneNumber")]
impl ScalarType for PhoneNumber {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) if Self::is_valid(s) => Ok(PhoneNumber(s.clone())),
            Value::String(s) => Err(InputValueError::custom(format!(
                "Value is not a valid phone number of the form +17895551234 (7-15 digits): {}",
                s
            ))),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}
