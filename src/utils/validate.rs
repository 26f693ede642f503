//! Address and phone number value types.
//!
//! Both types can only be obtained through parsing, so holding one means the
//! input already passed validation.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{SenderError, SenderResult};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[0-9]+\s+[\s0-9]+$").expect("phone pattern is valid"));

/// A syntactically valid, lower-cased email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(input: &str) -> SenderResult<Self> {
        if !EMAIL_REGEX.is_match(input) {
            return Err(SenderError::validation(
                "EmailAddress::parse",
                "email",
                format!("Invalid email format: '{}'", input),
            ));
        }
        Ok(Self(input.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EmailAddress {
    type Err = SenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for EmailAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A phone number split into its area code (with `+`) and subscriber number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    area: String,
    subscriber: String,
}

impl PhoneNumber {
    /// Parses `"+<area> <subscriber>"`.
    ///
    /// Whitespace inside the subscriber part is dropped, so `"+1 555 0100"`
    /// yields area `+1` and subscriber `5550100`.
    pub fn parse(input: &str) -> SenderResult<Self> {
        let invalid = || {
            SenderError::validation(
                "PhoneNumber::parse",
                "phone_number",
                format!("Invalid phone format: '{}'", input),
            )
        };

        if !PHONE_REGEX.is_match(input) {
            return Err(invalid());
        }

        let (area, rest) = input.split_once(char::is_whitespace).ok_or_else(invalid)?;
        let subscriber: String = rest.chars().filter(|c| !c.is_whitespace()).collect();
        if subscriber.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            area: area.to_string(),
            subscriber,
        })
    }

    /// Area code including the leading `+`
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Area code digits without the leading `+`
    pub fn area_digits(&self) -> &str {
        self.area.trim_start_matches('+')
    }

    pub fn subscriber(&self) -> &str {
        &self.subscriber
    }
}

impl FromStr for PhoneNumber {
    type Err = SenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.area, self.subscriber)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_email_lowercased() {
        let email = EmailAddress::parse("User@Example.COM").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_email_special_local_part() {
        let email = EmailAddress::parse("first.o'neil+tag@mail-1.example.org").unwrap();
        assert_eq!(email.to_string(), "first.o'neil+tag@mail-1.example.org");
    }

    #[test]
    fn test_email_invalid() {
        for input in [
            "",
            "plainaddress",
            "user@",
            "@example.com",
            "user@-example.com",
            "user@example-.com",
            "user@exa_mple.com",
            "user name@example.com",
        ] {
            let err = EmailAddress::parse(input).unwrap_err();
            assert!(err.is_validation(), "expected validation error for {:?}", input);
            assert_eq!(err.operation(), "EmailAddress::parse");
        }
    }

    #[test]
    fn test_phone_parse() {
        let phone = PhoneNumber::parse("+86 13800000000").unwrap();
        assert_eq!(phone.area(), "+86");
        assert_eq!(phone.area_digits(), "86");
        assert_eq!(phone.subscriber(), "13800000000");
        assert_eq!(phone.to_string(), "+86 13800000000");
    }

    #[test]
    fn test_phone_strips_subscriber_whitespace() {
        let phone = PhoneNumber::parse("+1   555 010 0199").unwrap();
        assert_eq!(phone.area(), "+1");
        assert_eq!(phone.subscriber(), "5550100199");
        assert_eq!(phone.to_string(), "+1 5550100199");
    }

    #[test]
    fn test_phone_invalid() {
        for input in [
            "",
            "86 13800000000",
            "+86",
            "+86-13800000000",
            "+86 138-0000",
            "+ 13800000000",
            "+86   ",
            "+86 abc",
        ] {
            let err = PhoneNumber::parse(input).unwrap_err();
            assert!(err.is_validation(), "expected validation error for {:?}", input);
        }
    }

    #[test]
    fn test_phone_serializes_as_string() {
        let phone = PhoneNumber::parse("+44 7700 900123").unwrap();
        assert_eq!(serde_json::to_string(&phone).unwrap(), "\"+44 7700900123\"");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_phone_round_trip(
            area in "[0-9]{1,4}",
            gap in "[ \t]{1,3}",
            groups in prop::collection::vec("[0-9]{1,5}", 1..4),
        ) {
            let input = format!("+{}{}{}", area, gap, groups.join(" "));
            let phone = PhoneNumber::parse(&input).unwrap();

            prop_assert_eq!(phone.area(), format!("+{}", area));
            prop_assert_eq!(phone.subscriber(), groups.concat());

            let reparsed = PhoneNumber::parse(&phone.to_string()).unwrap();
            prop_assert_eq!(reparsed, phone);
        }

        #[test]
        fn prop_phone_without_plus_fails(digits in "[0-9]{1,4} [0-9]{1,10}") {
            prop_assert!(PhoneNumber::parse(&digits).is_err());
        }

        #[test]
        fn prop_phone_without_subscriber_digits_fails(area in "[0-9]{1,4}", tail in "[a-z]{1,8}") {
            let input = format!("+{} {}", area, tail);
            prop_assert!(PhoneNumber::parse(&input).is_err());
        }

        #[test]
        fn prop_email_lowercases(
            local in "[a-zA-Z0-9._%+-]{1,20}",
            label in "[a-zA-Z0-9]{1,10}",
            tld in "[a-zA-Z]{2,6}",
        ) {
            let input = format!("{}@{}.{}", local, label, tld);
            let email = EmailAddress::parse(&input).unwrap();
            prop_assert_eq!(email.as_str(), input.to_lowercase());
        }

        #[test]
        fn prop_email_without_at_fails(input in "[a-zA-Z0-9.]{1,30}") {
            prop_assert!(EmailAddress::parse(&input).is_err());
        }
    }
}
