//! Server-side checks for a posted checkout form.
//!
//! The browser-side validator can be bypassed, so the endpoint receiving the
//! POST re-checks the submission and resolves the values the signup needs:
//! the final (unique) subdomain, a company email and the billing period.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use validator::Validate;

use super::{
    derive_subdomain_with_limit, is_valid_subdomain_within, validate_optional_email,
    validate_optional_phone, validate_optional_subdomain, SUBDOMAIN_MESSAGE,
};
use crate::config::FormConfig;
use crate::errors::{CheckoutError, Result};

/// Upper bound on numeric suffixes tried when making a subdomain unique
const MAX_SUBDOMAIN_SUFFIX: u32 = 10_000;

/// Billing cycle chosen at checkout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingPeriod {
    /// Parse a posted period; anything unrecognised is monthly
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "quarterly" => BillingPeriod::Quarterly,
            "yearly" => BillingPeriod::Yearly,
            _ => BillingPeriod::Monthly,
        }
    }

    /// Unit shown next to the price ("per month")
    pub fn label(&self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "month",
            BillingPeriod::Quarterly => "quarter",
            BillingPeriod::Yearly => "year",
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingPeriod::Monthly => write!(f, "monthly"),
            BillingPeriod::Quarterly => write!(f, "quarterly"),
            BillingPeriod::Yearly => write!(f, "yearly"),
        }
    }
}

/// A checkout form as posted to the server
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CheckoutSubmission {
    pub plan_id: u64,

    #[validate(length(max = 255, message = "Company name is too long"))]
    pub company_name: String,

    #[validate(length(max = 255, message = "Contact name is too long"))]
    pub contact_name: String,

    #[validate(custom(function = "validate_optional_email"))]
    pub contact_email: String,

    #[validate(custom(function = "validate_optional_phone"))]
    pub contact_phone: String,

    #[validate(custom(function = "validate_optional_email"))]
    pub company_email: String,

    #[validate(custom(function = "validate_optional_subdomain"))]
    pub preferred_subdomain: String,

    pub billing_period: String,

    #[validate(length(max = 5000, message = "Requirements are too long"))]
    pub requirements: String,

    pub newsletter: bool,
}

/// Values resolved from a submission that passed the server-side checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCheckout {
    pub plan_id: u64,
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub company_email: Option<String>,
    pub subdomain: String,
    pub subdomain_derived: bool,
    pub billing_period: BillingPeriod,
    pub instance_url: String,
    pub newsletter: bool,
}

impl CheckoutSubmission {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| CheckoutError::from(e).with_context("Parsing checkout submission"))
    }

    /// Labels of required fields left blank, in form order
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            (&self.company_name, "Company Name"),
            (&self.contact_name, "Contact Name"),
            (&self.contact_email, "Contact Email"),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, label)| label)
        .collect()
    }

    /// Check the submission and resolve the signup values.
    ///
    /// `is_taken` reports whether a subdomain already belongs to an instance.
    pub fn resolve<F>(&self, config: &FormConfig, is_taken: F) -> Result<ResolvedCheckout>
    where
        F: Fn(&str) -> bool,
    {
        let missing = self.missing_required_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::validation(format!(
                "Please fill in all required fields: {}",
                missing.join(", ")
            )));
        }

        Validate::validate(self)?;

        let preferred = self.preferred_subdomain.trim();
        let (preferred, subdomain_derived) = if preferred.is_empty() {
            (derive_subdomain_with_limit(&self.company_name, config.subdomain_max_length), true)
        } else {
            (preferred.to_string(), false)
        };

        if !is_valid_subdomain_within(
            &preferred,
            config.subdomain_min_length,
            config.subdomain_max_length,
        ) {
            let field = if subdomain_derived { "company_name" } else { "preferred_subdomain" };
            return Err(CheckoutError::validation_field(SUBDOMAIN_MESSAGE, field));
        }

        let subdomain = unique_subdomain(&preferred, config.subdomain_max_length, is_taken)?;
        if subdomain != preferred {
            debug!(preferred = %preferred, subdomain = %subdomain, "Subdomain taken, using suffixed name");
        }

        let company_email = match self.company_email.trim() {
            "" => derive_company_email(self.contact_email.trim()),
            email => Some(email.to_string()),
        };

        let resolved = ResolvedCheckout {
            plan_id: self.plan_id,
            company_name: self.company_name.trim().to_string(),
            contact_name: self.contact_name.trim().to_string(),
            contact_email: self.contact_email.trim().to_string(),
            company_email,
            instance_url: format!("https://{}.{}", subdomain, config.instance_base_domain),
            subdomain,
            subdomain_derived,
            billing_period: BillingPeriod::parse_or_default(&self.billing_period),
            newsletter: self.newsletter,
        };

        info!(
            plan_id = resolved.plan_id,
            subdomain = %resolved.subdomain,
            billing_period = %resolved.billing_period,
            "Checkout submission accepted"
        );
        Ok(resolved)
    }
}

/// `info@<domain>` for the domain of a contact email
pub fn derive_company_email(contact_email: &str) -> Option<String> {
    let (_, domain) = contact_email.split_once('@')?;
    if domain.is_empty() {
        return None;
    }
    Some(format!("info@{}", domain))
}

/// Return `preferred` if it is free, otherwise the first free
/// `preferred1`, `preferred2`, ... The name is shortened before the suffix
/// when needed so candidates never exceed `max_length` characters.
pub fn unique_subdomain<F>(preferred: &str, max_length: usize, is_taken: F) -> Result<String>
where
    F: Fn(&str) -> bool,
{
    if !is_taken(preferred) {
        return Ok(preferred.to_string());
    }

    (1..=MAX_SUBDOMAIN_SUFFIX)
        .filter_map(|n| suffixed_candidate(preferred, n, max_length))
        .find(|candidate| !is_taken(candidate.as_str()))
        .ok_or_else(|| {
            CheckoutError::validation_field(
                format!("No free subdomain found for '{}'", preferred),
                "preferred_subdomain",
            )
        })
}

/// `preferred` + `n`, cut to fit `max_length`; `None` when no prefix fits
fn suffixed_candidate(preferred: &str, n: u32, max_length: usize) -> Option<String> {
    let suffix = n.to_string();
    let keep = max_length.checked_sub(suffix.len()).filter(|keep| *keep > 0)?;
    let base: String = preferred.chars().take(keep).collect();
    Some(format!("{}{}", base, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn submission() -> CheckoutSubmission {
        CheckoutSubmission {
            plan_id: 7,
            company_name: "Acme Corp!".to_string(),
            contact_name: "Jane Doe".to_string(),
            contact_email: "jane@acme.com".to_string(),
            billing_period: "yearly".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_derives_subdomain_and_company_email() {
        let resolved = submission().resolve(&FormConfig::default(), |_| false).unwrap();
        assert_eq!(resolved.subdomain, "acmecorp");
        assert!(resolved.subdomain_derived);
        assert_eq!(resolved.company_email.as_deref(), Some("info@acme.com"));
        assert_eq!(resolved.billing_period, BillingPeriod::Yearly);
        assert_eq!(resolved.instance_url, "https://acmecorp.saas.com");
    }

    #[test]
    fn test_missing_fields_are_listed_in_order() {
        let submission = CheckoutSubmission {
            contact_name: "Jane".to_string(),
            ..Default::default()
        };
        assert_eq!(submission.missing_required_fields(), vec!["Company Name", "Contact Email"]);

        let err = submission.resolve(&FormConfig::default(), |_| false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Please fill in all required fields: Company Name, Contact Email"
        );
    }

    #[test]
    fn test_invalid_contact_email_rejected() {
        let mut submission = submission();
        submission.contact_email = "not-an-email".to_string();
        let err = submission.resolve(&FormConfig::default(), |_| false).unwrap_err();
        assert_eq!(err.field(), Some("contact_email"));
        assert!(err.to_string().contains("Please enter a valid email address"));
    }

    #[test]
    fn test_explicit_subdomain_kept() {
        let mut submission = submission();
        submission.preferred_subdomain = "ab-1".to_string();
        submission.company_email = "billing@acme.io".to_string();
        let resolved = submission.resolve(&FormConfig::default(), |_| false).unwrap();
        assert_eq!(resolved.subdomain, "ab-1");
        assert!(!resolved.subdomain_derived);
        assert_eq!(resolved.company_email.as_deref(), Some("billing@acme.io"));
    }

    #[test]
    fn test_short_explicit_subdomain_rejected() {
        let mut submission = submission();
        submission.preferred_subdomain = "ab".to_string();
        let err = submission.resolve(&FormConfig::default(), |_| false).unwrap_err();
        assert_eq!(err.field(), Some("preferred_subdomain"));
    }

    #[test]
    fn test_underivable_company_name_rejected() {
        let mut submission = submission();
        submission.company_name = "!!".to_string();
        let err = submission.resolve(&FormConfig::default(), |_| false).unwrap_err();
        assert_eq!(err.field(), Some("company_name"));
    }

    #[test]
    fn test_taken_subdomain_gets_suffix() {
        let taken: HashSet<&str> = ["acmecorp", "acmecorp1"].into_iter().collect();
        let resolved = submission().resolve(&FormConfig::default(), |s| taken.contains(s)).unwrap();
        assert_eq!(resolved.subdomain, "acmecorp2");
        assert_eq!(resolved.instance_url, "https://acmecorp2.saas.com");
    }

    #[test]
    fn test_unique_subdomain_exhaustion() {
        assert!(unique_subdomain("acme", 20, |_| true).is_err());
        assert_eq!(unique_subdomain("acme", 20, |_| false).unwrap(), "acme");
    }

    #[test]
    fn test_unique_subdomain_stays_within_max_length() {
        let preferred = "a".repeat(20);
        let subdomain = unique_subdomain(&preferred, 20, |s| s == preferred).unwrap();
        assert_eq!(subdomain, format!("{}1", "a".repeat(19)));
        assert!(is_valid_subdomain_within(&subdomain, 3, 20));

        // Two-digit suffixes shorten the name by one more character
        let taken = |s: &str| s.len() < 20 || !s.ends_with("10");
        let subdomain = unique_subdomain(&preferred, 20, taken).unwrap();
        assert_eq!(subdomain, format!("{}10", "a".repeat(18)));
    }

    #[test]
    fn test_taken_max_length_subdomain_resolves_valid() {
        let mut submission = submission();
        submission.preferred_subdomain = "abcdefghijklmnopqrst".to_string();
        let resolved = submission
            .resolve(&FormConfig::default(), |s| s == "abcdefghijklmnopqrst")
            .unwrap();
        assert_eq!(resolved.subdomain, "abcdefghijklmnopqrs1");
        assert_eq!(resolved.instance_url, "https://abcdefghijklmnopqrs1.saas.com");
    }

    #[test]
    fn test_resolve_honours_configured_max_length() {
        let config = FormConfig {
            subdomain_max_length: 30,
            ..FormConfig::default()
        };
        let mut submission = submission();
        submission.preferred_subdomain = "a".repeat(25);

        let resolved = submission.resolve(&config, |_| false).unwrap();
        assert_eq!(resolved.subdomain.len(), 25);

        // The default bounds still reject it
        let err = submission.resolve(&FormConfig::default(), |_| false).unwrap_err();
        assert_eq!(err.field(), Some("preferred_subdomain"));
    }

    #[test]
    fn test_derive_company_email() {
        assert_eq!(derive_company_email("jane@acme.com").as_deref(), Some("info@acme.com"));
        assert_eq!(derive_company_email("jane"), None);
        assert_eq!(derive_company_email("jane@"), None);
    }

    #[test]
    fn test_billing_period_fallback() {
        assert_eq!(BillingPeriod::parse_or_default("Quarterly"), BillingPeriod::Quarterly);
        assert_eq!(BillingPeriod::parse_or_default("yearly"), BillingPeriod::Yearly);
        assert_eq!(BillingPeriod::parse_or_default("weekly"), BillingPeriod::Monthly);
        assert_eq!(BillingPeriod::parse_or_default(""), BillingPeriod::Monthly);
        assert_eq!(BillingPeriod::Quarterly.label(), "quarter");
        assert_eq!(BillingPeriod::Yearly.to_string(), "yearly");
    }

    #[test]
    fn test_from_json_defaults() {
        let submission = CheckoutSubmission::from_json(
            r#"{"plan_id": 3, "company_name": "Globex", "contact_name": "Hank",
                "contact_email": "hank@globex.com"}"#,
        )
        .unwrap();
        assert_eq!(submission.plan_id, 3);
        assert!(!submission.newsletter);
        assert_eq!(submission.billing_period, "");
    }
}
