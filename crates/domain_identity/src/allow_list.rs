//! Admin email allow-list

use std::collections::BTreeSet;

/// Normalizes an email for storage and comparison: trimmed, lower-case
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Ordered set of normalized email addresses that are granted the admin role
///
/// Loaded from configuration once and shared by registration and login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList {
    emails: BTreeSet<String>,
}

impl AdminAllowList {
    /// Builds an allow-list, normalizing every entry and dropping blanks
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = emails
            .into_iter()
            .map(|e| normalize_email(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        Self { emails }
    }

    /// Parses a comma-separated list, e.g. from `API_ADMIN_EMAILS`
    pub fn from_csv(csv: &str) -> Self {
        Self::new(csv.split(','))
    }

    /// Case-insensitive membership test
    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&normalize_email(email))
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.emails.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_contains_is_case_insensitive() {
        let list = AdminAllowList::new(["Admin@Inkdex.io"]);
        assert!(list.contains("admin@inkdex.io"));
        assert!(list.contains("  ADMIN@INKDEX.IO "));
        assert!(!list.contains("owner@inkdex.io"));
    }

    #[test]
    fn test_from_csv_skips_blanks() {
        let list = AdminAllowList::from_csv("a@x.io, ,B@x.io,");
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["a@x.io", "b@x.io"]);
    }

    #[test]
    fn test_empty_list_contains_nothing() {
        let list = AdminAllowList::default();
        assert!(list.is_empty());
        assert!(!list.contains(""));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(email in "[ ]{0,2}[A-Za-z0-9._]{1,12}@[A-Za-z]{2,8}\\.[A-Za-z]{2,3}[ ]{0,2}") {
            let once = normalize_email(&email);
            prop_assert_eq!(normalize_email(&once), once.clone());
            prop_assert!(!once.starts_with(' '));
            prop_assert_eq!(once.to_lowercase(), once);
        }

        #[test]
        fn listed_email_matches_any_casing(local in "[a-z]{1,10}", domain in "[a-z]{2,8}") {
            let email = format!("{}@{}.com", local, domain);
            let list = AdminAllowList::new([email.clone()]);
            prop_assert!(list.contains(&email.to_uppercase()));
        }
    }
}
