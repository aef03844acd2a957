/// Field names recognised as the status field when none are configured.
pub const DEFAULT_STATUS_FIELDS: [&str; 2] = ["status", "สถานะ"];

/// Decides which journal field changes are status changes.
///
/// Names are compared exactly after trimming and lower-casing, so `Status`
/// matches `status` but `status_reason` does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFieldMatcher {
    names: Vec<String>,
}

impl StatusFieldMatcher {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for name in names {
            let name = normalize(name.as_ref());
            if !name.is_empty() && !normalized.contains(&name) {
                normalized.push(name);
            }
        }
        Self { names: normalized }
    }

    pub fn matches(&self, property: &str) -> bool {
        let property = normalize(property);
        self.names.iter().any(|name| *name == property)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for StatusFieldMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_FIELDS)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_canonical_and_alias() {
        let matcher = StatusFieldMatcher::default();
        assert!(matcher.matches("status"));
        assert!(matcher.matches("Status"));
        assert!(matcher.matches(" STATUS "));
        assert!(matcher.matches("สถานะ"));
    }

    #[test]
    fn test_no_substring_matching() {
        let matcher = StatusFieldMatcher::default();
        assert!(!matcher.matches("status_reason"));
        assert!(!matcher.matches("Assignee"));
        assert!(!matcher.matches(""));
    }

    #[test]
    fn test_custom_names_are_deduplicated() {
        let matcher = StatusFieldMatcher::new(["State", "state", "  ", "System.State"]);
        assert_eq!(matcher.names(), ["state", "system.state"]);
        assert!(matcher.matches("System.State"));
        assert!(!matcher.matches("status"));
    }
}
