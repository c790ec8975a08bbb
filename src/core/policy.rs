//! Per-request allow/deny decisions for the browser session.
//!
//! The decision function is pure: the session layer maps CDP events to
//! [`RequestDescriptor`] values and answers them according to
//! [`NetworkPolicy::decide`]. Keeping browser types out of this module
//! lets the policy be tested without a browser.

/// What to do with an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// The facts the policy is allowed to look at.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Hostname of the request target, e.g. `www.google-analytics.com`.
    pub hostname: String,
    /// Lowercase CDP resource type, e.g. `image`, `document`.
    pub resource_type: String,
}

/// Blocklist data. This is configuration, not logic: extending either
/// list never requires touching the decision function.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub blocked_domains: Vec<String>,
    pub blocked_resource_types: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            // Tracking/analytics/ads hosts the portal pages pull in.
            blocked_domains: [
                "googletagmanager.com",
                "googleadservices.com",
                "doubleclick.net",
                "google-analytics.com",
                "karte.io",
                "fout.jp",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            blocked_resource_types: ["image", "font", "stylesheet"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl PolicyConfig {
    pub fn with_extra_domains(mut self, extra: &[String]) -> Self {
        self.blocked_domains
            .extend(extra.iter().map(|d| d.trim().to_string()).filter(|d| !d.is_empty()));
        self
    }
}

/// Stateless decision function over a [`PolicyConfig`]. The config is
/// read-only for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct NetworkPolicy {
    config: PolicyConfig,
}

impl NetworkPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn decide(&self, request: &RequestDescriptor) -> Decision {
        if self
            .config
            .blocked_resource_types
            .iter()
            .any(|t| t == &request.resource_type)
        {
            return Decision::Deny;
        }

        if self
            .config
            .blocked_domains
            .iter()
            .any(|blocked| request.hostname.contains(blocked.as_str()))
        {
            return Decision::Deny;
        }

        Decision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(hostname: &str, resource_type: &str) -> RequestDescriptor {
        RequestDescriptor {
            hostname: hostname.to_string(),
            resource_type: resource_type.to_string(),
        }
    }

    fn default_policy() -> NetworkPolicy {
        NetworkPolicy::new(PolicyConfig::default())
    }

    #[test]
    fn test_blocked_resource_type_denied_regardless_of_host() {
        let policy = default_policy();
        assert_eq!(
            policy.decide(&request("salonboard.com", "image")),
            Decision::Deny
        );
        assert_eq!(
            policy.decide(&request("salonboard.com", "font")),
            Decision::Deny
        );
        assert_eq!(
            policy.decide(&request("salonboard.com", "stylesheet")),
            Decision::Deny
        );
    }

    #[test]
    fn test_blocked_domain_denied_regardless_of_type() {
        let policy = default_policy();
        assert_eq!(
            policy.decide(&request("www.google-analytics.com", "document")),
            Decision::Deny
        );
        assert_eq!(
            policy.decide(&request("www.google-analytics.com", "script")),
            Decision::Deny
        );
    }

    #[test]
    fn test_portal_document_allowed() {
        let policy = default_policy();
        assert_eq!(
            policy.decide(&request("salonboard.com", "document")),
            Decision::Allow
        );
        assert_eq!(
            policy.decide(&request("salonboard.com", "script")),
            Decision::Allow
        );
    }

    #[test]
    fn test_domain_match_is_substring_of_hostname() {
        let policy = default_policy();
        // Subdomains of a blocked domain are blocked too.
        assert_eq!(
            policy.decide(&request("cdn.doubleclick.net", "script")),
            Decision::Deny
        );
    }

    #[test]
    fn test_extra_domains_extend_the_blocklist() {
        let config = PolicyConfig::default()
            .with_extra_domains(&["ads.example.com".to_string(), " ".to_string()]);
        let policy = NetworkPolicy::new(config);
        assert_eq!(
            policy.decide(&request("ads.example.com", "document")),
            Decision::Deny
        );
        // Blank entries are dropped, not treated as match-everything.
        assert_eq!(
            policy.decide(&request("salonboard.com", "document")),
            Decision::Allow
        );
    }
}
