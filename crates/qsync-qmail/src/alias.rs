//! Alias-file parsing: redirect extraction and filtering.

use std::fmt;
use tracing::debug;

/// Line prefix marking a forwarding target in a qmail alias file.
pub const FORWARD_MARKER: char = '&';

/// Substring marking a redirect that terminates in local-only delivery.
/// Such entries must never be forwarded to the remote directory.
pub const LOCAL_ONLY_MARKER: &str = "@localhost";

/// A source mailbox address derived from an alias file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceAddress {
    local_part: String,
    domain: String,
}

impl SourceAddress {
    pub fn new(local_part: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            local_part: local_part.into(),
            domain: domain.into(),
        }
    }

    #[must_use]
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Renders the full address, `local-part@domain`.
    #[must_use]
    pub fn email(&self) -> String {
        format!("{}@{}", self.local_part, self.domain)
    }
}

impl fmt::Display for SourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

/// A destination address extracted from an alias file, already normalized
/// and filtered. Never equal to its own source address and never a
/// local-only delivery entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Domain-specific normalization rules for alias parsing.
///
/// The sandbox domain is a staging alias of the canonical domain that may
/// appear in alias files; it is rewritten to the canonical domain before
/// filtering so that sandbox-spelled self-loops are still caught. It
/// defaults to the `<domain>.test-google-a.com` convention and can be
/// overridden per deployment.
#[derive(Debug, Clone)]
pub struct DomainRules {
    domain: String,
    sandbox_domain: String,
}

impl DomainRules {
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        let sandbox_domain = format!("{domain}.test-google-a.com");
        Self {
            domain,
            sandbox_domain,
        }
    }

    /// Overrides the sandbox alias of the canonical domain.
    #[must_use]
    pub fn with_sandbox_domain(mut self, sandbox_domain: impl Into<String>) -> Self {
        self.sandbox_domain = sandbox_domain.into();
        self
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Rewrites any occurrence of the sandbox domain to the canonical domain.
    #[must_use]
    pub fn normalize(&self, address: &str) -> String {
        address.replace(&self.sandbox_domain, &self.domain)
    }
}

/// Extracts the qualifying redirect targets from one alias file's content.
///
/// Lines not starting with [`FORWARD_MARKER`] are ignored. Selected lines
/// have the marker stripped and the sandbox domain normalized, then are
/// dropped when they equal the source address itself (self-loop), contain
/// [`LOCAL_ONLY_MARKER`], or end up empty. Insertion order is preserved.
///
/// An empty result means the source address has no qualifying redirects and
/// should not become a group; it is a normal outcome, not an error.
pub fn parse_redirects(
    source: &SourceAddress,
    rules: &DomainRules,
    content: &str,
) -> Vec<RedirectTarget> {
    let own_address = source.email();
    let mut targets = Vec::new();

    for raw in content.lines() {
        if !raw.starts_with(FORWARD_MARKER) {
            continue;
        }

        let line = raw.replace(FORWARD_MARKER, "");
        let line = rules.normalize(&line);

        if line == own_address {
            debug!(source = %source, "dropping self-loop redirect");
            continue;
        }
        if line.contains(LOCAL_ONLY_MARKER) {
            debug!(target = %line, "dropping local-only redirect");
            continue;
        }
        if line.is_empty() {
            continue;
        }

        debug!(target = %line, "accepted redirect");
        targets.push(RedirectTarget(line));
    }

    targets
}
