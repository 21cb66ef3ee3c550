//! Alias-store scanning: file-name matching and per-source file reads.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::alias::{parse_redirects, DomainRules, RedirectTarget, SourceAddress};
use crate::error::{QmailError, QmailResult};

/// Returns the domain without its final TLD label, the stem used in alias
/// file names (`example.com` -> `example`).
#[must_use]
pub fn domain_stem(domain: &str) -> &str {
    domain.rsplit_once('.').map_or(domain, |(stem, _)| stem)
}

/// Matches a store entry name against the domain's naming convention,
/// `qmail-<domain-stem>-<local-part>`, returning the local part on a match.
///
/// Pure function so the pattern stays testable without a filesystem.
#[must_use]
pub fn match_alias_file_name(domain: &str, file_name: &str) -> Option<String> {
    let prefix = format!("qmail-{}-", domain_stem(domain));
    let local_part = file_name.strip_prefix(&prefix)?;
    if local_part.is_empty() {
        return None;
    }
    Some(local_part.to_string())
}

/// Builds the alias file name for one source address.
#[must_use]
pub fn alias_file_name(domain: &str, local_part: &str) -> String {
    format!("qmail-{}-{}", domain_stem(domain), local_part)
}

/// A directory of qmail alias files for one domain.
#[derive(Debug, Clone)]
pub struct AliasStore {
    dir: PathBuf,
    rules: DomainRules,
}

impl AliasStore {
    pub fn new(dir: impl Into<PathBuf>, rules: DomainRules) -> Self {
        Self {
            dir: dir.into(),
            rules,
        }
    }

    #[must_use]
    pub fn rules(&self) -> &DomainRules {
        &self.rules
    }

    /// Enumerates the store and returns a source address for every entry
    /// matching the domain's naming convention. Non-matching entries are
    /// ignored. Order follows the directory enumeration, unsorted.
    pub fn scan(&self) -> QmailResult<Vec<SourceAddress>> {
        let entries = fs::read_dir(&self.dir).map_err(|err| QmailError::Store {
            path: self.dir.clone(),
            source: err,
        })?;

        let mut sources = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| QmailError::Store {
                path: self.dir.clone(),
                source: err,
            })?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            match match_alias_file_name(self.rules.domain(), name) {
                Some(local_part) => {
                    debug!(entry = %name, local_part = %local_part, "matched alias file");
                    sources.push(SourceAddress::new(local_part, self.rules.domain()));
                }
                None => trace!(entry = %name, "skipping non-matching entry"),
            }
        }

        Ok(sources)
    }

    /// Reads and parses the alias file backing one source address.
    ///
    /// An unreadable file is an error for this source address only; callers
    /// scanning a whole store are expected to continue with the next one.
    pub fn redirects(&self, source: &SourceAddress) -> QmailResult<Vec<RedirectTarget>> {
        let path = self
            .dir
            .join(alias_file_name(source.domain(), source.local_part()));
        let content = fs::read_to_string(&path).map_err(|err| QmailError::AliasFile {
            path: path.clone(),
            source: err,
        })?;

        Ok(parse_redirects(source, &self.rules, &content))
    }
}
