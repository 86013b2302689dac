//! Source location parsing and commit validation.
//!
//! Source URLs are VCS-agnostic: any `scheme://host/owner/repo` works, with
//! GitLab-style nested groups (`group/subgroup/project`) kept whole. The
//! decentralized schemes `ipfs` and `ar` carry no owner or repository.

use std::fmt;

use crate::error::SourceError;

/// Hosting platform inferred from the host name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsHost {
    GitHub,
    GitLab,
    Codeberg,
    Bitbucket,
    SelfHosted,
    Decentralized,
}

impl VcsHost {
    fn detect(host: &str) -> Self {
        let host = host.to_ascii_lowercase();
        if host.contains("github.com") {
            Self::GitHub
        } else if host.contains("gitlab.com") || host.contains("gitlab.") {
            Self::GitLab
        } else if host.contains("codeberg.org") {
            Self::Codeberg
        } else if host.contains("bitbucket.org") || host.contains("bitbucket.") {
            Self::Bitbucket
        } else {
            Self::SelfHosted
        }
    }
}

impl fmt::Display for VcsHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Codeberg => "codeberg",
            Self::Bitbucket => "bitbucket",
            Self::SelfHosted => "self-hosted",
            Self::Decentralized => "decentralized",
        })
    }
}

/// A parsed source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl {
    /// The URL exactly as given. This is what goes into metadata.
    pub original: String,
    pub scheme: String,
    pub host: String,
    pub vcs: VcsHost,
    /// Owner, organisation or (GitLab) full group path. Empty for
    /// decentralized sources.
    pub owner: String,
    /// Empty for decentralized sources.
    pub repo: String,
}

impl SourceUrl {
    /// Parse `url`.
    ///
    /// # Errors
    ///
    /// - [`SourceError::MalformedUrl`] if there is no `scheme://host`.
    /// - [`SourceError::MissingRepository`] if a VCS URL has fewer than two
    ///   path segments after trimming slashes and a `.git` suffix.
    pub fn parse(url: &str) -> Result<Self, SourceError> {
        let malformed = || SourceError::MalformedUrl {
            url: url.to_string(),
        };
        let (scheme, rest) = url.trim().split_once("://").ok_or_else(malformed)?;
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        // Drop credentials and port.
        let host = authority.rsplit('@').next().unwrap_or(authority);
        let host = host.split(':').next().unwrap_or(host);
        if scheme.is_empty() || host.is_empty() {
            return Err(malformed());
        }
        let scheme = scheme.to_ascii_lowercase();

        if scheme == "ipfs" || scheme == "ar" {
            return Ok(Self {
                original: url.to_string(),
                scheme,
                host: host.to_string(),
                vcs: VcsHost::Decentralized,
                owner: String::new(),
                repo: String::new(),
            });
        }

        let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or(path);
        let path = path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 2 {
            return Err(SourceError::MissingRepository {
                url: url.to_string(),
            });
        }

        let vcs = VcsHost::detect(host);
        let (owner, repo) = if vcs == VcsHost::GitLab {
            let (repo, groups) = segments.split_last().ok_or_else(malformed)?;
            (groups.join("/"), (*repo).to_string())
        } else {
            (segments[0].to_string(), segments[1].to_string())
        };

        Ok(Self {
            original: url.to_string(),
            scheme,
            host: host.to_string(),
            vcs,
            owner,
            repo,
        })
    }

    /// HTTPS clone URL, or `None` for decentralized sources.
    #[must_use]
    pub fn clone_url(&self) -> Option<String> {
        if self.vcs == VcsHost::Decentralized {
            return None;
        }
        Some(format!("https://{}/{}/{}.git", self.host, self.owner, self.repo))
    }
}

/// Accept a SHA-1 (40) or SHA-256 (64) commit id in hex.
///
/// # Errors
///
/// [`SourceError::InvalidCommit`] for any other length or non-hex input.
pub fn validate_commit(commit: &str) -> Result<(), SourceError> {
    let ok = matches!(commit.len(), 40 | 64) && commit.chars().all(|c| c.is_ascii_hexdigit());
    if ok {
        Ok(())
    } else {
        Err(SourceError::InvalidCommit {
            commit: commit.to_string(),
        })
    }
}
