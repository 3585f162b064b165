use std::path::Path;

use crate::error::PathRejected;

/// How entry paths are rewritten during archive create.
///
/// `basedir` and `basename` are independent axes and may be combined:
/// the basedir prefix is stripped first (it is the more specific
/// constraint), then the remainder is reduced to its final component.
#[derive(Debug, Clone, Default)]
pub struct PathPolicy {
    /// Strip all directory components, keep only the trailing filename.
    pub basename: bool,
    /// Required path prefix. Paths without it are rejected; paths with it
    /// have it stripped.
    pub basedir: Option<String>,
}

impl PathPolicy {
    pub fn new(basename: bool, basedir: Option<String>) -> Self {
        Self { basename, basedir }
    }

    pub fn is_identity(&self) -> bool {
        !self.basename && self.basedir.is_none()
    }
}

/// Apply a [`PathPolicy`] to one path.
///
/// Rejection is per-entry: the caller is expected to warn and skip, never
/// to abort the whole run.
pub fn normalize(path: &str, policy: &PathPolicy) -> Result<String, PathRejected> {
    let mut result = path;

    if let Some(prefix) = &policy.basedir {
        let Some(stripped) = result.strip_prefix(prefix.as_str()) else {
            return Err(PathRejected {
                path: path.to_string(),
                prefix: prefix.clone(),
            });
        };
        result = stripped.trim_start_matches('/');
    }

    if policy.basename {
        result = Path::new(result)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(result);
    }

    Ok(result.to_string())
}
