//! Clone URL to browse URL conversion.

/// Convert a remote clone URL into the https base of the hosted repository.
///
/// Examples:
/// - `git@github.com:org/repo.git` -> `https://github.com/org/repo`
/// - `ssh://git@github.com:22/org/repo.git` -> `https://github.com/org/repo`
/// - `https://user@github.com/org/repo.git` -> `https://github.com/org/repo`
///
/// Unrecognized input is returned trimmed, minus any trailing `.git`.
#[must_use]
pub fn normalize_origin(url: &str) -> String {
    let url = url.trim();

    let base = if let Some(rest) = url
        .strip_prefix("ssh://")
        .or_else(|| url.strip_prefix("git://"))
        .or_else(|| url.strip_prefix("git+ssh://"))
    {
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        format!("https://{}/{path}", host_of(authority))
    } else if let Some((scheme, rest)) = url
        .strip_prefix("https://")
        .map(|r| ("https", r))
        .or_else(|| url.strip_prefix("http://").map(|r| ("http", r)))
    {
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
        format!("{scheme}://{host}/{path}")
    } else if let Some((authority, path)) = scp_like(url) {
        format!("https://{}/{path}", host_of(authority))
    } else {
        url.to_owned()
    };

    strip_repo_suffix(&base).to_owned()
}

/// Split `user@host:path` into authority and path.
///
/// Windows drive letters (`C:\...`) and local paths are not scp-like.
fn scp_like(url: &str) -> Option<(&str, &str)> {
    if url.contains("://") {
        return None;
    }
    let (authority, path) = url.split_once(':')?;
    if authority.len() <= 1 || authority.contains('/') || path.starts_with('\\') {
        return None;
    }
    Some((authority, path.trim_start_matches('/')))
}

/// Host part of `user@host:port`.
fn host_of(authority: &str) -> &str {
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    host.split_once(':').map_or(host, |(h, _)| h)
}

fn strip_repo_suffix(url: &str) -> &str {
    let url = url.trim_end_matches('/');
    url.strip_suffix(".git").unwrap_or(url).trim_end_matches('/')
}
