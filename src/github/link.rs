use super::GitHubError;

/// Extract the next page number from a GitHub `Link` response header.
///
/// The header is a comma-separated list of entries shaped like:
///   <https://api.github.com/repositories/1/pulls?state=all&page=2>; rel="next"
///
/// Returns `Ok(None)` when there is no `rel="next"` entry (the last page).
/// A `next` entry whose URL has no numeric `page` parameter is an error,
/// since silently stopping would drop the remaining pages.
pub fn parse_next_page(header: &str) -> Result<Option<u32>, GitHubError> {
    for entry in header.split(',') {
        let mut parts = entry.split(';').map(str::trim);
        let target = parts.next().unwrap_or_default();
        let is_next = parts.any(|param| {
            param
                .strip_prefix("rel=")
                .map(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "next"))
                .unwrap_or(false)
        });
        if !is_next {
            continue;
        }

        let url = target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .ok_or_else(|| GitHubError::InvalidLink(header.to_string()))?;
        let parsed =
            reqwest::Url::parse(url).map_err(|_| GitHubError::InvalidLink(header.to_string()))?;
        let page = parsed
            .query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse::<u32>().ok())
            .ok_or_else(|| GitHubError::InvalidLink(header.to_string()))?;
        return Ok(Some(page));
    }

    Ok(None)
}
