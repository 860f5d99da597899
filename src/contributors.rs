//! Contributors: the accounts shown above the timeline.

use serde::Deserialize;

use crate::filter::FilterRules;
use crate::model::Contributor;

/// JSON shape of one entry in `GET /repos/{owner}/{repo}/contributors`.
#[derive(Deserialize)]
struct RawContributor {
    login: String,
    avatar_url: String,
    html_url: String,
}

/// Decode a contributors listing, dropping bot accounts.
pub fn decode_contributors(
    json: &str,
    rules: &FilterRules,
) -> Result<Vec<Contributor>, serde_json::Error> {
    let raw: Vec<RawContributor> = serde_json::from_str(json)?;

    Ok(raw
        .into_iter()
        .filter(|c| !rules.is_bot(&c.login))
        .map(|c| Contributor {
            name: c.login,
            image: c.avatar_url,
            url: c.html_url,
        })
        .collect())
}
