use leadreach_core::SearchQuery;

/// `leads_{industry}_{location}_{date}.csv` with every non-alphanumeric
/// character replaced by `_` and letters lowercased.
pub fn export_filename(query: &SearchQuery, date: &str) -> String {
    format!(
        "leads_{}_{}_{}.csv",
        sanitize(&query.industry),
        sanitize(&query.location),
        date
    )
}

/// `outreach_{stamp}.txt` for a saved generation result.
pub fn outreach_filename(stamp: &str) -> String {
    format!("outreach_{}.txt", sanitize(stamp))
}

fn sanitize(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
