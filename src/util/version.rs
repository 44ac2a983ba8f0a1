pub const APP_NAME: &str = "Trade Price Ranker";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

/// Tag of the build if it was made from a tagged commit, else the crate version.
pub fn version_label() -> String {
    version_label_from(GIT_TAG, APP_VERSION)
}

fn version_label_from(tag: Option<&str>, crate_version: &str) -> String {
    match tag {
        Some(tag) if tag.starts_with(|c: char| c == 'v' || c == 'V') => tag.to_string(),
        Some(tag) => format!("v{tag}"),
        None => format!("v{crate_version}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_prefers_tag() {
        assert_eq!(version_label_from(Some("v1.2.0"), "1.0.0"), "v1.2.0");
        assert_eq!(version_label_from(Some("1.2.0"), "1.0.0"), "v1.2.0");
        assert_eq!(version_label_from(None, "1.0.0"), "v1.0.0");
    }
}
