//! Shared WebSocket adapter state.

use std::sync::Arc;

use url::Url;

use crate::outbound::realtime::BroadcastChangeFeed;

/// Browser origins permitted to open the change feed.
///
/// Entries are compared by their serialised origin, so
/// `http://localhost:5173/` and `http://localhost:5173` are the same entry.
#[derive(Debug, Clone, Default)]
pub struct OriginAllowList {
    origins: Arc<[String]>,
}

impl OriginAllowList {
    /// Parse configured origins; fails on the first entry that is not a URL.
    pub fn parse<I, S>(entries: I) -> Result<Self, url::ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let origins = entries
            .into_iter()
            .map(|entry| Url::parse(entry.as_ref().trim()).map(|url| url.origin().ascii_serialization()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            origins: origins.into(),
        })
    }

    /// Whether the parsed `Origin` header value is on the list.
    pub fn allows(&self, origin: &Url) -> bool {
        let serialised = origin.origin().ascii_serialization();
        self.origins.iter().any(|allowed| *allowed == serialised)
    }
}

/// Dependencies for the `/ws` endpoint.
#[derive(Clone)]
pub struct WsState {
    pub feed: BroadcastChangeFeed,
    pub origins: OriginAllowList,
}

impl WsState {
    pub fn new(feed: BroadcastChangeFeed, origins: OriginAllowList) -> Self {
        Self { feed, origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:5173", true)]
    #[case("http://localhost:5173/", true)]
    #[case("http://localhost:3000", false)]
    #[case("https://localhost:5173", false)]
    #[case("https://desk.hotelfountain.com", true)]
    #[case("https://desk.hotelfountain.com.evil.test", false)]
    fn compares_serialised_origins(#[case] origin: &str, #[case] allowed: bool) {
        let list = OriginAllowList::parse(["http://localhost:5173/", "https://desk.hotelfountain.com"])
            .expect("valid origins");
        let origin = Url::parse(origin).expect("valid url");
        assert_eq!(list.allows(&origin), allowed);
    }

    #[rstest]
    fn rejects_malformed_entries() {
        assert!(OriginAllowList::parse(["not a url"]).is_err());
    }
}
