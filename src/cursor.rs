//! Location listing pagination.
//!
//! The provider hands out `next`/`previous` links with every page. Callers
//! treat them as opaque [`PageToken`]s and pass them back unchanged. Browsing
//! is circular: asking past the last page wraps to the first, and asking
//! before the first jumps to the last.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::creature::LocationPage;
use crate::error::{PokedexError, Result};

pub const PAGE_SIZE: u32 = 20;

const LOCATION_AREA_PATH: &str = "location-area";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accepts a token coming back from a client. It must address the
    /// provider's location listing, nothing else, with pages of
    /// [`PAGE_SIZE`] so page numbers stay meaningful.
    pub fn from_client(raw: &str, api_base: &str) -> Result<Self> {
        let raw = raw.trim();
        let listing = listing_url(api_base);
        let rest = raw
            .strip_prefix(&listing)
            .ok_or_else(|| PokedexError::validation(format!("not a location page: {raw}")))?;
        if !(rest.is_empty() || rest.starts_with('?') || rest.starts_with("/?")) {
            return Err(PokedexError::validation(format!(
                "not a location page: {raw}"
            )));
        }
        let token = Self(raw.to_string());
        match token.limit() {
            Some(Some(limit)) if limit != PAGE_SIZE => Err(PokedexError::validation(format!(
                "page size must be {PAGE_SIZE}, got {limit}"
            ))),
            Some(_) => Ok(token),
            None => Err(PokedexError::validation(format!(
                "not a location page: {raw}"
            ))),
        }
    }
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// Provider paging scheme. Nothing outside this block looks inside a token.
impl PageToken {
    pub fn at_offset(api_base: &str, offset: u32) -> Self {
        Self(format!(
            "{}?offset={offset}&limit={PAGE_SIZE}",
            listing_url(api_base)
        ))
    }

    pub fn offset(&self) -> Option<u32> {
        let url = reqwest::Url::parse(&self.0).ok()?;
        let offset = url
            .query_pairs()
            .find(|(key, _)| key == "offset")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(0);
        Some(offset)
    }

    /// `None` when the token isn't a URL; `Some(None)` when it carries no
    /// usable `limit`, which the provider treats as its default page size.
    fn limit(&self) -> Option<Option<u32>> {
        let url = reqwest::Url::parse(&self.0).ok()?;
        Some(
            url.query_pairs()
                .find(|(key, _)| key == "limit")
                .and_then(|(_, value)| value.parse().ok()),
        )
    }
}

fn listing_url(api_base: &str) -> String {
    format!("{}/{LOCATION_AREA_PATH}", api_base.trim_end_matches('/'))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageCursor {
    pub next: Option<PageToken>,
    pub previous: Option<PageToken>,
    pub count: u32,
}

impl PageCursor {
    pub fn from_page(page: &LocationPage) -> Self {
        Self {
            next: page.next.clone(),
            previous: page.previous.clone(),
            count: page.count,
        }
    }

    /// Token for the page after this one; wraps to offset 0 at the end.
    pub fn next_token(&self, api_base: &str) -> PageToken {
        match &self.next {
            Some(token) => token.clone(),
            None => PageToken::at_offset(api_base, 0),
        }
    }

    /// Token for the page before this one; jumps to the last page at the start.
    pub fn previous_token(&self, api_base: &str) -> PageToken {
        match &self.previous {
            Some(token) => token.clone(),
            None => PageToken::at_offset(api_base, last_page_offset(self.count)),
        }
    }

    pub fn current_page_number(&self) -> u32 {
        if let Some(offset) = self.next.as_ref().and_then(PageToken::offset) {
            return (offset / PAGE_SIZE).max(1);
        }
        if let Some(offset) = self.previous.as_ref().and_then(PageToken::offset) {
            return offset / PAGE_SIZE + 2;
        }
        1
    }

    pub fn total_pages(&self) -> u32 {
        self.count.div_ceil(PAGE_SIZE).max(1)
    }
}

pub fn last_page_offset(count: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    (count - 1) / PAGE_SIZE * PAGE_SIZE
}

pub async fn first_page(catalog: &dyn Catalog) -> Result<(PageCursor, LocationPage)> {
    let token = PageToken::at_offset(catalog.api_base(), 0);
    fetch(catalog, &token).await
}

pub async fn next_page(
    catalog: &dyn Catalog,
    cursor: &PageCursor,
) -> Result<(PageCursor, LocationPage)> {
    let token = cursor.next_token(catalog.api_base());
    fetch(catalog, &token).await
}

/// The page before `cursor`. From the first page, or from a cursor that has
/// never loaded a page and so doesn't know the total yet, this is the last
/// page; the total is learned from the first page when needed.
pub async fn previous_page(
    catalog: &dyn Catalog,
    cursor: &PageCursor,
) -> Result<(PageCursor, LocationPage)> {
    if cursor.previous.is_none() && cursor.count == 0 {
        let (first, page) = first_page(catalog).await?;
        if last_page_offset(first.count) == 0 {
            return Ok((first, page));
        }
        let token = first.previous_token(catalog.api_base());
        return fetch(catalog, &token).await;
    }
    let token = cursor.previous_token(catalog.api_base());
    fetch(catalog, &token).await
}

pub async fn fetch(catalog: &dyn Catalog, token: &PageToken) -> Result<(PageCursor, LocationPage)> {
    let page = catalog.list_locations(token).await?;
    Ok((PageCursor::from_page(&page), page))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://pokeapi.co/api/v2";

    fn cursor(next: Option<u32>, previous: Option<u32>, count: u32) -> PageCursor {
        PageCursor {
            next: next.map(|offset| PageToken::at_offset(BASE, offset)),
            previous: previous.map(|offset| PageToken::at_offset(BASE, offset)),
            count,
        }
    }

    #[test]
    fn token_offset_reads_provider_links() {
        let token = PageToken::new("https://pokeapi.co/api/v2/location-area?offset=40&limit=20");
        assert_eq!(token.offset(), Some(40));
        let bare = PageToken::new("https://pokeapi.co/api/v2/location-area");
        assert_eq!(bare.offset(), Some(0));
        assert_eq!(PageToken::new("not a url").offset(), None);
    }

    #[test]
    fn missing_next_wraps_to_first_page() {
        let last = cursor(None, Some(1020), 1054);
        assert_eq!(last.next_token(BASE).offset(), Some(0));
    }

    #[test]
    fn missing_previous_jumps_to_last_page() {
        let first = cursor(Some(20), None, 1054);
        assert_eq!(first.previous_token(BASE).offset(), Some(1040));

        let exact = cursor(Some(20), None, 60);
        assert_eq!(exact.previous_token(BASE).offset(), Some(40));
    }

    #[test]
    fn present_tokens_are_passed_through_unchanged() {
        let raw = "https://pokeapi.co/api/v2/location-area?offset=60&limit=20";
        let current = PageCursor {
            next: Some(PageToken::new(raw)),
            previous: None,
            count: 100,
        };
        assert_eq!(current.next_token(BASE).as_str(), raw);
    }

    #[test]
    fn last_page_offset_handles_edges() {
        assert_eq!(last_page_offset(0), 0);
        assert_eq!(last_page_offset(1), 0);
        assert_eq!(last_page_offset(20), 0);
        assert_eq!(last_page_offset(21), 20);
    }

    #[test]
    fn page_number_is_derived_from_adjacent_tokens() {
        assert_eq!(cursor(Some(20), None, 1054).current_page_number(), 1);
        assert_eq!(cursor(Some(60), Some(20), 1054).current_page_number(), 3);
        assert_eq!(cursor(None, Some(1020), 1054).current_page_number(), 53);
        assert_eq!(cursor(None, None, 7).current_page_number(), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(cursor(None, None, 0).total_pages(), 1);
        assert_eq!(cursor(None, None, 20).total_pages(), 1);
        assert_eq!(cursor(None, None, 1054).total_pages(), 53);
    }

    #[test]
    fn client_tokens_must_address_the_listing() {
        let ok = PageToken::from_client(
            "https://pokeapi.co/api/v2/location-area?offset=20&limit=20",
            BASE,
        );
        assert!(ok.is_ok());
        let other = PageToken::from_client("https://evil.example/location-area", BASE);
        assert!(matches!(other, Err(PokedexError::Validation(_))));
        let sideways = PageToken::from_client("https://pokeapi.co/api/v2/location-area-x", BASE);
        assert!(matches!(sideways, Err(PokedexError::Validation(_))));
    }

    #[test]
    fn client_tokens_must_use_the_fixed_page_size() {
        let small = PageToken::from_client(
            "https://pokeapi.co/api/v2/location-area?offset=30&limit=10",
            BASE,
        );
        assert!(matches!(small, Err(PokedexError::Validation(_))));

        let bare = PageToken::from_client("https://pokeapi.co/api/v2/location-area", BASE);
        assert_eq!(bare.unwrap().offset(), Some(0));
    }
}
