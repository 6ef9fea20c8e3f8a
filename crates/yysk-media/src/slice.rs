//! Strip counts for scrambled gallery pages.
//!
//! The gallery host cuts every page image into horizontal strips and shuffles
//! them. The number of strips is derived from an MD5 of the gallery id and the
//! page number, with a modulus that depends on which id range the gallery
//! falls into. The unscramble endpoint needs that count to reassemble a page.

use md5::{Digest, Md5};

use crate::encode::encode_component;
use crate::endpoint::ServiceEndpoint;

/// Galleries in `SCHEME_V2_FIRST..=SCHEME_V3_FIRST - 1` use modulus 10.
const SCHEME_V2_FIRST: i64 = 268_850;
/// Galleries from here on use modulus 8.
const SCHEME_V3_FIRST: i64 = 421_926;

const SLICE_TABLE: [u8; 10] = [2, 4, 6, 8, 10, 12, 14, 16, 18, 20];

/// Number of strips a page image is split into.
///
/// Always one of `2, 4, …, 20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliceCount(u8);

impl SliceCount {
    pub const DEFAULT: SliceCount = SliceCount(10);

    fn from_selector(selector: u32) -> Self {
        usize::try_from(selector)
            .ok()
            .and_then(|i| SLICE_TABLE.get(i))
            .map_or(Self::DEFAULT, |&n| SliceCount(n))
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for SliceCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for SliceCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A gallery id and a formatted page number, e.g. `("421926", "00001")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPageKey {
    pub gallery_id: String,
    pub page: String,
}

impl GalleryPageKey {
    #[must_use]
    pub fn new(gallery_id: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            gallery_id: gallery_id.into(),
            page: page.into(),
        }
    }

    #[must_use]
    pub fn slice_count(&self) -> SliceCount {
        slice_count(&self.gallery_id, &self.page)
    }
}

/// Strip count for one page of a gallery.
///
/// `page` is used verbatim, so callers must pass the zero-padded form the
/// host uses (see [`page_number`]). Ids below the first banded range, and ids
/// with no leading digits at all, skip the modulus; the raw character code is
/// then always above 9 and the default count of 10 comes back.
#[must_use]
pub fn slice_count(gallery_id: &str, page: &str) -> SliceCount {
    let digest = Md5::digest(format!("{gallery_id}{page}").as_bytes());
    // Last hex digit of the digest is the low nibble of the last byte.
    let last_nibble = digest.last().map_or(0, |b| b & 0x0f);
    let code = u32::from(hex_digit(last_nibble));

    let selector = match leading_integer(gallery_id) {
        Some(id) if (SCHEME_V2_FIRST..SCHEME_V3_FIRST).contains(&id) => code % 10,
        Some(id) if id >= SCHEME_V3_FIRST => code % 8,
        _ => code,
    };

    SliceCount::from_selector(selector)
}

/// 1-based page number in the host's five-digit form (`1` → `"00001"`).
#[must_use]
pub fn page_number(page: u32) -> String {
    format!("{page:05}")
}

/// Unscramble-endpoint URL for a single page.
///
/// The source image is `https://{cdn_host}/media/photos/{gallery_id}/{page}.webp`.
#[must_use]
pub fn unscramble_page_url(
    endpoint: &ServiceEndpoint,
    name: &str,
    gallery_id: &str,
    cdn_host: &str,
    page: u32,
) -> String {
    let page = page_number(page);
    let source = format!("https://{cdn_host}/media/photos/{gallery_id}/{page}.webp");
    let strips = slice_count(gallery_id, &page);

    let query = endpoint
        .query("unscramble")
        .param("name", name)
        .param("id", gallery_id)
        .raw_param("url", &encode_component(&source))
        .raw_param("strips", &strips.to_string());
    endpoint.finish(query)
}

/// Unscramble-endpoint URLs for pages `1..=pages`.
#[must_use]
pub fn unscramble_page_urls(
    endpoint: &ServiceEndpoint,
    name: &str,
    gallery_id: &str,
    cdn_host: &str,
    pages: u32,
) -> Vec<String> {
    (1..=pages)
        .map(|page| unscramble_page_url(endpoint, name, gallery_id, cdn_host, page))
        .collect()
}

fn hex_digit(nibble: u8) -> u8 {
    if nibble < 10 {
        b'0' + nibble
    } else {
        b'a' + (nibble - 10)
    }
}

/// Lenient base-10 parse: leading whitespace, an optional sign, then the
/// longest run of digits. Trailing garbage is ignored; no digits at all is
/// `None`. Out-of-range values saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = rest[..digits_len].bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
#[path = "slice_test.rs"]
mod tests;
