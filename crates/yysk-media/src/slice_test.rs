use super::*;

const ALLOWED: [u8; 10] = [2, 4, 6, 8, 10, 12, 14, 16, 18, 20];

// ---------------------------------------------------------------------------
// Fixtures: last hex digit of md5(gallery_id + page), computed once.
// ---------------------------------------------------------------------------

#[test]
fn newest_range_uses_modulus_eight() {
    // md5("42192600001") ends in 'f' (102); 102 % 8 = 6 -> 14
    assert_eq!(slice_count("421926", "00001").get(), 14);
    // md5("42192600002") ends in '5' (53); 53 % 8 = 5 -> 12
    assert_eq!(slice_count("421926", "00002").get(), 12);
}

#[test]
fn middle_range_uses_modulus_ten() {
    // md5("30000000001") ends in 'a' (97); 97 % 10 = 7 -> 16
    assert_eq!(slice_count("300000", "00001").get(), 16);
    // md5("30000000005") ends in '2' (50); 50 % 10 = 0 -> 2
    assert_eq!(slice_count("300000", "00005").get(), 2);
}

#[test]
fn oldest_range_always_defaults() {
    for page in 1..=50 {
        assert_eq!(
            slice_count("100000", &page_number(page)),
            SliceCount::DEFAULT,
            "page {page}"
        );
    }
}

#[test]
fn non_numeric_id_defaults() {
    assert_eq!(slice_count("abc", "00001"), SliceCount::DEFAULT);
    assert_eq!(slice_count("", "00001"), SliceCount::DEFAULT);
}

#[test]
fn negative_id_defaults() {
    assert_eq!(slice_count("-421926", "00001"), SliceCount::DEFAULT);
}

#[test]
fn id_with_trailing_garbage_uses_its_leading_digits() {
    // Range check sees 421925 (modulus 10) while the hash covers the full text:
    // md5("421925a00001") ends in 'f' (102); 102 % 10 = 2 -> 6
    assert_eq!(slice_count("421925a", "00001").get(), 6);
}

#[test]
fn range_boundaries() {
    assert_eq!(leading_integer("268849"), Some(268_849));
    assert!(!(SCHEME_V2_FIRST..SCHEME_V3_FIRST).contains(&268_849));
    assert!((SCHEME_V2_FIRST..SCHEME_V3_FIRST).contains(&268_850));
    assert!((SCHEME_V2_FIRST..SCHEME_V3_FIRST).contains(&421_925));
    assert!(!(SCHEME_V2_FIRST..SCHEME_V3_FIRST).contains(&421_926));
}

#[test]
fn banded_results_stay_in_table() {
    for id in ["268850", "300000", "421925", "421926", "999999", "1200000"] {
        for page in 1..=30 {
            let n = slice_count(id, &page_number(page)).get();
            assert!(ALLOWED.contains(&n), "id {id} page {page} gave {n}");
        }
    }
}

#[test]
fn modulus_eight_never_reaches_top_of_table() {
    for page in 1..=100 {
        let n = slice_count("500000", &page_number(page)).get();
        assert!(n <= 16, "page {page} gave {n}");
    }
}

#[test]
fn repeated_calls_agree() {
    let first = slice_count("421926", "00017");
    for _ in 0..5 {
        assert_eq!(slice_count("421926", "00017"), first);
    }
}

#[test]
fn gallery_page_key_delegates() {
    let key = GalleryPageKey::new("421926", "00001");
    assert_eq!(key.slice_count().get(), 14);
}

#[test]
fn leading_integer_is_lenient() {
    assert_eq!(leading_integer("  42"), Some(42));
    assert_eq!(leading_integer("+7"), Some(7));
    assert_eq!(leading_integer("-7x"), Some(-7));
    assert_eq!(leading_integer("12.9"), Some(12));
    assert_eq!(leading_integer("x12"), None);
    assert_eq!(leading_integer("-"), None);
    assert_eq!(
        leading_integer("99999999999999999999999"),
        Some(i64::MAX)
    );
}

#[test]
fn page_number_is_zero_padded() {
    assert_eq!(page_number(1), "00001");
    assert_eq!(page_number(20), "00020");
    assert_eq!(page_number(123_456), "123456");
}

#[test]
fn unscramble_url_carries_source_and_strips() {
    let endpoint = ServiceEndpoint::new("https://api.yyskweb.com", "key1");
    let url = unscramble_page_url(&endpoint, "18comic", "421926", "cdn.example.org", 1);
    assert_eq!(
        url,
        "https://api.yyskweb.com/unscramble?name=18comic&id=421926\
         &url=https%3A%2F%2Fcdn.example.org%2Fmedia%2Fphotos%2F421926%2F00001.webp\
         &strips=14&key=key1"
    );
}

#[test]
fn unscramble_urls_cover_every_page() {
    let endpoint = ServiceEndpoint::new("https://api.yyskweb.com", "");
    let urls = unscramble_page_urls(&endpoint, "18comic", "421926", "cdn.example.org", 3);
    assert_eq!(urls.len(), 3);
    assert!(urls[0].contains("00001.webp"));
    assert!(urls[2].contains("00003.webp"));
    assert!(urls[1].contains("&strips=12&"));
    assert!(unscramble_page_urls(&endpoint, "18comic", "1", "h", 0).is_empty());
}
