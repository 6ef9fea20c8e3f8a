//! Scrambled-gallery commands.

use yysk_core::AppConfig;
use yysk_media::{slice_count, unscramble_page_urls, ServiceEndpoint};

pub(crate) fn run_slice(gallery_id: &str, page: &str) {
    println!("{}", slice_count(gallery_id, page));
}

pub(crate) fn run_pages(
    config: &AppConfig,
    name: &str,
    gallery_id: &str,
    cdn_host: &str,
    count: u32,
) {
    let endpoint = ServiceEndpoint::from_config(config);
    if config.access_key.is_empty() {
        tracing::warn!("YYSK_ACCESS_KEY is not set; the service may reject these URLs");
    }
    for url in unscramble_page_urls(&endpoint, name, gallery_id, cdn_host, count) {
        println!("{url}");
    }
}
