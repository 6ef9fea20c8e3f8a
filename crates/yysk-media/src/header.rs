//! Preview and waterfall header images for feed items.
//!
//! Both images are rendered by the remote composition service from a
//! compressed image list. Building the URLs is pure; warming the service's
//! cache for them is handed to a [`Prewarmer`] and never waited on.

use serde::Serialize;
use yysk_core::HeaderImageOptions;

use crate::compress::{compress, CompressedUrlSet};
use crate::endpoint::{QueryBuilder, ServiceEndpoint};
use crate::prewarm::{PrewarmHandle, PrewarmTarget, Prewarmer};
use crate::sample::representative_sample;

const PREVIEW_ROUTE: &str = "animate";
const WATERFALL_ROUTE: &str = "waterfall";

/// The two service URLs built for one work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderImages {
    pub preview: String,
    pub waterfall: String,
}

pub struct HeaderImageBuilder {
    endpoint: ServiceEndpoint,
    prewarmer: Option<Prewarmer>,
}

impl HeaderImageBuilder {
    /// A builder that only builds URLs.
    #[must_use]
    pub fn new(endpoint: ServiceEndpoint) -> Self {
        Self {
            endpoint,
            prewarmer: None,
        }
    }

    /// Also warm every URL this builder hands out.
    #[must_use]
    pub fn with_prewarmer(mut self, prewarmer: Prewarmer) -> Self {
        self.prewarmer = Some(prewarmer);
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Animated preview of `options.image_size` representative images.
    ///
    /// Carries `duration`, `transition` and `fps` only when positive.
    #[must_use]
    pub fn preview_url<S: AsRef<str>>(
        &self,
        name: &str,
        id: &str,
        urls: &[S],
        options: &HeaderImageOptions,
    ) -> String {
        let options = options.normalized();
        let sample = representative_sample(urls, options.image_size);
        let query = image_set_query(&self.endpoint, PREVIEW_ROUTE, name, id, &compress(&sample))
            .positive_param("duration", options.image_duration)
            .positive_param("transition", options.transition_duration)
            .positive_param("fps", options.image_fps);
        self.endpoint.finish(query)
    }

    /// Grid of the first `options.waterfall_target_count` images (all when `0`).
    ///
    /// Carries `column` only when positive.
    #[must_use]
    pub fn waterfall_url<S: AsRef<str>>(
        &self,
        name: &str,
        id: &str,
        urls: &[S],
        options: &HeaderImageOptions,
    ) -> String {
        let options = options.normalized();
        let take = match options.waterfall_target_count {
            0 => urls.len(),
            n => n.min(urls.len()),
        };
        let query = image_set_query(
            &self.endpoint,
            WATERFALL_ROUTE,
            name,
            id,
            &compress(&urls[..take]),
        )
        .positive_param("column", options.target_column);
        self.endpoint.finish(query)
    }

    /// Preview URL plus a background warm-up of it.
    pub fn build_preview<S: AsRef<str>>(
        &self,
        name: &str,
        id: &str,
        urls: &[S],
        options: &HeaderImageOptions,
    ) -> (String, PrewarmHandle) {
        let url = self.preview_url(name, id, urls, options);
        let handle = self.prewarm_one(&url);
        (url, handle)
    }

    /// Waterfall URL plus a background warm-up of it.
    pub fn build_waterfall<S: AsRef<str>>(
        &self,
        name: &str,
        id: &str,
        urls: &[S],
        options: &HeaderImageOptions,
    ) -> (String, PrewarmHandle) {
        let url = self.waterfall_url(name, id, urls, options);
        let handle = self.prewarm_one(&url);
        (url, handle)
    }

    /// Both URLs, warmed together with a single cache lookup.
    pub fn build<S: AsRef<str>>(
        &self,
        name: &str,
        id: &str,
        urls: &[S],
        options: &HeaderImageOptions,
    ) -> (HeaderImages, PrewarmHandle) {
        let images = HeaderImages {
            preview: self.preview_url(name, id, urls, options),
            waterfall: self.waterfall_url(name, id, urls, options),
        };
        let handle = match &self.prewarmer {
            Some(prewarmer) => prewarmer.spawn_batch(vec![
                PrewarmTarget::for_url(&images.preview),
                PrewarmTarget::for_url(&images.waterfall),
            ]),
            None => PrewarmHandle::none(),
        };
        (images, handle)
    }

    fn prewarm_one(&self, url: &str) -> PrewarmHandle {
        match &self.prewarmer {
            Some(prewarmer) => prewarmer.spawn(PrewarmTarget::for_url(url)),
            None => PrewarmHandle::none(),
        }
    }
}

/// `name`, `id`, `prefix`, `files`, `suffix` in that order.
fn image_set_query(
    endpoint: &ServiceEndpoint,
    route: &str,
    name: &str,
    id: &str,
    set: &CompressedUrlSet,
) -> QueryBuilder {
    endpoint
        .query(route)
        .param("name", name)
        .param("id", id)
        .param("prefix", &set.prefix)
        .raw_param("files", &set.files_param())
        .param("suffix", &set.suffix)
}

#[cfg(test)]
#[path = "header_test.rs"]
mod tests;
