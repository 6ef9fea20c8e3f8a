//! Prefix/suffix factoring of similar URLs.
//!
//! Page images of one work usually share everything except a numeric file
//! name, so sending `(prefix, middles, suffix)` is far shorter than sending
//! every URL in full.

use serde::Serialize;

use crate::encode::encode_component;

/// Lossless factoring of a string list: `prefix + files[i] + suffix == urls[i]`.
///
/// `files` holds the raw middles. A single input, or a list of identical
/// inputs, is carried entirely in `prefix` with no files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompressedUrlSet {
    pub prefix: String,
    pub files: Vec<String>,
    pub suffix: String,
}

impl CompressedUrlSet {
    /// Rebuild the original list.
    ///
    /// With no files the set stands for the prefix alone, or for nothing at
    /// all when the prefix is empty too.
    #[must_use]
    pub fn reconstruct(&self) -> Vec<String> {
        if self.files.is_empty() {
            return if self.prefix.is_empty() && self.suffix.is_empty() {
                Vec::new()
            } else {
                vec![format!("{}{}", self.prefix, self.suffix)]
            };
        }
        self.files
            .iter()
            .map(|file| format!("{}{file}{}", self.prefix, self.suffix))
            .collect()
    }

    /// The `files` query value: each middle percent-encoded, joined by `|`.
    ///
    /// `|` is always escaped inside a component, so it is unambiguous as a
    /// separator.
    #[must_use]
    pub fn files_param(&self) -> String {
        self.files
            .iter()
            .map(|f| encode_component(f))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Factor `urls` into their longest common prefix, longest common suffix of
/// what remains, and the differing middles.
///
/// Matching is done per `char`, so every part stays valid UTF-8.
#[must_use]
pub fn compress<S: AsRef<str>>(urls: &[S]) -> CompressedUrlSet {
    let Some((first, rest)) = urls.split_first() else {
        return CompressedUrlSet::default();
    };
    let first = first.as_ref();

    if rest.is_empty() {
        return CompressedUrlSet {
            prefix: first.to_owned(),
            ..CompressedUrlSet::default()
        };
    }

    let prefix_len = common_prefix_len(first, rest.iter().map(|u| u.as_ref()));
    let prefix = &first[..prefix_len];

    if prefix_len == first.len() && rest.iter().all(|u| u.as_ref() == first) {
        return CompressedUrlSet {
            prefix: prefix.to_owned(),
            ..CompressedUrlSet::default()
        };
    }

    let remainders: Vec<&str> = urls.iter().map(|u| &u.as_ref()[prefix_len..]).collect();
    let suffix_len = common_suffix_len(&remainders);

    let files = remainders
        .iter()
        .map(|r| r[..r.len() - suffix_len].to_owned())
        .collect();
    let suffix = remainders[0][remainders[0].len() - suffix_len..].to_owned();

    CompressedUrlSet {
        prefix: prefix.to_owned(),
        files,
        suffix,
    }
}

/// Byte length of the longest prefix of `first` shared by every string in
/// `others`, always on a char boundary.
fn common_prefix_len<'a>(first: &str, others: impl Iterator<Item = &'a str> + Clone) -> usize {
    for (offset, ch) in first.char_indices() {
        let end = offset + ch.len_utf8();
        let mismatch = others
            .clone()
            .any(|other| other.get(offset..end) != Some(&first[offset..end]));
        if mismatch {
            return offset;
        }
    }
    first.len()
}

/// Byte length of the longest suffix shared by every string in `parts`,
/// scanning backward from the end of the shortest one.
fn common_suffix_len(parts: &[&str]) -> usize {
    let Some(shortest) = parts.iter().min_by_key(|p| p.len()) else {
        return 0;
    };

    let mut len = 0;
    for ch in shortest.chars().rev() {
        let candidate = len + ch.len_utf8();
        let tail = &shortest[shortest.len() - candidate..];
        if !parts.iter().all(|p| p.ends_with(tail)) {
            break;
        }
        len = candidate;
    }
    len
}

#[cfg(test)]
#[path = "compress_test.rs"]
mod tests;
