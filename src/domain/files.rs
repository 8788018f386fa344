// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/files.rs
//
// Multi-file picker state: capped, accept-filtered list of picked files.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constant::{SHORT_NAME_KEEP, SHORT_NAME_LIMIT};

const OCTET_STREAM: &str = "application/octet-stream";

/// A picked file as the picker sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    /// MIME type, e.g. `image/png`. Empty when unknown.
    pub mime: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size_bytes: 0,
            path: None,
        }
    }

    /// Build an entry for a file on disk, guessing the MIME type from the
    /// extension.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size_bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        Self {
            name,
            mime: mime_from_path(path).to_string(),
            size_bytes,
            path: Some(path.to_path_buf()),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// Display name: names longer than 10 characters become the first 7
    /// followed by `...`.
    pub fn short_name(&self) -> String {
        if self.name.chars().count() > SHORT_NAME_LIMIT {
            let head: String = self.name.chars().take(SHORT_NAME_KEEP).collect();
            format!("{head}...")
        } else {
            self.name.clone()
        }
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }
}

/// Guess a MIME type from a file extension.
///
/// Documents and text are matched by hand; raster extensions go through
/// `image::ImageFormat` (feature `image`).
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "svg" => return "image/svg+xml",
        "pdf" => return "application/pdf",
        "txt" => return "text/plain",
        "json" => return "application/json",
        _ => {}
    }
    raster_mime(path).unwrap_or(OCTET_STREAM)
}

#[cfg(feature = "image")]
fn raster_mime(path: &Path) -> Option<&'static str> {
    image::ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type())
}

#[cfg(not(feature = "image"))]
fn raster_mime(_path: &Path) -> Option<&'static str> {
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AcceptRule {
    /// `image/*`
    TypeWildcard(String),
    /// `image/png`
    Exact(String),
    /// `.png`
    Extension(String),
}

/// Parsed `accept` attribute of a file input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AcceptFilter {
    rules: Vec<AcceptRule>,
}

impl AcceptFilter {
    /// Parse a comma separated list of `type/*`, `type/subtype` and `.ext`.
    /// An empty list or `*` accepts everything.
    pub fn parse(text: &str) -> Self {
        let rules = text
            .split(',')
            .map(|part| part.trim().to_ascii_lowercase())
            .filter(|part| !part.is_empty() && part != "*" && part != "*/*")
            .map(|part| {
                if let Some(ext) = part.strip_prefix('.') {
                    AcceptRule::Extension(ext.to_string())
                } else if let Some(major) = part.strip_suffix("/*") {
                    AcceptRule::TypeWildcard(major.to_string())
                } else {
                    AcceptRule::Exact(part)
                }
            })
            .collect();
        Self { rules }
    }

    pub fn accepts_all(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn accepts(&self, file: &FileEntry) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        let mime = file.mime.to_ascii_lowercase();
        let ext = file.extension();
        self.rules.iter().any(|rule| match rule {
            AcceptRule::TypeWildcard(major) => mime
                .split_once('/')
                .is_some_and(|(file_major, _)| file_major == major),
            AcceptRule::Exact(exact) => mime == *exact,
            AcceptRule::Extension(wanted) => ext.as_deref() == Some(wanted.as_str()),
        })
    }
}

/// Keeps the files picked so far, up to `max`.
#[derive(Debug, Clone)]
pub struct FileCollector {
    max: usize,
    accept: AcceptFilter,
    files: Vec<FileEntry>,
}

impl FileCollector {
    pub fn new(max: usize, accept: AcceptFilter) -> Self {
        Self {
            max,
            accept,
            files: Vec::new(),
        }
    }

    /// Single-file picker, as used by the cropper.
    pub fn single(accept: AcceptFilter) -> Self {
        Self::new(1, accept)
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Picking more than one file at once is allowed.
    pub fn is_multiple(&self) -> bool {
        self.max > 1
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn is_full(&self) -> bool {
        self.files.len() >= self.max
    }

    /// Append `files`, dropping rejected ones and anything past the cap.
    ///
    /// Returns how many of the given files were kept.
    pub fn add<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = FileEntry>,
    {
        let before = self.files.len();
        for file in files {
            if !self.accept.accepts(&file) {
                warn!("file '{}' ({}) rejected by accept filter", file.name, file.mime);
                continue;
            }
            if self.is_full() {
                warn!("file '{}' dropped: picker holds at most {}", file.name, self.max);
                continue;
            }
            self.files.push(file);
        }
        self.files.len() - before
    }

    /// Replace the whole selection with one file. Returns `false` when the
    /// file is rejected (the previous selection is kept).
    pub fn replace(&mut self, file: FileEntry) -> bool {
        if !self.accept.accepts(&file) {
            warn!("file '{}' ({}) rejected by accept filter", file.name, file.mime);
            return false;
        }
        self.files.clear();
        if self.max > 0 {
            self.files.push(file);
        }
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<FileEntry> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}
