// SPDX-License-Identifier: MPL-2.0
//! Frame discovery and decoding for turntable subjects.
//!
//! A subject root holds still images named by a [`FrameTemplate`]
//! (`img01.jpg`, `img02.jpg`, ...). Discovery probes every candidate index
//! up to a cap concurrently and keeps the ones that exist, in ascending
//! index order. Missing indices are skipped, never reordered.
//!
//! Roots are either local directories or `http(s)://` base URLs. Both are
//! served through the [`FrameStore`] trait so the discovery logic is shared.

use futures_util::future::join_all;
use iced::widget::image;
use image_rs::{ImageBuffer, Rgba, RgbaImage};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Timeout applied to every HTTP probe and fetch.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// File naming pattern: `{prefix}{index:0width}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTemplate {
    pub prefix: String,
    pub index_width: usize,
    pub extension: String,
}

impl Default for FrameTemplate {
    fn default() -> Self {
        Self {
            prefix: "img".to_string(),
            index_width: 2,
            extension: "jpg".to_string(),
        }
    }
}

impl FrameTemplate {
    /// File name for a 1-based frame index.
    #[must_use]
    pub fn file_name(&self, index: usize) -> String {
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            index,
            self.extension,
            width = self.index_width
        )
    }
}

/// Where a subject's frames live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectRoot {
    Local(PathBuf),
    Remote(String),
}

impl SubjectRoot {
    /// Classifies a configured location. Relative local paths are resolved
    /// against `base_dir` when one is given.
    #[must_use]
    pub fn parse(location: &str, base_dir: Option<&Path>) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return SubjectRoot::Remote(location.trim_end_matches('/').to_string());
        }

        let path = PathBuf::from(location);
        match base_dir {
            Some(base) if path.is_relative() => SubjectRoot::Local(base.join(path)),
            _ => SubjectRoot::Local(path),
        }
    }

    /// Location of a frame file under this root.
    #[must_use]
    pub fn location(&self, file_name: &str) -> FrameLocation {
        match self {
            SubjectRoot::Local(dir) => FrameLocation::File(dir.join(file_name)),
            SubjectRoot::Remote(base) => FrameLocation::Url(format!("{}/{}", base, file_name)),
        }
    }
}

impl fmt::Display for SubjectRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectRoot::Local(dir) => write!(f, "{}", dir.display()),
            SubjectRoot::Remote(url) => f.write_str(url),
        }
    }
}

/// A turntable subject resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: String,
    pub label: String,
    pub root: SubjectRoot,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameLocation {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for FrameLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameLocation::File(path) => write!(f, "{}", path.display()),
            FrameLocation::Url(url) => f.write_str(url),
        }
    }
}

/// Why a subject could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The root itself cannot be used.
    SubjectUnavailable { subject: String, reason: String },

    /// Frames were found but none of them decoded.
    NoDecodableFrames { subject: String },
}

impl LoadError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            LoadError::SubjectUnavailable { .. } => "turntable-error-unavailable",
            LoadError::NoDecodableFrames { .. } => "turntable-error-undecodable",
        }
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            LoadError::SubjectUnavailable { subject, .. }
            | LoadError::NoDecodableFrames { subject } => subject,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::SubjectUnavailable { subject, reason } => {
                write!(f, "Subject '{}' is unavailable: {}", subject, reason)
            }
            LoadError::NoDecodableFrames { subject } => {
                write!(f, "No frame of subject '{}' could be decoded", subject)
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Borrowed RGBA view over a frame's pixel buffer.
pub type FramePixels<'a> = ImageBuffer<Rgba<u8>, &'a [u8]>;

/// One decoded frame.
///
/// The decoded buffer is owned by the render handle alone; [`Frame::pixels`]
/// borrows it for CPU sampling.
#[derive(Clone)]
pub struct Frame {
    /// 1-based source index from the file name.
    pub index: usize,
    pub location: FrameLocation,
    width: u32,
    height: u32,
    handle: image::Handle,
}

impl Frame {
    #[must_use]
    pub fn new(index: usize, location: FrameLocation, pixels: RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        Self {
            index,
            location,
            width,
            height,
            handle: image::Handle::from_rgba(width, height, pixels.into_raw()),
        }
    }

    /// Pixels shared with [`Frame::handle`].
    #[must_use]
    pub fn pixels(&self) -> Option<FramePixels<'_>> {
        match &self.handle {
            image::Handle::Rgba { pixels, .. } => {
                ImageBuffer::from_raw(self.width, self.height, &pixels[..])
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn handle(&self) -> &image::Handle {
        &self.handle
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("index", &self.index)
            .field("location", &self.location)
            .field("dimensions", &self.dimensions())
            .finish()
    }
}

/// Ordered, immutable frames of one subject.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    subject: String,
    frames: Vec<Frame>,
}

impl FrameSequence {
    #[must_use]
    pub fn new(subject: impl Into<String>, mut frames: Vec<Frame>) -> Self {
        frames.sort_by_key(|frame| frame.index);
        frames.dedup_by_key(|frame| frame.index);
        Self {
            subject: subject.into(),
            frames,
        }
    }

    #[must_use]
    pub fn empty(subject: impl Into<String>) -> Self {
        Self::new(subject, Vec::new())
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Frame> {
        self.frames.get(position)
    }

    /// Source indices of the loaded frames.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.frames.iter().map(|frame| frame.index).collect()
    }
}

/// Backend that can check and read frame locations.
pub trait FrameStore: Send + Sync {
    /// Verifies the root can be used at all.
    fn check_root(&self, root: &SubjectRoot) -> impl Future<Output = Result<(), String>> + Send;

    /// Existence probe. Failures count as "does not exist".
    fn exists(&self, location: &FrameLocation) -> impl Future<Output = bool> + Send;

    fn fetch(&self, location: &FrameLocation) -> impl Future<Output = Result<Vec<u8>, String>> + Send;
}

/// Frames stored in a local directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl FrameStore for LocalStore {
    async fn check_root(&self, root: &SubjectRoot) -> Result<(), String> {
        match root {
            SubjectRoot::Local(dir) => match tokio::fs::metadata(dir).await {
                Ok(meta) if meta.is_dir() => Ok(()),
                Ok(_) => Err(format!("{} is not a directory", dir.display())),
                Err(err) => Err(format!("{}: {}", dir.display(), err)),
            },
            SubjectRoot::Remote(url) => Err(format!("{} is not a local directory", url)),
        }
    }

    async fn exists(&self, location: &FrameLocation) -> bool {
        let FrameLocation::File(path) = location else {
            return false;
        };
        match tokio::fs::metadata(path).await {
            Ok(meta) => meta.is_file(),
            Err(err) => {
                tracing::debug!(%location, %err, "frame probe failed");
                false
            }
        }
    }

    async fn fetch(&self, location: &FrameLocation) -> Result<Vec<u8>, String> {
        match location {
            FrameLocation::File(path) => tokio::fs::read(path).await.map_err(|e| e.to_string()),
            FrameLocation::Url(url) => Err(format!("{} is not a local file", url)),
        }
    }
}

/// Frames served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new() -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|err| err.to_string())?;
        Ok(Self { client })
    }
}

impl FrameStore for HttpStore {
    async fn check_root(&self, root: &SubjectRoot) -> Result<(), String> {
        match root {
            SubjectRoot::Remote(url) => reqwest::Url::parse(url)
                .map(|_| ())
                .map_err(|err| format!("{}: {}", url, err)),
            SubjectRoot::Local(dir) => Err(format!("{} is not a URL", dir.display())),
        }
    }

    async fn exists(&self, location: &FrameLocation) -> bool {
        let FrameLocation::Url(url) = location else {
            return false;
        };
        match self.client.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::debug!(%location, %err, "frame probe failed");
                false
            }
        }
    }

    async fn fetch(&self, location: &FrameLocation) -> Result<Vec<u8>, String> {
        let FrameLocation::Url(url) = location else {
            return Err(format!("{} is not a URL", location));
        };
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| err.to_string())?;
        let bytes = response.bytes().await.map_err(|err| err.to_string())?;
        Ok(bytes.to_vec())
    }
}

/// Probes indices `1..=limit` concurrently and returns the ones that exist,
/// in ascending index order.
pub async fn discover<S: FrameStore>(
    store: &S,
    root: &SubjectRoot,
    template: &FrameTemplate,
    limit: usize,
) -> Vec<(usize, FrameLocation)> {
    let candidates: Vec<(usize, FrameLocation)> = (1..=limit)
        .map(|index| (index, root.location(&template.file_name(index))))
        .collect();

    let probes = candidates.iter().map(|(_, location)| store.exists(location));
    let found = join_all(probes).await;

    candidates
        .into_iter()
        .zip(found)
        .filter_map(|(candidate, exists)| exists.then_some(candidate))
        .collect()
}

/// Discovers and decodes all frames of `subject` through `store`.
///
/// Returns an empty sequence when no candidate exists. Frames that fail to
/// fetch or decode are dropped.
pub async fn load_with<S: FrameStore>(
    store: &S,
    subject: &Subject,
    template: &FrameTemplate,
    limit: usize,
) -> Result<FrameSequence, LoadError> {
    store
        .check_root(&subject.root)
        .await
        .map_err(|reason| LoadError::SubjectUnavailable {
            subject: subject.id.clone(),
            reason,
        })?;

    let found = discover(store, &subject.root, template, limit).await;
    if found.is_empty() {
        tracing::info!(subject = %subject.id, root = %subject.root, "no frames found");
        return Ok(FrameSequence::empty(subject.id.clone()));
    }

    let discovered = found.len();
    let decoded = join_all(
        found
            .into_iter()
            .map(|(index, location)| decode_frame(store, index, location)),
    )
    .await;
    let frames: Vec<Frame> = decoded.into_iter().flatten().collect();

    if frames.is_empty() {
        return Err(LoadError::NoDecodableFrames {
            subject: subject.id.clone(),
        });
    }

    tracing::info!(
        subject = %subject.id,
        discovered,
        decoded = frames.len(),
        "frame sequence loaded"
    );
    Ok(FrameSequence::new(subject.id.clone(), frames))
}

/// Loads a subject with the store matching its root kind.
pub async fn load_sequence(
    subject: Subject,
    template: FrameTemplate,
    limit: usize,
) -> Result<FrameSequence, LoadError> {
    match &subject.root {
        SubjectRoot::Local(_) => load_with(&LocalStore, &subject, &template, limit).await,
        SubjectRoot::Remote(_) => {
            let store = HttpStore::new().map_err(|reason| LoadError::SubjectUnavailable {
                subject: subject.id.clone(),
                reason,
            })?;
            load_with(&store, &subject, &template, limit).await
        }
    }
}

async fn decode_frame<S: FrameStore>(
    store: &S,
    index: usize,
    location: FrameLocation,
) -> Option<Frame> {
    let bytes = match store.fetch(&location).await {
        Ok(bytes) => bytes,
        Err(reason) => {
            tracing::warn!(%location, %reason, "failed to fetch frame");
            return None;
        }
    };

    let decoded =
        tokio::task::spawn_blocking(move || image_rs::load_from_memory(&bytes).map(|img| img.to_rgba8()))
            .await;

    match decoded {
        Ok(Ok(pixels)) => Some(Frame::new(index, location, pixels)),
        Ok(Err(err)) => {
            tracing::warn!(%location, %err, "failed to decode frame");
            None
        }
        Err(err) => {
            tracing::warn!(%location, %err, "frame decoding task failed");
            None
        }
    }
}
