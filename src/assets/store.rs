use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode as assets_decode,
    foundation::error::{FxError, FxResult},
};

#[derive(Clone, Debug, PartialEq)]
/// Prepared raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Solid-colour image, handy for fixtures and placeholder sprites.
    pub fn solid(width: u32, height: u32, rgba8_premul: [u8; 4]) -> Self {
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul.repeat(width as usize * height as usize)),
        }
    }

    /// Width / height; `None` for an empty image.
    pub fn aspect(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(f64::from(self.width) / f64::from(self.height))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Index of a sprite slot inside a [`SpriteStore`].
pub struct SpriteHandle(pub(crate) u32);

impl SpriteHandle {
    /// Raw slot index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
enum SpriteSlot {
    Ready(PreparedImage),
    Unavailable,
}

#[derive(Clone, Debug)]
/// Small fixed palette of preloaded raster images.
///
/// A slot whose file could not be read or decoded stays registered but never
/// becomes ready; renderers substitute a flat primitive for it.
pub struct SpriteStore {
    root: PathBuf,
    slots: Vec<SpriteSlot>,
    ids_by_path: HashMap<String, SpriteHandle>,
}

impl SpriteStore {
    /// Empty store resolving relative paths under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            slots: Vec::new(),
            ids_by_path: HashMap::new(),
        }
    }

    /// Root directory used when resolving relative asset paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load and decode `source`, returning its handle.
    ///
    /// Only a malformed path is an error. IO and decode failures are logged and
    /// leave the slot not ready.
    pub fn preload(&mut self, source: &str) -> FxResult<SpriteHandle> {
        let norm_path = normalize_rel_path(source)?;
        if let Some(handle) = self.ids_by_path.get(&norm_path) {
            return Ok(*handle);
        }

        let slot = match self
            .read_bytes(&norm_path)
            .and_then(|bytes| assets_decode::decode_image(&bytes))
        {
            Ok(image) => SpriteSlot::Ready(image),
            Err(err) => {
                tracing::warn!(path = %norm_path, error = %err, "sprite unavailable, using flat fallback");
                SpriteSlot::Unavailable
            }
        };
        Ok(self.push_slot(norm_path, slot))
    }

    /// Preload every path in order.
    pub fn preload_all<'a>(
        &mut self,
        sources: impl IntoIterator<Item = &'a str>,
    ) -> FxResult<Vec<SpriteHandle>> {
        sources.into_iter().map(|s| self.preload(s)).collect()
    }

    /// Register an already decoded image under `name`.
    ///
    /// Names are keyed the same way [`SpriteStore::handle_for`] looks them up.
    pub fn insert_image(&mut self, name: &str, image: PreparedImage) -> SpriteHandle {
        let key = slot_key(name);
        if let Some(handle) = self.ids_by_path.get(&key).copied() {
            self.slots[handle.index()] = SpriteSlot::Ready(image);
            return handle;
        }
        self.push_slot(key, SpriteSlot::Ready(image))
    }

    /// Register a slot that is known but not decoded.
    pub fn insert_unavailable(&mut self, name: &str) -> SpriteHandle {
        let key = slot_key(name);
        if let Some(handle) = self.ids_by_path.get(&key) {
            return *handle;
        }
        self.push_slot(key, SpriteSlot::Unavailable)
    }

    /// Handle previously registered for `source`.
    pub fn handle_for(&self, source: &str) -> Option<SpriteHandle> {
        self.ids_by_path.get(&slot_key(source)).copied()
    }

    /// Whether the sprite is decoded and drawable.
    pub fn is_ready(&self, handle: SpriteHandle) -> bool {
        self.ready_image(handle).is_some()
    }

    /// Decoded image for `handle`, if ready.
    pub fn ready_image(&self, handle: SpriteHandle) -> Option<&PreparedImage> {
        match self.slots.get(handle.index()) {
            Some(SpriteSlot::Ready(img)) => Some(img),
            _ => None,
        }
    }

    /// Number of registered slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no slot is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn push_slot(&mut self, key: String, slot: SpriteSlot) -> SpriteHandle {
        let handle = SpriteHandle(self.slots.len() as u32);
        self.slots.push(slot);
        self.ids_by_path.insert(key, handle);
        handle
    }

    fn read_bytes(&self, norm_path: &str) -> FxResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(FxError::from)
    }
}

/// Lookup key: the normalized path, or the raw name when it is not a valid
/// relative path.
fn slot_key(name: &str) -> String {
    normalize_rel_path(name).unwrap_or_else(|_| name.to_string())
}

/// Normalize a relative asset path (forward slashes, no `.`/`..`, non-empty).
pub fn normalize_rel_path(source: &str) -> FxResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(FxError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(FxError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(FxError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(FxError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
