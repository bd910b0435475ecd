use std::collections::{HashMap, HashSet};

/// GPU textures for decoded image references, keyed by `ImageRef::cache_key`.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<String, egui::TextureHandle>,
    pending: HashSet<String>,
    failed: HashMap<String, String>,
}

impl TextureCache {
    pub fn get(&self, key: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(key)
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains(key)
    }

    pub fn failure(&self, key: &str) -> Option<&str> {
        self.failed.get(key).map(String::as_str)
    }

    /// Mark `key` as being decoded. Returns false when it is already cached,
    /// already pending, or known to be undecodable.
    pub fn begin_decode(&mut self, key: &str) -> bool {
        if self.textures.contains_key(key) || self.failed.contains_key(key) {
            return false;
        }
        self.pending.insert(key.to_string())
    }

    /// Upload a decoded image. Ignored when the key was evicted meanwhile.
    pub fn insert(&mut self, ctx: &egui::Context, key: String, image: egui::ColorImage) -> bool {
        if !self.pending.remove(&key) {
            return false;
        }
        let texture = ctx.load_texture(key.clone(), image, egui::TextureOptions::LINEAR);
        self.textures.insert(key, texture);
        true
    }

    pub fn fail(&mut self, key: String, message: String) {
        if self.pending.remove(&key) {
            self.failed.insert(key, message);
        }
    }

    /// Drop everything not in `keep`.
    pub fn retain(&mut self, keep: &HashSet<String>) {
        self.textures.retain(|k, _| keep.contains(k));
        self.pending.retain(|k| keep.contains(k));
        self.failed.retain(|k, _| keep.contains(k));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.textures.len()
    }
}
