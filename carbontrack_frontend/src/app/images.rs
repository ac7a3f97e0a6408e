use std::collections::{HashMap, HashSet};
use std::sync::mpsc::Sender;

use eframe::egui::{self, Color32, TextureHandle};
use log::error;

use crate::api::SharedApi;

use super::messages::AppMessage;
use super::state::LoadedImage;
use super::tasks;

/// Post images keyed by resolved URL, downloaded at most once each.
pub struct ImageCache {
    api: SharedApi,
    tx: Sender<AppMessage>,
    textures: HashMap<String, TextureHandle>,
    loading: HashSet<String>,
    pending: HashMap<String, LoadedImage>,
    errors: HashMap<String, String>,
}

impl ImageCache {
    pub fn new(api: SharedApi, tx: Sender<AppMessage>) -> Self {
        Self {
            api,
            tx,
            textures: HashMap::new(),
            loading: HashSet::new(),
            pending: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn finish(&mut self, url: String, result: Result<LoadedImage, String>) {
        self.loading.remove(&url);
        match result {
            Ok(img) => {
                self.pending.insert(url, img);
            }
            Err(e) => {
                error!("Failed to load image {url}: {e}");
                self.errors.insert(url, e);
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, url: &str, alt: &str, max_width: f32) {
        if let Some(pending) = self.pending.remove(url) {
            let color = egui::ColorImage::from_rgba_unmultiplied(pending.size, &pending.pixels);
            let tex = ui
                .ctx()
                .load_texture(url, color, egui::TextureOptions::default());
            self.textures.insert(url.to_string(), tex);
        }

        if let Some(tex) = self.textures.get(url) {
            ui.add(egui::Image::from_texture(tex).max_width(max_width))
                .on_hover_text(alt);
        } else if let Some(err) = self.errors.get(url) {
            ui.colored_label(Color32::LIGHT_RED, format!("Image failed: {err}"));
        } else {
            if !self.loading.contains(url) {
                self.loading.insert(url.to_string());
                tasks::download_image(self.api.clone(), self.tx.clone(), url.to_string());
            }
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label(format!("Loading {alt}"));
            });
        }
    }
}
