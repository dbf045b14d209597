use crate::analysis::AnalysisResult;
use crate::config::Config;
use crate::error::{RenderError, Result};
use crate::gemini::GeminiClient;
use crate::options::RenderOptions;
use crate::render::GeneratedImage;
use crate::upload::ImagePayload;
use reqwest::Client;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// One-slot gate: at most one holder at a time, no queue.
#[derive(Debug, Default)]
pub struct BusyFlag(AtomicBool);

pub struct BusyGuard<'a>(&'a AtomicBool);

impl BusyFlag {
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.0))
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// State owned by one user: current options, the uploaded photo, and the
/// render/analysis busy flags. Locks are never held across an await.
pub struct Session {
    http: Client,
    config: Config,
    options: Mutex<RenderOptions>,
    image: Mutex<Option<ImagePayload>>,
    rendering: BusyFlag,
    analyzing: BusyFlag,
}

impl Session {
    pub fn new(http: Client, config: Config) -> Self {
        Self {
            http,
            config,
            options: Mutex::new(RenderOptions::default()),
            image: Mutex::new(None),
            rendering: BusyFlag::default(),
            analyzing: BusyFlag::default(),
        }
    }

    /// Reports a missing credential up front so the caller can show a
    /// configuration screen instead of failing mid-request.
    pub fn configuration_error(&self) -> Option<RenderError> {
        self.config.require_api_key().err()
    }

    pub fn options(&self) -> RenderOptions {
        lock(&self.options).clone()
    }

    pub fn set_options(&self, options: RenderOptions) {
        *lock(&self.options) = options;
    }

    pub fn update_options(&self, f: impl FnOnce(&mut RenderOptions)) {
        f(&mut lock(&self.options));
    }

    pub fn image(&self) -> Option<ImagePayload> {
        lock(&self.image).clone()
    }

    /// Replaces the uploaded photo. A rejected upload clears the previous one.
    pub fn upload_bytes(&self, data: Vec<u8>, mime_type: &str) -> Result<()> {
        self.store_upload(ImagePayload::new(data, mime_type))
    }

    pub fn upload_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.store_upload(ImagePayload::from_path(path))
    }

    fn store_upload(&self, payload: Result<ImagePayload>) -> Result<()> {
        let mut slot = lock(&self.image);
        match payload {
            Ok(image) => {
                log::info!("Uploaded {} image ({} bytes)", image.mime_type(), image.size());
                *slot = Some(image);
                Ok(())
            }
            Err(e) => {
                *slot = None;
                Err(e)
            }
        }
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering.is_busy()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing.is_busy()
    }

    /// Optional pre-step. On success the suggested category and scene become
    /// the current options; on any failure the options are left as they were.
    pub async fn analyze(&self) -> Option<AnalysisResult> {
        let _guard = match self.analyzing.try_acquire() {
            Some(guard) => guard,
            None => {
                log::debug!("Analysis already in flight, skipping");
                return None;
            }
        };
        let image = self.image()?;

        let outcome = match GeminiClient::new(self.http.clone(), &self.config) {
            Ok(client) => client.analyze_product(&image).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => {
                self.update_options(|options| {
                    options.category = result.category;
                    options.mockup_style = result.mockup_style.clone();
                });
                Some(result)
            }
            Err(e) => {
                log::warn!("Product analysis skipped: {}", e);
                None
            }
        }
    }

    /// Runs one render with the current options and photo. Configuration and
    /// input problems are reported before anything is sent.
    pub async fn generate(&self) -> Result<GeneratedImage> {
        let _guard = self.rendering.try_acquire().ok_or(RenderError::Busy)?;

        let client = GeminiClient::new(self.http.clone(), &self.config)?;
        let image = self.image().ok_or_else(|| {
            RenderError::Validation("Please upload a product image first.".into())
        })?;
        let options = self.options();
        options.validate()?;

        client.generate_render(&options, &image).await
    }
}
