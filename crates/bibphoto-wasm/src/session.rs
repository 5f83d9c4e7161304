//! Page session WASM bindings.
//!
//! [`JsSession`] wraps the core `Session` so the page keeps a single state
//! object across its event handlers. Requests come back as plain objects
//! `{method, url, headers, body}` for the page to pass to `fetch`; response
//! bodies are handed back as text.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsSession({ baseUrl: '', captchaEnabled: true });
//!
//! const req = session.bib_request(code, grecaptcha.getResponse());
//! const res = await fetch(req.url, { method: req.method, headers: req.headers, body: req.body });
//! session.accept_bib(await res.text());
//!
//! session.load_upload(new Uint8Array(await file.arrayBuffer()));
//! const { x, y, width, height } = cropper.getData();
//! session.set_crop_pixels(x, y, width, height);
//! const face = session.paste_to_slot(0);
//! slotImg.src = face.data_url();
//! ```

use bibphoto_core::api::{self, ARCHIVE_FILE_NAME, DOWNLOAD_FAILED_MESSAGE};
use bibphoto_core::config::ClientConfig;
use bibphoto_core::crop::{CropRegion, CroppedImage};
use bibphoto_core::session::{Session, SessionError, Tab, FACE_SLOT_COUNT};
use wasm_bindgen::prelude::*;

use crate::encode::warn_if_oversized;
use crate::types::{js_error, to_js, JsDecodedImage, JsEncodedPayload};

/// Client state for one page load.
#[wasm_bindgen]
pub struct JsSession {
    inner: Session,
}

#[wasm_bindgen]
impl JsSession {
    /// Create a session from `{baseUrl, captchaEnabled, maxPayloadBytes}`.
    /// Missing fields, or an undefined config, take the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsSession, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            ClientConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_error)?
        };
        config.validate().map_err(js_error)?;
        Ok(Self::with_config(config))
    }

    /// Session for an API on the page's own origin,
    /// e.g. `JsSession.for_origin(location.protocol, location.host)`.
    pub fn for_origin(protocol: &str, host: &str) -> JsSession {
        Self::with_config(ClientConfig::for_origin(protocol, host))
    }

    /// Highest unlocked tab: `"code"`, `"faces"` or `"photos"`.
    pub fn unlocked_tab(&self) -> String {
        tab_name(self.inner.unlocked_tab()).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn captcha_enabled(&self) -> bool {
        self.inner.config().captcha_enabled
    }

    #[wasm_bindgen(getter)]
    pub fn max_payload_bytes(&self) -> usize {
        self.inner.config().max_payload_bytes
    }

    // ---- bib lookup -------------------------------------------------------

    pub fn bib_request(
        &mut self,
        code: &str,
        captcha_token: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let request = self
            .inner
            .bib_request(code, captcha_token.as_deref())
            .map_err(js_error)?;
        to_js(&request)
    }

    /// Store the `/bib` response text and return the bib details.
    pub fn accept_bib(&mut self, body: &str) -> Result<JsValue, JsValue> {
        let info = self.inner.accept_bib(body).map_err(js_error)?;
        to_js(info)
    }

    pub fn bib_display(&self) -> Option<String> {
        self.inner.bib_display()
    }

    /// Whether the bib's expiry is already past, by the browser clock.
    pub fn is_bib_expired(&self) -> bool {
        self.inner
            .bib()
            .is_some_and(|bib| bib.is_bib_expired(&now_iso()))
    }

    pub fn is_event_expired(&self) -> bool {
        self.inner
            .bib()
            .is_some_and(|bib| bib.is_event_expired(&now_iso()))
    }

    // ---- crop tool ---------------------------------------------------------

    pub fn load_upload(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_upload(bytes).map(|_| ()).map_err(js_error)
    }

    pub fn load_image(&mut self, image: &JsDecodedImage) -> Result<(), JsValue> {
        self.inner
            .load_image(image.to_decoded())
            .map(|_| ())
            .map_err(js_error)
    }

    pub fn has_active_crop(&self) -> bool {
        self.inner.has_active_crop()
    }

    /// The working image in the crop tool (copied), if one is open.
    pub fn crop_image(&self) -> Option<JsDecodedImage> {
        self.inner
            .crop()
            .map(|crop| JsDecodedImage::from_decoded(crop.image().clone()))
    }

    /// Current normalized crop region, or `undefined` without an open image.
    pub fn crop_region(&self) -> Result<JsValue, JsValue> {
        match self.inner.crop() {
            Some(crop) => to_js(crop.region()),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn set_crop_region(&mut self, region: JsValue) -> Result<(), JsValue> {
        let region: CropRegion = serde_wasm_bindgen::from_value(region).map_err(js_error)?;
        self.inner.adjust_crop(region).map_err(js_error)
    }

    /// Set the crop from the widget's pixel rectangle on `crop_image()`.
    pub fn set_crop_pixels(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), JsValue> {
        self.inner
            .adjust_crop_pixels(x, y, width, height)
            .map_err(js_error)
    }

    pub fn release_crop(&mut self) {
        self.inner.release_crop();
    }

    // ---- face slots --------------------------------------------------------

    /// Crop, compress and store the open image in slot `index` (0-2).
    pub fn paste_to_slot(&mut self, index: usize) -> Result<JsEncodedPayload, JsValue> {
        let max_bytes = self.inner.config().max_payload_bytes;
        match self.inner.paste_to_slot(index) {
            Ok(payload) => {
                warn_if_oversized(payload, max_bytes);
                Ok(JsEncodedPayload::from_payload(payload.clone()))
            }
            Err(e @ SessionError::NoActiveCrop) => {
                web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
                Err(js_error(e))
            }
            Err(e) => Err(js_error(e)),
        }
    }

    /// Store a face already cropped by the page, as canvas RGBA pixels.
    pub fn paste_face_rgba(
        &mut self,
        index: usize,
        rgba: &[u8],
        width: u32,
        height: u32,
    ) -> Result<JsEncodedPayload, JsValue> {
        let face = CroppedImage::from_rgba(width, height, rgba).map_err(js_error)?;
        let max_bytes = self.inner.config().max_payload_bytes;
        let payload = self.inner.paste_face(index, &face).map_err(js_error)?;
        warn_if_oversized(payload, max_bytes);
        Ok(JsEncodedPayload::from_payload(payload.clone()))
    }

    pub fn slot_count(&self) -> usize {
        FACE_SLOT_COUNT
    }

    /// Preview `data:` URL of a slot, if it holds an image.
    pub fn slot_data_url(&self, index: usize) -> Result<Option<String>, JsValue> {
        let slot = self.inner.slot(index).map_err(js_error)?;
        Ok(slot.payload().map(|p| p.to_data_url()))
    }

    pub fn is_slot_used(&self, index: usize) -> Result<bool, JsValue> {
        Ok(self.inner.slot(index).map_err(js_error)?.is_used())
    }

    /// Returns the effective state; an empty slot stays unused.
    pub fn set_slot_used(&mut self, index: usize, used: bool) -> Result<bool, JsValue> {
        self.inner.set_slot_used(index, used).map_err(js_error)
    }

    pub fn clear_slot(&mut self, index: usize) -> Result<(), JsValue> {
        self.inner.clear_slot(index).map_err(js_error)
    }

    pub fn has_selected_faces(&self) -> bool {
        self.inner.has_selected_faces()
    }

    // ---- search ------------------------------------------------------------

    pub fn thumb_request(&self) -> Result<JsValue, JsValue> {
        let request = self.inner.thumb_request().map_err(js_error)?;
        to_js(&request)
    }

    /// Store the `/thumb` response text and return the full thumbnail URLs.
    pub fn accept_thumbs(&mut self, body: &str) -> Result<Vec<String>, JsValue> {
        let response = self.inner.accept_thumbs(body).map_err(js_error)?;
        Ok(response.thumb_urls())
    }

    /// Thumbnail paths as returned by the service, in result order.
    pub fn thumbs(&self) -> Vec<String> {
        self.inner
            .results()
            .map(|r| r.thumbs.clone())
            .unwrap_or_default()
    }

    pub fn results_summary(&self) -> Option<String> {
        self.inner.results_summary()
    }

    /// Advance the search cooldown; call once a second while it runs.
    pub fn tick_cooldown(&mut self) -> bool {
        self.inner.tick_cooldown()
    }

    pub fn is_cooling_down(&self) -> bool {
        self.inner.cooldown().is_active()
    }

    pub fn submit_label(&self) -> String {
        self.inner.cooldown().label()
    }

    // ---- selection & download -----------------------------------------------

    pub fn toggle_thumb(&mut self, thumb: &str) -> Result<bool, JsValue> {
        self.inner.toggle_thumb(thumb).map_err(js_error)
    }

    pub fn set_thumb_selected(&mut self, thumb: &str, selected: bool) -> Result<bool, JsValue> {
        self.inner
            .set_thumb_selected(thumb, selected)
            .map_err(js_error)
    }

    pub fn is_thumb_selected(&self, thumb: &str) -> bool {
        self.inner.selection().is_selected(thumb)
    }

    pub fn select_all(&mut self) {
        self.inner.select_all();
    }

    pub fn select_none(&mut self) {
        self.inner.select_none();
    }

    pub fn select_inverse(&mut self) {
        self.inner.select_inverse();
    }

    pub fn selected_count(&self) -> usize {
        self.inner.selection().selected_count()
    }

    pub fn download_request(&self) -> Result<JsValue, JsValue> {
        let request = self.inner.download_request().map_err(js_error)?;
        to_js(&request)
    }

    pub fn download_prompt(&self) -> String {
        self.inner.download_prompt()
    }
}

impl JsSession {
    fn with_config(config: ClientConfig) -> Self {
        Self {
            inner: Session::new(config),
        }
    }
}

/// Message to show for a failed request body, e.g. a non-2xx `/download`.
#[wasm_bindgen]
pub fn error_message(body: &str) -> String {
    api::error_message(body, DOWNLOAD_FAILED_MESSAGE)
}

/// File name for the downloaded archive.
#[wasm_bindgen]
pub fn archive_file_name() -> String {
    ARCHIVE_FILE_NAME.to_string()
}

fn tab_name(tab: Tab) -> &'static str {
    match tab {
        Tab::Code => "code",
        Tab::Faces => "faces",
        Tab::Photos => "photos",
    }
}

fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}
