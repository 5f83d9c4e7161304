//! Client session state.
//!
//! A [`Session`] holds everything the page needs between user actions: the
//! looked-up bib, three face slots, the image open in the crop tool, the
//! latest search results and their selection, and the search cooldown. The
//! page owns one session and calls into it from its event handlers; it
//! never keeps its own copies of this state.
//!
//! The flow is linear and each step unlocks the next tab:
//!
//! 1. [`Session::bib_request`] / [`Session::accept_bib`] unlock [`Tab::Faces`]
//! 2. [`Session::load_image`] / [`Session::paste_to_slot`] fill face slots
//! 3. [`Session::thumb_request`] / [`Session::accept_thumbs`] unlock [`Tab::Photos`]
//! 4. [`Session::download_request`] asks for the selected photos

mod cooldown;
mod selection;
mod slots;

pub use cooldown::{SubmitCooldown, SUBMIT_COOLDOWN_SECS};
pub use selection::ThumbSelection;
pub use slots::{CropSession, FaceSlot, FACE_SLOT_COUNT};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::api::{
    parse_response, ApiError, BibInfo, BibRequest, DownloadRequest, PreparedRequest,
    ThumbRequest, ThumbResponse, BIB_PATH, CAPTCHA_HEADER, DOWNLOAD_PATH, THUMB_PATH,
};
use crate::compress::{compress_jpeg, EncodedPayload};
use crate::config::ClientConfig;
use crate::crop::{check_pixels, crop_face, CropError, CropRegion, CroppedImage};
use crate::decode::{decode_upload, resize_to_fit, DecodeError, DecodedImage, FilterType};
use crate::encode::EncodeError;

/// Longest edge of the image kept in the crop tool.
pub const MAX_WORKING_EDGE: u32 = 2048;

pub const NO_PHOTOS_MESSAGE: &str = "No photos found for the bib and face uploaded.";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please enter your invitation code.")]
    EmptyCode,

    #[error("Please complete the CAPTCHA to proceed.")]
    CaptchaRequired,

    #[error("No bib has been looked up yet")]
    NoBib,

    #[error("No active crop to paste from")]
    NoActiveCrop,

    #[error("Face slot {0} does not exist")]
    InvalidSlot(usize),

    #[error("Please wait {0} seconds before searching again")]
    CoolingDown(u32),

    #[error("Please select at least one image to download.")]
    NoSelection,

    #[error("Unknown photo: {0}")]
    UnknownThumb(String),

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Page tabs, in the order they unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Code = 0,
    Faces = 1,
    Photos = 2,
}

#[derive(Debug)]
pub struct Session {
    config: ClientConfig,
    pending_code: Option<String>,
    bib: Option<BibInfo>,
    slots: [FaceSlot; FACE_SLOT_COUNT],
    crop: Option<CropSession>,
    results: Option<ThumbResponse>,
    selection: ThumbSelection,
    cooldown: SubmitCooldown,
}

impl Session {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            pending_code: None,
            bib: None,
            slots: Default::default(),
            crop: None,
            results: None,
            selection: ThumbSelection::default(),
            cooldown: SubmitCooldown::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Highest tab the user may open.
    pub fn unlocked_tab(&self) -> Tab {
        if self.bib.is_none() {
            Tab::Code
        } else if self.results.is_some() {
            Tab::Photos
        } else {
            Tab::Faces
        }
    }

    pub fn is_unlocked(&self, tab: Tab) -> bool {
        tab <= self.unlocked_tab()
    }

    // ---- bib lookup -------------------------------------------------------

    /// Build the `/bib` lookup. With CAPTCHA enabled a non-empty token is
    /// required and sent as a header.
    pub fn bib_request(
        &mut self,
        code: &str,
        captcha_token: Option<&str>,
    ) -> Result<PreparedRequest, SessionError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(SessionError::EmptyCode);
        }
        let token = captcha_token.filter(|t| !t.is_empty());
        if self.config.captcha_enabled && token.is_none() {
            return Err(SessionError::CaptchaRequired);
        }

        let mut request = PreparedRequest::post_json(
            &self.config,
            BIB_PATH,
            &BibRequest {
                code: code.to_string(),
            },
        )?;
        if let Some(token) = token {
            request = request.with_header(CAPTCHA_HEADER, token);
        }
        self.pending_code = Some(code.to_string());
        Ok(request)
    }

    /// Store the `/bib` response.
    ///
    /// On an `{error}` body the previous bib is forgotten and the page falls
    /// back to the code tab. A new bib discards earlier search results.
    pub fn accept_bib(&mut self, body: &str) -> Result<&BibInfo, SessionError> {
        let mut info: BibInfo = match parse_response(body) {
            Ok(info) => info,
            Err(e) => {
                self.bib = None;
                self.clear_results();
                return Err(e.into());
            }
        };
        if info.code.is_none() {
            info.code = self.pending_code.clone();
        }

        info!(bib = %info.bib, event = %info.event_name, "bib accepted");
        self.clear_results();
        Ok(self.bib.insert(info))
    }

    pub fn bib(&self) -> Option<&BibInfo> {
        self.bib.as_ref()
    }

    /// Header line for the later tabs.
    pub fn bib_display(&self) -> Option<String> {
        self.bib.as_ref().map(BibInfo::display_line)
    }

    fn code(&self) -> Result<String, SessionError> {
        self.bib
            .as_ref()
            .and_then(|b| b.code.clone())
            .ok_or(SessionError::NoBib)
    }

    // ---- crop tool ---------------------------------------------------------

    /// Decode an upload and open it in the crop tool.
    pub fn load_upload(&mut self, bytes: &[u8]) -> Result<&CropSession, SessionError> {
        let image = decode_upload(bytes)?;
        self.load_image(image)
    }

    /// Open `image` in the crop tool, replacing any image already open.
    pub fn load_image(&mut self, image: DecodedImage) -> Result<&CropSession, SessionError> {
        if image.is_empty() {
            return Err(CropError::EmptyImage.into());
        }
        check_pixels(&image)?;
        let working = resize_to_fit(&image, MAX_WORKING_EDGE, FilterType::Bilinear)?;
        info!(width = working.width, height = working.height, "crop opened");
        Ok(self.crop.insert(CropSession::open(working)))
    }

    pub fn crop(&self) -> Option<&CropSession> {
        self.crop.as_ref()
    }

    pub fn has_active_crop(&self) -> bool {
        self.crop.is_some()
    }

    /// Move the crop region of the open image.
    pub fn adjust_crop(&mut self, region: CropRegion) -> Result<(), SessionError> {
        if !region.is_finite() {
            return Err(CropError::InvalidRegion.into());
        }
        let crop = self.crop.as_mut().ok_or(SessionError::NoActiveCrop)?;
        crop.set_region(region);
        Ok(())
    }

    /// Move the crop region using pixel coordinates of the open working
    /// image, as a crop widget reports them.
    pub fn adjust_crop_pixels(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), SessionError> {
        let crop = self.crop.as_ref().ok_or(SessionError::NoActiveCrop)?;
        let region = CropRegion::from_pixels(x, y, width, height, crop.image());
        self.adjust_crop(region)
    }

    /// Close the crop tool without pasting.
    pub fn release_crop(&mut self) {
        self.crop = None;
    }

    // ---- face slots --------------------------------------------------------

    /// Crop the open image, compress it into slot `index`, and close the crop
    /// tool. The crop stays open if anything fails.
    pub fn paste_to_slot(&mut self, index: usize) -> Result<&EncodedPayload, SessionError> {
        Self::check_slot(index)?;
        let crop = self.crop.as_ref().ok_or(SessionError::NoActiveCrop)?;
        let face = crop_face(crop.image(), crop.region())?;
        let payload = compress_jpeg(&face, &self.config.compression_settings())?;

        self.crop = None;
        Ok(self.store(index, payload))
    }

    /// Compress an already cropped face into slot `index`, e.g. pixels read
    /// back from the page's own crop widget. Closes the crop tool.
    pub fn paste_face(
        &mut self,
        index: usize,
        face: &CroppedImage,
    ) -> Result<&EncodedPayload, SessionError> {
        Self::check_slot(index)?;
        let payload = compress_jpeg(face, &self.config.compression_settings())?;

        self.crop = None;
        Ok(self.store(index, payload))
    }

    fn store(&mut self, index: usize, payload: EncodedPayload) -> &EncodedPayload {
        info!(
            slot = index,
            size = payload.byte_length(),
            quality = payload.quality(),
            "face stored"
        );
        self.slots[index].fill(payload)
    }

    fn check_slot(index: usize) -> Result<(), SessionError> {
        if index >= FACE_SLOT_COUNT {
            return Err(SessionError::InvalidSlot(index));
        }
        Ok(())
    }

    pub fn slot(&self, index: usize) -> Result<&FaceSlot, SessionError> {
        Self::check_slot(index)?;
        Ok(&self.slots[index])
    }

    pub fn slots(&self) -> &[FaceSlot; FACE_SLOT_COUNT] {
        &self.slots
    }

    /// Include or exclude a slot. Returns the effective state; an empty
    /// slot always stays excluded.
    pub fn set_slot_used(&mut self, index: usize, used: bool) -> Result<bool, SessionError> {
        Self::check_slot(index)?;
        Ok(self.slots[index].set_used(used))
    }

    pub fn clear_slot(&mut self, index: usize) -> Result<(), SessionError> {
        Self::check_slot(index)?;
        self.slots[index].clear();
        Ok(())
    }

    /// Whether any face will be sent. The page confirms with the user
    /// before searching without one.
    pub fn has_selected_faces(&self) -> bool {
        self.slots.iter().any(FaceSlot::is_used)
    }

    // ---- search ------------------------------------------------------------

    /// Build the `/thumb` search from the used slots, in slot order.
    pub fn thumb_request(&self) -> Result<PreparedRequest, SessionError> {
        if let Some(remaining) = self.cooldown.remaining() {
            return Err(SessionError::CoolingDown(remaining));
        }
        let code = self.code()?;
        let images = self
            .slots
            .iter()
            .filter(|slot| slot.is_used())
            .filter_map(FaceSlot::payload)
            .map(EncodedPayload::to_data_url)
            .collect();

        Ok(PreparedRequest::post_json(
            &self.config,
            THUMB_PATH,
            &ThumbRequest { images, code },
        )?)
    }

    /// Store search results, select all of them and start the cooldown.
    pub fn accept_thumbs(&mut self, body: &str) -> Result<&ThumbResponse, SessionError> {
        let response: ThumbResponse = parse_response(body)?;

        info!(count = response.thumbs.len(), "search results received");
        self.selection = ThumbSelection::all_of(&response.thumbs);
        self.cooldown.start(SUBMIT_COOLDOWN_SECS);
        Ok(self.results.insert(response))
    }

    pub fn results(&self) -> Option<&ThumbResponse> {
        self.results.as_ref()
    }

    /// Result count line for the photos tab.
    pub fn results_summary(&self) -> Option<String> {
        self.results.as_ref().map(|r| match r.thumbs.len() {
            0 => NO_PHOTOS_MESSAGE.to_string(),
            n => format!("Total photos found: {n}"),
        })
    }

    fn clear_results(&mut self) {
        self.results = None;
        self.selection = ThumbSelection::default();
    }

    pub fn cooldown(&self) -> &SubmitCooldown {
        &self.cooldown
    }

    /// Advance the search cooldown by one second.
    pub fn tick_cooldown(&mut self) -> bool {
        self.cooldown.tick()
    }

    // ---- selection & download -----------------------------------------------

    pub fn selection(&self) -> &ThumbSelection {
        &self.selection
    }

    pub fn toggle_thumb(&mut self, thumb: &str) -> Result<bool, SessionError> {
        self.selection
            .toggle(thumb)
            .ok_or_else(|| SessionError::UnknownThumb(thumb.to_string()))
    }

    pub fn set_thumb_selected(
        &mut self,
        thumb: &str,
        selected: bool,
    ) -> Result<bool, SessionError> {
        self.selection
            .set(thumb, selected)
            .ok_or_else(|| SessionError::UnknownThumb(thumb.to_string()))
    }

    pub fn select_all(&mut self) {
        self.selection.select_all();
    }

    pub fn select_none(&mut self) {
        self.selection.select_none();
    }

    pub fn select_inverse(&mut self) {
        self.selection.select_inverse();
    }

    /// Build the `/download` request for the selected photos.
    pub fn download_request(&self) -> Result<PreparedRequest, SessionError> {
        let thumbs = self.selection.selected();
        if thumbs.is_empty() {
            return Err(SessionError::NoSelection);
        }
        let code = self.code()?;
        Ok(PreparedRequest::post_json(
            &self.config,
            DOWNLOAD_PATH,
            &DownloadRequest { thumbs, code },
        )?)
    }

    /// Confirmation prompt shown before downloading.
    pub fn download_prompt(&self) -> String {
        format!(
            "You have selected {} thumbnail(s). Do you want to proceed with the download?",
            self.selection.selected_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::DEFAULT_MAX_BYTES;
    use crate::crop::{FACE_HEIGHT, FACE_WIDTH};

    const BIB_OK: &str = r#"{"event_id": 3, "bib": "A1024", "code": "XK9-22", "name": "Lee",
        "bib_expiry": "2026-12-31", "event_name": "City Marathon", "event_expiry": "2026-12-31"}"#;

    const THUMBS_OK: &str = r#"{"main-url": "https://cdn.example.com/file/",
        "thumbs": ["3/thumb/a.jpg", "3/thumb/b.jpg", "3/thumb/c.jpg"]}"#;

    fn no_captcha() -> ClientConfig {
        ClientConfig {
            base_url: "http://localhost:8080".to_string(),
            captcha_enabled: false,
            ..ClientConfig::default()
        }
    }

    fn photo(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 60]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn session_with_bib() -> Session {
        let mut session = Session::new(no_captcha());
        session.bib_request("XK9-22", None).unwrap();
        session.accept_bib(BIB_OK).unwrap();
        session
    }

    #[test]
    fn test_new_session_is_locked() {
        let session = Session::new(ClientConfig::default());
        assert_eq!(session.unlocked_tab(), Tab::Code);
        assert!(!session.is_unlocked(Tab::Faces));
        assert!(session.bib_display().is_none());
    }

    #[test]
    fn test_captcha_gate() {
        let mut session = Session::new(ClientConfig::default());

        assert!(matches!(
            session.bib_request("XK9", None),
            Err(SessionError::CaptchaRequired)
        ));
        assert!(matches!(
            session.bib_request("XK9", Some("")),
            Err(SessionError::CaptchaRequired)
        ));

        let request = session.bib_request("XK9", Some("tok")).unwrap();
        assert_eq!(request.url, "/bib");
        assert_eq!(request.headers[CAPTCHA_HEADER], "tok");
    }

    #[test]
    fn test_bib_request_without_captcha() {
        let mut session = Session::new(no_captcha());
        let request = session.bib_request("  XK9-22 ", None).unwrap();

        assert_eq!(request.url, "http://localhost:8080/bib");
        assert_eq!(request.body, r#"{"code":"XK9-22"}"#);
        assert!(!request.headers.contains_key(CAPTCHA_HEADER));
    }

    #[test]
    fn test_empty_code() {
        let mut session = Session::new(no_captcha());
        assert!(matches!(
            session.bib_request("   ", None),
            Err(SessionError::EmptyCode)
        ));
    }

    #[test]
    fn test_accept_bib_unlocks_faces() {
        let session = session_with_bib();

        assert_eq!(session.unlocked_tab(), Tab::Faces);
        assert_eq!(
            session.bib_display().unwrap(),
            "BIB: A1024 Lee (Event: City Marathon)"
        );
    }

    #[test]
    fn test_accept_bib_fills_missing_code() {
        let mut session = Session::new(no_captcha());
        session.bib_request("ZZ-1", None).unwrap();
        let info = session
            .accept_bib(r#"{"bib": "7", "bib_expiry": "2027-01-01", "event_name": "Ride",
                            "event_expiry": "2027-01-01"}"#)
            .unwrap();

        assert_eq!(info.code.as_deref(), Some("ZZ-1"));
    }

    #[test]
    fn test_bib_error_relocks() {
        let mut session = session_with_bib();
        let err = session
            .accept_bib(r#"{"error": "Bib has expired"}"#)
            .unwrap_err();

        assert_eq!(err.to_string(), "Bib has expired");
        assert_eq!(session.unlocked_tab(), Tab::Code);
        assert!(matches!(session.thumb_request(), Err(SessionError::NoBib)));
    }

    #[test]
    fn test_paste_without_crop() {
        let mut session = session_with_bib();
        assert!(matches!(
            session.paste_to_slot(0),
            Err(SessionError::NoActiveCrop)
        ));
    }

    #[test]
    fn test_paste_fills_slot_and_releases_crop() {
        let mut session = session_with_bib();
        session.load_image(photo(400, 300)).unwrap();
        assert!(session.has_active_crop());

        let payload = session.paste_to_slot(1).unwrap();
        assert!(payload.fits(DEFAULT_MAX_BYTES));
        assert_eq!(payload.media_type(), "image/jpeg");

        assert!(!session.has_active_crop());
        assert!(session.slot(1).unwrap().is_used());
        assert!(!session.slot(0).unwrap().has_image());
    }

    #[test]
    fn test_invalid_slot_keeps_crop() {
        let mut session = session_with_bib();
        session.load_image(photo(100, 100)).unwrap();

        assert!(matches!(
            session.paste_to_slot(3),
            Err(SessionError::InvalidSlot(3))
        ));
        assert!(session.has_active_crop());
    }

    #[test]
    fn test_loading_new_image_replaces_crop() {
        let mut session = Session::new(no_captcha());
        session.load_image(photo(100, 80)).unwrap();
        session.adjust_crop(CropRegion::new(0.0, 0.0, 0.5, 0.5)).unwrap();

        let crop = session.load_image(photo(60, 90)).unwrap();
        assert_eq!(crop.image().width, 60);
        assert_ne!(*crop.region(), CropRegion::new(0.0, 0.0, 0.5, 0.5));
    }

    #[test]
    fn test_large_upload_is_downscaled() {
        let mut session = Session::new(no_captcha());
        let crop = session.load_image(photo(2560, 1920)).unwrap();

        assert_eq!(crop.image().width, MAX_WORKING_EDGE);
        assert_eq!(crop.image().height, 1536);
    }

    #[test]
    fn test_short_pixel_buffer_is_rejected() {
        let mut session = session_with_bib();
        let short = DecodedImage {
            width: 100,
            height: 100,
            pixels: vec![7u8; 100 * 10 * 3],
        };

        assert!(matches!(
            session.load_image(short),
            Err(SessionError::Crop(CropError::InvalidPixelData { .. }))
        ));
        assert!(!session.has_active_crop());
        assert!(matches!(
            session.paste_to_slot(0),
            Err(SessionError::NoActiveCrop)
        ));
    }

    #[test]
    fn test_adjust_crop_pixels() {
        let mut session = Session::new(no_captcha());
        assert!(matches!(
            session.adjust_crop_pixels(0.0, 0.0, 10.0, 10.0),
            Err(SessionError::NoActiveCrop)
        ));

        session.load_image(photo(400, 200)).unwrap();
        session.adjust_crop_pixels(100.0, 50.0, 200.0, 100.0).unwrap();
        assert_eq!(
            *session.crop().unwrap().region(),
            CropRegion::new(0.25, 0.25, 0.5, 0.5)
        );

        let face = session.paste_to_slot(0).unwrap();
        assert!(face.byte_length() > 0);
    }

    #[test]
    fn test_adjust_crop_requires_open_image() {
        let mut session = Session::new(no_captcha());
        assert!(matches!(
            session.adjust_crop(CropRegion::full()),
            Err(SessionError::NoActiveCrop)
        ));

        session.load_image(photo(10, 10)).unwrap();
        assert!(matches!(
            session.adjust_crop(CropRegion::new(f64::INFINITY, 0.0, 1.0, 1.0)),
            Err(SessionError::Crop(CropError::InvalidRegion))
        ));
    }

    #[test]
    fn test_paste_face_replaces_previous_payload() {
        let mut session = session_with_bib();
        let grey = CroppedImage::from_rgb(
            FACE_WIDTH,
            FACE_HEIGHT,
            vec![128u8; (FACE_WIDTH * FACE_HEIGHT * 3) as usize],
        )
        .unwrap();
        let white = CroppedImage::from_rgb(
            FACE_WIDTH,
            FACE_HEIGHT,
            vec![255u8; (FACE_WIDTH * FACE_HEIGHT * 3) as usize],
        )
        .unwrap();

        let first = session.paste_face(0, &grey).unwrap().clone();
        let second = session.paste_face(0, &white).unwrap().clone();

        assert_ne!(first, second);
        assert_eq!(session.slot(0).unwrap().payload(), Some(&second));
    }

    #[test]
    fn test_slot_use_toggle() {
        let mut session = session_with_bib();
        assert!(!session.set_slot_used(2, true).unwrap());

        session.load_image(photo(50, 50)).unwrap();
        session.paste_to_slot(2).unwrap();
        assert!(session.has_selected_faces());

        assert!(!session.set_slot_used(2, false).unwrap());
        assert!(!session.has_selected_faces());

        session.clear_slot(2).unwrap();
        assert!(!session.slot(2).unwrap().has_image());
        assert!(matches!(
            session.set_slot_used(5, true),
            Err(SessionError::InvalidSlot(5))
        ));
    }

    #[test]
    fn test_thumb_request_sends_used_faces_in_order() {
        let mut session = session_with_bib();
        for index in [2, 0] {
            session.load_image(photo(80, 100)).unwrap();
            session.paste_to_slot(index).unwrap();
        }
        session.load_image(photo(80, 100)).unwrap();
        session.paste_to_slot(1).unwrap();
        session.set_slot_used(1, false).unwrap();

        let request = session.thumb_request().unwrap();
        let body: ThumbRequest = serde_json::from_str(&request.body).unwrap();

        assert_eq!(request.url, "http://localhost:8080/thumb");
        assert_eq!(body.code, "XK9-22");
        assert_eq!(body.images.len(), 2);
        assert_eq!(
            body.images[0],
            session.slot(0).unwrap().payload().unwrap().to_data_url()
        );
        assert_eq!(
            body.images[1],
            session.slot(2).unwrap().payload().unwrap().to_data_url()
        );
    }

    #[test]
    fn test_thumb_request_without_faces_is_allowed() {
        let session = session_with_bib();
        assert!(!session.has_selected_faces());

        let body: ThumbRequest =
            serde_json::from_str(&session.thumb_request().unwrap().body).unwrap();
        assert!(body.images.is_empty());
    }

    #[test]
    fn test_accept_thumbs_unlocks_photos_and_starts_cooldown() {
        let mut session = session_with_bib();
        session.accept_thumbs(THUMBS_OK).unwrap();

        assert_eq!(session.unlocked_tab(), Tab::Photos);
        assert_eq!(session.selection().selected_count(), 3);
        assert_eq!(session.results_summary().unwrap(), "Total photos found: 3");
        assert_eq!(session.cooldown().label(), "Submit (60)");
        assert!(matches!(
            session.thumb_request(),
            Err(SessionError::CoolingDown(60))
        ));

        for _ in 0..59 {
            session.tick_cooldown();
        }
        assert!(matches!(
            session.thumb_request(),
            Err(SessionError::CoolingDown(1))
        ));

        assert!(!session.tick_cooldown());
        assert_eq!(session.cooldown().label(), "Submit");
        assert!(session.thumb_request().is_ok());
    }

    #[test]
    fn test_empty_results_summary() {
        let mut session = session_with_bib();
        session
            .accept_thumbs(r#"{"main-url": "https://cdn/", "thumbs": []}"#)
            .unwrap();

        assert_eq!(session.results_summary().unwrap(), NO_PHOTOS_MESSAGE);
        assert!(matches!(
            session.download_request(),
            Err(SessionError::NoSelection)
        ));
    }

    #[test]
    fn test_search_error_keeps_previous_results() {
        let mut session = session_with_bib();
        session.accept_thumbs(THUMBS_OK).unwrap();

        let err = session
            .accept_thumbs(r#"{"error": "Event is disabled"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Event is disabled");
        assert_eq!(session.results().unwrap().thumbs.len(), 3);
    }

    #[test]
    fn test_download_request_uses_selection() {
        let mut session = session_with_bib();
        session.accept_thumbs(THUMBS_OK).unwrap();
        session.toggle_thumb("3/thumb/b.jpg").unwrap();

        let request = session.download_request().unwrap();
        let body: DownloadRequest = serde_json::from_str(&request.body).unwrap();

        assert_eq!(request.url, "http://localhost:8080/download");
        assert_eq!(body.thumbs, vec!["3/thumb/a.jpg", "3/thumb/c.jpg"]);
        assert_eq!(body.code, "XK9-22");
        assert_eq!(
            session.download_prompt(),
            "You have selected 2 thumbnail(s). Do you want to proceed with the download?"
        );
    }

    #[test]
    fn test_selection_commands() {
        let mut session = session_with_bib();
        session.accept_thumbs(THUMBS_OK).unwrap();

        session.select_none();
        assert!(matches!(
            session.download_request(),
            Err(SessionError::NoSelection)
        ));

        session.select_inverse();
        assert_eq!(session.selection().selected_count(), 3);

        assert!(!session.set_thumb_selected("3/thumb/a.jpg", false).unwrap());
        session.select_all();
        assert_eq!(session.selection().selected_count(), 3);

        assert!(matches!(
            session.toggle_thumb("nope.jpg"),
            Err(SessionError::UnknownThumb(_))
        ));
    }

    #[test]
    fn test_new_bib_discards_results() {
        let mut session = session_with_bib();
        session.accept_thumbs(THUMBS_OK).unwrap();
        assert_eq!(session.unlocked_tab(), Tab::Photos);

        session.accept_bib(BIB_OK).unwrap();
        assert_eq!(session.unlocked_tab(), Tab::Faces);
        assert!(session.selection().is_empty());
    }
}
