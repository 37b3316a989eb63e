use anyhow::anyhow;
use touchless_core::{VIDEO_HEIGHT, VIDEO_WIDTH};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Live camera stream attached to a `<video>` element.
///
/// Dropping it stops every track, which turns the camera light off.
pub struct Webcam {
    stream: web::MediaStream,
    video: web::HtmlVideoElement,
}

impl Webcam {
    pub async fn start(video: &web::HtmlVideoElement) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| anyhow!("media devices unavailable: {:?}", e))?;

        let video_opts = js_sys::Object::new();
        set(&video_opts, "width", VIDEO_WIDTH.into())?;
        set(&video_opts, "height", VIDEO_HEIGHT.into())?;
        set(&video_opts, "facingMode", "user".into())?;
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_video(&video_opts);
        constraints.set_audio(&JsValue::FALSE);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| anyhow!("getUserMedia: {:?}", e))?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| anyhow!("camera permission: {:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow!("not a MediaStream: {:?}", e))?;

        video.set_muted(true);
        video.set_src_object(Some(&stream));
        // from here on the guard owns the stream, so any early return stops it
        let cam = Self {
            stream,
            video: video.clone(),
        };
        let play = video.play().map_err(|e| anyhow!("video play: {:?}", e))?;
        JsFuture::from(play)
            .await
            .map_err(|e| anyhow!("video play: {:?}", e))?;
        log::info!(
            "[webcam] streaming {}x{}",
            video.video_width(),
            video.video_height()
        );
        Ok(cam)
    }
}

impl Drop for Webcam {
    fn drop(&mut self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
        log::info!("[webcam] stopped");
    }
}

fn set(obj: &js_sys::Object, key: &str, value: JsValue) -> anyhow::Result<()> {
    js_sys::Reflect::set(obj, &JsValue::from_str(key), &value)
        .map(|_| ())
        .map_err(|e| anyhow!("set {key}: {:?}", e))
}
