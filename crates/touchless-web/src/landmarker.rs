//! Bridge to the hand-landmark model.
//!
//! The model itself runs in JavaScript (`js/hand_landmarker.js`). Each call
//! returns one plain object: `landmarks` as a flat `Float32Array`
//! (`hands × 21 × xyz`, normalized image coordinates), `handedness` as an array
//! of labels and `scores` as a `Float32Array`, in matching hand order.

use anyhow::anyhow;
use js_sys::{Array, Float32Array, Reflect};
use touchless_core::{decode_hands, RawHand, TrackingError, HAND_MODEL_ASSET, MAX_HANDS};
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen(module = "/js/hand_landmarker.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = createLandmarker)]
    async fn create_landmarker(model_path: &str, num_hands: u32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = detectHands)]
    fn detect_hands(
        landmarker: &JsValue,
        video: &web::HtmlVideoElement,
        timestamp_ms: f64,
    ) -> Result<JsValue, JsValue>;
}

pub struct HandLandmarker {
    inner: JsValue,
}

impl HandLandmarker {
    pub async fn load() -> anyhow::Result<Self> {
        let inner = create_landmarker(HAND_MODEL_ASSET, MAX_HANDS as u32)
            .await
            .map_err(|e| anyhow!("createLandmarker: {:?}", e))?;
        log::info!("[landmarker] model ready ({HAND_MODEL_ASSET})");
        Ok(Self { inner })
    }

    /// Run the model on the current video frame. `timestamp_ms` must increase.
    pub fn detect(
        &self,
        video: &web::HtmlVideoElement,
        timestamp_ms: f64,
    ) -> anyhow::Result<Vec<Result<RawHand, TrackingError>>> {
        let result = detect_hands(&self.inner, video, timestamp_ms)
            .map_err(|e| anyhow!("detectHands: {:?}", e))?;
        let flat = float_array(&result, "landmarks")?;
        let scores = float_array(&result, "scores")?;
        let labels: Vec<String> = field(&result, "handedness")?
            .dyn_into::<Array>()
            .map_err(|_| anyhow!("handedness is not an array"))?
            .iter()
            .map(|v| v.as_string().unwrap_or_default())
            .collect();
        Ok(decode_hands(&flat, &labels, &scores).into_iter().collect())
    }
}

fn field(obj: &JsValue, name: &str) -> anyhow::Result<JsValue> {
    Reflect::get(obj, &JsValue::from_str(name)).map_err(|e| anyhow!("missing {name}: {:?}", e))
}

fn float_array(obj: &JsValue, name: &str) -> anyhow::Result<Vec<f32>> {
    let value = field(obj, name)?;
    if value.is_undefined() || value.is_null() {
        return Ok(Vec::new());
    }
    let array = value
        .dyn_into::<Float32Array>()
        .map_err(|_| anyhow!("{name} is not a Float32Array"))?;
    Ok(array.to_vec())
}
