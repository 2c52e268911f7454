//! Browser bindings for the ambient effects.
//!
//! Each exported surface wraps an engine surface with a [`JsHost`]. The page
//! drives the loop:
//!
//! ```js
//! const fx = new AmbientCanvas(canvas, "atmos", "hero", 7, 1.0, reduced, "#7c5cff", "#22d3ee", true);
//! fx.resize(w, h, devicePixelRatio);
//! const tick = (ms) => { fx.frame(ms); if (fx.wants_frame()) requestAnimationFrame(tick); };
//! requestAnimationFrame(tick);
//! ```
//!
//! Listener names reported by `is_listening` are `pointermove`,
//! `pointerleave`, `resize`, `visibility` and `scroll`.

mod canvas2d;
mod host;

use ambient_fx_core::{ClientRect, MotionPolicy, Srgb, SurfaceConfig, Theme, ThemeMode};
use ambient_fx_engines::{CanvasSurface, SurfaceState};
use ambient_fx_fluid::backdrop::TurbulenceParams;
use canvas2d::Canvas2d;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub use host::JsHost;

fn fx_error(e: ambient_fx_core::FxError) -> JsError {
    JsError::new(&e.to_string())
}

fn policy(reduced_motion: bool) -> MotionPolicy {
    if reduced_motion {
        MotionPolicy::reduced()
    } else {
        MotionPolicy::full_motion()
    }
}

fn theme(accent: &str, accent2: &str, dark: bool) -> Result<Theme, JsError> {
    let mode = if dark { ThemeMode::Dark } else { ThemeMode::Light };
    Ok(Theme {
        accent: Srgb::from_hex(accent).map_err(fx_error)?,
        accent2: Srgb::from_hex(accent2).map_err(fx_error)?,
        ..Theme::default()
    }
    .with_mode(mode))
}

fn state_name(state: SurfaceState) -> String {
    format!("{state:?}").to_lowercase()
}

fn listening(host: &JsHost, name: &str) -> bool {
    host::listener_from_name(name).is_some_and(|l| host.is_listening(l))
}

/// A 2D canvas effect (`atmos` or `morph`).
#[wasm_bindgen]
pub struct AmbientCanvas {
    surface: CanvasSurface<JsHost, Canvas2d>,
}

#[wasm_bindgen]
impl AmbientCanvas {
    /// Mounts an effect on `canvas`. A canvas without a 2D context yields a
    /// disabled surface; an unknown effect or bad color is an error.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        canvas: HtmlCanvasElement,
        effect: &str,
        variant: &str,
        seed: u32,
        intensity: f64,
        reduced_motion: bool,
        accent: &str,
        accent2: &str,
        dark: bool,
    ) -> Result<AmbientCanvas, JsError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .map(|ctx| Canvas2d::new(canvas, ctx));
        let config = SurfaceConfig::new(effect, variant, seed).with_intensity(intensity);
        let surface = CanvasSurface::mount(
            JsHost::default(),
            ctx,
            config,
            theme(accent, accent2, dark)?,
            policy(reduced_motion),
        )
        .map_err(fx_error)?;
        Ok(Self { surface })
    }

    pub fn resize(&mut self, css_width: f64, css_height: f64, dpr: f64) {
        self.surface.resize(css_width, css_height, dpr);
    }

    /// Updates the element's client rect and the viewport height for
    /// scroll progress.
    pub fn set_layout(&mut self, left: f64, top: f64, width: f64, height: f64, viewport_height: f64) {
        self.surface
            .set_layout(ClientRect::new(left, top, width, height), viewport_height);
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        self.surface.pointer_move(client_x, client_y);
    }

    pub fn pointer_leave(&mut self) {
        self.surface.pointer_leave();
    }

    pub fn set_visibility(&mut self, ratio: f64) {
        self.surface.set_visibility(ratio);
    }

    pub fn set_theme(&mut self, accent: &str, accent2: &str, dark: bool) -> Result<(), JsError> {
        self.surface.set_theme(theme(accent, accent2, dark)?);
        Ok(())
    }

    /// Swaps effect or variant in place. Returns whether anything changed.
    pub fn reconfigure(&mut self, effect: &str, variant: &str, seed: u32, intensity: f64) -> Result<bool, JsError> {
        let config = SurfaceConfig::new(effect, variant, seed).with_intensity(intensity);
        self.surface.reconfigure(config).map_err(fx_error)
    }

    /// Draws one frame. `now_ms` is the `requestAnimationFrame` timestamp.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.surface.frame(now_ms / 1000.0)
    }

    pub fn wants_frame(&self) -> bool {
        self.surface.host().wants_frame()
    }

    pub fn is_listening(&self, name: &str) -> bool {
        listening(self.surface.host(), name)
    }

    pub fn state(&self) -> String {
        state_name(self.surface.state())
    }

    /// Cancels the pending frame and drops every listener.
    pub fn destroy(&mut self) {
        self.surface.teardown();
    }
}

#[cfg(target_arch = "wasm32")]
mod fluid {
    use super::*;
    use ambient_fx_engines::GpuSurface;
    use ambient_fx_fluid::FluidParams;
    use web_sys::WebGl2RenderingContext;

    /// The WebGL2 fluid backdrop.
    #[wasm_bindgen]
    pub struct AmbientFluid {
        surface: GpuSurface<JsHost, glow::Context>,
    }

    #[wasm_bindgen]
    impl AmbientFluid {
        /// Mounts the shader on `canvas`. Without WebGL2, or when the shader
        /// fails to build, the surface stays disabled and nothing is drawn.
        #[wasm_bindgen(constructor)]
        pub fn new(canvas: HtmlCanvasElement, intensity: f64, reduced_motion: bool) -> AmbientFluid {
            let gl = canvas
                .get_context("webgl2")
                .ok()
                .flatten()
                .and_then(|c| c.dyn_into::<WebGl2RenderingContext>().ok())
                .map(glow::Context::from_webgl2_context);
            let params = FluidParams {
                intensity: intensity.max(0.0),
            };
            Self {
                surface: GpuSurface::mount(JsHost::default(), gl, params, policy(reduced_motion)),
            }
        }

        pub fn resize(&mut self, css_width: f64, css_height: f64, dpr: f64) {
            self.surface.resize(css_width, css_height, dpr);
        }

        pub fn set_layout(&mut self, left: f64, top: f64, width: f64, height: f64, viewport_height: f64) {
            self.surface
                .set_layout(ClientRect::new(left, top, width, height), viewport_height);
        }

        pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
            self.surface.pointer_move(client_x, client_y);
        }

        pub fn pointer_leave(&mut self) {
            self.surface.pointer_leave();
        }

        pub fn set_visibility(&mut self, ratio: f64) {
            self.surface.set_visibility(ratio);
        }

        pub fn set_intensity(&mut self, intensity: f64) {
            self.surface.set_intensity(intensity);
        }

        pub fn frame(&mut self, now_ms: f64) -> bool {
            self.surface.frame(now_ms / 1000.0)
        }

        pub fn wants_frame(&self) -> bool {
            self.surface.host().wants_frame()
        }

        pub fn is_listening(&self, name: &str) -> bool {
            listening(self.surface.host(), name)
        }

        pub fn state(&self) -> String {
            state_name(self.surface.state())
        }

        /// Cancels the frame, drops listeners, then frees GPU objects.
        pub fn destroy(&mut self) {
            self.surface.teardown();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use fluid::AmbientFluid;

/// Turbulence attributes for the SVG backdrop at time `t` and scroll offset
/// `scroll_y`, as a JSON object keyed by attribute name. Returns `None` under
/// reduced motion so the static filter stays in place.
#[wasm_bindgen]
pub fn turbulence_json(t: f64, scroll_y: f64, reduced_motion: bool) -> Option<String> {
    let params = TurbulenceParams::animated(t, scroll_y, policy(reduced_motion))?;
    let map: serde_json::Map<String, serde_json::Value> = params
        .svg_attributes()
        .into_iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
        .collect();
    Some(serde_json::Value::Object(map).to_string())
}

/// Available effect names as a JSON array.
#[wasm_bindgen]
pub fn effects_json() -> String {
    serde_json::json!(ambient_fx_engines::EffectKind::list_effects()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turbulence_is_static_under_reduced_motion() {
        assert!(turbulence_json(1.0, 0.0, true).is_none());
        let json = turbulence_json(1.0, 450.0, false).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(v.get("baseFrequency").is_some());
    }

    #[test]
    fn state_names_are_lowercase() {
        assert_eq!(state_name(SurfaceState::Disabled), "disabled");
    }

    #[test]
    fn effects_list_is_json() {
        let v: serde_json::Value = serde_json::from_str(&effects_json()).unwrap();
        assert!(v.as_array().unwrap().iter().any(|e| e == "fluid"));
    }
}
