//! Mounted surfaces: an effect plus its lifecycle, clock, and input state.
//!
//! A host creates one surface per element, forwards its signals (resize,
//! layout, pointer, visibility), and calls `frame` from each scheduled frame
//! callback. Each surface exclusively owns its effect, context, and GPU
//! objects.

use crate::lifecycle::{backing_size, effective_dpr, HostBindings, Lifecycle, SurfaceState};
use crate::EffectKind;
use ambient_fx_core::{
    ClientRect, DrawContext, Effect, FrameInput, FxError, GpuApi, MotionPolicy, PhaseClock, PointerState,
    Progress, RegionRect, SurfaceConfig, Theme,
};
use ambient_fx_fluid::{FluidParams, FluidRenderer};
use tracing::debug;

/// Signals shared by every surface kind.
#[derive(Debug, Clone)]
struct Inputs {
    policy: MotionPolicy,
    clock: PhaseClock,
    pointer: PointerState,
    rect: ClientRect,
    viewport_height: f64,
    css_size: (f64, f64),
}

impl Inputs {
    fn new(policy: MotionPolicy) -> Self {
        Self {
            policy,
            clock: PhaseClock::new(),
            pointer: PointerState::default(),
            rect: ClientRect::default(),
            viewport_height: 0.0,
            css_size: (0.0, 0.0),
        }
    }

    /// Advances the clock and pointer for one tick and returns the frame.
    fn advance(&mut self, now: f64) -> FrameInput {
        let dt = self.clock.tick(now, self.policy);
        self.pointer.damp();
        FrameInput::new(self.css_size.0, self.css_size.1)
            .with_time(self.clock.time(), dt)
            .with_progress(self.progress())
            .with_pointer(self.policy.pointer(self.pointer))
            .with_policy(self.policy)
    }

    fn progress(&self) -> Progress {
        Progress::from_geometry(
            RegionRect::new(self.rect.top, self.rect.height),
            self.viewport_height,
            self.policy.is_reduced(),
        )
    }
}

/// A 2D effect bound to a drawing context.
pub struct CanvasSurface<H: HostBindings, C: DrawContext> {
    lifecycle: Lifecycle<H>,
    ctx: Option<C>,
    effect: Box<dyn Effect>,
    config: SurfaceConfig,
    theme: Theme,
    inputs: Inputs,
}

impl<H: HostBindings, C: DrawContext> CanvasSurface<H, C> {
    /// Builds the effect and attaches. A missing context leaves the surface
    /// `Disabled`.
    ///
    /// # Errors
    ///
    /// Returns the registry error when the config names an unknown or
    /// GPU-only effect, or carries invalid values.
    pub fn mount(
        host: H,
        ctx: Option<C>,
        config: SurfaceConfig,
        theme: Theme,
        policy: MotionPolicy,
    ) -> Result<Self, FxError> {
        let effect = EffectKind::build(&config, theme)?;
        let mut lifecycle = Lifecycle::new(host);
        lifecycle.attach(ctx.is_some());
        Ok(Self {
            lifecycle,
            ctx,
            effect,
            config,
            theme,
            inputs: Inputs::new(policy),
        })
    }

    pub fn state(&self) -> SurfaceState {
        self.lifecycle.state()
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }

    pub fn context(&self) -> Option<&C> {
        self.ctx.as_ref()
    }

    pub fn pointer(&self) -> PointerState {
        self.inputs.pointer
    }

    pub fn host(&self) -> &H {
        self.lifecycle.host()
    }

    /// New CSS size and device pixel ratio (capped at 2).
    pub fn resize(&mut self, css_width: f64, css_height: f64, dpr: f64) {
        self.inputs.css_size = (css_width.max(0.0), css_height.max(0.0));
        if let Some(ctx) = self.ctx.as_mut() {
            let (w, h) = backing_size(css_width, css_height, dpr);
            ctx.resize(w, h, effective_dpr(dpr));
        }
    }

    /// Element rectangle in client coordinates plus the viewport height.
    pub fn set_layout(&mut self, rect: ClientRect, viewport_height: f64) {
        self.inputs.rect = rect;
        self.inputs.viewport_height = viewport_height;
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        let rect = self.inputs.rect;
        self.inputs.pointer.move_client(client_x, client_y, rect);
    }

    pub fn pointer_leave(&mut self) {
        self.inputs.pointer.reset();
    }

    pub fn set_visibility(&mut self, ratio: f64) {
        self.lifecycle.set_visibility(ratio);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.effect.set_theme(theme);
    }

    /// Applies a new config. The effect is rebuilt when anything changed;
    /// the clock restarts only when the identity (effect, variant, seed)
    /// changed. Returns whether a rebuild happened.
    ///
    /// # Errors
    ///
    /// On error the current effect is kept.
    pub fn reconfigure(&mut self, config: SurfaceConfig) -> Result<bool, FxError> {
        if config == self.config {
            return Ok(false);
        }
        let effect = EffectKind::build(&config, self.theme)?;
        if config.identity() != self.config.identity() {
            self.inputs.clock = PhaseClock::new();
        }
        debug!(effect = %config.effect, variant = %config.variant, seed = config.seed, "surface rebuilt");
        self.effect = effect;
        self.config = config;
        Ok(true)
    }

    /// Frame callback. `now` is in seconds. Returns whether the effect was
    /// rendered; suspended and zero-size frames are skipped.
    pub fn frame(&mut self, now: f64) -> bool {
        let draw = self.lifecycle.begin_frame();
        if !self.lifecycle.state().is_running() {
            return false;
        }
        let frame = self.inputs.advance(now);
        if !draw || frame.is_degenerate() {
            return false;
        }
        match self.ctx.as_mut() {
            Some(ctx) => {
                self.effect.render(ctx, &frame);
                true
            }
            None => false,
        }
    }

    /// Cancels the frame and removes listeners. Idempotent.
    pub fn teardown(&mut self) {
        self.lifecycle.teardown();
    }
}

impl<H: HostBindings, C: DrawContext> Drop for CanvasSurface<H, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// The fluid effect bound to a GPU context.
pub struct GpuSurface<H: HostBindings, G: GpuApi> {
    lifecycle: Lifecycle<H>,
    renderer: Option<FluidRenderer<G>>,
    inputs: Inputs,
}

impl<H: HostBindings, G: GpuApi> GpuSurface<H, G> {
    /// Sets up the GPU pass and attaches. No context, or a failed shader
    /// compile or link, leaves the surface `Disabled` with nothing allocated.
    pub fn mount(host: H, gl: Option<G>, params: FluidParams, policy: MotionPolicy) -> Self {
        let mut renderer = gl.map(|gl| FluidRenderer::setup(gl, params.intensity));
        let capable = renderer.as_ref().is_some_and(FluidRenderer::is_ready);
        if !capable {
            renderer = None;
        }
        let mut lifecycle = Lifecycle::new(host);
        lifecycle.attach(capable);
        Self {
            lifecycle,
            renderer,
            inputs: Inputs::new(policy),
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.lifecycle.state()
    }

    pub fn renderer(&self) -> Option<&FluidRenderer<G>> {
        self.renderer.as_ref()
    }

    pub fn host(&self) -> &H {
        self.lifecycle.host()
    }

    /// Updates the viewport only; the program is kept.
    pub fn resize(&mut self, css_width: f64, css_height: f64, dpr: f64) {
        self.inputs.css_size = (css_width.max(0.0), css_height.max(0.0));
        if let Some(r) = self.renderer.as_mut() {
            let (w, h) = backing_size(css_width, css_height, dpr);
            r.resize(w, h);
        }
    }

    pub fn set_layout(&mut self, rect: ClientRect, viewport_height: f64) {
        self.inputs.rect = rect;
        self.inputs.viewport_height = viewport_height;
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        let rect = self.inputs.rect;
        self.inputs.pointer.move_client(client_x, client_y, rect);
    }

    pub fn pointer_leave(&mut self) {
        self.inputs.pointer.reset();
    }

    pub fn set_visibility(&mut self, ratio: f64) {
        self.lifecycle.set_visibility(ratio);
    }

    pub fn set_intensity(&mut self, intensity: f64) {
        if let Some(r) = self.renderer.as_mut() {
            r.set_intensity(intensity);
        }
    }

    /// Frame callback. `now` is in seconds. Returns whether a draw was issued.
    pub fn frame(&mut self, now: f64) -> bool {
        let draw = self.lifecycle.begin_frame();
        if !self.lifecycle.state().is_running() {
            return false;
        }
        let frame = self.inputs.advance(now);
        match self.renderer.as_ref() {
            Some(r) if draw => r.render(frame.time, self.inputs.pointer.clamped()),
            _ => false,
        }
    }

    /// Cancels the frame, removes listeners, then deletes every GPU object.
    /// Idempotent.
    pub fn teardown(&mut self) {
        self.lifecycle.teardown();
        if let Some(r) = self.renderer.as_mut() {
            r.teardown();
        }
    }
}

impl<H: HostBindings, G: GpuApi> Drop for GpuSurface<H, G> {
    fn drop(&mut self) {
        self.teardown();
    }
}
