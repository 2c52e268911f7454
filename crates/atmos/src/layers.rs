//! Fixed-order layer stack for the atmosphere effect.
//!
//! Layers composite bottom-to-top in [`LayerKind::ORDER`]. The order is not
//! configurable; individual layers can be hidden or faded through params.

use ambient_fx_core::params::ParamReader;
use serde_json::Value;

/// One visual layer of the atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Glow,
    Clouds,
    FlowLines,
    Constellation,
    Growth,
    Twinkle,
    Butterflies,
    Vignette,
}

impl LayerKind {
    /// Bottom-to-top draw order.
    pub const ORDER: [LayerKind; 8] = [
        LayerKind::Glow,
        LayerKind::Clouds,
        LayerKind::FlowLines,
        LayerKind::Constellation,
        LayerKind::Growth,
        LayerKind::Twinkle,
        LayerKind::Butterflies,
        LayerKind::Vignette,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Glow => "glow",
            Self::Clouds => "clouds",
            Self::FlowLines => "flow_lines",
            Self::Constellation => "constellation",
            Self::Growth => "growth",
            Self::Twinkle => "twinkle",
            Self::Butterflies => "butterflies",
            Self::Vignette => "vignette",
        }
    }

    /// Purely cosmetic layers are dropped entirely under reduced motion.
    pub fn is_decorative(self) -> bool {
        matches!(self, Self::Twinkle | Self::Butterflies)
    }
}

/// Visibility and opacity of one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    opacity: f64,
    visible: bool,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            opacity: 1.0,
            visible: true,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Sets the opacity, clamping to [0.0, 1.0].
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// All layers in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    layers: [Layer; 8],
}

impl Default for LayerStack {
    fn default() -> Self {
        Self {
            layers: LayerKind::ORDER.map(Layer::new),
        }
    }
}

impl LayerStack {
    /// Reads a `layers` object such as `{"twinkle": false, "glow": 0.5}`.
    ///
    /// A boolean toggles visibility, a number sets opacity. Unknown keys are
    /// ignored.
    pub fn from_params(params: &Value) -> Self {
        let mut stack = Self::default();
        let Some(layers) = params.get("layers") else {
            return stack;
        };
        let reader = ParamReader::new(layers);
        for layer in &mut stack.layers {
            let name = layer.kind.name();
            layer.set_visible(reader.bool(name, true));
            layer.set_opacity(reader.f64(name, 1.0));
        }
        stack
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        &self.layers[Self::index_of(kind)]
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        &mut self.layers[Self::index_of(kind)]
    }

    /// Layers to draw this frame, in order, with their opacity.
    pub fn active(&self, decorative_enabled: bool) -> impl Iterator<Item = (LayerKind, f64)> + '_ {
        self.layers
            .iter()
            .filter(move |l| l.visible && l.opacity > 0.0)
            .filter(move |l| decorative_enabled || !l.kind.is_decorative())
            .map(|l| (l.kind, l.opacity))
    }

    fn index_of(kind: LayerKind) -> usize {
        LayerKind::ORDER
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default()
    }
}
