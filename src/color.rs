use std::collections::BTreeMap;

use palette::Srgb;

use crate::error::AnalysisError;

/// A continuous colormap sampled by [`derive_palette`].
pub type Colormap = colorous::Gradient;

// ---------------------------------------------------------------------------
// Palette – a fixed, ordered, reproducible sequence of colors
// ---------------------------------------------------------------------------

/// Ordered sequence of colors, fixed at creation and indexed by position for
/// the lifetime of a visualization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb<u8>>,
}

impl Palette {
    pub fn colors(&self) -> &[Srgb<u8>] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<Srgb<u8>> {
        self.colors.get(index).copied()
    }

    /// Last color, if any.
    pub fn last(&self) -> Option<Srgb<u8>> {
        self.colors.last().copied()
    }

    /// The same palette with its leading color dropped.  The condition
    /// palette discards its first (near-black) entry this way.
    pub fn without_first(&self) -> Palette {
        Palette {
            colors: self.colors.iter().skip(1).copied().collect(),
        }
    }
}

/// Derive a palette from a continuous colormap.
///
/// Samples `count` evenly spaced positions along `colormap`, then keeps
/// every `stride`-th sample starting at the first — `ceil(count / stride)`
/// colors, the elements at positions `0, stride, 2*stride, …`.  When
/// `reversed` is set the retained sequence is flipped end-to-end *after*
/// sub-sampling.
///
/// `count` and `stride` must be positive
/// ([`AnalysisError::InvalidPaletteParameters`] otherwise); a `stride`
/// larger than `count` yields a single-color palette rather than an error.
pub fn derive_palette(
    count: usize,
    stride: usize,
    colormap: &Colormap,
    reversed: bool,
) -> Result<Palette, AnalysisError> {
    if count == 0 || stride == 0 {
        return Err(AnalysisError::InvalidPaletteParameters { count, stride });
    }

    let mut colors: Vec<Srgb<u8>> = (0..count)
        .step_by(stride)
        .map(|i| {
            let t = if count == 1 {
                0.0
            } else {
                i as f64 / (count - 1) as f64
            };
            let c = colormap.eval_continuous(t);
            Srgb::new(c.r, c.g, c.b)
        })
        .collect();

    if reversed {
        colors.reverse();
    }

    Ok(Palette { colors })
}

// ---------------------------------------------------------------------------
// Standard palettes
// ---------------------------------------------------------------------------

/// Per-condition palette: inferno, `(n + 1)²` samples at stride `n + 1`,
/// reversed, leading color dropped — one color per condition, darkest for
/// the last-seen condition.
pub fn condition_palette(n_conditions: usize) -> Result<Palette, AnalysisError> {
    let stride = n_conditions + 1;
    let palette = derive_palette(stride * stride, stride, &colorous::INFERNO, true)?;
    Ok(palette.without_first())
}

/// Product-population palette: 18 colors off a diverging blue-to-red map
/// (324 samples at stride 18), cold for short products, warm for long.
pub fn population_palette() -> Result<Palette, AnalysisError> {
    derive_palette(324, 18, &colorous::RED_BLUE, true)
}

// ---------------------------------------------------------------------------
// PaletteSet – named palettes for one visualization session
// ---------------------------------------------------------------------------

/// Explicit mapping from a caller-supplied logical name to its palette, so
/// several independent palettes coexist on one session without overwriting
/// each other or leaking through shared mutable state.
#[derive(Debug, Clone, Default)]
pub struct PaletteSet {
    palettes: BTreeMap<String, Palette>,
}

impl PaletteSet {
    pub fn insert(&mut self, name: impl Into<String>, palette: Palette) {
        self.palettes.insert(name.into(), palette);
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.get(name)
    }

    /// Derive a palette and store it under `name`, returning a reference to
    /// the stored value.
    pub fn derive(
        &mut self,
        name: &str,
        count: usize,
        stride: usize,
        colormap: &Colormap,
        reversed: bool,
    ) -> Result<&Palette, AnalysisError> {
        let palette = derive_palette(count, stride, colormap, reversed)?;
        self.palettes.insert(name.to_string(), palette);
        Ok(&self.palettes[name])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }
}
