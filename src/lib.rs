//! Color classification of dataset columns for map layers.
//!
//! - [`Palette`]s and [`palette_steps`]
//! - [`compute_breaks`] with [`BreakMethod::EqualSize`] or
//!   [`BreakMethod::EqualInterval`]
//! - [`classify_numeric`] and [`classify_categorical`] producing a
//!   [`Classification`]: a ternary color expression and an optional
//!   [`Legend`].
//!
//! The provided palettes are the [CARTOColors](https://carto.com/carto-colors/)
//! schemes `sunset`, `burg`, `oryel` (sequential), `temps`, `tealrose`
//! (diverging), `pastel`, `safe` and `prism` (qualitative).
//!
//! # Example
//!
//! ```
//! use polars::prelude::*;
//! use color_classify::{classify_numeric, BreakMethod, ClassifyOptions};
//!
//! let df = df! { "pop" => [0., 10., 20., 30., 40., 50.] }.unwrap();
//! let c = classify_numeric(&df, "pop", "sunset", 4,
//!                          BreakMethod::EqualInterval,
//!                          &ClassifyOptions::new()).unwrap();
//! assert_eq!(c.expression,
//!            "pop <= 0.0 ? [243, 231, 155] : \
//!             pop <= 25.0 ? [235, 127, 134] : \
//!             pop <= 50.0 ? [92, 83, 165] : [204, 204, 204]");
//! ```

use rgb::RGB8;

mod palettes;
use palettes::ty::PaletteData;
pub use palettes::ty::{PaletteType, Trivalent};

pub mod breaks;
pub mod expression;
pub mod legend;
mod classify;

pub use breaks::{compute_breaks, BreakMethod};
pub use classify::{classify_categorical, classify_numeric,
                   Classification, ClassifyOptions, ColorAssignment,
                   Threshold, NULL_COLOR};
pub use expression::{build_categorical_expression, build_numeric_expression};
pub use legend::{build_legend, Legend, LegendEntry, LegendOutput};

/// Errors raised by palette lookup, break computation and
/// classification.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cannot allocate palette '{palette}' for {requested} \
             intervals (maximum is: {max}), please reduce the number \
             of intervals or choose a different palette")]
    PaletteTooSmall { palette: String, requested: usize, max: usize },

    #[error("Invalid breaks method '{0}'. Must be one of \
             [\"equal-size\", \"equal-interval\"]")]
    InvalidMethod(String),

    #[error("Unknown palette '{0}'")]
    UnknownPalette(String),

    #[error("Invalid legend entry #{index}: {reason}")]
    InvalidLegendEntry { index: usize, reason: String },

    #[error("Column '{0}' has no usable values")]
    EmptyColumn(String),

    #[error("Invalid hex color '{0}'")]
    InvalidHexColor(String),

    #[error("Data error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse a color such as `"#f3e79b"` or `"F3E79B"`.
///
/// ```
/// use color_classify::hex_to_rgb;
/// let c = hex_to_rgb("#f3e79b").unwrap();
/// assert_eq!((c.r, c.g, c.b), (243, 231, 155));
/// ```
pub fn hex_to_rgb(hex: &str) -> Result<RGB8> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidHexColor(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i .. i + 2], 16)
            .map_err(|_| Error::InvalidHexColor(hex.to_string()))
    };
    Ok(RGB8 { r: channel(0)?, g: channel(2)?, b: channel(4)? })
}

/// Return the CSS form `#rrggbb` of `c`.
pub fn rgb_to_hex(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}


/// A named palette of the registry.
#[derive(Clone, Copy)]
pub struct Palette {
    palette: &'static PaletteData,
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette")
            .field("name", &self.palette.name)
            .field("len", &self.len())
            .finish()
    }
}

/// # Color palettes
///
/// Palettes are ordered from the color used for low values to the one
/// used for high values.
impl Palette {
    /// Look up the palette `name` (case-insensitive).
    ///
    /// Fails with [`Error::UnknownPalette`] if no palette bears that
    /// name.
    pub fn get(name: &str) -> Result<Self> {
        palettes::lookup(name)
            .map(|palette| Palette { palette })
            .ok_or_else(|| Error::UnknownPalette(name.to_string()))
    }

    /// The (lowercase) name of the palette.
    pub fn name(&self) -> &'static str { self.palette.name }

    /// Returns the number of colors in the palette (at least 1).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.palette.rgb.len() }

    /// Says whether the palette is `Seq`uential, `Div`ergent or
    /// `Qual`itative.
    pub fn typ(&self) -> PaletteType { self.palette.typ }

    /// Says whether the palette is colorblind safe.
    pub fn blind(&self) -> Trivalent { self.palette.blind }

    /// Returns the RGB colors of the palette.
    pub fn colors(&self) -> Vec<RGB8> { self.palette.rgb.clone() }

    /// Returns `k` colors evenly spaced over the palette.  The index
    /// of the `i`-th color is `i * (len - 1) / (k - 1)` rounded to
    /// the nearest integer, thus the first and last colors of the
    /// palette are always part of the result when `k ≥ 2`.  Colors
    /// are repeated if `k` exceeds the length of the palette.
    pub fn steps(&self, k: usize) -> Vec<RGB8> {
        let rgb = &self.palette.rgb;
        if k <= 1 {
            return rgb.iter().take(k).copied().collect()
        }
        let last = (rgb.len() - 1) as f64;
        let dk = (k - 1) as f64;
        (0 .. k).map(|i| rgb[(i as f64 * last / dk).round() as usize])
            .collect()
    }
}

/// Return the colors of the palette `name` (case-insensitive).
pub fn get_palette(name: &str) -> Result<Vec<RGB8>> {
    Ok(Palette::get(name)?.colors())
}

/// Return `k` colors evenly spaced over the palette `name`.  See
/// [`Palette::steps`].
///
/// ```
/// use color_classify::{palette_steps, get_palette};
/// let steps = palette_steps("Sunset", 3).unwrap();
/// let full = get_palette("sunset").unwrap();
/// assert_eq!(steps, vec![full[0], full[3], full[6]]);
/// ```
pub fn palette_steps(name: &str, k: usize) -> Result<Vec<RGB8>> {
    Ok(Palette::get(name)?.steps(k))
}

/// Return an iterator on all known palettes.
pub fn all_palettes() -> impl Iterator<Item = Palette> {
    palettes::ALL_PALETTES.iter().map(|&palette| Palette { palette })
}

/// Find palettes with at least `len` colors.  Refine the search with
/// the methods of [`PaletteFind`].
///
/// ```
/// use color_classify::{find_palettes, PaletteType, Trivalent};
/// let names: Vec<_> = find_palettes(10).typ(PaletteType::Qual)
///     .blind(Trivalent::Yes).find().map(|p| p.name()).collect();
/// assert_eq!(names, ["safe"]);
/// ```
pub fn find_palettes(len: usize) -> PaletteFind {
    PaletteFind {
        len,
        typ: vec![],
        blind: Trivalent::No, // "no" means "not necessarily want"
    }
}

/// Set criteria to find matching palettes.
///
/// Created by [`find_palettes`].
#[derive(Clone)]
pub struct PaletteFind {
    len: usize,
    typ: Vec<PaletteType>,
    blind: Trivalent,
}

fn satisfy(prop: Trivalent, specified: Trivalent) -> bool {
    use Trivalent::*;
    match specified {
        Yes => matches!(prop, Yes),
        No => true,
        Maybe => matches!(prop, Yes | Maybe),
    }
}

impl PaletteFind {
    /// Find [`Palette`]s with this type.  Use several times to
    /// specify more than one [`PaletteType`].
    pub fn typ(mut self, t: PaletteType) -> Self {
        self.typ.push(t);
        self
    }

    /// Search palettes possibly ([`Trivalent::Maybe`]) or definitely
    /// ([`Trivalent::Yes`]) suitable for color blind people.
    pub fn blind(mut self, at_least: Trivalent) -> Self {
        self.blind = at_least;
        self
    }

    /// Return the palettes of length at least `len` satisfying the
    /// criteria.
    pub fn find(self) -> impl Iterator<Item = Palette> {
        use PaletteType::*;
        let typ = { if self.typ.is_empty() { vec![Seq, Div, Qual] }
                    else { self.typ } };
        all_palettes().filter(move |p| {
            p.len() >= self.len
                && typ.contains(&p.typ())
                && satisfy(p.blind(), self.blind)
        })
    }
}
