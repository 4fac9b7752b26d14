use rgb::RGB8;

/// A named palette with certain characteristics.
pub(crate) struct PaletteData {
    pub(crate) name: &'static str, // lowercase, registry key
    pub(crate) rgb: Vec<RGB8>, // Invariant: non-empty, low to high
    pub(crate) typ: PaletteType,
    pub(crate) blind: Trivalent,
}

impl PaletteData {
    /// Build the palette from `0xRRGGBB` literals.
    pub(crate) fn new(name: &'static str, typ: PaletteType,
                      blind: Trivalent, hex: &[u32]) -> Self {
        let rgb = hex.iter()
            .map(|&h| RGB8 { r: (h >> 16) as u8,
                             g: (h >> 8) as u8,
                             b: h as u8 })
            .collect();
        PaletteData { name, rgb, typ, blind }
    }
}

/// Type of Palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteType {
    /// Sequential color scheme, suited to ordered data that progress
    /// from low to high, with light colors for low data values to
    /// dark colors for high data values.
    Seq,
    /// Divergent color scheme.  Puts equal emphasis on mid-range
    /// critical values and extremes at both ends of the data range.
    Div,
    /// Qualitative color scheme.  Hues do not imply magnitude
    /// differences and are best suited to categorical data.
    Qual
}

/// Trivalent logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trivalent {
    Yes,
    Maybe,
    No,
}
