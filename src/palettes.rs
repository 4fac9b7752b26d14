// CARTOColors palettes, see https://carto.com/carto-colors/

use std::collections::BTreeMap;
use lazy_static::lazy_static;
pub(crate) mod ty;
use ty::*;

lazy_static! {
  pub(crate) static ref SUNSET: PaletteData = PaletteData::new(
    "sunset", PaletteType::Seq, Trivalent::Maybe,
    &[0xf3e79b, 0xfac484, 0xf8a07e, 0xeb7f86, 0xce6693, 0xa059a0, 0x5c53a5]);

  pub(crate) static ref BURG: PaletteData = PaletteData::new(
    "burg", PaletteType::Seq, Trivalent::Maybe,
    &[0xffc6c4, 0xf4a3a8, 0xe38191, 0xcc607d, 0xad466c, 0x8b3058, 0x672044]);

  pub(crate) static ref ORYEL: PaletteData = PaletteData::new(
    "oryel", PaletteType::Seq, Trivalent::Maybe,
    &[0xecda9a, 0xefc47e, 0xf3ad6a, 0xf7945d, 0xf97b57, 0xf66356, 0xee4d5a]);

  pub(crate) static ref TEMPS: PaletteData = PaletteData::new(
    "temps", PaletteType::Div, Trivalent::Maybe,
    &[0x009392, 0x39b185, 0x9ccb86, 0xe9e29c, 0xeeb479, 0xe88471, 0xcf597e]);

  pub(crate) static ref TEALROSE: PaletteData = PaletteData::new(
    "tealrose", PaletteType::Div, Trivalent::Maybe,
    &[0x009392, 0x72aaa1, 0xb1c7b3, 0xf1eac8, 0xe5b9ad, 0xd98994, 0xd0587e]);

  pub(crate) static ref PASTEL: PaletteData = PaletteData::new(
    "pastel", PaletteType::Qual, Trivalent::No,
    &[0x66c5cc, 0xf6cf71, 0xf89c74, 0xdcb0f2, 0x87c55f, 0x9eb9f3,
      0xfe88b1, 0xc9db74, 0x8be0a4, 0xb497e7, 0xd3b484, 0xb3b3b3]);

  pub(crate) static ref SAFE: PaletteData = PaletteData::new(
    "safe", PaletteType::Qual, Trivalent::Yes,
    &[0x88ccee, 0xcc6677, 0xddcc77, 0x117733, 0x332288, 0xaa4499,
      0x44aa99, 0x999933, 0x882255, 0x661100, 0x6699cc, 0x888888]);

  pub(crate) static ref PRISM: PaletteData = PaletteData::new(
    "prism", PaletteType::Qual, Trivalent::No,
    &[0x5f4690, 0x1d6996, 0x38a6a5, 0x0f8554, 0x73af48, 0xedad08,
      0xe17c05, 0xcc503e, 0x94346e, 0x6f4070, 0x994e95, 0x666666]);
}

lazy_static! {
  pub(crate) static ref ALL_PALETTES: [&'static PaletteData; 8] = [
    &*SUNSET, &*BURG, &*ORYEL, &*TEMPS,
    &*TEALROSE, &*PASTEL, &*SAFE, &*PRISM];

  /// Registry keyed by lowercase name.
  pub(crate) static ref REGISTRY: BTreeMap<&'static str, &'static PaletteData> =
    ALL_PALETTES.iter().map(|&p| (p.name, p)).collect();
}

/// Look up a palette by name, ignoring ASCII case.
pub(crate) fn lookup(name: &str) -> Option<&'static PaletteData> {
    REGISTRY.get(name.to_ascii_lowercase().as_str()).copied()
}
