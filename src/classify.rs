use std::collections::HashSet;
use polars::prelude::{DataFrame, DataType};
use rgb::RGB8;
use serde::{Deserialize, Deserializer};
use tracing::debug;
use crate::{
    breaks::{compute_breaks, BreakMethod},
    expression::{build_categorical_expression, build_numeric_expression},
    hex_to_rgb,
    legend::{build_legend, LegendEntry, LegendOutput},
    Error, Palette, Result,
};

/// Default color of values matched by no interval or category.
pub const NULL_COLOR: RGB8 = RGB8 { r: 204, g: 204, b: 204 };

/// Options shared by [`classify_numeric`] and [`classify_categorical`].
///
/// Build them with the methods below or load them from TOML:
///
/// ```
/// use color_classify::ClassifyOptions;
/// let opts = ClassifyOptions::from_toml(r##"
///     null_color = "#000000"
///     legend = true
///     legend_title = "Population"
/// "##).unwrap();
/// assert_eq!(opts, ClassifyOptions::new().null_color(rgb::RGB8::new(0, 0, 0))
///                      .legend(true).legend_title("Population"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifyOptions {
    /// `[r, g, b]` or a hex string in configuration files.
    #[serde(deserialize_with = "de_color")]
    null_color: RGB8,
    legend: bool,
    legend_title: Option<String>,
    legend_footer: Option<String>,
    legend_as_html: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        ClassifyOptions {
            null_color: NULL_COLOR,
            legend: false,
            legend_title: None,
            legend_footer: None,
            legend_as_html: true,
        }
    }
}

impl ClassifyOptions {
    pub fn new() -> Self { Self::default() }

    /// Parse options from a TOML document.  Missing keys take their
    /// default value.
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Color of values matched by no interval or category.
    pub fn null_color(mut self, c: RGB8) -> Self {
        self.null_color = c;
        self
    }

    /// Whether to build a legend.
    pub fn legend(mut self, yes: bool) -> Self {
        self.legend = yes;
        self
    }

    /// Title of the legend; defaults to the column name when unset
    /// or empty.
    pub fn legend_title(mut self, title: impl Into<String>) -> Self {
        self.legend_title = Some(title.into());
        self
    }

    pub fn legend_footer(mut self, footer: impl Into<String>) -> Self {
        self.legend_footer = Some(footer.into());
        self
    }

    /// Return the legend as a [`Legend`](crate::Legend) object (the
    /// default) or, if `false`, as its raw markup.
    pub fn legend_as_html(mut self, yes: bool) -> Self {
        self.legend_as_html = yes;
        self
    }

    fn make_legend(&self, column: &str, entries: Vec<LegendEntry>)
                   -> Result<Option<LegendOutput>> {
        if !self.legend { return Ok(None) }
        let title = self.legend_title.as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(column);
        build_legend(entries, title, self.legend_footer.as_deref(),
                     self.legend_as_html)
            .map(Some)
    }
}

fn de_color<'de, D>(d: D) -> std::result::Result<RGB8, D::Error>
where D: Deserializer<'de> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ColorSpec { Channels([u8; 3]), Hex(String) }

    match ColorSpec::deserialize(d)? {
        ColorSpec::Channels([r, g, b]) => Ok(RGB8 { r, g, b }),
        ColorSpec::Hex(s) => hex_to_rgb(&s).map_err(serde::de::Error::custom),
    }
}

/// What a color is assigned to.
#[derive(Clone, Debug, PartialEq)]
pub enum Threshold {
    /// Values `<=` this break (and above the previous one).
    Break(f64),
    /// Values equal to this category.
    Category(String),
}

/// A break or category together with its color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorAssignment {
    pub threshold: Threshold,
    pub color: RGB8,
}

/// Result of a classification.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    /// Ternary color expression, see [`crate::expression`].
    pub expression: String,
    /// The colored breaks or categories, in expression order.
    pub assignments: Vec<ColorAssignment>,
    /// Present if requested with [`ClassifyOptions::legend`].
    pub legend: Option<LegendOutput>,
}

/// Color the numeric `column` of `df` with `intervals` colors of
/// `palette`.
///
/// Fails with [`Error::InvalidArgument`] if `intervals` is 0 and with
/// [`Error::PaletteTooSmall`] if it exceeds the number of colors of the
/// palette.  The breaks are computed by [`compute_breaks`]; as the
/// equal-size method may return more breaks than asked for, those
/// without a palette color fall to the null color (and to an "Others"
/// legend entry).
pub fn classify_numeric(df: &DataFrame, column: &str, palette: &str,
                        intervals: usize, method: BreakMethod,
                        opts: &ClassifyOptions) -> Result<Classification> {
    let palette = Palette::get(palette)?;
    if intervals == 0 {
        return Err(Error::InvalidArgument(
            "the number of intervals needs to be higher than 0".to_string()))
    }
    if intervals > palette.len() {
        return Err(Error::PaletteTooSmall {
            palette: palette.name().to_string(),
            requested: intervals,
            max: palette.len() })
    }
    let breaks = compute_breaks(numeric_values(df, column)?, intervals, method)
        .map_err(|e| match e {
            Error::EmptyColumn(_) => Error::EmptyColumn(format!("column '{column}'")),
            e => e })?;
    let steps = palette.steps(breaks.len().min(palette.len()));
    debug!(column, palette = palette.name(), intervals, %method,
           breaks = breaks.len(), colors = steps.len(), "classified numeric column");

    let expression = build_numeric_expression(column, &breaks, &steps,
                                              opts.null_color);
    let assignments = breaks.iter().zip(&steps)
        .map(|(&b, &color)| ColorAssignment { threshold: Threshold::Break(b), color })
        .collect();
    let legend = opts.make_legend(
        column, numeric_legend_entries(&breaks, &steps, opts.null_color))?;
    Ok(Classification { expression, assignments, legend })
}

/// Color the distinct values of `column` (in order of first
/// appearance) with the leading colors of `palette`.  Values beyond
/// the palette length get the null color and are summarized as
/// "Others" in the legend.
pub fn classify_categorical(df: &DataFrame, column: &str, palette: &str,
                            opts: &ClassifyOptions) -> Result<Classification> {
    let palette = Palette::get(palette)?;
    let categories = distinct_values(df, column)?;
    let steps: Vec<RGB8> = palette.colors().into_iter()
        .take(categories.len()).collect();
    debug!(column, palette = palette.name(), categories = categories.len(),
           colors = steps.len(), "classified categorical column");

    let expression = build_categorical_expression(column, &categories, &steps,
                                                  opts.null_color);
    let mut entries: Vec<_> = categories.iter().zip(&steps)
        .map(|(cat, &c)| LegendEntry::rgb(cat.as_str(), c))
        .collect();
    if steps.len() < categories.len() {
        entries.push(LegendEntry::rgb("Others", opts.null_color));
    }
    let assignments = categories.into_iter().zip(steps)
        .map(|(cat, color)| ColorAssignment { threshold: Threshold::Category(cat),
                                              color })
        .collect();
    let legend = opts.make_legend(column, entries)?;
    Ok(Classification { expression, assignments, legend })
}

/// "Values <= b0", ">b0 and <=b1", ..., plus "Others" when some breaks
/// got no color.
fn numeric_legend_entries(breaks: &[f64], steps: &[RGB8], null_color: RGB8)
                          -> Vec<LegendEntry> {
    let shown = &breaks[.. steps.len().min(breaks.len())];
    let mut entries = Vec::with_capacity(shown.len() + 1);
    if let (Some(b0), Some(&c0)) = (shown.first(), steps.first()) {
        entries.push(LegendEntry::rgb(format!("Values <= {b0:?}"), c0));
    }
    for (w, &c) in shown.windows(2).zip(&steps[1 ..]) {
        entries.push(LegendEntry::rgb(format!(">{:?} and <={:?}", w[0], w[1]), c));
    }
    if shown.len() < breaks.len() {
        entries.push(LegendEntry::rgb("Others", null_color));
    }
    entries
}

/// Values of `column` as floats, `None` where missing.  Values that
/// do not convert to floats are an error.
fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(column)?.as_materialized_series()
        .strict_cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

/// Distinct non-missing values of `column`, as strings, in order of
/// first appearance.
fn distinct_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let series = df.column(column)?.as_materialized_series()
        .cast(&DataType::String)?;
    let mut seen = HashSet::new();
    Ok(series.str()?.into_iter().flatten()
       .filter(|v| seen.insert(*v))
       .map(str::to_string)
       .collect())
}
