//! Legends: ordered `{text, color}` entries rendered as an HTML
//! fragment with one color swatch per row.

use std::fmt;
use rgb::{RGB8, RGBA8};
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// One row of a legend.  `color` holds 3 (RGB) or 4 (RGBA) channels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub text: String,
    pub color: Vec<u8>,
}

impl LegendEntry {
    pub fn new(text: impl Into<String>, color: Vec<u8>) -> Self {
        LegendEntry { text: text.into(), color }
    }

    pub fn rgb(text: impl Into<String>, c: RGB8) -> Self {
        Self::new(text, vec![c.r, c.g, c.b])
    }

    pub fn rgba(text: impl Into<String>, c: RGBA8) -> Self {
        Self::new(text, vec![c.r, c.g, c.b, c.a])
    }

    fn check(&self, index: usize) -> Result<()> {
        let invalid = |reason: &str| Err(Error::InvalidLegendEntry {
            index, reason: reason.to_string() });
        if self.text.is_empty() {
            return invalid("empty text")
        }
        match self.color.len() {
            0 => invalid("missing color"),
            3 | 4 => Ok(()),
            n => invalid(&format!("color has {n} channels, expected 3 or 4")),
        }
    }
}

/// A validated legend.  Its [`Display`](fmt::Display) implementation
/// renders the HTML fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Legend {
    title: String,
    footer: Option<String>,
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// Create a legend, checking that every entry has a text and a 3
    /// or 4 channels color.
    pub fn new(entries: Vec<LegendEntry>, title: impl Into<String>,
               footer: Option<String>) -> Result<Self> {
        for (i, e) in entries.iter().enumerate() {
            e.check(i)?;
        }
        Ok(Legend { title: title.into(), footer, entries })
    }

    pub fn title(&self) -> &str { &self.title }

    pub fn footer(&self) -> Option<&str> { self.footer.as_deref() }

    pub fn entries(&self) -> &[LegendEntry] { &self.entries }

    /// The entries as a JSON array of `{"text": .., "color": [..]}`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Render the HTML fragment.
    pub fn to_html(&self) -> String { self.to_string() }
}

const STYLE: &str = "<style>
  .legend { width: 300px; }
  .square { height: 10px; width: 10px; border: 1px solid grey; }
  .left { float: left; }
  .right { float: right; }
</style>";

impl fmt::Display for Legend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{STYLE}")?;
        writeln!(f, "<h2>{}</h2>", escape(&self.title))?;
        for e in &self.entries {
            let channels: Vec<_> = e.color.iter().map(u8::to_string).collect();
            writeln!(f, "<div class=\"legend\">\n  \
                         <div class=\"square left\" \
                         style=\"background:rgba({})\"></div>\n  \
                         <span class=\"right\">{}</span>\n  \
                         <br />\n</div>",
                     channels.join(", "), escape(&e.text))?;
        }
        writeln!(f, "<br />")?;
        if let Some(footer) = &self.footer {
            writeln!(f, "<p>{}</p>", escape(footer))?;
        }
        Ok(())
    }
}

/// What [`build_legend`] returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LegendOutput {
    /// A legend object, displayed as HTML.
    Rendered(Legend),
    /// The HTML markup only.
    Markup(String),
}

impl LegendOutput {
    /// The HTML markup, whatever the variant.
    pub fn markup(&self) -> String {
        match self {
            LegendOutput::Rendered(l) => l.to_html(),
            LegendOutput::Markup(s) => s.clone(),
        }
    }

    pub fn legend(&self) -> Option<&Legend> {
        match self {
            LegendOutput::Rendered(l) => Some(l),
            LegendOutput::Markup(_) => None,
        }
    }
}

/// Validate `entries` and build a legend titled `title` with an
/// optional `footer`.  Returns the [`Legend`] object if `as_html` is
/// true, the raw markup otherwise.
///
/// ```
/// use color_classify::{build_legend, LegendEntry};
/// let e = vec![LegendEntry::new("Low", vec![255, 0, 0]),
///              LegendEntry::new("", vec![0, 0, 255])];
/// assert!(build_legend(e, "t", None, true).is_err());
/// ```
pub fn build_legend(entries: Vec<LegendEntry>, title: &str,
                    footer: Option<&str>, as_html: bool)
                    -> Result<LegendOutput> {
    let legend = Legend::new(entries, title, footer.map(str::to_string))?;
    if as_html {
        Ok(LegendOutput::Rendered(legend))
    } else {
        Ok(LegendOutput::Markup(legend.to_html()))
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<LegendEntry> {
        vec![LegendEntry::new("Values <= 1.0", vec![243, 231, 155]),
             LegendEntry::rgba("Others", RGBA8 { r: 204, g: 204, b: 204, a: 128 })]
    }

    #[test]
    fn render_layout() {
        let l = Legend::new(entries(), "Population", Some("2020".into()))
            .unwrap();
        let html = l.to_html();
        assert!(html.starts_with("<style>"));
        assert!(html.contains("<h2>Population</h2>"));
        assert!(html.contains("style=\"background:rgba(243, 231, 155)\""));
        assert!(html.contains("rgba(204, 204, 204, 128)"));
        assert!(html.contains("<span class=\"right\">Values &lt;= 1.0</span>"));
        assert!(html.trim_end().ends_with("<p>2020</p>"));
        assert_eq!(html.matches("<div class=\"legend\">").count(), 2);
        let first = html.find("Values").unwrap();
        let others = html.find("Others").unwrap();
        assert!(first < others);
    }

    #[test]
    fn no_footer() {
        let l = Legend::new(entries(), "t", None).unwrap();
        assert!(!l.to_html().contains("<p>"));
    }

    #[test]
    fn markup_or_object() {
        let obj = build_legend(entries(), "t", None, true).unwrap();
        let raw = build_legend(entries(), "t", None, false).unwrap();
        assert!(obj.legend().is_some());
        assert!(matches!(&raw, LegendOutput::Markup(_)));
        assert_eq!(obj.markup(), raw.markup());
    }

    #[test]
    fn invalid_entries() {
        let bad = [LegendEntry::new("", vec![1, 2, 3]),
                   LegendEntry::new("a", Vec::new()),
                   LegendEntry::new("a", vec![1, 2]),
                   LegendEntry::new("a", vec![1, 2, 3, 4, 5])];
        for e in bad {
            let mut v = entries();
            v.push(e);
            assert!(matches!(build_legend(v, "t", None, false),
                             Err(Error::InvalidLegendEntry { index: 2, .. })));
        }
    }

    #[test]
    fn json() {
        let l = Legend::new(entries(), "t", None).unwrap();
        assert_eq!(l.to_json().unwrap(),
                   r#"[{"text":"Values <= 1.0","color":[243,231,155]},"#
                   .to_string()
                   + r#"{"text":"Others","color":[204,204,204,128]}]"#);
    }
}
