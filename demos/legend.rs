//! Write `legend.html` showing every palette and the legends of a
//! numeric and a categorical classification.
//! Run with `RUST_LOG=debug` to see the computed breaks.

use std::{io::{BufWriter, Write},
          fs::File,
          error::Error};
use polars::prelude::*;
use rgb::RGB8;
use tracing_subscriber::EnvFilter;
use color_classify::{all_palettes, classify_categorical, classify_numeric,
                     rgb_to_hex, BreakMethod, ClassifyOptions};

type Err = Box<dyn Error>;

fn table_of_colors(fh: &mut impl Write, colors: &[RGB8],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>",
                 rgb_to_hex(c))?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td></tr>\
                  </table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut fh = BufWriter::new(File::create("legend.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>color-classify legends</title>\n\
                  </head>\n\
                  <body>")?;

    writeln!(fh, "<h3>Palettes</h3>")?;
    for p in all_palettes() {
        let c = format!("{} ({:?}, {} colors)", p.name(), p.typ(), p.len());
        table_of_colors(&mut fh, &p.colors(), 40, &c)?;
    }

    let df = df! {
        "density" => [Some(12.), Some(3.5), None, Some(48.), Some(7.),
                      Some(3.5), Some(91.), Some(22.), Some(3.5), Some(60.)],
        "land_use" => ["park", "housing", "housing", "industry", "retail",
                       "park", "water", "housing", "farm", "school"],
    }?;

    writeln!(fh, "<h3>Equal size</h3>")?;
    let opts = ClassifyOptions::new().legend(true)
        .legend_title("Population density")
        .legend_footer("Inhabitants per hectare");
    let c = classify_numeric(&df, "density", "sunset", 5,
                             BreakMethod::EqualSize, &opts)?;
    writeln!(fh, "<pre>{}</pre>", c.expression)?;
    if let Some(legend) = &c.legend {
        writeln!(fh, "{}", legend.markup())?;
    }

    writeln!(fh, "<h3>Categories</h3>")?;
    let c = classify_categorical(&df, "land_use", "prism",
                                 &ClassifyOptions::new().legend(true))?;
    writeln!(fh, "<pre>{}</pre>", c.expression)?;
    if let Some(legend) = &c.legend {
        writeln!(fh, "{}", legend.markup())?;
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
