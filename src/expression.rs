//! Ternary color expressions, e.g.
//! `pop <= 10.0 ? [243, 231, 155] : pop <= 20.0 ? [92, 83, 165] : [204, 204, 204]`,
//! as understood by deck.gl style accessors.

use rgb::RGB8;

/// Format a color as `[r, g, b]`.
pub(crate) fn color_array(c: RGB8) -> String {
    format!("[{}, {}, {}]", c.r, c.g, c.b)
}

fn chain(clauses: Vec<String>, null_color: RGB8) -> String {
    let mut exp = clauses.join(" : ");
    if !exp.is_empty() { exp.push_str(" : ") }
    exp.push_str(&color_array(null_color));
    exp
}

/// One `column <= break ? color` clause per break, in order, ending
/// with `null_color`.  Breaks without a matching color in `steps` are
/// not listed.
pub fn build_numeric_expression(column: &str, breaks: &[f64],
                                steps: &[RGB8], null_color: RGB8) -> String {
    let clauses = breaks.iter().zip(steps)
        .map(|(b, &c)| format!("{column} <= {b:?} ? {}", color_array(c)))
        .collect();
    chain(clauses, null_color)
}

/// One `column === 'category' ? color` clause per category, in order,
/// ending with `null_color`.  Categories beyond the length of `steps`
/// are not listed and thus get `null_color`.
pub fn build_categorical_expression<S: AsRef<str>>(
    column: &str, categories: &[S], steps: &[RGB8], null_color: RGB8,
) -> String {
    let clauses = categories.iter().zip(steps)
        .map(|(cat, &c)| format!("{column} === '{}' ? {}",
                                 quote(cat.as_ref()), color_array(c)))
        .collect();
    chain(clauses, null_color)
}

/// Escape `s` for a single-quoted string literal.
fn quote(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}


#[cfg(test)]
mod tests {
    use super::*;

    const GREY: RGB8 = RGB8 { r: 204, g: 204, b: 204 };
    const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
    const BLUE: RGB8 = RGB8 { r: 0, g: 0, b: 255 };

    #[test]
    fn numeric() {
        let e = build_numeric_expression("pop", &[1.5, 3.], &[RED, BLUE], GREY);
        assert_eq!(e, "pop <= 1.5 ? [255, 0, 0] : pop <= 3.0 ? [0, 0, 255] \
                       : [204, 204, 204]");
    }

    #[test]
    fn numeric_more_breaks_than_colors() {
        let e = build_numeric_expression("x", &[1., 2., 3.], &[RED], GREY);
        assert_eq!(e, "x <= 1.0 ? [255, 0, 0] : [204, 204, 204]");
    }

    #[test]
    fn empty_is_null_color() {
        assert_eq!(build_numeric_expression("x", &[], &[RED], GREY),
                   "[204, 204, 204]");
    }

    #[test]
    fn categorical() {
        let e = build_categorical_expression("kind", &["A", "B", "C"],
                                             &[RED, BLUE], GREY);
        assert_eq!(e, "kind === 'A' ? [255, 0, 0] : kind === 'B' ? [0, 0, 255] \
                       : [204, 204, 204]");
        assert_eq!(e.matches(" === ").count(), 2);
    }

    #[test]
    fn categorical_quotes() {
        let e = build_categorical_expression("n", &["O'Hare"], &[RED], GREY);
        assert_eq!(e, r"n === 'O\'Hare' ? [255, 0, 0] : [204, 204, 204]");
    }
}
