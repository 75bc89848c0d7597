//! Fact-panel ("infobox") extraction.
//!
//! An infobox is a two-column table marked with the `infobox` class; each
//! row carries a label cell (`infobox-label`) and a data cell
//! (`infobox-data`). Rows are read in document order and a label seen twice
//! keeps the value of its last row.

use crate::markup::{HtmlDocument, MarkupDocument, MarkupElement, MarkupError, Predicate};
use std::collections::BTreeMap;

pub const INFOBOX_CLASS: &str = "infobox";
pub const LABEL_CLASS: &str = "infobox-label";
pub const DATA_CLASS: &str = "infobox-data";

/// Raw label → plain-text value pairs.
pub type Infobox = BTreeMap<String, String>;

/// Parse the infobox out of article markup using the HTML5 backend.
///
/// ```
/// let markup = r#"<table class="infobox"><tr>
///   <th class="infobox-label">Music by</th>
///   <td class="infobox-data"><a href="/wiki/J._Ralph">J. Ralph</a></td>
/// </tr></table>"#;
/// let infobox = finder_scrape::infobox::parse_infobox(markup).unwrap();
/// assert_eq!(infobox["Music by"], "J. Ralph");
/// ```
pub fn parse_infobox(markup: &str) -> Result<Infobox, MarkupError> {
    parse_infobox_with::<HtmlDocument>(markup)
}

/// Same as [`parse_infobox`] against any [`MarkupDocument`] implementation.
pub fn parse_infobox_with<D: MarkupDocument>(markup: &str) -> Result<Infobox, MarkupError> {
    let document = D::parse(markup)?;
    let root = document.root();

    let mut infobox = Infobox::new();
    let mut rows = 0usize;
    for row in root.find_all(Predicate::Tag("tr")) {
        if !row.has_ancestor(Predicate::Class(INFOBOX_CLASS)) {
            continue;
        }
        rows += 1;

        // A nested table inside the data cell has its own rows; only the
        // first cell of each kind belongs to this row.
        let label = row.find_first(Predicate::Class(LABEL_CLASS));
        let value = row.find_first(Predicate::Class(DATA_CLASS));
        if let (Some(label), Some(value)) = (label, value) {
            infobox.insert(label.visible_text(), value.visible_text());
        }
    }

    tracing::debug!(
        target: "scrape.infobox",
        rows,
        entries = infobox.len(),
        "infobox.parsed"
    );
    Ok(infobox)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"
<table class="infobox vevent"><tbody>
<tr>
    <th scope="row" class="infobox-label" style="white-space: nowrap; padding-right: 0.65em;">Directed by</th>
    <td class="infobox-data"><a href="/wiki/Paul_McGuigan_(filmmaker)" class="mw-redirect" title="Paul McGuigan (filmmaker)">Paul McGuigan</a></td>
</tr>
</tbody></table>"#;

    #[test]
    fn empty_markup_yields_empty_infobox() {
        assert!(parse_infobox("").unwrap().is_empty());
    }

    #[test]
    fn markup_without_infobox_yields_empty_infobox() {
        let markup = r#"<p>Plot</p><table class="wikitable"><tr>
            <th class="infobox-label">Directed by</th><td class="infobox-data">Nobody</td>
        </tr></table>"#;
        assert!(parse_infobox(markup).unwrap().is_empty());
    }

    #[test]
    fn strips_link_markup_from_values() {
        let got = parse_infobox(SIMPLE).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got["Directed by"], "Paul McGuigan");
    }

    #[test]
    fn later_rows_win_for_repeated_labels() {
        let markup = r#"<table class="infobox"><tbody>
<tr><th class="infobox-label">Directed by</th><td class="infobox-data">First</td></tr>
<tr><th class="infobox-label">Running time</th><td class="infobox-data">100 minutes</td></tr>
<tr><th class="infobox-label">Directed by</th><td class="infobox-data">Second</td></tr>
</tbody></table>"#;
        let got = parse_infobox(markup).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got["Directed by"], "Second");
        assert_eq!(got["Running time"], "100 minutes");
    }

    #[test]
    fn rows_without_both_cells_are_skipped() {
        let markup = r#"<table class="infobox"><tbody>
<tr><th class="infobox-above">Lucky Number Slevin</th></tr>
<tr><td class="infobox-image"><img src="poster.jpg"></td></tr>
<tr><th class="infobox-label">Budget</th></tr>
<tr><th class="infobox-label">Country</th><td class="infobox-data"></td></tr>
</tbody></table>"#;
        let got = parse_infobox(markup).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got["Country"], "");
    }

    #[test]
    fn multi_line_values_are_flattened() {
        let markup = r##"<table class="infobox"><tbody>
<tr><th class="infobox-label">Release dates</th><td class="infobox-data"><div class="plainlist"><ul>
<li>September 9, 2005<span style="display:none">(<span class="bday">2005-09-09</span>)</span> (<a href="/wiki/TIFF">TIFF</a>)</li>
</ul></div><sup class="reference"><a href="#cite_note-1">[1]</a></sup></td></tr>
</tbody></table>"##;
        let got = parse_infobox(markup).unwrap();
        assert_eq!(
            got["Release dates"],
            "September 9, 2005(2005-09-09) (TIFF)"
        );
    }
}
