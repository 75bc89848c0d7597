//! Mapping of raw infobox labels onto the normalized [`Content`] record.
//!
//! Each recognized label owns one setter in [`FIELD_RULES`]. List fields keep
//! the raw cell text as a single element; names are not split on commas.

use crate::duration::{DurationError, parse_duration};
use crate::infobox::Infobox;
use crate::record::Content;

type Setter = fn(&mut Content, &str) -> Result<(), DurationError>;

/// A recognized infobox label and how it lands in the record.
pub struct FieldRule {
    pub label: &'static str,
    pub apply: Setter,
}

pub static FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        label: "Directed by",
        apply: |c, v| set_list(&mut c.directors, v),
    },
    FieldRule {
        label: "Produced by",
        apply: |c, v| set_list(&mut c.producers, v),
    },
    FieldRule {
        label: "Written by",
        apply: |c, v| set_list(&mut c.writers, v),
    },
    FieldRule {
        label: "Cinematography",
        apply: |c, v| set_list(&mut c.cinematography, v),
    },
    FieldRule {
        label: "Edited by",
        apply: |c, v| set_list(&mut c.editors, v),
    },
    FieldRule {
        label: "Music by",
        apply: |c, v| set_list(&mut c.music, v),
    },
    FieldRule {
        label: "Production companies",
        apply: |c, v| set_list(&mut c.production, v),
    },
    FieldRule {
        label: "Distributed by",
        apply: |c, v| set_list(&mut c.distributors, v),
    },
    FieldRule {
        label: "Release dates",
        apply: |c, v| {
            c.released = Some(v.to_string());
            Ok(())
        },
    },
    FieldRule {
        label: "Running time",
        apply: set_running_time,
    },
];

fn set_list(field: &mut Option<Vec<String>>, value: &str) -> Result<(), DurationError> {
    *field = Some(vec![value.to_string()]);
    Ok(())
}

/// `"100 minutes"` is rewritten to `"100m"` before parsing.
fn set_running_time(content: &mut Content, value: &str) -> Result<(), DurationError> {
    let rewritten = value.replacen(" minutes", "m", 1);
    content.length = Some(parse_duration(&rewritten)?);
    Ok(())
}

/// Build the record for `subject`. `article_base` is prefixed verbatim.
///
/// Never fails: a running time that does not parse is logged and left unset,
/// and labels without a rule are ignored.
pub fn map_fields(subject: &str, article_base: &str, infobox: &Infobox) -> Content {
    let mut content = Content::new(subject, format!("{article_base}{subject}"));

    for rule in FIELD_RULES {
        let Some(value) = infobox.get(rule.label) else {
            continue;
        };
        if let Err(err) = (rule.apply)(&mut content, value) {
            tracing::warn!(
                target: "scrape.fields",
                subject = %subject,
                label = rule.label,
                value = %value,
                error = %err,
                "fields.coercion_failed"
            );
        }
    }

    content
}
