//! Content-fingerprint naming for cache busting.
//!
//! The pipeline hands over a [`ContentUnit`] (bytes plus logical naming
//! metadata); [`render`] computes a blake3 digest of the bytes and
//! substitutes it into a [`NameTemplate`]. When content changes the
//! rendered name changes, triggering client re-fetch; unchanged content
//! keeps its name and stays cached.
//!
//! # Example
//!
//! ```ignore
//! let template: NameTemplate = "[name].[hash:8].[ext]".parse()?;
//! let unit = ContentUnit::new("app", "css", css_bytes);
//! let file_name = render(&template, &unit)?; // "app.3f8a91c2.css"
//! ```

mod digest;
mod template;
mod unit;

pub use digest::ContentDigest;
pub use template::{NameTemplate, TemplateError, Token};
pub use unit::ContentUnit;

use rayon::prelude::*;

/// Render the final output name for a content unit.
///
/// Pure function: the result depends only on the template, the unit's
/// bytes and its logical metadata. The digest is computed once and only
/// when the template references `[hash]`.
pub fn render(template: &NameTemplate, unit: &ContentUnit) -> Result<String, TemplateError> {
    let digest_hex = template.references_hash().then(|| unit.digest().to_hex());

    let mut out = String::new();
    for token in template.tokens() {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Name => out.push_str(unit.logical_name()),
            Token::Ext => out.push_str(unit.logical_ext()),
            Token::Hash(truncate) => {
                if let Some(hex) = &digest_hex {
                    match truncate {
                        Some(k) => out.push_str(&hex[..*k]),
                        None => out.push_str(hex),
                    }
                }
            }
            Token::Id => match unit.id() {
                Some(id) => out.push_str(id),
                None => return Err(TemplateError::MissingId),
            },
        }
    }
    Ok(out)
}

/// Render names for many units in parallel.
///
/// Each unit is independent, so failures are per-unit: one bad render
/// never aborts the rest. Results keep the input order.
pub fn render_all(
    template: &NameTemplate,
    units: &[ContentUnit],
) -> Vec<Result<String, TemplateError>> {
    units.par_iter().map(|unit| render(template, unit)).collect()
}

/// Versioned URL for query-string cache busting.
///
/// Returns `base_url?v=abc12345` using the short content fingerprint.
/// An alternative to renaming for hosts that keep stable file names.
pub fn versioned_url(base_url: &str, unit: &ContentUnit) -> String {
    format!("{}?v={}", base_url, unit.digest().short())
}
