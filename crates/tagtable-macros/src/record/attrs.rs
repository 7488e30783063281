//! Attribute parsing for the Record derive macro.
//!
//! This module parses the `#[col(...)]` field attributes.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[col(...)]`.
#[derive(Debug, Default, Clone)]
pub struct ColAttr {
    /// Header title: `title = "Full Name"`
    pub title: Option<String>,
    /// Text for empty cells: `def = "deleted"`
    pub def: Option<String>,
    /// Formatter name: `format = "bytes"`
    pub format: Option<String>,
    /// Group tag of a nested record: `group = "Resources,flatten"`
    pub group: Option<String>,
    /// Lookup key override: `key = "cpuCount"`
    pub key: Option<String>,
    /// Leave the field out of the descriptor: `skip`
    pub skip: bool,
}

impl ColAttr {
    /// Tag name and raw value pairs, in the order the runtime reads them.
    pub fn tags(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", &self.title),
            ("def", &self.def),
            ("format", &self.format),
            ("group", &self.group),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }

    /// A group field expands its nested record, unless it also has a format.
    pub fn is_group(&self) -> bool {
        self.group.as_deref().is_some_and(|g| !g.is_empty())
            && self.format.as_deref().map_or(true, str::is_empty)
    }
}

impl Parse for ColAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ColAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("title") => {
                    attr.title = Some(parse_string_expr(&nv.value)?);
                }

                Meta::NameValue(nv) if nv.path.is_ident("def") => {
                    attr.def = Some(parse_string_expr(&nv.value)?);
                }

                Meta::NameValue(nv) if nv.path.is_ident("format") => {
                    attr.format = Some(parse_string_expr(&nv.value)?);
                }

                Meta::NameValue(nv) if nv.path.is_ident("group") => {
                    attr.group = Some(parse_string_expr(&nv.value)?);
                }

                Meta::NameValue(nv) if nv.path.is_ident("key") => {
                    attr.key = Some(parse_string_expr(&nv.value)?);
                }

                Meta::Path(p) if p.is_ident("skip") => {
                    attr.skip = true;
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown col attribute: expected one of: title, def, format, group, key, skip",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

fn parse_string_expr(expr: &Expr) -> Result<String> {
    if let Expr::Lit(expr_lit) = expr {
        if let Lit::Str(lit_str) = &expr_lit.lit {
            return Ok(lit_str.value());
        }
    }
    Err(Error::new(expr.span(), "expected string literal"))
}

/// Extract `#[col(...)]` attributes from a field's attributes.
pub fn parse_col_attrs(attrs: &[Attribute]) -> Result<ColAttr> {
    for attr in attrs {
        if attr.path().is_ident("col") {
            return attr.parse_args::<ColAttr>();
        }
    }
    Ok(ColAttr::default())
}
