//! printf-style formatting of package manifests.
//!
//! Directives:
//!
//! | Directive | Field                                  |
//! |-----------|----------------------------------------|
//! | `%n`      | name                                   |
//! | `%v`      | version                                |
//! | `%o`      | origin                                 |
//! | `%c`      | comment                                |
//! | `%e`      | description                            |
//! | `%m`      | maintainer                             |
//! | `%w`      | www                                    |
//! | `%p`      | prefix                                 |
//! | `%q`      | ABI (falls back to arch)               |
//! | `%s`      | flat size in bytes                     |
//! | `%%`      | a literal `%`                          |
//!
//! The escapes `\n`, `\t` and `\\` are also expanded. Missing optional fields
//! expand to nothing, and unknown directives are copied through unchanged.

use crate::archive::Manifest;

pub fn format_manifest(format: &str, manifest: &Manifest) -> String {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        match c {
            '%' => match chars.next() {
                Some(directive) => expand_directive(directive, manifest, &mut out),
                None => out.push('%'),
            },
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            other => out.push(other),
        }
    }

    out
}

fn expand_directive(directive: char, manifest: &Manifest, out: &mut String) {
    let optional = |field: &Option<String>| field.as_deref().unwrap_or_default().to_string();

    let expansion = match directive {
        'n' => manifest.name.clone(),
        'v' => manifest.version.clone(),
        'o' => optional(&manifest.origin),
        'c' => optional(&manifest.comment),
        'e' => optional(&manifest.desc),
        'm' => optional(&manifest.maintainer),
        'w' => optional(&manifest.www),
        'p' => optional(&manifest.prefix),
        'q' => optional(if manifest.abi.is_some() {
            &manifest.abi
        } else {
            &manifest.arch
        }),
        's' => manifest.flatsize.unwrap_or_default().to_string(),
        '%' => "%".to_string(),
        unknown => format!("%{}", unknown),
    };
    out.push_str(&expansion);
}
