//! Names derived from a block identifier
//!
//! Every cross-file name (PHP class, JS global, CSS class, PHP namespace)
//! is a pure function of the block identifier and the conventions, so the
//! validator and the auto-fixer agree on what "correct" means.

use crate::config::Conventions;

/// Identifier-derived names for one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNames {
    /// `cm/hello-jay`
    pub identifier: String,
    /// `hello-jay`
    pub slug: String,
}

impl BlockNames {
    /// Derive names from `metadata.name`.
    ///
    /// The namespace prefix is stripped when present. An identifier in some
    /// other namespace keeps only the part after its last `/`.
    pub fn derive(identifier: &str, conventions: &Conventions) -> Self {
        let prefix = conventions.identifier_prefix();
        let slug = match identifier.strip_prefix(&prefix) {
            Some(rest) => rest,
            None => identifier.rsplit('/').next().unwrap_or(identifier),
        };
        Self {
            identifier: identifier.to_string(),
            slug: slug.to_string(),
        }
    }

    /// True when there is nothing to derive names from
    pub fn is_empty(&self) -> bool {
        self.slug.is_empty()
    }

    /// True when the identifier can sit inside a quoted PHP string literal
    pub fn is_literal_safe(&self) -> bool {
        !self.identifier.is_empty()
            && !self
                .identifier
                .contains(|c: char| matches!(c, '\'' | '"' | '\\'))
    }

    /// `HelloJay`
    pub fn pascal(&self) -> String {
        self.segments().map(capitalize).collect()
    }

    /// `CM_Hello_Jay_Config`
    pub fn config_class(&self, conventions: &Conventions) -> String {
        let mut parts = vec![conventions.namespace.to_uppercase()];
        parts.extend(self.segments().map(capitalize));
        parts.push("Config".to_string());
        parts.join("_")
    }

    /// `window.cmHelloJayConfig`
    pub fn js_global(&self, conventions: &Conventions) -> String {
        format!("window.{}{}Config", conventions.namespace, self.pascal())
    }

    /// `cm-hello-jay`
    pub fn css_class(&self, conventions: &Conventions) -> String {
        format!("{}{}", conventions.class_prefix, self.slug)
    }

    /// `CompuMatter\Blocks\HelloJay`
    pub fn php_namespace(&self, conventions: &Conventions) -> String {
        format!("{}\\{}", conventions.php_namespace, self.pascal())
    }

    /// Asset handle, e.g. `cm-hello-jay-centralized-css`
    pub fn handle(&self, conventions: &Conventions, suffix: &str) -> String {
        format!("{}-{}", self.css_class(conventions), suffix)
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.slug.split('-').filter(|s| !s.is_empty())
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
