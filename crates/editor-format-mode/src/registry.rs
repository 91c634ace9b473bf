//! Explicit mode registry.
//!
//! Built once by the host and queried by name or MIME type. Extensions may be registered
//! before or after the mode they target; they are applied whenever both are present.

use crate::error::ModeError;
use crate::extension::ModeExtension;
use crate::mode::Mode;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
struct RegisteredMode {
    base: Mode,
    resolved: Arc<Mode>,
}

/// Name and MIME lookup table for language modes.
#[derive(Debug)]
pub struct ModeRegistry {
    modes: HashMap<String, RegisteredMode>,
    mimes: HashMap<String, String>,
    extensions: HashMap<String, ModeExtension>,
    default_mode: Option<String>,
}

impl ModeRegistry {
    /// A registry holding only the `null` mode (also reachable as `text/plain`).
    pub fn new() -> Self {
        let mut registry = Self {
            modes: HashMap::new(),
            mimes: HashMap::new(),
            extensions: HashMap::new(),
            default_mode: None,
        };
        registry.define(Mode::null());
        registry.define_mime("text/plain", "null");
        registry
    }

    /// Register (or replace) a mode under its own name.
    ///
    /// The first non-`null` mode defined becomes the default.
    pub fn define(&mut self, mode: Mode) -> Arc<Mode> {
        let name = mode.name().to_string();
        if self.default_mode.is_none() && name != "null" {
            self.default_mode = Some(name.clone());
        }
        let resolved = Arc::new(match self.extensions.get(&name) {
            Some(extension) => extension.apply_to(&mode),
            None => mode.clone(),
        });
        debug!(mode = %name, "defined mode");
        self.modes.insert(
            name,
            RegisteredMode {
                base: mode,
                resolved: Arc::clone(&resolved),
            },
        );
        resolved
    }

    /// Alias a MIME type to a mode name.
    pub fn define_mime(&mut self, mime: impl Into<String>, mode: impl Into<String>) {
        self.mimes.insert(mime.into(), mode.into());
    }

    /// Merge extra properties into the mode called `name`.
    ///
    /// The mode's tokenizer is never replaced. Modes already handed out keep their old
    /// descriptor; later [`resolve`](Self::resolve) calls see the extension.
    ///
    /// Only the registered descriptor is rebuilt. A host mode that captured this mode's
    /// `Arc` as a nested mode at build time keeps delegating to the unextended copy, so
    /// extend inner modes before resolving them for a host.
    pub fn extend(&mut self, name: &str, extension: ModeExtension) {
        let merged = match self.extensions.remove(name) {
            Some(existing) => existing.merge(extension),
            None => extension,
        };
        if let Some(registered) = self.modes.get_mut(name) {
            registered.resolved = Arc::new(merged.apply_to(&registered.base));
        }
        debug!(mode = %name, "extended mode");
        self.extensions.insert(name.to_string(), merged);
    }

    /// Look a mode up by name or MIME type.
    pub fn resolve(&self, spec: &str) -> Result<Arc<Mode>, ModeError> {
        if let Some(registered) = self.modes.get(spec) {
            return Ok(Arc::clone(&registered.resolved));
        }
        if let Some(name) = self.mimes.get(spec)
            && let Some(registered) = self.modes.get(name)
        {
            return Ok(Arc::clone(&registered.resolved));
        }
        if spec.contains('/') && spec.ends_with("+xml") && spec != "application/xml" {
            return self.resolve("application/xml");
        }
        Err(ModeError::UnknownMode(spec.to_string()))
    }

    /// The default mode: the first non-`null` mode defined, or `null`.
    pub fn default_mode(&self) -> Result<Arc<Mode>, ModeError> {
        self.resolve(self.default_mode.as_deref().unwrap_or("null"))
    }

    /// Registered mode names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::StringStream;

    fn css_like() -> Mode {
        Mode::builder(
            "css",
            || (),
            |stream: &mut StringStream<'_>, _: &mut ()| {
                stream.next_char();
                Ok(None)
            },
        )
        .build()
    }

    #[test]
    fn test_new_registry_has_null_mode() {
        let registry = ModeRegistry::new();
        assert_eq!(registry.names(), vec!["null"]);
        assert_eq!(registry.resolve("text/plain").unwrap().name(), "null");
        assert_eq!(registry.default_mode().unwrap().name(), "null");
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        let registry = ModeRegistry::new();
        assert_eq!(
            registry.resolve("cobol").unwrap_err(),
            ModeError::UnknownMode("cobol".to_string())
        );
    }

    #[test]
    fn test_extend_after_define() {
        let mut registry = ModeRegistry::new();
        registry.define(css_like());
        registry.define_mime("text/css", "css");
        assert!(registry.resolve("css").unwrap().comment_delimiters().is_none());

        registry.extend("css", ModeExtension::css());

        let css = registry.resolve("text/css").unwrap();
        assert_eq!(css.comment_delimiters(), Some(("/*", "*/")));
        assert!(css.has_newline_policy());
        assert_eq!(registry.default_mode().unwrap().name(), "css");
    }

    #[test]
    fn test_extend_leaves_handed_out_modes_alone() {
        let mut registry = ModeRegistry::new();
        registry.define(css_like());
        let captured = registry.resolve("css").unwrap();

        registry.extend("css", ModeExtension::css());

        assert!(captured.comment_delimiters().is_none());
        assert!(!captured.has_newline_policy());
        assert!(registry.resolve("css").unwrap().has_newline_policy());
    }

    #[test]
    fn test_extend_before_define() {
        let mut registry = ModeRegistry::new();
        registry.extend("css", ModeExtension::new().comments("/*", "*/"));
        registry.extend("css", ModeExtension::new().comments("/**", "**/"));
        registry.define(css_like());

        let css = registry.resolve("css").unwrap();
        assert_eq!(css.comment_delimiters(), Some(("/**", "**/")));
    }

    #[test]
    fn test_xml_suffix_falls_back_to_application_xml() {
        let mut registry = ModeRegistry::new();
        registry.define(Mode::builder(
            "xml",
            || (),
            |stream: &mut StringStream<'_>, _: &mut ()| {
                stream.skip_to_end();
                Ok(None)
            },
        )
        .build());
        registry.define_mime("application/xml", "xml");

        assert_eq!(registry.resolve("image/svg+xml").unwrap().name(), "xml");
        assert!(registry.resolve("application/xml+xml").is_ok());
    }
}
