//! Extension behavior table.
//!
//! The builder seeds one entry per extension the host supports, with behavior [`ExtensionBehavior::Undefined`]
//! ("recognized, not yet mentioned by the shader"). The preprocessor later moves entries to `enable`/`require`/
//! `warn`/`disable` as it meets `#extension` directives ([`ExtensionBehaviorTable::apply_directive`]).
//!
//! ## Notes
//! - An extension the host does not support is absent from the table, so lookups report it as unknown.
//! - Iteration order is by extension name (the table is a `BTreeMap`).

use std::collections::BTreeMap;
use std::fmt;

use glint_core::lang::extensions::{self, ALL_EXTENSIONS, ExtensionId};
use serde::Serialize;

use super::errors::ExtensionError;
use super::resources::ShaderResources;

/// State of one extension as far as the shader source is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionBehavior {
    Require,
    Enable,
    Warn,
    Disable,
    Undefined,
}

impl ExtensionBehavior {
    pub const fn as_str(self) -> &'static str {
        match self {
            ExtensionBehavior::Require => "require",
            ExtensionBehavior::Enable => "enable",
            ExtensionBehavior::Warn => "warn",
            ExtensionBehavior::Disable => "disable",
            ExtensionBehavior::Undefined => "undefined",
        }
    }

    /// Parse a directive behavior keyword. `undefined` is not a directive keyword.
    pub fn parse(keyword: &str) -> Result<Self, ExtensionError> {
        match keyword {
            "require" => Ok(ExtensionBehavior::Require),
            "enable" => Ok(ExtensionBehavior::Enable),
            "warn" => Ok(ExtensionBehavior::Warn),
            "disable" => Ok(ExtensionBehavior::Disable),
            other => Err(ExtensionError::UnknownBehavior(other.to_string())),
        }
    }

    /// Whether builtins gated on the extension may be used.
    pub const fn allows_use(self) -> bool {
        matches!(
            self,
            ExtensionBehavior::Require | ExtensionBehavior::Enable | ExtensionBehavior::Warn
        )
    }
}

impl fmt::Display for ExtensionBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-fatal outcome of an `#extension` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveWarning {
    UnsupportedExtension(String),
}

impl fmt::Display for DirectiveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveWarning::UnsupportedExtension(name) => write!(f, "extension `{name}` is not supported"),
        }
    }
}

/// Extension name → behavior, owned by one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtensionBehaviorTable {
    entries: BTreeMap<String, ExtensionBehavior>,
}

impl ExtensionBehaviorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, behavior: ExtensionBehavior) {
        self.entries.insert(name.into(), behavior);
    }

    pub fn get(&self, name: &str) -> Option<ExtensionBehavior> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ExtensionBehavior)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Whether `id` is supported and currently enabled by the source.
    pub fn is_enabled(&self, id: ExtensionId) -> bool {
        self.get(extensions::as_str(id)).is_some_and(ExtensionBehavior::allows_use)
    }

    /// Apply `#extension name : behavior`.
    ///
    /// ## Returns
    /// - `Ok(None)` when the directive took effect.
    /// - `Ok(Some(warning))` when the extension is unknown and the behavior tolerates that.
    ///
    /// ## Errors
    /// - [`ExtensionError::InvalidAllBehavior`] for `all : require` / `all : enable`.
    /// - [`ExtensionError::Unsupported`] for `require` on an unknown extension.
    pub fn apply_directive(
        &mut self,
        name: &str,
        behavior: ExtensionBehavior,
    ) -> Result<Option<DirectiveWarning>, ExtensionError> {
        if name == ALL_EXTENSIONS {
            if matches!(behavior, ExtensionBehavior::Require | ExtensionBehavior::Enable) {
                return Err(ExtensionError::InvalidAllBehavior(behavior.as_str()));
            }
            for value in self.entries.values_mut() {
                *value = behavior;
            }
            return Ok(None);
        }

        if let Some(value) = self.entries.get_mut(name) {
            *value = behavior;
            return Ok(None);
        }

        match behavior {
            ExtensionBehavior::Require => Err(ExtensionError::Unsupported(name.to_string())),
            _ => {
                tracing::warn!(extension = name, %behavior, "directive names an unsupported extension");
                Ok(Some(DirectiveWarning::UnsupportedExtension(name.to_string())))
            }
        }
    }
}

/// Seed `table` with every extension `resources` supports, each in state `Undefined`.
pub fn seed_extension_behavior(resources: &ShaderResources, table: &mut ExtensionBehaviorTable) {
    let supported = [
        (ExtensionId::OesStandardDerivatives, resources.supports_standard_derivatives),
        (ExtensionId::OesEglImageExternal, resources.supports_external_images),
        (ExtensionId::ArbTextureRectangle, resources.supports_texture_rectangle),
        (ExtensionId::ExtDrawBuffers, resources.supports_multiple_draw_buffers),
        (ExtensionId::ExtFragDepth, resources.supports_fragment_depth_extension),
    ];
    for (id, on) in supported {
        if on {
            tracing::trace!(extension = extensions::as_str(id), "seeding extension");
            table.insert(extensions::as_str(id), ExtensionBehavior::Undefined);
        }
    }
}
