//! Template registry for storing and dispatching components

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::config::TemplateConfig;
use super::context::Context;
use crate::component::Component;
use crate::error::TemplateError;

/// Custom top-level renderer, called with the template and the render arguments
pub type Renderer<A, R, E> = Arc<dyn Fn(&Template<A, R, E>, Vec<A>) -> Result<R, E> + Send + Sync>;

/// A set of named components that can each be replaced.
///
/// `A` is the argument type (components receive a `Vec<A>`), `R` what a
/// component produces and `E` the error bodies and filters fail with.
pub struct Template<A, R = String, E = TemplateError> {
    components: HashMap<String, Component<A, R, E>>,
    top_level_name: String,
    renderer: Option<Renderer<A, R, E>>,
    strict: bool,
}

impl<A, R, E> Template<A, R, E> {
    /// Create an empty, lenient template with the default top-level name
    pub fn new() -> Self {
        Self::from_config(&TemplateConfig::default())
    }

    /// Create an empty template whose `render()` invokes `name`
    pub fn with_top_level(name: impl Into<String>) -> Self {
        let mut template = Self::new();
        template.top_level_name = name.into();
        template
    }

    /// Create an empty template rendered by a custom renderer
    pub fn with_renderer<F>(renderer: F) -> Self
    where
        F: Fn(&Template<A, R, E>, Vec<A>) -> Result<R, E> + Send + Sync + 'static,
    {
        let mut template = Self::new();
        template.set_renderer(renderer);
        template
    }

    /// Create an empty template from a configuration
    pub fn from_config(config: &TemplateConfig) -> Self {
        Self {
            components: HashMap::new(),
            top_level_name: config.top_level.clone(),
            renderer: None,
            strict: config.strict,
        }
    }

    /// Apply a configuration to an existing template, keeping its components
    pub fn apply_config(&mut self, config: &TemplateConfig) {
        self.top_level_name = config.top_level.clone();
        self.strict = config.strict;
    }

    /// Register a component, replacing any component with the same name
    pub fn set(
        &mut self,
        name: impl Into<String>,
        component: Component<A, R, E>,
    ) -> Result<(), TemplateError> {
        let name = name.into();
        if !self.accepts(&name)? {
            return Ok(());
        }
        if self.components.insert(name.clone(), component).is_some() {
            debug!(component = %name, "replaced component");
        }
        Ok(())
    }

    /// Register a closure as a component with no filters
    pub fn set_fn<F>(&mut self, name: impl Into<String>, body: F) -> Result<(), TemplateError>
    where
        F: Fn(&Context<'_, A, R, E>, Vec<A>) -> Result<R, E> + Send + Sync + 'static,
    {
        self.set(name, Component::new(body))
    }

    /// Check a registration name; lenient templates skip invalid names
    fn accepts(&self, name: &str) -> Result<bool, TemplateError> {
        if !name.trim().is_empty() {
            return Ok(true);
        }
        if self.strict {
            return Err(TemplateError::InvalidRegistration {
                name: name.to_string(),
                reason: "component names must not be empty".to_string(),
            });
        }
        debug!(component = %name, "ignoring registration with empty name");
        Ok(false)
    }

    /// Get the live component registered under `name`
    pub fn get(&self, name: &str) -> Option<&Component<A, R, E>> {
        self.components.get(name)
    }

    /// Get the live component for modification.
    ///
    /// Changes made through the returned reference (such as adding filters)
    /// affect this template's own entry. Use [`Template::get_cloned`] to work
    /// on a copy.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Component<A, R, E>> {
        self.components.get_mut(name)
    }

    /// Get an independent copy of a component
    pub fn get_cloned(&self, name: &str) -> Option<Component<A, R, E>> {
        self.components.get(name).cloned()
    }

    /// Check if a component exists
    pub fn exists(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Remove a component, returning it if it was registered
    pub fn delete(&mut self, name: &str) -> Option<Component<A, R, E>> {
        let removed = self.components.remove(name);
        if removed.is_some() {
            debug!(component = %name, "deleted component");
        }
        removed
    }

    /// Get all component names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn top_level_name(&self) -> &str {
        &self.top_level_name
    }

    pub fn set_top_level_name(&mut self, name: impl Into<String>) {
        self.top_level_name = name.into();
    }

    /// Take over `render()` entirely
    pub fn set_renderer<F>(&mut self, renderer: F)
    where
        F: Fn(&Template<A, R, E>, Vec<A>) -> Result<R, E> + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
    }

    /// Go back to rendering through the top-level component
    pub fn clear_renderer(&mut self) {
        self.renderer = None;
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }
}

impl<A, R, E> Template<A, R, E>
where
    E: From<TemplateError>,
{
    /// Invoke a component by name with this template as its context.
    ///
    /// Returns `Ok(None)` for an unknown name unless the template is strict,
    /// in which case the call fails with [`TemplateError::ComponentNotFound`].
    pub fn invoke(&self, name: &str, args: Vec<A>) -> Result<Option<R>, E> {
        match self.components.get(name) {
            Some(component) => {
                trace!(component = %name, args = args.len(), "invoking component");
                component.invoke(&Context::new(self), args).map(Some)
            }
            None if self.strict => Err(TemplateError::ComponentNotFound {
                name: name.to_string(),
            }
            .into()),
            None => {
                trace!(component = %name, "no such component, skipping");
                Ok(None)
            }
        }
    }

    /// Render the template through its custom renderer, or by invoking the
    /// top-level component
    pub fn render(&self, args: Vec<A>) -> Result<Option<R>, E> {
        match &self.renderer {
            Some(renderer) => renderer(self, args).map(Some),
            None => self.invoke(&self.top_level_name, args),
        }
    }
}

impl<A, R, E> Default for Template<A, R, E> {
    fn default() -> Self {
        Self::new()
    }
}

// Every component (and its filter chain) is copied, so a clone can be
// customized without touching the template it came from.
impl<A, R, E> Clone for Template<A, R, E> {
    fn clone(&self) -> Self {
        let components = self
            .components
            .iter()
            .map(|(name, component)| (name.clone(), component.clone()))
            .collect();

        Self {
            components,
            top_level_name: self.top_level_name.clone(),
            renderer: self.renderer.clone(),
            strict: self.strict,
        }
    }
}

impl<A, R, E> fmt::Debug for Template<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("Template")
            .field("components", &names)
            .field("top_level_name", &self.top_level_name)
            .field("renderer", &self.renderer.is_some())
            .field("strict", &self.strict)
            .finish()
    }
}
