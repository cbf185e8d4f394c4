//! Execution context handed to component bodies

use std::fmt;

use super::registry::Template;
use crate::error::TemplateError;

/// Handle a body uses to reach its sibling components.
///
/// When a template invokes a component it passes a context attached to
/// itself, so `ctx.invoke("thead", args)` dispatches through the same
/// (possibly overridden) table of components. A detached context belongs to a
/// component invoked on its own.
pub struct Context<'a, A, R, E> {
    template: Option<&'a Template<A, R, E>>,
}

impl<'a, A, R, E> Context<'a, A, R, E> {
    pub fn new(template: &'a Template<A, R, E>) -> Self {
        Self {
            template: Some(template),
        }
    }

    pub fn detached() -> Self {
        Self { template: None }
    }

    /// The template this context dispatches through, if any
    pub fn template(&self) -> Option<&'a Template<A, R, E>> {
        self.template
    }

    pub fn is_attached(&self) -> bool {
        self.template.is_some()
    }
}

impl<'a, A, R, E> Context<'a, A, R, E>
where
    E: From<TemplateError>,
{
    /// Invoke a sibling component by name.
    ///
    /// Follows [`Template::invoke`]; a detached context fails with
    /// [`TemplateError::Detached`].
    pub fn invoke(&self, name: &str, args: Vec<A>) -> Result<Option<R>, E> {
        match self.template {
            Some(template) => template.invoke(name, args),
            None => Err(TemplateError::Detached {
                name: name.to_string(),
            }
            .into()),
        }
    }
}

impl<A, R, E> Clone for Context<'_, A, R, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, R, E> Copy for Context<'_, A, R, E> {}

impl<A, R, E> fmt::Debug for Context<'_, A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("attached", &self.is_attached())
            .finish()
    }
}
