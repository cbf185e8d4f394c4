//! A single overridable unit: one body plus its filter chain

use std::fmt;
use std::sync::Arc;

use super::filter::{Filter, FilterChain, FilterKey};
use crate::template::Context;

/// Anything that can run as a component body.
///
/// Closures of the shape `Fn(&Context, Vec<A>) -> Result<R, E>` implement this
/// automatically. Implement it by hand for bodies that carry their own state.
pub trait Invocable<A, R, E>: Send + Sync {
    fn invoke(&self, ctx: &Context<'_, A, R, E>, args: Vec<A>) -> Result<R, E>;
}

impl<A, R, E, F> Invocable<A, R, E> for F
where
    F: Fn(&Context<'_, A, R, E>, Vec<A>) -> Result<R, E> + Send + Sync,
{
    fn invoke(&self, ctx: &Context<'_, A, R, E>, args: Vec<A>) -> Result<R, E> {
        self(ctx, args)
    }
}

/// Shared handle to a component body
pub type Body<A, R, E> = Arc<dyn Invocable<A, R, E>>;

/// A named slot's behaviour: the body and the filters run before it.
///
/// Invoking a component first passes the argument list through every filter
/// in ascending [`FilterKey`] order, then calls the body with the execution
/// context and the filtered arguments. Errors from either stage are returned
/// as-is.
pub struct Component<A, R, E> {
    body: Body<A, R, E>,
    filters: FilterChain<A, E>,
}

impl<A, R, E> Component<A, R, E> {
    /// Wrap a closure with an empty filter chain
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&Context<'_, A, R, E>, Vec<A>) -> Result<R, E> + Send + Sync + 'static,
    {
        Self::from_body(Arc::new(body))
    }

    /// Wrap any [`Invocable`] value
    pub fn from_invocable<I>(body: I) -> Self
    where
        I: Invocable<A, R, E> + 'static,
    {
        Self::from_body(Arc::new(body))
    }

    /// Reuse an existing body, typically one taken from another component
    pub fn from_body(body: Body<A, R, E>) -> Self {
        Self {
            body,
            filters: FilterChain::new(),
        }
    }

    /// The wrapped body
    pub fn body(&self) -> Body<A, R, E> {
        Arc::clone(&self.body)
    }

    /// A component with the same body and no filters
    pub fn without_filters(&self) -> Self {
        Self::from_body(self.body())
    }

    /// Builder form of [`Component::set_filter`]
    pub fn with_filter<F>(mut self, priority: i64, filter: F) -> Self
    where
        F: Fn(Vec<A>) -> Result<Vec<A>, E> + Send + Sync + 'static,
    {
        self.set_filter(priority, filter);
        self
    }

    /// Replace the whole filter chain
    pub fn with_filters(mut self, filters: FilterChain<A, E>) -> Self {
        self.filters = filters;
        self
    }

    /// Run the filters, then the body
    pub fn invoke(&self, ctx: &Context<'_, A, R, E>, args: Vec<A>) -> Result<R, E> {
        let args = self.filters.apply(args)?;
        self.body.invoke(ctx, args)
    }

    /// Invoke outside of any template.
    ///
    /// Sibling dispatch from the body fails with
    /// [`TemplateError::Detached`](crate::TemplateError::Detached).
    pub fn invoke_detached(&self, args: Vec<A>) -> Result<R, E> {
        self.invoke(&Context::detached(), args)
    }

    /// Insert a filter at an explicit priority, replacing any filter there
    pub fn set_filter<F>(&mut self, priority: i64, filter: F)
    where
        F: Fn(Vec<A>) -> Result<Vec<A>, E> + Send + Sync + 'static,
    {
        self.filters.set(priority, filter);
    }

    /// Append a filter after all current filters and return its key, or
    /// `None` if the auto-assigned slots are used up
    pub fn add_filter<F>(&mut self, filter: F) -> Option<FilterKey>
    where
        F: Fn(Vec<A>) -> Result<Vec<A>, E> + Send + Sync + 'static,
    {
        self.filters.push(filter)
    }

    pub fn get_filter(&self, key: impl Into<FilterKey>) -> Option<Filter<A, E>> {
        self.filters.get(key).cloned()
    }

    pub fn delete_filter(&mut self, key: impl Into<FilterKey>) {
        self.filters.remove(key);
    }

    pub fn filter_exists(&self, key: impl Into<FilterKey>) -> bool {
        self.filters.contains(key)
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    pub fn filters(&self) -> &FilterChain<A, E> {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterChain<A, E> {
        &mut self.filters
    }
}

impl<A, R, E> Invocable<A, R, E> for Component<A, R, E> {
    fn invoke(&self, ctx: &Context<'_, A, R, E>, args: Vec<A>) -> Result<R, E> {
        Component::invoke(self, ctx, args)
    }
}

impl<A, R, E> Clone for Component<A, R, E> {
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
            filters: self.filters.clone(),
        }
    }
}

impl<A, R, E> fmt::Debug for Component<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;
    use crate::template::Template;

    type Unit = Component<String, String, TemplateError>;

    fn join() -> Unit {
        Component::new(|_ctx: &Context<'_, String, String, TemplateError>, args: Vec<String>| {
            Ok(args.join(","))
        })
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_invoke_without_filters_passes_args_through() {
        let unit = join();
        assert_eq!(unit.invoke_detached(strings(&["a", "b"])).unwrap(), "a,b");
    }

    #[test]
    fn test_filters_run_before_body_in_key_order() {
        let mut unit = join();
        unit.set_filter(5, |mut args: Vec<String>| {
            args.push("five".to_string());
            Ok(args)
        });
        unit.set_filter(1, |args: Vec<String>| {
            Ok(args.into_iter().map(|a| a.to_uppercase()).collect())
        });

        // key 1 uppercases before key 5 appends
        let out = unit.invoke_detached(strings(&["x"])).unwrap();
        assert_eq!(out, "X,five");
    }

    #[test]
    fn test_filter_can_drop_arguments() {
        let unit = join().with_filter(0, |args: Vec<String>| {
            Ok(args.into_iter().skip(1).collect())
        });
        assert_eq!(unit.invoke_detached(strings(&["a", "b", "c"])).unwrap(), "b,c");
    }

    #[test]
    fn test_filter_error_propagates_and_skips_body() {
        let unit: Unit = Component::new(|_ctx: &Context<'_, String, String, TemplateError>, _args| {
            panic!("body must not run")
        })
        .with_filter(0, |_args| Err(TemplateError::invalid_argument("unit", "nope")));

        let err = unit.invoke_detached(vec![]).unwrap_err();
        assert_eq!(err, TemplateError::invalid_argument("unit", "nope"));
    }

    #[test]
    fn test_body_error_propagates_unchanged() {
        let unit: Unit = Component::new(|_ctx: &Context<'_, String, String, TemplateError>, _args| {
            Err(TemplateError::invalid_argument("unit", "bad input"))
        });
        assert_eq!(
            unit.invoke_detached(vec![]),
            Err(TemplateError::invalid_argument("unit", "bad input"))
        );
    }

    #[test]
    fn test_detached_dispatch_reports_detached() {
        let unit: Unit = Component::new(|ctx: &Context<'_, String, String, TemplateError>, args| {
            Ok(ctx.invoke("sibling", args)?.unwrap_or_default())
        });
        assert_eq!(
            unit.invoke_detached(vec![]),
            Err(TemplateError::Detached {
                name: "sibling".to_string()
            })
        );
    }

    #[test]
    fn test_context_reaches_template_siblings() {
        let mut template: Template<String> = Template::new();
        template
            .set_fn("sibling", |_ctx, args: Vec<String>| Ok(format!("<{}>", args.join(""))))
            .unwrap();

        let unit: Unit = Component::new(|ctx: &Context<'_, String, String, TemplateError>, args| {
            Ok(format!("[{}]", ctx.invoke("sibling", args)?.unwrap_or_default()))
        });
        let out = unit.invoke(&Context::new(&template), strings(&["hi"])).unwrap();
        assert_eq!(out, "[<hi>]");
    }

    #[test]
    fn test_filter_management() {
        let mut unit = join();
        let key = unit.add_filter(Ok).unwrap();
        unit.set_filter(3, Ok);

        assert_eq!(key, FilterKey::Auto(0));
        assert!(unit.filter_exists(key));
        assert!(unit.filter_exists(3));
        assert!(unit.get_filter(3).is_some());
        assert_eq!(unit.filter_count(), 2);

        unit.delete_filter(3);
        assert!(!unit.filter_exists(3));
        assert!(unit.get_filter(3).is_none());

        unit.clear_filters();
        assert_eq!(unit.filter_count(), 0);
    }

    #[test]
    fn test_with_filters_replaces_chain() {
        let mut chain = FilterChain::new();
        chain.set(1, |mut args: Vec<String>| {
            args.push("one".to_string());
            Ok(args)
        });

        let mut unit = join().with_filter(0, |_args| Ok(vec!["dropped".to_string()]));
        unit = unit.with_filters(chain);
        assert_eq!(
            unit.filters().keys().collect::<Vec<_>>(),
            vec![FilterKey::Explicit(1)]
        );

        unit.filters_mut().push(|mut args: Vec<String>| {
            args.push("last".to_string());
            Ok(args)
        });
        assert_eq!(unit.invoke_detached(strings(&["a"])).unwrap(), "a,one,last");
    }

    #[test]
    fn test_clone_has_independent_filters() {
        let original = join();
        let mut copy = original.clone();
        copy.set_filter(0, |_args| Ok(vec!["filtered".to_string()]));

        assert_eq!(original.invoke_detached(strings(&["a"])).unwrap(), "a");
        assert_eq!(copy.invoke_detached(strings(&["a"])).unwrap(), "filtered");
    }

    #[test]
    fn test_without_filters_reuses_body() {
        let filtered = join().with_filter(0, |_args| Ok(vec!["x".to_string()]));
        let bare = filtered.without_filters();

        assert!(Arc::ptr_eq(&filtered.body(), &bare.body()));
        assert_eq!(bare.filter_count(), 0);
        assert_eq!(bare.invoke_detached(strings(&["a"])).unwrap(), "a");
    }

    #[test]
    fn test_component_wraps_component() {
        let inner = join().with_filter(0, |args: Vec<String>| {
            Ok(args.into_iter().rev().collect())
        });
        let outer: Unit = Unit::from_invocable(inner).with_filter(0, |mut args: Vec<String>| {
            args.push("z".to_string());
            Ok(args)
        });

        // outer appends, inner reverses
        assert_eq!(outer.invoke_detached(strings(&["a", "b"])).unwrap(), "z,b,a");
    }

    struct Prefix(&'static str);

    impl Invocable<String, String, TemplateError> for Prefix {
        fn invoke(
            &self,
            _ctx: &Context<'_, String, String, TemplateError>,
            args: Vec<String>,
        ) -> Result<String, TemplateError> {
            Ok(format!("{}{}", self.0, args.concat()))
        }
    }

    #[test]
    fn test_hand_written_invocable() {
        let unit = Unit::from_invocable(Prefix("> "));
        assert_eq!(unit.invoke_detached(strings(&["a", "b"])).unwrap(), "> ab");
    }
}
