//! Templates: named, overridable component sets
//!
//! A [`Template`] owns components by name and dispatches calls between them.
//! Each component body receives a [`Context`] attached to the template that
//! invoked it, so components call each other much like methods on an object,
//! except that any of them can be replaced after the fact.
//!
//! # Example
//!
//! ```rust
//! use component_template::Template;
//!
//! let mut base: Template<String> = Template::with_top_level("greeting");
//! base.set_fn("greeting", |ctx, args: Vec<String>| {
//!     let name = ctx.invoke("name", args)?.unwrap_or_default();
//!     Ok(format!("Hello, {}!", name))
//! }).unwrap();
//! base.set_fn("name", |_ctx, args: Vec<String>| Ok(args.concat())).unwrap();
//!
//! // Fork and override one component; the base is untouched
//! let mut loud = base.clone();
//! loud.set_fn("name", |_ctx, args: Vec<String>| Ok(args.concat().to_uppercase())).unwrap();
//!
//! let args = vec!["world".to_string()];
//! assert_eq!(base.render(args.clone()).unwrap().as_deref(), Some("Hello, world!"));
//! assert_eq!(loud.render(args).unwrap().as_deref(), Some("Hello, WORLD!"));
//! ```

mod config;
mod context;
mod registry;

pub use config::{TemplateConfig, DEFAULT_TOP_LEVEL};
pub use context::Context;
pub use registry::{Renderer, Template};
