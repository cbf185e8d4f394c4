//! Component Template - overridable, self-referential rendering components
//!
//! A [`Template`] is a set of named [`Component`]s. Components call each other
//! by name through the [`Context`] they are invoked with, which makes them
//! behave like methods that can be replaced per instance: clone a base
//! template, override one component, and every sibling that calls it picks up
//! the new behaviour while the base stays as it was.
//!
//! Each component can also carry a [`FilterChain`], an ordered list of
//! argument rewrites applied before its body runs.
//!
//! # Example
//!
//! ```rust
//! use component_template::html::{render_table, table_template, uppercase_values, Table};
//!
//! let base = table_template("prices").unwrap();
//!
//! let mut loud = base.clone();
//! loud.get_mut("td").unwrap().set_filter(10, uppercase_values);
//!
//! let table = Table::new(
//!     vec!["Item".to_string()],
//!     vec![vec!["tea".to_string()]],
//! );
//! let html = render_table(&loud, table.clone()).unwrap();
//! assert!(html.contains(r#"<td class="col-0">TEA</td>"#));
//!
//! let html = render_table(&base, table).unwrap();
//! assert!(html.contains(r#"<td class="col-0">tea</td>"#));
//! ```

pub mod component;
pub mod error;
pub mod html;
pub mod template;

pub use component::{Body, Component, Filter, FilterChain, FilterKey, Invocable};
pub use error::{ConfigError, TemplateError};
pub use template::{Context, Renderer, Template, TemplateConfig, DEFAULT_TOP_LEVEL};
