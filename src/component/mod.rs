//! Components: overridable units of behaviour
//!
//! A [`Component`] wraps a body together with a [`FilterChain`] that rewrites
//! the argument list before the body runs. Components are stored by name in a
//! [`Template`](crate::Template), which hands itself to the body as the
//! execution context so the body can call its siblings.

mod filter;
mod unit;

pub use filter::{Filter, FilterChain, FilterKey};
pub use unit::{Body, Component, Invocable};
