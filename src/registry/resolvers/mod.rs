//! # Built-in Strategies
//!
//! Standard implementations for the three chains.
//!
//! | Chain | Strategy | Description |
//! |-------|----------|-------------|
//! | class | `AliasClassResolver` | Explicit short-name to canonical-name mapping |
//! | class | `NamespaceClassResolver` | Prefix to namespace expansion |
//! | argument | `ParameterArgumentResolver` | `%name%` placeholder substitution |
//! | initializer | `TypedContextInitializer` | Closure applied to one concrete context type |
//!
//! Closure adapters for one-off strategies live next to each chain:
//! [`FnClassResolver`](crate::registry::FnClassResolver),
//! [`FnArgumentResolver`](crate::registry::FnArgumentResolver) and
//! [`FnContextInitializer`](crate::registry::FnContextInitializer).

mod alias;
mod namespace;
mod parameter;
mod typed;

pub use alias::AliasClassResolver;
pub use namespace::NamespaceClassResolver;
pub use parameter::ParameterArgumentResolver;
pub use typed::TypedContextInitializer;
