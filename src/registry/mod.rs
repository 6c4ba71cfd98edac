//! # Strategy Chains
//!
//! The three ordered chains an environment handler is built from.
//!
//! ## Architecture
//!
//! ```text
//! Strategy Chains
//! ├── ClassResolverChain       (first match wins, identity fallback)
//! ├── ArgumentResolverChain    (every stage runs, output feeds the next)
//! ├── ContextInitializerChain  (every initializer runs on every context)
//! └── resolvers/
//!     ├── AliasClassResolver
//!     ├── NamespaceClassResolver
//!     ├── ParameterArgumentResolver
//!     └── TypedContextInitializer
//! ```
//!
//! All chains evaluate strictly in registration order. Strategies are held as
//! `Arc<dyn Trait>` so a chain is cheap to clone and `Send + Sync`.

pub mod argument_resolver;
pub mod class_resolver;
pub mod context_initializer;
pub mod resolvers;

pub use argument_resolver::{ArgumentResolver, ArgumentResolverChain, FnArgumentResolver};
pub use class_resolver::{ClassResolver, ClassResolverChain, FnClassResolver};
pub use context_initializer::{ContextInitializer, ContextInitializerChain, FnContextInitializer};
