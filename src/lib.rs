//! Client-side glue for a server-rendered storefront.
//!
//! The storefront renders its pages on the server; this crate is the thin
//! layer the hosting page runs after load. It owns no domain state and no
//! protocol of its own. The host hands it the page environment explicitly
//! instead of the crate reaching for ambient globals:
//!
//! - [`get_named_cookie`]: read one value out of the page's cookie jar.
//! - [`ApiClient`]: JSON requests against the storefront backend with the
//!   anti-forgery token attached.
//! - [`initialize_page`]: the once-per-load bootstrap (tooltip activation,
//!   banner auto-dismissal, active nav-link marking) against an injected
//!   [`Document`] and [`WidgetToolkit`].
//!
//! Nothing here retries, caches, or deduplicates requests, and nothing here
//! can take the hosting page down: absent elements degrade to no-ops and
//! request failures come back as values, not panics.

pub mod client;
pub mod cookies;
pub mod dom;
pub mod page;
pub mod toolkit;

pub use client::{ApiClient, RequestError, CSRF_COOKIE, CSRF_HEADER};
pub use cookies::get_named_cookie;
pub use dom::{Document, NodeId, StaticDom};
pub use page::{initialize_page, BootstrapConfig, PageHandle};
pub use toolkit::{Dismissible, NoopToolkit, WidgetToolkit};
