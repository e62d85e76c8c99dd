//! Page bootstrap, run once per page load.
//!
//! Three independent sub-tasks: tooltip activation, banner auto-dismissal,
//! and active nav-link marking. They share no state and tolerate empty
//! result sets, so a page without banners or nav links degrades to a no-op.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::dom::Document;
use crate::toolkit::WidgetToolkit;

/// Elements that get a tooltip widget on load.
pub const TOOLTIP_SELECTOR: &str = r#"[data-bs-toggle="tooltip"]"#;

/// Notification banners that auto-dismiss.
pub const BANNER_SELECTOR: &str = ".alert";

/// Navigation links considered for active marking.
pub const NAV_LINK_SELECTOR: &str = ".navbar-nav a.nav-link";

const DEFAULT_BANNER_DELAY_MS: u64 = 5000;
const DEFAULT_ACTIVE_CLASS: &str = "active";

/// Bootstrap configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Delay before a banner is auto-dismissed (from STOREFRONT_BANNER_DELAY_MS)
    pub banner_delay: Duration,
    /// Class marking the active navigation link (from STOREFRONT_ACTIVE_CLASS)
    pub active_class: String,
}

impl BootstrapConfig {
    /// Load bootstrap configuration from environment variables.
    pub fn from_env() -> Self {
        let banner_delay = std::env::var("STOREFRONT_BANNER_DELAY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_BANNER_DELAY_MS));

        let active_class = std::env::var("STOREFRONT_ACTIVE_CLASS")
            .unwrap_or_else(|_| DEFAULT_ACTIVE_CLASS.to_string());

        Self {
            banner_delay,
            active_class,
        }
    }

    /// Create a config with an explicit banner delay (for testing).
    pub fn with_banner_delay(delay: Duration) -> Self {
        Self {
            banner_delay: delay,
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Handles for the banner timers spawned during bootstrap.
///
/// A real host just drops this and lets the timers run detached; tests and
/// shutdown paths can await them instead.
pub struct PageHandle {
    banner_timers: Vec<JoinHandle<()>>,
}

impl PageHandle {
    /// Number of banners scheduled for auto-dismissal.
    pub fn banner_count(&self) -> usize {
        self.banner_timers.len()
    }

    /// Wait for every banner timer to fire.
    pub async fn wait_for_banners(self) {
        for timer in self.banner_timers {
            let _ = timer.await;
        }
    }
}

/// Run the page bootstrap once against a loaded document.
///
/// `current_path` is the page's location path. Must be called from within a
/// tokio runtime; the banner timers are spawned onto it and keep running
/// after this returns. The sub-tasks have no data dependency on each other,
/// so their order carries no meaning.
pub fn initialize_page(
    dom: &dyn Document,
    toolkit: &dyn WidgetToolkit,
    current_path: &str,
    config: &BootstrapConfig,
) -> PageHandle {
    activate_tooltips(dom, toolkit);
    let banner_timers = schedule_banner_dismissal(dom, toolkit, config.banner_delay);
    mark_active_links(dom, current_path, &config.active_class);
    PageHandle { banner_timers }
}

fn activate_tooltips(dom: &dyn Document, toolkit: &dyn WidgetToolkit) {
    let triggers = dom.query(TOOLTIP_SELECTOR);
    tracing::debug!(count = triggers.len(), "activating tooltip widgets");
    for node in triggers {
        toolkit.create_tooltip(node);
    }
}

/// Schedule one independent one-shot timer per banner present right now.
///
/// Banners inserted after load are not watched, and the timers are never
/// cancelled; firing against an already-closed banner relies on
/// [`crate::toolkit::Dismissible::close`] being a no-op for removed
/// elements.
fn schedule_banner_dismissal(
    dom: &dyn Document,
    toolkit: &dyn WidgetToolkit,
    delay: Duration,
) -> Vec<JoinHandle<()>> {
    let banners = dom.query(BANNER_SELECTOR);
    tracing::debug!(
        count = banners.len(),
        delay_ms = delay.as_millis() as u64,
        "scheduling banner auto-dismissal"
    );
    banners
        .into_iter()
        .map(|node| {
            let mut widget = toolkit.create_dismissible(node);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                widget.close();
            })
        })
        .collect()
}

/// Mark every nav link whose `href` prefixes the current path.
///
/// The root link `/` is never marked; it would prefix every path. All
/// qualifying links are marked, exclusivity is the stylesheet's concern.
fn mark_active_links(dom: &dyn Document, current_path: &str, active_class: &str) {
    for node in dom.query(NAV_LINK_SELECTOR) {
        let Some(href) = dom.attribute(node, "href") else {
            continue;
        };
        if href != "/" && current_path.starts_with(&href) {
            dom.add_class(node, active_class);
        }
    }
}
