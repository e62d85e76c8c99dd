//! Capability seam for the hosting page's UI widget toolkit.
//!
//! The real toolkit lives outside this crate; the host injects whatever
//! wraps its widgets. The bootstrap only ever constructs widgets and closes
//! banners, so that is the whole surface.

use crate::dom::NodeId;

/// One live dismissal wrapper bound to a banner element.
pub trait Dismissible: Send {
    /// Close the banner. Closing an element the host already removed must
    /// be a no-op, never a panic: a manual dismissal can race the timer.
    fn close(&mut self);
}

/// Widget constructors supplied by the hosting page.
pub trait WidgetToolkit: Send + Sync {
    /// Bind a tooltip widget to the element.
    fn create_tooltip(&self, node: NodeId);

    /// Bind a dismissal wrapper to a banner element.
    fn create_dismissible(&self, node: NodeId) -> Box<dyn Dismissible>;
}

/// Toolkit that only records activity on the diagnostic channel, for hosts
/// without a widget layer attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopToolkit;

impl WidgetToolkit for NoopToolkit {
    fn create_tooltip(&self, node: NodeId) {
        tracing::debug!(node, "tooltip requested with no widget toolkit attached");
    }

    fn create_dismissible(&self, node: NodeId) -> Box<dyn Dismissible> {
        Box::new(NoopDismiss { node })
    }
}

struct NoopDismiss {
    node: NodeId,
}

impl Dismissible for NoopDismiss {
    fn close(&mut self) {
        tracing::debug!(node = self.node, "banner close requested with no widget toolkit attached");
    }
}
