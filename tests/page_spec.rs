use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use storefront_glue::{
    initialize_page, BootstrapConfig, Dismissible, NodeId, StaticDom, WidgetToolkit,
};

/// Fake toolkit recording every widget the bootstrap constructs.
#[derive(Default)]
struct RecordingToolkit {
    tooltips: Mutex<Vec<NodeId>>,
    banners: Mutex<Vec<BannerProbe>>,
}

/// Shared view of one fake banner widget.
#[derive(Clone)]
struct BannerProbe {
    node: NodeId,
    closes: Arc<AtomicUsize>,
    removed: Arc<AtomicBool>,
}

struct FakeBanner {
    probe: BannerProbe,
}

impl Dismissible for FakeBanner {
    fn close(&mut self) {
        // closing an element the host already removed stays harmless
        if self.probe.removed.load(Ordering::SeqCst) {
            return;
        }
        self.probe.closes.fetch_add(1, Ordering::SeqCst);
    }
}

impl WidgetToolkit for RecordingToolkit {
    fn create_tooltip(&self, node: NodeId) {
        self.tooltips.lock().unwrap().push(node);
    }

    fn create_dismissible(&self, node: NodeId) -> Box<dyn Dismissible> {
        let probe = BannerProbe {
            node,
            closes: Arc::new(AtomicUsize::new(0)),
            removed: Arc::new(AtomicBool::new(false)),
        };
        self.banners.lock().unwrap().push(probe.clone());
        Box::new(FakeBanner { probe })
    }
}

impl RecordingToolkit {
    fn banner_probes(&self) -> Vec<BannerProbe> {
        self.banners.lock().unwrap().clone()
    }
}

/// A page with a navbar (`/`, `/shop`, `/shop/cart`), two alert banners,
/// and one tooltip trigger, mirroring the server-rendered layout.
fn storefront_page() -> (StaticDom, Vec<NodeId>) {
    let dom = StaticDom::new();

    let nav = dom.insert("ul", None);
    dom.add_class(nav, "navbar-nav");
    let mut links = Vec::new();
    for href in ["/", "/shop", "/shop/cart"] {
        let li = dom.insert("li", Some(nav));
        let link = dom.insert("a", Some(li));
        dom.add_class(link, "nav-link");
        dom.set_attribute(link, "href", href);
        links.push(link);
    }

    for _ in 0..2 {
        let banner = dom.insert("div", None);
        dom.add_class(banner, "alert");
    }

    let trigger = dom.insert("button", None);
    dom.set_attribute(trigger, "data-bs-toggle", "tooltip");

    (dom, links)
}

fn test_config() -> BootstrapConfig {
    BootstrapConfig::with_banner_delay(Duration::from_millis(5000))
}

mod tooltip_activation {
    use super::*;

    #[tokio::test]
    async fn binds_a_widget_to_each_trigger() {
        let (dom, _) = storefront_page();
        let toolkit = RecordingToolkit::default();

        initialize_page(&dom, &toolkit, "/", &test_config());

        assert_eq!(toolkit.tooltips.lock().unwrap().len(), 1);
    }
}

mod active_link_marking {
    use super::*;

    #[tokio::test]
    async fn marks_every_prefix_match_except_root() {
        let (dom, links) = storefront_page();
        let toolkit = RecordingToolkit::default();

        initialize_page(&dom, &toolkit, "/shop/cart", &test_config());

        assert!(!dom.has_class(links[0], "active"), "root link never marked");
        assert!(dom.has_class(links[1], "active"), "/shop prefixes /shop/cart");
        assert!(dom.has_class(links[2], "active"), "/shop/cart matches itself");
    }

    #[tokio::test]
    async fn root_path_marks_nothing() {
        let (dom, links) = storefront_page();
        let toolkit = RecordingToolkit::default();

        initialize_page(&dom, &toolkit, "/", &test_config());

        for link in links {
            assert!(!dom.has_class(link, "active"));
        }
    }

    #[tokio::test]
    async fn links_without_href_are_skipped() {
        let dom = StaticDom::new();
        let nav = dom.insert("ul", None);
        dom.add_class(nav, "navbar-nav");
        let bare = dom.insert("a", Some(nav));
        dom.add_class(bare, "nav-link");
        let toolkit = RecordingToolkit::default();

        initialize_page(&dom, &toolkit, "/shop", &test_config());

        assert!(!dom.has_class(bare, "active"));
    }
}

mod banner_dismissal {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn closes_each_banner_once_after_the_delay() {
        let (dom, _) = storefront_page();
        let toolkit = RecordingToolkit::default();

        let handle = initialize_page(&dom, &toolkit, "/", &test_config());
        assert_eq!(handle.banner_count(), 2);

        tokio::time::advance(Duration::from_millis(4999)).await;
        for probe in toolkit.banner_probes() {
            assert_eq!(
                probe.closes.load(Ordering::SeqCst),
                0,
                "banner {} closed before the delay",
                probe.node
            );
        }

        tokio::time::advance(Duration::from_millis(2)).await;
        handle.wait_for_banners().await;

        for probe in toolkit.banner_probes() {
            assert_eq!(
                probe.closes.load(Ordering::SeqCst),
                1,
                "banner {} not closed exactly once",
                probe.node
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timer_firing_after_manual_close_is_harmless() {
        let (dom, _) = storefront_page();
        let toolkit = RecordingToolkit::default();

        let handle = initialize_page(&dom, &toolkit, "/", &test_config());
        let probes = toolkit.banner_probes();

        // the user dismissed the first banner before the timer fired
        probes[0].removed.store(true, Ordering::SeqCst);

        tokio::time::advance(Duration::from_millis(5001)).await;
        handle.wait_for_banners().await;

        assert_eq!(probes[0].closes.load(Ordering::SeqCst), 0);
        assert_eq!(probes[1].closes.load(Ordering::SeqCst), 1);
    }
}

mod empty_documents {
    use super::*;

    #[tokio::test]
    async fn bootstrap_degrades_to_a_noop() {
        let dom = StaticDom::new();
        let toolkit = RecordingToolkit::default();

        let handle = initialize_page(&dom, &toolkit, "/shop", &test_config());

        assert_eq!(handle.banner_count(), 0);
        assert!(toolkit.tooltips.lock().unwrap().is_empty());
        handle.wait_for_banners().await;
    }
}
