//! Scripted in-memory page and virtual clock for engine tests.
//!
//! Selectors are not evaluated: each test answers the exact `(scope, selector)`
//! pairs the code under test will ask for. Visibility is time-driven so hover
//! reactions can model panels that mount a few milliseconds after the event.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

use crate::clock::Clock;
use crate::event::SyntheticEvent;
use crate::page::{ComputedStyle, Page, PageError, Rect, Scope};

pub type NodeId = usize;

const FRAME: Duration = Duration::from_millis(16);

struct FakeNode {
    text: String,
    parent: Option<NodeId>,
    style: ComputedStyle,
    rect: Rect,
    /// Visible once virtual time reaches this instant; `None` while hidden.
    shown_from: Option<Duration>,
    style_fails: bool,
}

/// One recorded dispatch. `target` is `None` for the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub target: Option<NodeId>,
    pub event: SyntheticEvent,
}

#[derive(Default)]
struct Inner {
    nodes: Vec<FakeNode>,
    root: Option<NodeId>,
    queries: HashMap<(Option<NodeId>, String), Vec<NodeId>>,
    closest: HashMap<(NodeId, String), NodeId>,
    reveals: HashMap<NodeId, Vec<(NodeId, Duration)>>,
    rejected: HashSet<String>,
    dispatch_fails: bool,
    log: Vec<Dispatched>,
}

pub struct FakePage {
    inner: RefCell<Inner>,
    now: Rc<Cell<Duration>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self { inner: RefCell::new(Inner::default()), now: Rc::new(Cell::new(Duration::ZERO)) }
    }

    /// A clock sharing this page's virtual time.
    pub fn clock(&self) -> FakeClock {
        FakeClock {
            now: Rc::clone(&self.now),
            sleeps: Rc::new(RefCell::new(Vec::new())),
            frames: Rc::new(Cell::new(0)),
        }
    }

    fn push(&self, text: &str, shown_from: Option<Duration>) -> NodeId {
        let mut inner = self.inner.borrow_mut();
        inner.nodes.push(FakeNode {
            text: text.to_string(),
            parent: None,
            style: ComputedStyle::default(),
            rect: Rect::new(20.0, 40.0, 120.0, 32.0),
            shown_from,
            style_fails: false,
        });
        inner.nodes.len() - 1
    }

    /// A visible element with `text`.
    pub fn element(&self, text: &str) -> NodeId {
        self.push(text, Some(Duration::ZERO))
    }

    /// An element that stays hidden until revealed.
    pub fn hidden_element(&self, text: &str) -> NodeId {
        self.push(text, None)
    }

    /// A visible element parented under `parent`.
    pub fn child(&self, parent: NodeId, text: &str) -> NodeId {
        let id = self.element(text);
        self.inner.borrow_mut().nodes[id].parent = Some(parent);
        id
    }

    pub fn set_root(&self, node: NodeId) {
        self.inner.borrow_mut().root = Some(node);
    }

    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        self.inner.borrow_mut().nodes[node].rect = rect;
    }

    pub fn set_background(&self, node: NodeId, color: &str) {
        self.inner.borrow_mut().nodes[node].style.background_color = color.to_string();
    }

    pub fn set_background_image(&self, node: NodeId, image: &str) {
        self.inner.borrow_mut().nodes[node].style.background_image = image.to_string();
    }

    pub fn fail_style(&self, node: NodeId) {
        self.inner.borrow_mut().nodes[node].style_fails = true;
    }

    pub fn hide(&self, node: NodeId) {
        self.inner.borrow_mut().nodes[node].shown_from = None;
    }

    /// Answer `selector` within `scope` (`None` = document) with `nodes`.
    pub fn answer(&self, scope: Option<NodeId>, selector: &str, nodes: &[NodeId]) {
        self.inner
            .borrow_mut()
            .queries
            .insert((scope, selector.to_string()), nodes.to_vec());
    }

    pub fn answer_closest(&self, node: NodeId, selector: &str, ancestor: NodeId) {
        self.inner
            .borrow_mut()
            .closest
            .insert((node, selector.to_string()), ancestor);
    }

    /// Hovering `trigger` makes `target` visible `delay` later. Replaces any
    /// earlier delay scripted for the same pair.
    pub fn reveal_on_hover(&self, trigger: NodeId, target: NodeId, delay: Duration) {
        let mut inner = self.inner.borrow_mut();
        let reveals = inner.reveals.entry(trigger).or_default();
        reveals.retain(|(t, _)| *t != target);
        reveals.push((target, delay));
    }

    /// Make every lookup of `selector` fail as a syntax error.
    pub fn reject_selector(&self, selector: &str) {
        self.inner.borrow_mut().rejected.insert(selector.to_string());
    }

    /// Make every dispatch fail.
    pub fn fail_dispatch(&self) {
        self.inner.borrow_mut().dispatch_fails = true;
    }

    pub fn events(&self) -> Vec<Dispatched> {
        self.inner.borrow().log.clone()
    }

    /// Names of events dispatched at `target`, in order.
    pub fn names_at(&self, target: Option<NodeId>) -> Vec<&'static str> {
        self.inner
            .borrow()
            .log
            .iter()
            .filter(|d| d.target == target)
            .map(|d| d.event.name)
            .collect()
    }

    pub fn clear_events(&self) {
        self.inner.borrow_mut().log.clear();
    }

    fn visible_now(&self, node: &FakeNode) -> bool {
        node.shown_from.is_some_and(|t| self.now.get() >= t)
    }

    fn lookup(&self, scope: Scope<'_, NodeId>, selector: &str) -> Result<Vec<NodeId>, PageError> {
        let inner = self.inner.borrow();
        if inner.rejected.contains(selector) {
            return Err(PageError::Selector { selector: selector.to_string(), reason: "SyntaxError".into() });
        }
        let key = match scope {
            Scope::Document => None,
            Scope::Node(id) => Some(*id),
        };
        Ok(inner
            .queries
            .get(&(key, selector.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

impl Page for FakePage {
    type Node = NodeId;

    fn document_element(&self) -> Option<NodeId> {
        self.inner.borrow().root
    }

    fn query(&self, scope: Scope<'_, NodeId>, selector: &str) -> Result<Option<NodeId>, PageError> {
        Ok(self.lookup(scope, selector)?.first().copied())
    }

    fn query_all(&self, scope: Scope<'_, NodeId>, selector: &str) -> Result<Vec<NodeId>, PageError> {
        self.lookup(scope, selector)
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Result<Option<NodeId>, PageError> {
        let inner = self.inner.borrow();
        if inner.rejected.contains(selector) {
            return Err(PageError::Selector { selector: selector.to_string(), reason: "SyntaxError".into() });
        }
        Ok(inner.closest.get(&(*node, selector.to_string())).copied())
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.inner.borrow().nodes[*node].parent
    }

    fn text(&self, node: &NodeId) -> String {
        self.inner.borrow().nodes[*node].text.clone()
    }

    fn style(&self, node: &NodeId) -> Result<ComputedStyle, PageError> {
        let inner = self.inner.borrow();
        let fake = &inner.nodes[*node];
        if fake.style_fails {
            return Err(PageError::Style("detached".into()));
        }
        let mut style = fake.style.clone();
        if !self.visible_now(fake) {
            style.display = "none".into();
        }
        Ok(style)
    }

    fn rect(&self, node: &NodeId) -> Rect {
        self.inner.borrow().nodes[*node].rect
    }

    fn dispatch(&self, target: Scope<'_, NodeId>, event: &SyntheticEvent) -> Result<(), PageError> {
        let mut inner = self.inner.borrow_mut();
        if inner.dispatch_fails {
            return Err(PageError::Dispatch { event: event.name, reason: "listener threw".into() });
        }
        let target = match target {
            Scope::Document => None,
            Scope::Node(id) => Some(*id),
        };
        inner.log.push(Dispatched { target, event: event.clone() });

        if event.name == "pointerover" {
            if let Some(id) = target {
                let now = self.now.get();
                let reveals = inner.reveals.get(&id).cloned().unwrap_or_default();
                for (revealed, delay) in reveals {
                    let node = &mut inner.nodes[revealed];
                    if node.shown_from.is_none() {
                        node.shown_from = Some(now + delay);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Virtual clock: sleeping advances shared time instantly, then yields once so
/// concurrently joined futures interleave the way they would on a real loop.
#[derive(Clone)]
pub struct FakeClock {
    now: Rc<Cell<Duration>>,
    sleeps: Rc<RefCell<Vec<Duration>>>,
    frames: Rc<Cell<u32>>,
}

impl FakeClock {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }

    pub fn frames(&self) -> u32 {
        self.frames.get()
    }

    pub fn elapsed(&self) -> Duration {
        self.now.get()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.now.set(self.now.get() + duration);
        self.sleeps.borrow_mut().push(duration);
        YieldOnce::default()
    }

    fn next_frame(&self) -> impl Future<Output = ()> {
        self.now.set(self.now.get() + FRAME);
        self.frames.set(self.frames.get() + 1);
        YieldOnce::default()
    }
}

#[derive(Default)]
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

/// Hover-to-visible delay for scripted menus.
pub const MENU_DELAY: Duration = Duration::from_millis(60);

fn document_root(page: &FakePage, background: &str) -> NodeId {
    let root = page.element("");
    page.set_background(root, background);
    page.set_rect(root, Rect::new(0.0, 0.0, 1280.0, 800.0));
    page.set_root(root);
    page.answer(None, ":root", &[root]);
    root
}

/// Handles into a scripted main-site header.
pub struct HeaderNodes {
    pub root: NodeId,
    pub trigger: NodeId,
    pub popover: NodeId,
    pub entry: NodeId,
    pub wrap: NodeId,
    pub submenu: NodeId,
    pub dark_option: NodeId,
    pub light_option: NodeId,
}

/// Main-site header: avatar `li`, nested popover, theme entry showing
/// `entry_text`, and a right-hand submenu with dark and light options.
pub fn header_site(background: &str, entry_text: &str) -> (FakePage, HeaderNodes) {
    let page = FakePage::new();
    let root = document_root(&page, background);

    let trigger = page.element("头像");
    page.answer(None, "li.v-popover-wrap.header-avatar-wrap", &[trigger]);

    let popover = page.hidden_element("个人中心 投稿管理");
    page.answer(Some(trigger), "div.v-popover", &[popover]);
    page.reveal_on_hover(trigger, popover, MENU_DELAY);

    let panel = page.element("");
    page.answer(Some(popover), ".v-popover-content.avatar-popover", &[panel]);

    let profile = page.element("个人中心");
    let entry = page.element(entry_text);
    page.answer(
        Some(panel),
        ".links-item .v-popover-wrap > a.single-link-item .link-title span",
        &[profile, entry],
    );

    let wrap = page.element("");
    page.answer_closest(entry, ".v-popover-wrap", wrap);

    let submenu = page.hidden_element("深色 浅色");
    page.answer(None, ".v-popover.is-right .v-popover-content.sub-links-item", &[submenu]);
    page.reveal_on_hover(wrap, submenu, MENU_DELAY);

    let dark_option = page.element(" 深色 ");
    let light_option = page.element(" 浅色 ");
    page.answer(Some(submenu), "a.single-link-item.sub-link-item", &[dark_option, light_option]);

    page.answer(None, ".v-popover", &[popover, submenu]);

    (page, HeaderNodes { root, trigger, popover, entry, wrap, submenu, dark_option, light_option })
}

/// Handles into a scripted sub-site header.
pub struct GenericNodes {
    pub root: NodeId,
    pub trigger: NodeId,
    pub menu: NodeId,
    pub entry: NodeId,
    pub submenu: NodeId,
    pub follow_option: NodeId,
    pub light_option: NodeId,
    pub dark_option: NodeId,
}

/// Sub-site header reachable only through the generic selectors: a loose
/// popover menu and a submenu recognizable only by its text.
pub fn generic_site(background: &str, entry_text: &str) -> (FakePage, GenericNodes) {
    let page = FakePage::new();
    let root = document_root(&page, background);

    let trigger = page.element("头像");
    page.answer(None, ".right-entry .header-avatar", &[trigger]);

    let menu = page.hidden_element("个人中心 投稿管理");
    page.reveal_on_hover(trigger, menu, MENU_DELAY);

    let submenu = page.hidden_element("跟随系统 浅色 深色");
    page.answer(None, ".v-popover", &[menu, submenu]);

    let profile = page.element("个人中心");
    let entry = page.element(entry_text);
    page.answer(
        Some(menu),
        r#"a, button, div, li, [role="menuitem"], [role="menuitemradio"]"#,
        &[profile, entry],
    );
    page.reveal_on_hover(entry, submenu, MENU_DELAY);

    let follow_option = page.element("跟随系统");
    let light_option = page.element("浅色");
    let dark_option = page.element("深色");
    page.answer(
        Some(submenu),
        r#"a.single-link-item.sub-link-item, a, [role="menuitem"], [role="menuitemradio"]"#,
        &[follow_option, light_option, dark_option],
    );

    (page, GenericNodes { root, trigger, menu, entry, submenu, follow_option, light_option, dark_option })
}
