//! App - one portfolio viewing session.
//!
//! Owns the scheduler, viewport, block registry and widgets, and turns
//! actions and clock ticks into frames. Time is always passed in as an
//! offset from start-up, so tests drive the whole page with virtual time.
//!
//! ```text
//! Action ──► handle() ──► viewport / chat / clipboard
//!                              │
//! now ─────► update() ──► scheduler.advance ──► counters, copy ack
//!                              │
//!                     viewport.notify ──► registry.deliver ──► counters start
//!                              │
//!            frame()  ──► paint(tree, layout) ──► FrameBufferResult
//! ```

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::content::PortfolioContent;
use crate::engine::{BlockRegistry, DynamicText, ElementTree, HitTarget};
use crate::error::Result;
use crate::layout::{compute_layout, ComputedLayout};
use crate::pipeline::frame_buffer::{hit_test, paint, FrameBufferResult, HitRegion, PaintContext, TextResolver};
use crate::pipeline::terminal::set_terminal_size;
use crate::state::chat::ChatWidget;
use crate::state::clipboard::{self, CopyAck};
use crate::state::clock::Scheduler;
use crate::state::count_up::CountUp;
use crate::state::input::Action;
use crate::state::scroll::{Region, Viewport};
use crate::theme::Theme;
use crate::types::BlockKey;
use crate::view::{build_page, stat_index, ViewState};

/// Longest wait between polls while nothing animates.
const IDLE_POLL: Duration = Duration::from_millis(100);

pub struct App {
    /// Loaded once, read-only for the whole session.
    content: Rc<PortfolioContent>,
    config: AppConfig,
    theme: Theme,
    scheduler: Scheduler,
    viewport: Viewport,
    registry: BlockRegistry,
    /// Stat index -> running count-up. Created when the stat card reveals.
    counters: HashMap<usize, CountUp>,
    copy_ack: CopyAck,
    chat: ChatWidget,
    tree: ElementTree,
    layout: ComputedLayout,
    width: u16,
    height: u16,
    /// Chat scale the current tree was built with.
    built_chat_scale: f32,
    launcher_emphasized: bool,
    hit_regions: Vec<HitRegion>,
    /// Escape sequences to write to the terminal before the next frame.
    outbox: Vec<String>,
    dirty: bool,
}

impl App {
    /// Build the page for a `width` x `height` screen at time zero.
    pub fn new(
        content: impl Into<Rc<PortfolioContent>>,
        config: AppConfig,
        width: u16,
        height: u16,
    ) -> Result<Self> {
        let theme = config.theme()?;
        let scheduler = Scheduler::new();
        let copy_ack = CopyAck::new(&scheduler, config.contact.copied_ack());

        let mut app = Self {
            content: content.into(),
            config,
            theme,
            scheduler,
            viewport: Viewport::new(height),
            registry: BlockRegistry::new(),
            counters: HashMap::new(),
            copy_ack,
            chat: ChatWidget::new(),
            tree: ElementTree::new(),
            layout: ComputedLayout::new(),
            width,
            height,
            built_chat_scale: 0.0,
            launcher_emphasized: false,
            hit_regions: Vec::new(),
            outbox: Vec::new(),
            dirty: true,
        };
        app.rebuild(Duration::ZERO);
        app.reveal_visible(Duration::ZERO);

        info!(
            theme = app.theme.name,
            blocks = app.registry.len(),
            content_height = app.viewport.content_height(),
            "page mounted"
        );
        Ok(app)
    }

    // =========================================================================
    // Page
    // =========================================================================

    /// Rebuild tree and layout, then refresh regions and block mounts.
    fn rebuild(&mut self, now: Duration) {
        let state = ViewState {
            width: self.width,
            height: self.height,
            chat_scale: self.chat.panel_scale(now),
        };
        self.tree = build_page(&self.content, &self.theme, &self.config.animation, state);
        self.layout = compute_layout(&self.tree, self.width, self.height);

        self.viewport.set_height(self.height);
        self.viewport.set_content_height(self.layout.content_height);
        self.viewport.clear_regions();
        for (key, _) in self.tree.blocks() {
            if let Some(index) = self.tree.block_element(key) {
                let (_, y, _, height) = self.layout.get(index);
                self.viewport.set_region(key.clone(), Region::new(y, height));
            }
        }
        self.registry.sync(self.tree.blocks(), &mut self.viewport, now);

        self.built_chat_scale = state.chat_scale;
        self.dirty = true;
    }

    /// Deliver the viewport's observations and start counters for stat
    /// cards that just revealed.
    fn reveal_visible(&mut self, now: Duration) {
        let observations = self.viewport.notify();
        for key in self.registry.deliver(&observations, now) {
            self.dirty = true;
            if let Some(index) = stat_index(&key) {
                self.start_counter(index);
            }
        }
    }

    fn start_counter(&mut self, index: usize) {
        let Some(stat) = self.content.stats.get(index) else {
            return;
        };
        if self.counters.contains_key(&index) {
            return;
        }
        let anim = &self.config.animation;
        let counter = CountUp::start(&self.scheduler, stat.value, anim.count_up_duration_secs, anim.tick_rate);
        debug!(stat = %stat.label, target = stat.value, "stat counter started");
        self.counters.insert(index, counter);
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Advance to `now`: run due tasks and follow the chat animation.
    pub fn update(&mut self, now: Duration) {
        if self.scheduler.advance(now) > 0 {
            self.dirty = true;
        }
        self.reveal_visible(now);

        let scale = self.chat.panel_scale(now);
        if (scale - self.built_chat_scale).abs() > f32::EPSILON {
            self.rebuild(now);
        }

        let emphasized = !self.chat.is_open() && self.chat.launcher_emphasized(now);
        if emphasized != self.launcher_emphasized {
            self.launcher_emphasized = emphasized;
            self.dirty = true;
        }
    }

    /// Whether a time-driven transition is in flight.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.registry.is_animating(now) || self.chat.is_animating(now)
    }

    /// How long the event loop may block before the next update is due.
    pub fn poll_timeout(&self, now: Duration) -> Duration {
        if self.is_animating(now) {
            return self.config.animation.tick_period();
        }
        match self.scheduler.next_deadline() {
            Some(due) => due.saturating_sub(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    pub fn needs_render(&self, now: Duration) -> bool {
        self.dirty || self.is_animating(now)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Apply one user action. Returns `false` when the app should quit.
    ///
    /// The clock is brought up to `now` first, so timers started here
    /// (copy acknowledgement, counters) count from the moment of the action.
    pub fn handle(&mut self, action: Action, now: Duration) -> bool {
        if self.scheduler.advance(now) > 0 {
            self.dirty = true;
        }

        let scrolled = match action {
            Action::ScrollLines(rows) => self.viewport.scroll_by(rows),
            Action::PageUp => self.viewport.page_up(),
            Action::PageDown => self.viewport.page_down(),
            Action::Top => self.viewport.scroll_to_top(),
            Action::Bottom => self.viewport.scroll_to_bottom(),
            Action::CopyEmail => self.activate(HitTarget::CopyEmail, now),
            Action::ToggleChat => self.activate(HitTarget::ToggleChat, now),
            Action::Jump(index) => self.activate(HitTarget::Jump(index), now),
            Action::Click(x, y) => match hit_test(&self.hit_regions, x, y) {
                Some(target) => self.activate(target, now),
                None => false,
            },
            Action::Resize(width, height) => {
                self.resize(width, height, now);
                false
            }
            Action::Quit => {
                info!("quit requested");
                return false;
            }
            Action::None => false,
        };

        if scrolled {
            self.dirty = true;
            self.reveal_visible(now);
        }
        true
    }

    /// Run a click target. Returns `true` if it scrolled the page.
    fn activate(&mut self, target: HitTarget, now: Duration) -> bool {
        match target {
            HitTarget::CopyEmail => {
                self.copy_email();
                false
            }
            HitTarget::ToggleChat => {
                let open = self.chat.toggle(now);
                debug!(open, "chat toggled");
                self.rebuild(now);
                false
            }
            HitTarget::Jump(index) => self.jump(index),
        }
    }

    fn copy_email(&mut self) {
        let email = &self.content.contact.email;
        if let Some(sequence) = clipboard::copy(email) {
            self.outbox.push(sequence);
        }
        self.copy_ack.trigger();
        self.dirty = true;
        info!(%email, "email copied");
    }

    /// Scroll so the anchor `index` sits at the top of the screen.
    fn jump(&mut self, index: usize) -> bool {
        let Some(anchor) = self.tree.anchors().get(index) else {
            return false;
        };
        let (_, y, _, _) = self.layout.get(anchor.element);
        debug!(anchor = %anchor.id, y, "jump");
        self.viewport.scroll_to(y)
    }

    fn resize(&mut self, width: u16, height: u16, now: Duration) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        set_terminal_size(width, height);
        self.width = width;
        self.height = height;
        self.rebuild(now);
        self.reveal_visible(now);
        debug!(width, height, "resized");
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Paint the current frame and remember its hit regions for clicks.
    pub fn frame(&mut self, now: Duration) -> FrameBufferResult {
        let result = {
            let ctx = PaintContext {
                width: self.width,
                height: self.height,
                scroll: self.viewport.offset(),
                now,
                backdrop: self.theme.dark_bg,
                registry: &self.registry,
                text: &*self,
            };
            paint(&self.tree, &self.layout, &ctx)
        };
        self.hit_regions = result.hit_regions.clone();
        self.dirty = false;
        result
    }

    /// Drain escape sequences queued for the terminal (OSC 52 copies).
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outbox)
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn content(&self) -> &PortfolioContent {
        &self.content
    }

    pub fn shared_content(&self) -> Rc<PortfolioContent> {
        Rc::clone(&self.content)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn layout(&self) -> &ComputedLayout {
        &self.layout
    }

    pub fn chat(&self) -> &ChatWidget {
        &self.chat
    }

    pub fn is_revealed(&self, key: &str) -> bool {
        self.registry.is_revealed(&BlockKey::new(key))
    }

    /// Current value of the stat counter `index`; 0 before it starts.
    pub fn counter_value(&self, index: usize) -> u64 {
        self.counters.get(&index).map(CountUp::current).unwrap_or(0)
    }
}

impl TextResolver for App {
    fn resolve(&self, text: DynamicText) -> String {
        match text {
            DynamicText::Counter(index) => self
                .counters
                .get(&index)
                .map(CountUp::display)
                .unwrap_or_else(|| "0".to_string()),
            DynamicText::CopyLabel => self.copy_ack.label().to_string(),
            DynamicText::ChatLauncher => {
                if self.chat.is_open() {
                    " ✕ Close ".to_string()
                } else if self.launcher_emphasized {
                    "(💬 Chat)".to_string()
                } else {
                    " 💬 Chat ".to_string()
                }
            }
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("size", &(self.width, self.height))
            .field("offset", &self.viewport.offset())
            .field("blocks", &self.registry.len())
            .field("pending", &self.registry.pending())
            .field("counters", &self.counters.len())
            .finish()
    }
}
