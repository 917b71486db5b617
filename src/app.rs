// ── Window controller ─────────────────────────────────────────────────────────
//
// A single `Controller` is created per top-level window and lives in the
// window registry (`platform::win32::window`) until WM_DESTROY.  All
// mutations happen on the UI thread, from inside message handlers.
//
// The controller is generic over `Surface` so that its lifecycle, layout and
// dispatch rules can be exercised without a real window.

use tracing::{debug, warn};

use crate::{
    error::{InspectorError, Result},
    platform::{Pane, Surface},
    ui::{
        command::{CommandId, CommandTable},
        layout::{self, LayoutMetrics, PaneLayout},
        status::StatusValue,
    },
};

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// Where the window is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Controller exists, no window yet.
    Uninitialized,
    /// The window exists (WM_CREATE seen); children not created yet.
    Constructing,
    /// Children exist and have been laid out; events are acted on.
    Live,
    /// WM_DESTROY is being processed.
    ShuttingDown,
    /// Quit has been requested; nothing more is processed.
    Terminated,
}

/// A platform event, already decoded from the raw window message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Created,
    Resized,
    Command(CommandId),
    Destroyed,
    Other,
}

// Window message numbers (WinUser.h).
const WM_CREATE: u32 = 0x0001;
const WM_DESTROY: u32 = 0x0002;
const WM_SIZE: u32 = 0x0005;
const WM_COMMAND: u32 = 0x0111;

impl Event {
    /// Decode a raw window message.  For WM_COMMAND the control id is the low
    /// word of `wparam`; the high word carries the notification code.
    pub(crate) fn decode(msg: u32, wparam: usize) -> Self {
        match msg {
            WM_CREATE => Self::Created,
            WM_SIZE => Self::Resized,
            WM_COMMAND => Self::Command(CommandId((wparam & 0xFFFF) as u16)),
            WM_DESTROY => Self::Destroyed,
            _ => Self::Other,
        }
    }
}

/// What the window procedure should do after the controller has seen an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// Fully handled; return 0 without default processing.
    Handled,
    /// Fall through to `DefWindowProcW`.
    Default,
}

// ── Controller ────────────────────────────────────────────────────────────────

pub(crate) struct Controller<S: Surface> {
    surface: S,
    metrics: LayoutMetrics,
    phase: Phase,
    commands: CommandTable<Controller<S>>,
    /// Number of buttons created so far; the next one goes in this slot.
    button_slots: usize,
    status: String,
    layout: Option<PaneLayout>,
}

impl<S: Surface> Controller<S> {
    /// Text shown by the status label before anything updates it.
    pub(crate) const INITIAL_STATUS: &'static str = "0";

    pub(crate) fn new(surface: S, metrics: LayoutMetrics) -> Self {
        Self {
            surface,
            metrics,
            phase: Phase::Uninitialized,
            commands: CommandTable::new(),
            button_slots: 0,
            status: Self::INITIAL_STATUS.to_owned(),
            layout: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn surface(&self) -> &S {
        &self.surface
    }

    pub(crate) fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Text currently shown in the status label.
    #[cfg(test)]
    pub(crate) fn status(&self) -> &str {
        &self.status
    }

    /// Pane rectangles from the most recent layout pass.
    #[cfg(test)]
    pub(crate) fn layout(&self) -> Option<PaneLayout> {
        self.layout
    }

    // ── Event handling ────────────────────────────────────────────────────────

    /// React to one decoded window event.
    ///
    /// Errors are only possible from the resize path (client-rect query or
    /// repositioning a pane) and are fatal to the caller.
    pub(crate) fn handle_event(&mut self, event: Event) -> Result<Disposition> {
        match event {
            Event::Created if self.phase == Phase::Uninitialized => {
                self.phase = Phase::Constructing;
                Ok(Disposition::Handled)
            }
            Event::Resized if self.phase == Phase::Live => {
                self.apply_layout()?;
                Ok(Disposition::Default)
            }
            Event::Command(id) if self.phase == Phase::Live => Ok(self.dispatch(id)),
            Event::Destroyed if self.phase != Phase::Terminated => {
                self.phase = Phase::ShuttingDown;
                self.surface.request_quit();
                self.phase = Phase::Terminated;
                Ok(Disposition::Handled)
            }
            _ => Ok(Disposition::Default),
        }
    }

    /// Create the built-in children and run the first layout pass.
    pub(crate) fn finish_construction(&mut self) -> Result<()> {
        if self.phase != Phase::Constructing {
            return Err(InspectorError::NotLive(self.phase));
        }
        self.surface
            .create_builtin_controls(self.metrics.status_label, &self.status)?;
        self.apply_layout()?;
        self.phase = Phase::Live;
        Ok(())
    }

    fn apply_layout(&mut self) -> Result<()> {
        let client = self.surface.client_size()?;
        let panes = layout::compute(client, &self.metrics);
        self.surface.place(Pane::RichText, panes.rich_text)?;
        self.surface.place(Pane::PlainText, panes.plain_text)?;
        if self.layout != Some(panes) {
            debug!(
                width = client.width,
                height = client.height,
                pane_height = panes.rich_text.height,
                "layout changed"
            );
        }
        self.layout = Some(panes);
        Ok(())
    }

    fn dispatch(&mut self, id: CommandId) -> Disposition {
        let Some(callback) = self.commands.get(id) else {
            return Disposition::Default;
        };
        // A callback that pumps messages can be re-entered for its own
        // command; the inner invocation is dropped.
        let Ok(mut callback) = callback.try_borrow_mut() else {
            warn!(%id, "command is already running; ignoring re-entrant dispatch");
            return Disposition::Handled;
        };
        debug!(%id, "dispatching command");
        (&mut *callback)(self);
        Disposition::Handled
    }

    // ── Commands & status ─────────────────────────────────────────────────────

    /// Add a button labeled `label` below the existing ones and bind `callback`
    /// to `id`.  Registering an id again replaces its callback but still adds
    /// a new button.
    pub(crate) fn register_command<F>(&mut self, id: CommandId, label: &str, callback: F) -> Result<()>
    where
        F: FnMut(&mut Self) + 'static,
    {
        if id.is_reserved() {
            return Err(InspectorError::ReservedCommandId);
        }
        if self.phase != Phase::Live {
            return Err(InspectorError::NotLive(self.phase));
        }

        let rect = layout::button_rect(&self.metrics, self.button_slots);
        self.surface.create_button(id, label, rect)?;
        self.button_slots += 1;

        if self.commands.insert(id, callback) {
            debug!(%id, label, "command callback replaced");
        } else {
            debug!(%id, label, "command registered");
        }
        Ok(())
    }

    /// Show `value` in the status label.
    pub(crate) fn update_status(&mut self, value: impl Into<StatusValue>) {
        let text = value.into().to_string();
        if let Err(e) = self.surface.set_text(Pane::Status, &text) {
            warn!(error = %e, "failed to update status label");
        }
        self.status = text;
    }

    // ── Pane content ──────────────────────────────────────────────────────────

    pub(crate) fn plain_text(&self) -> Result<String> {
        self.surface.text(Pane::PlainText)
    }

    pub(crate) fn set_plain_text(&mut self, text: &str) -> Result<()> {
        self.surface.set_text(Pane::PlainText, text)
    }

    pub(crate) fn rich_text_rtf(&self) -> Result<String> {
        self.surface.rich_text_rtf()
    }

    pub(crate) fn set_rich_text_rtf(&mut self, rtf: &str) -> Result<()> {
        self.surface.set_rich_text_rtf(rtf)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::ui::layout::{Rect, Size};

    /// Records every call the controller makes.
    #[derive(Default)]
    pub(crate) struct FakeSurface {
        pub(crate) client: Size,
        pub(crate) built: bool,
        pub(crate) placements: Vec<(Pane, Rect)>,
        pub(crate) buttons: Vec<(CommandId, String, Rect)>,
        pub(crate) status: String,
        pub(crate) plain: String,
        pub(crate) rich_rtf: String,
        pub(crate) quit_requests: usize,
    }

    impl Surface for FakeSurface {
        fn create_builtin_controls(&mut self, _status: Rect, initial_status: &str) -> Result<()> {
            self.built = true;
            self.status = initial_status.to_owned();
            Ok(())
        }

        fn client_size(&self) -> Result<Size> {
            Ok(self.client)
        }

        fn place(&mut self, pane: Pane, rect: Rect) -> Result<()> {
            self.placements.push((pane, rect));
            Ok(())
        }

        fn create_button(&mut self, id: CommandId, label: &str, rect: Rect) -> Result<()> {
            self.buttons.push((id, label.to_owned(), rect));
            Ok(())
        }

        fn set_text(&mut self, pane: Pane, text: &str) -> Result<()> {
            match pane {
                Pane::Status => self.status = text.to_owned(),
                Pane::PlainText => self.plain = text.to_owned(),
                Pane::RichText => self.rich_rtf = text.to_owned(),
            }
            Ok(())
        }

        fn text(&self, pane: Pane) -> Result<String> {
            Ok(match pane {
                Pane::Status => self.status.clone(),
                Pane::PlainText => self.plain.clone(),
                Pane::RichText => self.rich_rtf.clone(),
            })
        }

        fn rich_text_rtf(&self) -> Result<String> {
            Ok(self.rich_rtf.clone())
        }

        fn set_rich_text_rtf(&mut self, rtf: &str) -> Result<()> {
            self.rich_rtf = rtf.to_owned();
            Ok(())
        }

        fn request_quit(&mut self) {
            self.quit_requests += 1;
        }
    }

    /// A controller that has gone through WM_CREATE and child creation.
    pub(crate) fn live_controller(width: i32, height: i32) -> Controller<FakeSurface> {
        let surface = FakeSurface {
            client: Size::new(width, height),
            ..FakeSurface::default()
        };
        let mut c = Controller::new(surface, LayoutMetrics::default());
        assert_eq!(c.handle_event(Event::Created).expect("create"), Disposition::Handled);
        c.finish_construction().expect("construct");
        c
    }

    #[test]
    fn construction_reaches_live_with_one_layout_pass() {
        let c = live_controller(800, 600);
        assert_eq!(c.phase(), Phase::Live);
        assert!(c.surface().built);
        assert_eq!(c.surface().status, "0");
        assert_eq!(c.surface().placements.len(), 2);
        assert_eq!(c.layout().map(|l| l.rich_text), Some(Rect::new(0, 46, 800, 277)));
    }

    #[test]
    fn events_before_live_are_not_acted_on() {
        let mut c = Controller::new(FakeSurface::default(), LayoutMetrics::default());
        assert_eq!(c.handle_event(Event::Resized).expect("resize"), Disposition::Default);
        c.handle_event(Event::Created).expect("create");
        assert_eq!(c.phase(), Phase::Constructing);
        assert_eq!(c.handle_event(Event::Resized).expect("resize"), Disposition::Default);
        assert_eq!(
            c.handle_event(Event::Command(CommandId(1001))).expect("command"),
            Disposition::Default
        );
        assert!(c.surface().placements.is_empty());
    }

    #[test]
    fn finish_construction_needs_creation_event() {
        let mut c = Controller::new(FakeSurface::default(), LayoutMetrics::default());
        assert!(matches!(
            c.finish_construction(),
            Err(InspectorError::NotLive(Phase::Uninitialized))
        ));
    }

    #[test]
    fn increment_scenario_counts_to_three() {
        let mut c = live_controller(800, 800);
        let mut count = 0;
        c.register_command(CommandId(1001), "Increment", move |c| {
            count += 1;
            c.update_status(count);
        })
        .expect("register");

        assert_eq!(c.status(), "0");
        for _ in 0..3 {
            let d = c.handle_event(Event::Command(CommandId(1001))).expect("command");
            assert_eq!(d, Disposition::Handled);
        }
        assert_eq!(c.status(), "3");
        assert_eq!(c.surface().status, "3");
    }

    #[test]
    fn last_registration_wins() {
        let mut c = live_controller(800, 800);
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let f = Rc::clone(&first);
        c.register_command(CommandId(1005), "One", move |_| f.set(f.get() + 1))
            .expect("register");
        let s = Rc::clone(&second);
        c.register_command(CommandId(1005), "Two", move |_| s.set(s.get() + 1))
            .expect("register");

        c.handle_event(Event::Command(CommandId(1005))).expect("command");
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        // Both registrations created a button, one slot apart.
        let ys: Vec<i32> = c.surface().buttons.iter().map(|b| b.2.y).collect();
        assert_eq!(ys, [50, 100]);
    }

    #[test]
    fn unregistered_command_falls_through() {
        let mut c = live_controller(800, 800);
        c.register_command(CommandId(1001), "Increment", |c| c.update_status(1))
            .expect("register");
        let placements = c.surface().placements.len();

        let d = c.handle_event(Event::Command(CommandId(1999))).expect("command");
        assert_eq!(d, Disposition::Default);
        assert_eq!(c.status(), "0");
        assert_eq!(c.surface().status, "0");
        assert_eq!(c.surface().placements.len(), placements);
    }

    #[test]
    fn buttons_follow_registration_order() {
        let mut c = live_controller(800, 800);
        for (i, label) in ["A", "B", "C"].into_iter().enumerate() {
            c.register_command(CommandId::user(i as u16), label, |_| {})
                .expect("register");
        }
        let buttons = &c.surface().buttons;
        assert_eq!(buttons[0].0, CommandId(1000));
        assert_eq!(buttons[2].1, "C");
        assert_eq!(buttons[2].2, Rect::new(10, 150, 200, 30));
    }

    #[test]
    fn register_rejects_reserved_id_and_dead_window() {
        let mut c = live_controller(800, 800);
        assert!(matches!(
            c.register_command(CommandId(0), "Zero", |_| {}),
            Err(InspectorError::ReservedCommandId)
        ));

        let mut early = Controller::new(FakeSurface::default(), LayoutMetrics::default());
        assert!(matches!(
            early.register_command(CommandId(1001), "Early", |_| {}),
            Err(InspectorError::NotLive(Phase::Uninitialized))
        ));
        assert!(c.surface().buttons.is_empty());
    }

    #[test]
    fn update_status_is_idempotent() {
        let mut c = live_controller(800, 800);
        c.update_status("Enabled");
        let once = c.surface().status.clone();
        c.update_status("Enabled");
        assert_eq!(c.surface().status, once);
        assert_eq!(c.status(), "Enabled");
    }

    #[test]
    fn resize_to_same_size_gives_identical_rects() {
        let mut c = live_controller(640, 480);
        c.surface_mut().client = Size::new(1000, 701);
        c.handle_event(Event::Resized).expect("resize");
        c.handle_event(Event::Resized).expect("resize");

        let p = &c.surface().placements;
        assert_eq!(p.len(), 6);
        assert_eq!(p[2], p[4]);
        assert_eq!(p[3], p[5]);
        assert_eq!(p[3], (Pane::PlainText, Rect::new(0, 373, 1000, 327)));
    }

    #[test]
    fn destroy_right_after_create_only_posts_quit() {
        let mut c = live_controller(800, 800);
        assert_eq!(c.handle_event(Event::Destroyed).expect("destroy"), Disposition::Handled);
        assert_eq!(c.phase(), Phase::Terminated);
        assert_eq!(c.surface().quit_requests, 1);
        assert_eq!(c.surface().placements.len(), 2);

        // Nothing is processed after termination.
        assert_eq!(c.handle_event(Event::Resized).expect("resize"), Disposition::Default);
        assert_eq!(c.handle_event(Event::Destroyed).expect("destroy"), Disposition::Default);
        assert_eq!(c.surface().quit_requests, 1);
        assert_eq!(c.surface().placements.len(), 2);
    }

    #[test]
    fn other_events_use_default_processing() {
        let mut c = live_controller(800, 800);
        assert_eq!(c.handle_event(Event::Other).expect("other"), Disposition::Default);
        assert_eq!(c.handle_event(Event::Created).expect("create"), Disposition::Default);
        assert_eq!(c.phase(), Phase::Live);
    }

    #[test]
    fn callback_can_register_more_commands() {
        let mut c = live_controller(800, 800);
        c.register_command(CommandId(1001), "Grow", |c| {
            c.register_command(CommandId(1002), "Grown", |c| c.update_status("grown"))
                .expect("nested register");
        })
        .expect("register");

        c.handle_event(Event::Command(CommandId(1001))).expect("command");
        c.handle_event(Event::Command(CommandId(1002))).expect("command");
        assert_eq!(c.status(), "grown");
        assert_eq!(c.surface().buttons.len(), 2);
    }

    #[test]
    fn command_reentered_while_running_is_skipped() {
        let mut c = live_controller(800, 800);
        let mut count = 0;
        c.register_command(CommandId(1001), "Once", move |c| {
            count += 1;
            c.update_status(count);
            let inner = c.handle_event(Event::Command(CommandId(1001))).expect("inner command");
            assert_eq!(inner, Disposition::Handled);
        })
        .expect("register");

        c.handle_event(Event::Command(CommandId(1001))).expect("command");
        assert_eq!(c.status(), "1");

        // The guard is released once the outer call returns.
        c.handle_event(Event::Command(CommandId(1001))).expect("command");
        assert_eq!(c.status(), "2");
    }

    #[test]
    fn command_id_is_the_low_word_of_wparam() {
        // EN_CHANGE (0x0300) in the high word, control id 1001 in the low word.
        assert_eq!(Event::decode(WM_COMMAND, 0x0300_03E9), Event::Command(CommandId(1001)));
        assert_eq!(Event::decode(WM_COMMAND, 1002), Event::Command(CommandId(1002)));
        assert_eq!(Event::decode(WM_COMMAND, 0xFFFF_0000), Event::Command(CommandId(0)));
    }

    #[test]
    fn lifecycle_messages_decode_to_events() {
        assert_eq!(Event::decode(WM_CREATE, 0), Event::Created);
        assert_eq!(Event::decode(WM_SIZE, 0x0002), Event::Resized);
        assert_eq!(Event::decode(WM_DESTROY, 0), Event::Destroyed);
        // WM_PAINT, WM_PARENTNOTIFY
        assert_eq!(Event::decode(0x000F, 0), Event::Other);
        assert_eq!(Event::decode(0x0210, 1001), Event::Other);
    }
}
