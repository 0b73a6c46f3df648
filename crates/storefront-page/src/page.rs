//! The page: routes events and timers into the controllers.

use storefront_cart::{parse_display_price, CartStore, KeyValueStore};
use storefront_core::{
    ConsentDecision, Debouncer, DisplaySurface, EasterEgg, FabAction, Millis, ModalKind,
    NotificationCenter, NotificationId, NotificationKind, PageEvent, ProductId, RenderCommand,
    StorefrontConfig, TimerId, TimerQueue,
};
use storefront_observability::EventTracker;
use storefront_slider::{SliderController, StepDirection};

use crate::consent::CookieConsent;
use crate::easter::EasterEggs;
use crate::forms::blur_command;
use crate::header::StickyHeader;
use crate::landing::{cta_scroll, fab_link, CategoryLoader, CHAT_MESSAGE};
use crate::menu::MobileMenu;
use crate::modal::Modals;
use crate::newsletter::{
    Newsletter, SubmitOutcome, NEWSLETTER_EMAIL_FIELD, OPT_IN_REQUIRED, SUBSCRIBED_MESSAGE,
};

const KONAMI_MESSAGE: &str = "🎉 Konami code activated! You found the easter egg!";
const LOGO_MESSAGE: &str = "🌈 Magic logo activated!";
const ESCAPE_KEY: &str = "Escape";

/// Work scheduled on the page clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTimer {
    /// Slider autoplay period.
    Autoplay,
    /// Retire a notification.
    NotificationDismiss(NotificationId),
    /// Stop the cart pulse.
    CartPulseEnd,
    /// Resize quiet period over.
    ResizeSettled,
    /// Next animation frame for the header.
    HeaderFrame,
    /// Slide the cookie banner in.
    CookieBannerReveal,
    /// Newsletter request "finished".
    NewsletterSubmitted,
    /// Newsletter confirmation over.
    NewsletterReset,
    /// Focus the search input once its modal is up.
    SearchFocus,
    /// Category "page" finished loading.
    CategoryLoaded,
}

/// A storefront page bound to a storage backend and a display surface.
///
/// The page is a single-threaded event loop on a virtual clock. Hosts feed
/// it input with [`Storefront::dispatch`] and move time forward with
/// [`Storefront::advance_to`], which fires due timers one at a time in
/// deadline order.
pub struct Storefront<S, D> {
    config: StorefrontConfig,
    now: Millis,
    surface: D,
    slider: SliderController,
    cart: CartStore<S>,
    notifications: NotificationCenter,
    menu: MobileMenu,
    header: StickyHeader,
    newsletter: Newsletter,
    consent: CookieConsent,
    eggs: EasterEggs,
    modals: Modals,
    loader: CategoryLoader,
    tracker: EventTracker,
    timers: TimerQueue<PageTimer>,
    resize: Debouncer<()>,
    resize_timer: Option<TimerId>,
    pulse_timer: Option<TimerId>,
    reveal_timer: Option<TimerId>,
    autoplay_timer: Option<TimerId>,
    focus_timer: Option<TimerId>,
    loading_timer: Option<TimerId>,
}

impl<S: KeyValueStore, D: DisplaySurface> Storefront<S, D> {
    /// Load state and render the initial page at time zero.
    ///
    /// The cart is read from its mirror and the badge rendered. A slider
    /// with cards renders its first page and starts autoplay; an empty one
    /// stays inert. Without a stored cookie decision the banner reveal is
    /// scheduled.
    pub fn start(config: StorefrontConfig, storage: S, mut surface: D, total_cards: usize) -> Self {
        let cart = CartStore::initialize(storage, config.cart.storage_key.clone());
        let consent = CookieConsent::load(cart.storage(), &config.consent.storage_key);
        let slider = SliderController::new(total_cards, surface.viewport_width(), &config.slider);

        surface.apply(cart.badge());

        let mut page = Self {
            now: 0,
            notifications: NotificationCenter::new(),
            menu: MobileMenu::new(),
            header: StickyHeader::new(&config.header),
            newsletter: Newsletter::new(),
            eggs: EasterEggs::new(&config.easter_eggs),
            modals: Modals::new(&config.search),
            loader: CategoryLoader::new(),
            tracker: EventTracker::new(),
            timers: TimerQueue::new(),
            resize: Debouncer::new(config.viewport.resize_debounce_ms),
            resize_timer: None,
            pulse_timer: None,
            reveal_timer: None,
            autoplay_timer: None,
            focus_timer: None,
            loading_timer: None,
            surface,
            slider,
            cart,
            consent,
            config,
        };

        if !page.slider.is_inert() {
            page.render_slider();
            page.autoplay_timer = Some(page.timers.schedule_interval(
                0,
                page.slider.autoplay_delay(),
                PageTimer::Autoplay,
            ));
        }
        if page.consent.needs_prompt() {
            page.reveal_timer = Some(page.timers.schedule_once(
                0,
                page.config.consent.reveal_delay_ms,
                PageTimer::CookieBannerReveal,
            ));
        }

        tracing::debug!(
            total_cards,
            visible = page.slider.state().visible_count(),
            cart_count = page.cart.count(),
            "page started"
        );
        page
    }

    /// Handle one input event at the current time.
    pub fn dispatch(&mut self, event: PageEvent) {
        tracing::debug!(event = event.name(), now = self.now, "dispatch");
        match event {
            PageEvent::PreviousClicked => {
                let from = self.slider.state().page_index();
                if self.slider.go_to_previous() {
                    self.navigated(from, StepDirection::Previous);
                }
            }
            PageEvent::NextClicked => {
                let from = self.slider.state().page_index();
                if self.slider.go_to_next() {
                    self.navigated(from, StepDirection::Next);
                }
            }
            PageEvent::DragStarted { x } => self.slider.drag_start(x),
            PageEvent::DragMoved { x } => self.slider.drag_move(x),
            PageEvent::DragEnded => {
                let from = self.slider.state().page_index();
                if let Some(direction) = self.slider.drag_end() {
                    self.navigated(from, direction);
                }
            }
            PageEvent::Resized => self.on_resized(),
            PageEvent::AddToCartClicked {
                product_id,
                name,
                price_text,
            } => self.add_to_cart(product_id, name, &price_text),
            PageEvent::NotificationDismissed { id } => self.dismiss_notification(id),
            PageEvent::MenuToggled => {
                let command = self.menu.toggle();
                self.surface.apply(command);
            }
            PageEvent::NavLinkClicked | PageEvent::ClickedOutsideNav => self.close_menu(),
            PageEvent::Scrolled { y } => {
                let step = self.header.on_scroll(self.now, y);
                if let Some(command) = step.command {
                    self.surface.apply(command);
                }
                if let Some(at) = step.frame_at {
                    self.timers.schedule_once(
                        self.now,
                        at.saturating_sub(self.now),
                        PageTimer::HeaderFrame,
                    );
                }
            }
            PageEvent::KeyPressed { code } => {
                if code == ESCAPE_KEY {
                    self.close_modal();
                }
                if self.eggs.konami.push(&code) {
                    self.celebrate(EasterEgg::Konami);
                }
            }
            PageEvent::LogoClicked => {
                if self.eggs.logo.click(self.now) {
                    self.celebrate(EasterEgg::Logo);
                }
            }
            PageEvent::FieldBlurred {
                field,
                kind,
                required,
                value,
            } => {
                let command = blur_command(&field, kind, required, &value);
                self.surface.apply(command);
            }
            PageEvent::FieldEdited { field } => {
                self.surface.apply(RenderCommand::ClearFieldError { field });
            }
            PageEvent::NewsletterSubmitted { email, opted_in } => {
                self.submit_newsletter(&email, opted_in)
            }
            PageEvent::CookieConsentGiven { decision } => self.decide_consent(decision),
            PageEvent::CtaPrimaryClicked => {
                self.surface.apply(cta_scroll(&self.config.landing));
                self.tracker.track("cta_primary_clicked").emit();
            }
            PageEvent::CtaVideoClicked => {
                self.open_modal(ModalKind::Video);
                self.tracker.track("cta_video_clicked").emit();
            }
            PageEvent::SearchButtonClicked => self.open_modal(ModalKind::Search),
            PageEvent::ModalCloseClicked | PageEvent::ModalOverlayClicked => self.close_modal(),
            PageEvent::SearchTagClicked { tag } => {
                if let Some(command) = self.modals.select_tag(&tag) {
                    self.surface.apply(command);
                    self.surface.apply(RenderCommand::FocusSearchInput);
                }
            }
            PageEvent::SearchInput { query } => {
                if let Some(command) = self.modals.input(&query) {
                    tracing::debug!(query = %query, "search");
                    self.surface.apply(command);
                }
            }
            PageEvent::FabClicked { action } => self.contact(action),
            PageEvent::CategoryClicked { category } => self.open_category(category),
        }
    }

    /// Move the clock to `now`, firing every timer due by then.
    ///
    /// Timers fire one at a time, each with the clock set to its own
    /// deadline. The clock never runs backwards.
    pub fn advance_to(&mut self, now: Millis) {
        let target = now.max(self.now);
        while let Some(fired) = self.timers.pop_due(target) {
            self.now = fired.deadline.max(self.now);
            self.fire(fired.payload);
        }
        self.now = target;
    }

    /// Move the clock forward by `delta`.
    pub fn advance_by(&mut self, delta: Millis) {
        self.advance_to(self.now.saturating_add(delta));
    }

    /// Advance to `at`, then dispatch `event`.
    pub fn dispatch_at(&mut self, at: Millis, event: PageEvent) {
        self.advance_to(at);
        self.dispatch(event);
    }

    /// Clear every registered timer.
    ///
    /// Autoplay stops, pending notifications stay on screen, and a resize
    /// burst in progress is dropped.
    pub fn teardown(&mut self) {
        let pending = self.timers.len();
        self.timers.clear();
        self.resize.cancel();
        self.header.reset_frame();
        self.resize_timer = None;
        self.pulse_timer = None;
        self.reveal_timer = None;
        self.autoplay_timer = None;
        self.focus_timer = None;
        self.loading_timer = None;
        tracing::debug!(pending, "page torn down");
    }

    fn fire(&mut self, timer: PageTimer) {
        tracing::trace!(?timer, now = self.now, "timer fired");
        match timer {
            PageTimer::Autoplay => {
                if self.slider.tick() {
                    self.render_slider();
                }
            }
            PageTimer::NotificationDismiss(id) => {
                if self.notifications.dismiss(id).is_some() {
                    self.surface
                        .apply(RenderCommand::DismissNotification { id });
                }
            }
            PageTimer::CartPulseEnd => {
                self.pulse_timer = None;
                self.surface.apply(RenderCommand::CartPulse { active: false });
            }
            PageTimer::ResizeSettled => {
                self.resize_timer = None;
                if self.resize.poll(self.now).is_some() {
                    self.on_resize_settled();
                }
            }
            PageTimer::HeaderFrame => {
                if let Some(command) = self.header.on_frame(self.now) {
                    self.surface.apply(command);
                }
            }
            PageTimer::CookieBannerReveal => {
                self.reveal_timer = None;
                if let Some(command) = self.consent.reveal() {
                    self.surface.apply(command);
                }
            }
            PageTimer::NewsletterSubmitted => {
                if let Some(email) = self.newsletter.complete() {
                    self.surface.apply(self.newsletter.button());
                    self.notify(SUBSCRIBED_MESSAGE, NotificationKind::Success);
                    self.tracker
                        .track("newsletter_subscription")
                        .field("email", email)
                        .emit();
                    self.timers.schedule_once(
                        self.now,
                        self.config.newsletter.reset_delay_ms,
                        PageTimer::NewsletterReset,
                    );
                }
            }
            PageTimer::NewsletterReset => {
                if self.newsletter.reset() {
                    self.surface.apply(self.newsletter.button());
                    self.surface.apply(RenderCommand::NewsletterFormReset);
                }
            }
            PageTimer::SearchFocus => {
                self.focus_timer = None;
                if self.modals.open_kind() == Some(ModalKind::Search) {
                    self.surface.apply(RenderCommand::FocusSearchInput);
                }
            }
            PageTimer::CategoryLoaded => {
                self.loading_timer = None;
                if let Some(command) = self.loader.finish() {
                    self.surface.apply(command);
                }
            }
        }
    }

    fn render_slider(&mut self) {
        let render = self.slider.render(self.surface.card_width());
        for command in render.commands() {
            self.surface.apply(command);
        }
    }

    /// Render after a user step; only a step that moved the page is tracked.
    fn navigated(&mut self, from: usize, direction: StepDirection) {
        self.render_slider();
        let page = self.slider.state().page_index();
        if page == from {
            return;
        }
        self.tracker
            .track("slider_navigated")
            .field("direction", direction.as_str())
            .field_i64("page", page as i64)
            .emit();
    }

    fn on_resized(&mut self) {
        let deadline = self.resize.call(self.now, ());
        if let Some(previous) = self.resize_timer.take() {
            self.timers.cancel(previous);
        }
        self.resize_timer = Some(self.timers.schedule_once(
            self.now,
            deadline.saturating_sub(self.now),
            PageTimer::ResizeSettled,
        ));
    }

    fn on_resize_settled(&mut self) {
        let width = self.surface.viewport_width();
        if self.slider.on_resize(width) {
            self.render_slider();
        }
        if width > self.config.viewport.desktop_min_width {
            self.close_menu();
        }
    }

    fn close_menu(&mut self) {
        if let Some(command) = self.menu.close() {
            self.surface.apply(command);
        }
    }

    fn add_to_cart(&mut self, product_id: ProductId, name: String, price_text: &str) {
        let Some(price) = parse_display_price(price_text) else {
            tracing::warn!(product = %product_id, price_text, "unreadable price, add ignored");
            return;
        };
        let Some(added) = self.cart.add_item(product_id, name, price) else {
            return;
        };

        self.surface.apply(self.cart.badge());
        self.notify(
            format!("{} added to cart!", added.name),
            NotificationKind::Success,
        );
        self.start_pulse();
        self.tracker
            .track("add_to_cart")
            .field("product_name", added.name)
            .field_f64("price", price)
            .emit();
    }

    fn start_pulse(&mut self) {
        if let Some(previous) = self.pulse_timer.take() {
            self.timers.cancel(previous);
        }
        self.surface.apply(RenderCommand::CartPulse { active: true });
        self.pulse_timer = Some(self.timers.schedule_once(
            self.now,
            self.config.cart.pulse_ms,
            PageTimer::CartPulseEnd,
        ));
    }

    /// Show a notification that dismisses itself after the configured delay.
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let notification = self.notifications.show(self.now, message, kind);
        let id = notification.id;
        self.surface.apply(RenderCommand::ShowNotification {
            id,
            message: notification.message,
            kind,
        });
        let timer = self.timers.schedule_once(
            self.now,
            self.config.notifications.auto_dismiss_ms,
            PageTimer::NotificationDismiss(id),
        );
        self.notifications.attach_timer(id, timer);
        id
    }

    fn dismiss_notification(&mut self, id: NotificationId) {
        if let Some(timer) = self.notifications.dismiss(id) {
            if let Some(timer) = timer {
                self.timers.cancel(timer);
            }
            self.surface
                .apply(RenderCommand::DismissNotification { id });
        }
    }

    fn celebrate(&mut self, egg: EasterEgg) {
        self.surface.apply(RenderCommand::Celebrate { egg });
        let (message, event) = match egg {
            EasterEgg::Konami => (KONAMI_MESSAGE, "easter_egg_konami"),
            EasterEgg::Logo => (LOGO_MESSAGE, "easter_egg_logo"),
        };
        self.notify(message, NotificationKind::Success);
        self.tracker.track(event).emit();
    }

    fn submit_newsletter(&mut self, email: &str, opted_in: bool) {
        match self.newsletter.submit(email, opted_in) {
            SubmitOutcome::Ignored => {}
            SubmitOutcome::NotOptedIn => {
                self.notify(OPT_IN_REQUIRED, NotificationKind::Error);
            }
            SubmitOutcome::Invalid(e) => {
                self.surface.apply(RenderCommand::FieldError {
                    field: NEWSLETTER_EMAIL_FIELD.to_string(),
                    message: e.to_string(),
                });
            }
            SubmitOutcome::Started => {
                self.surface.apply(RenderCommand::ClearFieldError {
                    field: NEWSLETTER_EMAIL_FIELD.to_string(),
                });
                self.surface.apply(self.newsletter.button());
                self.timers.schedule_once(
                    self.now,
                    self.config.newsletter.submit_delay_ms,
                    PageTimer::NewsletterSubmitted,
                );
            }
        }
    }

    fn open_modal(&mut self, kind: ModalKind) {
        let Some(command) = self.modals.open(kind) else {
            return;
        };
        self.surface.apply(command);
        if kind == ModalKind::Search {
            self.focus_timer = Some(self.timers.schedule_once(
                self.now,
                self.config.search.focus_delay_ms,
                PageTimer::SearchFocus,
            ));
        }
    }

    fn close_modal(&mut self) {
        let Some(command) = self.modals.close() else {
            return;
        };
        if let Some(timer) = self.focus_timer.take() {
            self.timers.cancel(timer);
        }
        self.surface.apply(command);
    }

    fn contact(&mut self, action: FabAction) {
        match fab_link(action, &self.config.contact) {
            Some(command) => self.surface.apply(command),
            None => {
                self.notify(CHAT_MESSAGE, NotificationKind::Info);
            }
        }
        self.tracker
            .track("fab_clicked")
            .field_i64("type", action.index() as i64)
            .emit();
    }

    /// Every click restarts the loading time; the overlay shows once.
    fn open_category(&mut self, category: String) {
        if let Some(timer) = self.loading_timer.take() {
            self.timers.cancel(timer);
        }
        if let Some(command) = self.loader.start() {
            self.surface.apply(command);
        }
        self.loading_timer = Some(self.timers.schedule_once(
            self.now,
            self.config.landing.category_loading_ms,
            PageTimer::CategoryLoaded,
        ));
        tracing::debug!(category = %category, "navigating to category");
        self.tracker
            .track("category_clicked")
            .field("category", category)
            .emit();
    }

    fn decide_consent(&mut self, decision: ConsentDecision) {
        let Some(command) = self.consent.decide(decision) else {
            return;
        };
        if let Some(timer) = self.reveal_timer.take() {
            self.timers.cancel(timer);
        }
        self.consent
            .persist(self.cart.storage_mut(), &self.config.consent.storage_key);
        self.surface.apply(command);
        self.tracker
            .track("cookie_consent")
            .field("status", decision.as_str())
            .emit();
    }

    /// Current page time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Configuration the page runs with.
    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The slider.
    pub fn slider(&self) -> &SliderController {
        &self.slider
    }

    /// The cart store.
    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// The display surface.
    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// Mutable display surface, e.g. to change the reported viewport.
    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    /// Notifications on screen.
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// The mobile menu.
    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    /// The sticky header.
    pub fn header(&self) -> &StickyHeader {
        &self.header
    }

    /// The newsletter form.
    pub fn newsletter(&self) -> &Newsletter {
        &self.newsletter
    }

    /// The cookie banner.
    pub fn consent(&self) -> &CookieConsent {
        &self.consent
    }

    /// The video and search modals.
    pub fn modals(&self) -> &Modals {
        &self.modals
    }

    /// The category loading overlay.
    pub fn category_loader(&self) -> &CategoryLoader {
        &self.loader
    }

    /// Tracked analytics events.
    pub fn tracker(&self) -> &EventTracker {
        &self.tracker
    }

    /// Check if autoplay is running.
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay_timer
            .is_some_and(|id| self.timers.is_scheduled(id))
    }

    /// Number of pending timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Deadline of the next timer.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Give back the storage backend and the surface.
    pub fn into_parts(self) -> (S, D) {
        (self.cart.into_storage(), self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cart::MemoryStore;
    use storefront_core::{FieldKind, RecordingSurface};

    fn page(cards: usize) -> Storefront<MemoryStore, RecordingSurface> {
        Storefront::start(
            StorefrontConfig::default(),
            MemoryStore::new(),
            RecordingSurface::default(),
            cards,
        )
    }

    #[test]
    fn test_start_renders_badge_and_slider() {
        let p = page(10);
        assert_eq!(p.surface().last_badge(), Some((0, false)));
        assert_eq!(p.surface().last_offset(), Some(0.0));
        assert_eq!(p.surface().last_nav(), Some((false, true)));
        assert!(p.is_autoplaying());
    }

    #[test]
    fn test_zero_cards_is_inert() {
        let mut p = page(0);
        assert_eq!(p.surface().last_offset(), None);
        assert!(!p.is_autoplaying());

        p.dispatch(PageEvent::NextClicked);
        p.advance_to(20_000);
        assert_eq!(p.surface().last_offset(), None);
    }

    #[test]
    fn test_autoplay_ticks_and_wraps() {
        let mut p = page(6);
        // 4 visible at 1280px, max page 2.
        p.advance_to(10_000);
        assert_eq!(p.slider().state().page_index(), 2);
        p.advance_to(15_000);
        assert_eq!(p.slider().state().page_index(), 0);
    }

    #[test]
    fn test_teardown_stops_autoplay() {
        let mut p = page(10);
        p.teardown();
        assert_eq!(p.pending_timers(), 0);
        p.advance_to(60_000);
        assert_eq!(p.slider().state().page_index(), 0);
        assert!(!p.is_autoplaying());
    }

    #[test]
    fn test_notification_dismissed_by_user_cancels_timer() {
        let mut p = page(0);
        let id = p.notify("hello", NotificationKind::Info);
        let pending = p.pending_timers();

        p.dispatch(PageEvent::NotificationDismissed { id });
        assert!(p.notifications().is_empty());
        assert_eq!(p.pending_timers(), pending - 1);

        // Second dismissal is a no-op.
        p.dispatch(PageEvent::NotificationDismissed { id });
        let dismissals = p
            .surface()
            .count(|c| matches!(c, RenderCommand::DismissNotification { .. }));
        assert_eq!(dismissals, 1);
    }

    #[test]
    fn test_notification_auto_dismiss() {
        let mut p = page(0);
        p.dispatch_at(100, PageEvent::LogoClicked);
        let id = p.notify("hello", NotificationKind::Warning);
        p.advance_to(5099);
        assert!(p.notifications().is_active(id));
        p.advance_to(5100);
        assert!(!p.notifications().is_active(id));
    }

    #[test]
    fn test_field_blur_and_edit() {
        let mut p = page(0);
        p.dispatch(PageEvent::FieldBlurred {
            field: "name".to_string(),
            kind: FieldKind::Text,
            required: true,
            value: String::new(),
        });
        assert_eq!(
            p.surface().commands().last(),
            Some(&RenderCommand::FieldError {
                field: "name".to_string(),
                message: "This field is required".to_string(),
            })
        );

        p.dispatch(PageEvent::FieldEdited {
            field: "name".to_string(),
        });
        assert_eq!(
            p.surface().commands().last(),
            Some(&RenderCommand::ClearFieldError {
                field: "name".to_string()
            })
        );
    }
}
