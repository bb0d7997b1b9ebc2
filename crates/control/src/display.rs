use std::sync::Mutex;

use tokio::sync::broadcast;

use shared::{
    domain::{AudienceScreen, LowerThird},
    protocol::DisplayEvent,
};

/// Process-wide audience display state. The screen value and its change
/// notification are updated under one lock so a viewer never observes a
/// new screen without the matching event, or the event without the state.
pub struct AudienceDisplay {
    screen: Mutex<AudienceScreen>,
    events: broadcast::Sender<DisplayEvent>,
}

impl AudienceDisplay {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            screen: Mutex::new(AudienceScreen::Blank),
            events,
        }
    }

    pub fn current_screen(&self) -> AudienceScreen {
        *self.screen.lock().unwrap()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DisplayEvent> {
        self.events.subscribe()
    }

    pub fn set_screen(&self, screen: AudienceScreen) {
        let mut current = self.screen.lock().unwrap();
        *current = screen;
        let _ = self.events.send(DisplayEvent::ScreenChanged(screen));
    }

    /// Pushes the overlay content to viewers, then flips the screen to it.
    /// Content goes out first so a display switching screens already has
    /// the text to render.
    pub fn show_lower_third(&self, lower_third: LowerThird) {
        let mut current = self.screen.lock().unwrap();
        let _ = self
            .events
            .send(DisplayEvent::LowerThirdContent(lower_third));
        *current = AudienceScreen::LowerThird;
        let _ = self
            .events
            .send(DisplayEvent::ScreenChanged(AudienceScreen::LowerThird));
    }
}

impl Default for AudienceDisplay {
    fn default() -> Self {
        Self::new()
    }
}
