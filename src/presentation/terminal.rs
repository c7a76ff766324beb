//! Surfaces that print to a terminal, used by the `travelguide-explore` binary.

use std::io::Write;

use super::{ListSurface, MapSurface, MarkerHandle, MarkerView, PanelView, SaveAffordance};
use crate::models::{Coordinate, LandmarkId};
use crate::saved::SaveState;

/// Writes the landmark panel as plain text.
pub struct TerminalList<W: Write> {
    out: W,
}

impl<W: Write> TerminalList<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> ListSurface for TerminalList<W> {
    fn show_panel(&mut self, panel: &PanelView) {
        match panel {
            PanelView::Loading { message } => self.line(message),
            PanelView::Error { message } => self.line(&format!("! {}", message)),
            PanelView::Empty {
                header,
                message,
                hint,
            } => {
                self.line(&format!("{} [{}]", header.title, header.badge));
                self.line(message);
                self.line(hint);
            }
            PanelView::Landmarks { header, cards } => {
                self.line(&format!("{} [{}]", header.title, header.badge));
                for card in cards {
                    let mark = match card.affordance.state {
                        SaveState::Saved => "*",
                        SaveState::Unsaved => " ",
                    };
                    self.line(&format!(
                        "{} {:>12}  {} ({}) - {}",
                        mark,
                        card.id.as_str(),
                        card.name,
                        card.category,
                        card.distance_label
                    ));
                    self.line(&format!("      {}", card.description));
                    if let Some(url) = &card.reference_url {
                        self.line(&format!("      {}", url));
                    }
                }
            }
        }
    }

    fn set_location_label(&mut self, label: &str) {
        self.line(&format!("Location: {}", label));
    }

    fn mark_selected(&mut self, id: &LandmarkId) {
        self.line(&format!("Selected {}", id));
    }

    fn set_affordance(&mut self, id: &LandmarkId, affordance: &SaveAffordance) {
        self.line(&format!("{}: {}", id, affordance.title));
    }

    fn notify(&mut self, message: &str) {
        self.line(&format!("! {}", message));
    }
}

/// Map stand-in that only logs what a real map would draw.
#[derive(Debug, Default)]
pub struct LoggingMap {
    next_handle: u64,
}

impl MapSurface for LoggingMap {
    fn add_marker(&mut self, marker: &MarkerView) -> MarkerHandle {
        self.next_handle += 1;
        tracing::debug!(
            "Marker {} for {} at {:?}",
            self.next_handle,
            marker.id,
            marker.position
        );
        MarkerHandle(self.next_handle)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        tracing::debug!("Removed marker {}", handle.0);
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        tracing::debug!("Map view {:?} at zoom {}", center, zoom);
    }

    fn open_popup(&mut self, handle: MarkerHandle) {
        tracing::debug!("Opened popup of marker {}", handle.0);
    }

    fn show_user(&mut self, at: Coordinate) {
        tracing::debug!("User marker at {:?}", at);
    }
}
