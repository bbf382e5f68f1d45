//! Terminal adapters for the presentation surfaces
//!
//! The terminal cannot draw a tile map, so the map adapter keeps marker
//! state (what a map frontend would display) and narrates popups and
//! camera moves; the list and preview adapters render cards and detail
//! as text via the colored crate.
//!
//! Surfaces take a [`TermMode`]: `Full` for interactive display, `Quiet`
//! for scripting-friendly bare output, `Silent` for commands whose
//! result is reported elsewhere (mutations re-synchronize the surfaces
//! without printing anything).

use super::traits::{ListSurface, MapSurface, PreviewSurface};
use super::types::{Link, ListCard, Marker, PreviewDetail};
use colored::Colorize;
use std::collections::HashSet;

/// How much a terminal surface prints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermMode {
    /// Decorated interactive output
    #[default]
    Full,
    /// Bare output for scripting
    Quiet,
    /// No output at all
    Silent,
}

/// Terminal map surface: tracks markers and popup state, narrates moves
#[derive(Debug, Default)]
pub struct TermMap {
    markers: Vec<Marker>,
    open_popups: HashSet<String>,
    mode: TermMode,
}

impl TermMap {
    /// Create a terminal map surface
    #[must_use]
    pub fn new(mode: TermMode) -> Self {
        Self {
            markers: Vec::new(),
            open_popups: HashSet::new(),
            mode,
        }
    }

    /// Markers currently on the map
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl MapSurface for TermMap {
    fn rebuild(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
        self.open_popups.clear();
    }

    fn update_marker(&mut self, marker: Marker) -> bool {
        let Some(existing) = self.markers.iter_mut().find(|m| m.id == marker.id) else {
            return false;
        };
        *existing = marker;
        true
    }

    fn is_popup_open(&self, id: &str) -> bool {
        self.open_popups.contains(id)
    }

    fn open_popup(&mut self, id: &str) {
        let Some(marker) = self.markers.iter().find(|m| m.id == id) else {
            return;
        };
        self.open_popups.insert(id.to_string());
        if self.mode != TermMode::Full {
            return;
        }
        let popup = &marker.popup;
        println!("{} {}", popup.title.bold(), popup.coords.dimmed());
        if let Some(photo) = &popup.photo {
            println!("  photo: {photo}");
        }
        match &popup.link {
            Some(Link { url, .. }) => println!("  link: {url}"),
            None => println!("  {}", "no link".dimmed()),
        }
        if let Some(note) = &popup.note {
            println!("  {note}");
        }
    }

    fn fly_to(&mut self, lat: f64, lng: f64, zoom: u8) {
        if self.mode == TermMode::Full {
            println!("{} ({lat:.6}, {lng:.6}) at zoom {zoom}", "flying to".dimmed());
        }
    }
}

/// Terminal list surface: prints one card per filtered record
#[derive(Debug, Default)]
pub struct TermList {
    highlighted: Option<String>,
    mode: TermMode,
}

impl TermList {
    /// Create a terminal list surface
    #[must_use]
    pub fn new(mode: TermMode) -> Self {
        Self {
            highlighted: None,
            mode,
        }
    }
}

impl ListSurface for TermList {
    fn render(&mut self, cards: Vec<ListCard>) {
        match self.mode {
            TermMode::Silent => {}
            TermMode::Quiet => {
                for card in cards {
                    println!("{}\t{}", card.id, card.title);
                }
            }
            TermMode::Full => {
                if cards.is_empty() {
                    println!("{}", "No places saved yet.".dimmed());
                    return;
                }
                for card in cards {
                    let selected = self.highlighted.as_deref() == Some(card.id.as_str());
                    let mark = if selected { "▸" } else { " " };
                    let title = if selected {
                        card.title.bold().to_string()
                    } else {
                        card.title.clone()
                    };
                    println!("{mark} {title}  {}", card.meta.dimmed());
                    println!("    {}", card.id.dimmed());
                    if let Some(note) = &card.note {
                        println!("    {note}");
                    }
                    if !card.open_link_enabled {
                        println!("    {}", "no link".dimmed());
                    }
                }
            }
        }
    }

    fn highlight(&mut self, id: Option<&str>) {
        self.highlighted = id.map(str::to_string);
    }
}

/// Terminal preview surface: prints the selected record's full detail
///
/// A hidden preview renders nothing, so `hide` is always silent.
#[derive(Debug, Default)]
pub struct TermPreview {
    mode: TermMode,
}

impl TermPreview {
    /// Create a terminal preview surface
    #[must_use]
    pub fn new(mode: TermMode) -> Self {
        Self { mode }
    }
}

impl PreviewSurface for TermPreview {
    fn show(&mut self, detail: PreviewDetail) {
        if self.mode == TermMode::Silent {
            return;
        }
        println!("{}", detail.title.bold());
        println!("{}", detail.meta.dimmed());
        match &detail.photo {
            Some(photo) => println!("photo: {photo}"),
            None => println!("{}", "no image".dimmed()),
        }
        match &detail.link {
            Some(Link { url, new_tab }) => {
                let target = if *new_tab { " (new tab)" } else { "" };
                println!("link: {url}{target}");
            }
            None => println!("{}", "no link".dimmed()),
        }
        if let Some(note) = &detail.note {
            println!("{note}");
        }
    }

    fn hide(&mut self) {}
}
