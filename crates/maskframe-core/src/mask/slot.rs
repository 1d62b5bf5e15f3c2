//! Mask load tracking and the cached inverted bitmap.
//!
//! Loads are asynchronous on the host side. Each load gets a [`MaskTicket`]
//! stamped with a generation. Only the completion presenting the newest ticket
//! is accepted. Anything older is dropped.

use image::RgbaImage;

use super::invert::{invert_mask, MaskInversion};
use crate::geometry::{Container, Size};

/// Identity of a loaded mask. Changes every time a new mask is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskId(u64);

impl MaskId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Token handed out when a mask load starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskTicket {
    generation: u64,
}

impl MaskTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }

    /// Rebuild a ticket from a generation passed through a host boundary.
    pub fn from_generation(generation: u64) -> Self {
        Self { generation }
    }
}

/// A mask bitmap together with its inverted overlay, computed once.
#[derive(Debug, Clone)]
pub struct LoadedMask {
    id: MaskId,
    size: Size,
    inverted: RgbaImage,
}

impl LoadedMask {
    fn new(id: MaskId, size: Size, bitmap: &RgbaImage, inversion: MaskInversion) -> Self {
        Self {
            id,
            size,
            inverted: invert_mask(bitmap, inversion),
        }
    }

    pub fn id(&self) -> MaskId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The inverted overlay bitmap.
    pub fn inverted(&self) -> &RgbaImage {
        &self.inverted
    }

    pub fn container(&self) -> Container {
        Container::from_size(self.size)
    }
}

/// Where the mask is in its lifecycle.
#[derive(Debug, Clone, Default)]
pub enum MaskState {
    /// No mask requested.
    #[default]
    Absent,
    /// A load is in flight and nothing has resolved yet.
    Loading,
    Ready(LoadedMask),
    /// The last load failed. The editor runs without an overlay.
    Unavailable,
}

/// Owns the current mask and the generation counter guarding its loads.
#[derive(Debug, Clone, Default)]
pub struct MaskSlot {
    generation: u64,
    inversion: MaskInversion,
    state: MaskState,
}

impl MaskSlot {
    pub fn new(inversion: MaskInversion) -> Self {
        Self {
            inversion,
            ..Self::default()
        }
    }

    /// Start a new load, invalidating any load still in flight.
    ///
    /// A mask that is already showing stays in place until the new load
    /// resolves.
    pub fn begin_load(&mut self) -> MaskTicket {
        self.generation += 1;
        if !matches!(self.state, MaskState::Ready(_)) {
            self.state = MaskState::Loading;
        }
        MaskTicket {
            generation: self.generation,
        }
    }

    /// Whether `ticket` belongs to the newest load.
    pub fn is_current(&self, ticket: MaskTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Accept a decoded bitmap for `ticket`.
    ///
    /// Returns `false` (and changes nothing) for a stale ticket or an empty
    /// bitmap. The inversion runs here, once per accepted mask.
    pub fn complete(&mut self, ticket: MaskTicket, bitmap: &RgbaImage) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "discarding stale mask load {} (current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        let Ok(size) = Size::new(bitmap.width(), bitmap.height()) else {
            log::warn!("mask load {} produced an empty bitmap", ticket.generation);
            self.state = MaskState::Unavailable;
            return false;
        };

        let mask = LoadedMask::new(MaskId(ticket.generation), size, bitmap, self.inversion);
        log::debug!(
            "mask {} ready: {}x{}",
            ticket.generation,
            size.width(),
            size.height()
        );
        self.state = MaskState::Ready(mask);
        true
    }

    /// Record that the load for `ticket` failed.
    ///
    /// The slot degrades to no mask. Returns `false` for a stale ticket.
    pub fn fail(&mut self, ticket: MaskTicket, reason: &str) -> bool {
        if !self.is_current(ticket) {
            log::debug!("ignoring failure of stale mask load {}", ticket.generation);
            return false;
        }
        log::warn!("mask unavailable, continuing without overlay: {reason}");
        self.state = MaskState::Unavailable;
        true
    }

    /// Drop the mask and invalidate any load in flight.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = MaskState::Absent;
    }

    pub fn state(&self) -> &MaskState {
        &self.state
    }

    pub fn mask(&self) -> Option<&LoadedMask> {
        match &self.state {
            MaskState::Ready(mask) => Some(mask),
            _ => None,
        }
    }

    /// Container implied by the mask, or `fallback` when there is none.
    pub fn container_or(&self, fallback: Container) -> Container {
        self.mask().map_or(fallback, LoadedMask::container)
    }
}
