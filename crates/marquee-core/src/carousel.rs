//! Carousel state and tiered wheel layout.
//!
//! Items are placed by their wrap-adjusted distance from the current
//! selection: the active item sits highest and largest, neighbours fan out
//! and down with growing rotation, and anything further than two steps is
//! hidden. At most five items are ever visible.

use crate::entry::AppEntry;

/// Signed number of steps from `current` to `index` along the shorter arc.
///
/// The result lies in `(-n/2, n/2]`; for an even count the opposite item
/// keeps the positive distance.
pub fn circular_distance(index: usize, current: usize, count: usize) -> i32 {
    if count == 0 {
        return 0;
    }
    let n = count as i64;
    let mut d = index as i64 - current as i64;
    if 2 * d > n {
        d -= n;
    }
    if 2 * d < -n {
        d += n;
    }
    d as i32
}

/// Layout band of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Hidden,
    Far,
    Near,
    Active,
}

impl Tier {
    pub fn from_distance(d: i32) -> Self {
        match d.unsigned_abs() {
            0 => Self::Active,
            1 => Self::Near,
            2 => Self::Far,
            _ => Self::Hidden,
        }
    }
}

/// Per-item placement consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemLayout {
    /// Horizontal offset from screen centre, in percent of viewport width.
    pub offset_x: f32,
    /// Vertical offset from the wheel baseline, in pixels (negative = up).
    pub offset_y: f32,
    pub scale: f32,
    /// Clockwise rotation in degrees.
    pub rotation: f32,
    pub opacity: f32,
    /// Stacking order; higher draws on top.
    pub z_order: i32,
    /// Whether the item accepts pointer clicks.
    pub interactive: bool,
    /// Styling hook for the selected item.
    pub active: bool,
}

impl ItemLayout {
    pub const HIDDEN: ItemLayout = ItemLayout {
        offset_x: 0.0,
        offset_y: 200.0,
        scale: 0.0,
        rotation: 0.0,
        opacity: 0.0,
        z_order: 0,
        interactive: false,
        active: false,
    };

    pub const ACTIVE: ItemLayout = ItemLayout {
        offset_x: 0.0,
        offset_y: -120.0,
        scale: 1.8,
        rotation: 0.0,
        opacity: 1.0,
        z_order: 10,
        interactive: true,
        active: true,
    };

    /// Layout for a signed distance from the current item.
    pub fn for_distance(d: i32) -> Self {
        let sign = d.signum() as f32;
        match Tier::from_distance(d) {
            Tier::Active => Self::ACTIVE,
            Tier::Near => Self {
                offset_x: 18.0 * sign,
                offset_y: -40.0,
                scale: 1.2,
                rotation: 15.0 * sign,
                opacity: 1.0,
                z_order: 5,
                interactive: true,
                active: false,
            },
            Tier::Far => Self {
                offset_x: 36.0 * sign,
                offset_y: 60.0,
                scale: 0.8,
                rotation: 30.0 * sign,
                opacity: 0.8,
                z_order: 1,
                interactive: true,
                active: false,
            },
            Tier::Hidden => Self::HIDDEN,
        }
    }

    /// Interpolate continuous properties; discrete ones snap to `target`.
    pub fn lerp(&self, target: &ItemLayout, t: f32) -> ItemLayout {
        if t >= 1.0 {
            return *target;
        }
        let t = t.max(0.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        ItemLayout {
            offset_x: mix(self.offset_x, target.offset_x),
            offset_y: mix(self.offset_y, target.offset_y),
            scale: mix(self.scale, target.scale),
            rotation: mix(self.rotation, target.rotation),
            opacity: mix(self.opacity, target.opacity),
            z_order: target.z_order,
            interactive: target.interactive,
            active: target.active,
        }
    }
}

/// Layout of every item for a given selection. Pure.
pub fn layout_items(count: usize, current: usize) -> Vec<ItemLayout> {
    (0..count)
        .map(|i| ItemLayout::for_distance(circular_distance(i, current, count)))
        .collect()
}

/// Owned entry list plus the selected index.
#[derive(Debug, Clone)]
pub struct CarouselState {
    entries: Vec<AppEntry>,
    current: usize,
}

impl CarouselState {
    /// Create the state. `entries` must be non-empty; the loader
    /// guarantees this by injecting a placeholder.
    pub fn new(entries: Vec<AppEntry>) -> Self {
        debug_assert!(!entries.is_empty(), "carousel needs at least one entry");
        Self {
            entries,
            current: 0,
        }
    }

    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_entry(&self) -> Option<&AppEntry> {
        self.entries.get(self.current)
    }

    /// Step right, wrapping from the last index to 0.
    pub fn move_right(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.entries.len();
    }

    /// Step left, wrapping from 0 to the last index.
    pub fn move_left(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.current = if self.current == 0 {
            self.entries.len() - 1
        } else {
            self.current - 1
        };
    }

    /// Jump to `index`. Returns `false` when nothing changed (same index or
    /// out of range).
    pub fn select(&mut self, index: usize) -> bool {
        if index == self.current || index >= self.entries.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// Replace the whole list (full reload). The selection is kept when
    /// still in range.
    pub fn replace_entries(&mut self, entries: Vec<AppEntry>) {
        debug_assert!(!entries.is_empty(), "carousel needs at least one entry");
        self.entries = entries;
        if self.current >= self.entries.len() {
            self.current = 0;
        }
    }

    /// Rename the synthetic placeholder, if that is what is shown.
    /// Returns `true` when a name changed.
    pub fn refresh_placeholder_name(&mut self, name_for: impl Fn(&AppEntry) -> Option<String>) -> bool {
        if self.entries.len() != 1 {
            return false;
        }
        let entry = &mut self.entries[0];
        if entry.placeholder_kind().is_none() {
            return false;
        }
        match name_for(entry) {
            Some(name) if name != entry.name => {
                entry.name = name;
                true
            },
            _ => false,
        }
    }

    pub fn layouts(&self) -> Vec<ItemLayout> {
        layout_items(self.entries.len(), self.current)
    }
}

/// Coalesces recompute requests to one per display refresh.
#[derive(Debug, Default)]
pub struct RedrawGuard {
    pending: bool,
}

impl RedrawGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a recompute on the next refresh. Returns `false` if one was
    /// already in flight.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Called once per refresh: `true` if a recompute should run now.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
