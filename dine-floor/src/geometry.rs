//! Geometry Engine
//!
//! Pure mapping from layout items to visual placement. Item coordinates are
//! canvas percentages; seat offsets are pixels relative to the 60x60px
//! table box.

use shared::models::{ItemKind, LayoutItem, TableShape};

/// Rendered table box edge, px
pub const TABLE_SIZE_PX: f64 = 60.0;

/// Centre of the table box, px from its top-left corner (both axes)
pub const TABLE_CENTER_PX: f64 = TABLE_SIZE_PX / 2.0;

/// Rendered seat icon edge, px
pub const SEAT_SIZE_PX: f64 = 16.0;

/// Seat ring radius around a rectangular table, px
pub const RECTANGLE_SEAT_RADIUS_PX: f64 = 42.0;

/// Seat ring radius around a round table, px
pub const CIRCLE_SEAT_RADIUS_PX: f64 = 43.0;

/// Percentage offsets of an item's top-left corner on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPosition {
    pub left_pct: f64,
    pub top_pct: f64,
}

/// Identity mapping of the item's coordinates. Out-of-range coordinates pass
/// through unchanged.
pub fn canvas_position(item: &LayoutItem) -> CanvasPosition {
    CanvasPosition {
        left_pct: item.x_coordinate,
        top_pct: item.y_coordinate,
    }
}

/// Booking-view placement: the table box is centred on its coordinate,
/// i.e. `left: calc(x% - 30px)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenteredAnchor {
    pub left_pct: f64,
    pub top_pct: f64,
    /// Applied to both axes after the percentage offset
    pub shift_px: f64,
}

pub fn centered_table_anchor(item: &LayoutItem) -> CenteredAnchor {
    let pos = canvas_position(item);
    CenteredAnchor {
        left_pct: pos.left_pct,
        top_pct: pos.top_pct,
        shift_px: -TABLE_CENTER_PX,
    }
}

/// Rendered size of an item
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Footprint {
    /// Fixed pixel box (tables)
    Pixels { width: f64, height: f64 },
    /// Percent of the canvas (furniture)
    Percent { width: f64, height: f64 },
}

pub fn item_footprint(item: &LayoutItem) -> Footprint {
    match &item.kind {
        ItemKind::Table(_) => Footprint::Pixels {
            width: TABLE_SIZE_PX,
            height: TABLE_SIZE_PX,
        },
        ItemKind::Furniture(f) => Footprint::Percent {
            width: f.width,
            height: f.height,
        },
    }
}

/// Pixel offset of a seat's top-left corner inside the table box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatOffset {
    pub left: f64,
    pub top: f64,
}

pub fn seat_radius(shape: TableShape) -> f64 {
    match shape {
        TableShape::Rectangle => RECTANGLE_SEAT_RADIUS_PX,
        TableShape::Circle => CIRCLE_SEAT_RADIUS_PX,
    }
}

/// Seats evenly spaced on a ring around the table centre.
///
/// Seat `i` sits at `i * 360 / capacity` degrees, shifted by half a seat so
/// the icon is centred on the ring. Yields exactly `capacity` offsets;
/// `capacity == 0` yields nothing.
pub fn seat_positions(capacity: u32, shape: TableShape) -> SeatPositions {
    SeatPositions {
        capacity,
        next: 0,
        radius: seat_radius(shape),
    }
}

/// Iterator returned by [`seat_positions`]
#[derive(Debug, Clone)]
pub struct SeatPositions {
    capacity: u32,
    next: u32,
    radius: f64,
}

impl Iterator for SeatPositions {
    type Item = SeatOffset;

    fn next(&mut self) -> Option<SeatOffset> {
        if self.next >= self.capacity {
            return None;
        }
        let angle = (360.0 / f64::from(self.capacity)) * f64::from(self.next);
        let rad = angle.to_radians();
        self.next += 1;

        let half_seat = SEAT_SIZE_PX / 2.0;
        Some(SeatOffset {
            left: TABLE_CENTER_PX + self.radius * rad.cos() - half_seat,
            top: TABLE_CENTER_PX + self.radius * rad.sin() - half_seat,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.capacity - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SeatPositions {}

impl std::iter::FusedIterator for SeatPositions {}
