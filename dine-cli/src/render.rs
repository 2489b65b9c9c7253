//! Plain-text rendering of floor plans for the terminal

use dine_floor::geometry::{Footprint, centered_table_anchor, item_footprint};
use dine_floor::{ItemKind, LayoutItem, SeatStatus, TableShape, TableType, seat_positions};
use shared::Restaurant;

pub fn restaurant_header(restaurant: &Restaurant) -> String {
    let mut line = format!("{} ({})", restaurant.name, restaurant.subtitle());
    if let (Some(open), Some(close)) = (&restaurant.opening_time, &restaurant.closing_time) {
        line.push_str(&format!(", open {open}-{close}"));
    }
    line
}

fn table_type_label(table_type: TableType) -> &'static str {
    match table_type {
        TableType::Standard => "standard",
        TableType::Vip => "vip",
        TableType::Booth => "booth",
    }
}

fn shape_label(shape: TableShape) -> &'static str {
    match shape {
        TableShape::Rectangle => "rectangle",
        TableShape::Circle => "circle",
    }
}

pub fn item_line(item: &LayoutItem) -> String {
    let position = format!("({:.1}%, {:.1}%)", item.x_coordinate, item.y_coordinate);
    let size = match item_footprint(item) {
        Footprint::Pixels { width, height } => format!("{width:.0}x{height:.0}px"),
        Footprint::Percent { width, height } => format!("{width:.0}x{height:.0}%"),
    };
    match &item.kind {
        ItemKind::Table(table) => format!(
            "[{}] table {} {} {}, {} seats at {position} {size}",
            item.id,
            table.table_number,
            table_type_label(table.table_type),
            shape_label(table.shape),
            table.capacity,
        ),
        ItemKind::Furniture(furniture) => format!(
            "[{}] {} {} at {position} {size}",
            item.id, furniture.name, furniture.color,
        ),
    }
}

/// Seat offsets inside the table box, px
pub fn seat_line(item: &LayoutItem) -> Option<String> {
    let table = item.as_table()?;
    let seats: Vec<String> = seat_positions(table.capacity, table.shape)
        .map(|seat| format!("({:.0},{:.0})", seat.left, seat.top))
        .collect();
    Some(format!("    seats: {}", seats.join(" ")))
}

/// Where the booking view places a table, as CSS `left, top`
pub fn booking_anchor(item: &LayoutItem) -> Option<String> {
    item.as_table()?;
    let anchor = centered_table_anchor(item);
    let sign = if anchor.shift_px < 0.0 { '-' } else { '+' };
    let shift = anchor.shift_px.abs();
    Some(format!(
        "    anchor: calc({:.1}% {sign} {shift:.0}px), calc({:.1}% {sign} {shift:.0}px)",
        anchor.left_pct, anchor.top_pct,
    ))
}

pub fn status_label(status: SeatStatus) -> &'static str {
    match status {
        SeatStatus::Furniture => "-",
        SeatStatus::Available => "free",
        SeatStatus::Unavailable => "taken",
        SeatStatus::Selected => "selected",
    }
}
