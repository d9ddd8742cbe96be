use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pinforge::history::HistoryView;
use pinforge::profiles::LockType;
use pinforge::sequence::{PinRecord, PinType};
use strum::IntoEnumIterator;

fn type_color(t: PinType) -> Color {
    match t {
        PinType::Standard => Color::White,
        PinType::Spool => Color::Yellow,
        PinType::Serrated => Color::Red,
        PinType::Combination => Color::Cyan,
    }
}

pub fn print_sequence(lock_type: &str, pins: &[PinRecord]) {
    println!("\nSequence: {}", lock_type);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut spots = vec![Cell::new("Spot").add_attribute(Attribute::Bold)];
    let mut heights = vec![Cell::new("Pin").add_attribute(Attribute::Bold)];
    let mut types = vec![Cell::new("Type").add_attribute(Attribute::Bold)];

    for pin in pins {
        spots.push(Cell::new(pin.position).set_alignment(CellAlignment::Center));
        heights.push(Cell::new(pin.height).set_alignment(CellAlignment::Center));
        types.push(
            Cell::new(pin.pin_type)
                .fg(type_color(pin.pin_type))
                .set_alignment(CellAlignment::Center),
        );
    }

    table.add_row(spots);
    table.add_row(heights);
    table.add_row(types);
    println!("{}", table);
}

pub fn print_history(history: &[HistoryView]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Lock").add_attribute(Attribute::Bold),
        Cell::new("Timestamp"),
        Cell::new("Pins").fg(Color::Cyan),
        Cell::new("Types"),
    ]);

    for (i, view) in history.iter().enumerate() {
        let pins: Vec<String> = view.pins.iter().map(|h| h.to_string()).collect();
        let types: Vec<String> = view.types.iter().map(|t| t.to_string()).collect();
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&view.lock_type_code).add_attribute(Attribute::Bold),
            Cell::new(&view.timestamp),
            Cell::new(pins.join(" ")).fg(Color::Cyan),
            Cell::new(types.join(" ")),
        ]);
    }
    println!("\nRecent sequences\n{}", table);
}

pub fn print_profiles() {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Code").add_attribute(Attribute::Bold),
        Cell::new("Heights"),
        Cell::new("MACS"),
        Cell::new("Rules"),
        Cell::new("Description"),
    ]);

    for lock in LockType::iter() {
        let profile = lock.profile();
        let heights = match &profile.dial {
            Some(dial) => format!(
                "{}-{} excl. {}-{}",
                profile.height_domain.start(),
                profile.height_domain.end(),
                dial.excluded.start(),
                dial.excluded.end()
            ),
            None => format!(
                "{}-{}",
                profile.height_domain.start(),
                profile.height_domain.end()
            ),
        };
        let macs = profile
            .macs_limit
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&profile.code).add_attribute(Attribute::Bold),
            Cell::new(heights),
            Cell::new(macs).set_alignment(CellAlignment::Right),
            Cell::new(profile.rules.len()).set_alignment(CellAlignment::Right),
            Cell::new(lock.description()),
        ]);
    }
    println!("{}", table);
}
