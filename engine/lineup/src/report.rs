//! Text reports for a valued roster

use crate::error::Result;
use crate::valuator::{PlayerValuation, RosterValuator};
use player_catalog::PlayerId;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Position")]
    position: &'static str,
    #[tabled(rename = "Form")]
    form: String,
    #[tabled(rename = "PPG")]
    ppg: String,
}

#[derive(Tabled)]
struct ValuationRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Bought")]
    bought: String,
    #[tabled(rename = "Now")]
    now: String,
    #[tabled(rename = "Sell")]
    sell: String,
}

/// Format a cost in tenths of a million as "£4.5m"
pub fn format_cost(cost: impl Into<i64>) -> String {
    format!("£{:.1}m", cost.into() as f64 / 10.0)
}

/// Starting 11 and bench as two grid tables
///
/// Captaincy markers are attached by player id, so two players sharing a
/// name cannot both be marked. Every row must resolve in the catalog and
/// carry an acquisition price.
pub fn render_lineup(valuator: &RosterValuator) -> Result<String> {
    let roster = valuator.roster();
    let starting = player_rows(valuator, roster.starting())?;
    let bench = player_rows(valuator, roster.bench())?;

    Ok(format!("Starting 11\n{}\n\nBench\n{}", grid(starting), grid(bench)))
}

/// Selling-price table followed by the squad total
pub fn render_valuations(valuations: &[PlayerValuation]) -> Result<String> {
    let total: i64 = valuations.iter().map(|v| i64::from(v.selling_price)).sum();

    let rows: Vec<ValuationRow> = valuations
        .iter()
        .map(|v| ValuationRow {
            name: v.name.clone(),
            bought: format_cost(v.original_cost),
            now: format_cost(v.current_cost),
            sell: format_cost(v.selling_price),
        })
        .collect();

    Ok(format!("{}\nSquad value: {}", grid(rows), format_cost(total)))
}

fn player_rows(valuator: &RosterValuator, ids: &[PlayerId]) -> Result<Vec<PlayerRow>> {
    let roster = valuator.roster();

    ids.iter()
        .map(|&id| -> Result<PlayerRow> {
            let player = valuator.lookup_player(id)?;
            roster.original_cost_of(id)?;

            let mut name = player.full_name();
            if id == roster.captain() {
                name.push_str(" (C)");
            } else if id == roster.vice_captain() {
                name.push_str(" (VC)");
            }

            Ok(PlayerRow {
                name,
                position: player.position.label(),
                form: format!("{:.1}", player.form),
                ppg: format!("{:.1}", player.points_per_game),
            })
        })
        .collect()
}

fn grid<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::modern()).to_string()
}
