use comfy_table::{ContentArrangement, Table};

use nr_core::{MAX_PLAYERS, MIN_PLAYERS, RoleDistribution};

pub fn run(count: usize) -> Result<(), String> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        return Err(format!(
            "tables seat {MIN_PLAYERS} to {MAX_PLAYERS} players, not {count}"
        ));
    }

    let dist = RoleDistribution::for_player_count(count);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Role", "Count"]);
    table.add_row(vec!["Wolf".to_string(), dist.wolves.to_string()]);
    table.add_row(vec!["Seer".to_string(), dist.seers.to_string()]);
    table.add_row(vec!["Guardian".to_string(), dist.guardians.to_string()]);
    table.add_row(vec!["Villager".to_string(), dist.villagers.to_string()]);

    println!("{table}");
    println!();
    println!("  {count} players, {} roles dealt", dist.total());

    Ok(())
}
