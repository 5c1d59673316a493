//! CSV transfer: import a team list, export the league table.

use crate::models::{Competition, CompetitionError, TeamStanding};
use std::io::{Read, Write};

fn csv_error(e: csv::Error) -> CompetitionError {
    CompetitionError::Csv(e.to_string())
}

/// Read team names from the first column of each record.
///
/// A leading `name` header is skipped, as are blank rows. Names are trimmed.
pub fn teams_from_csv<R: Read>(reader: R) -> Result<Vec<String>, CompetitionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let Some(name) = record.get(0).map(str::trim).filter(|n| !n.is_empty()) else {
            continue;
        };
        if names.is_empty() && name.eq_ignore_ascii_case("name") {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Append every team listed in a CSV file (Setup only). Returns how many were added.
pub fn import_teams_csv<R: Read>(competition: &mut Competition, reader: R) -> Result<usize, CompetitionError> {
    let names = teams_from_csv(reader)?;
    for name in &names {
        competition.add_team(name.as_str())?;
    }
    Ok(names.len())
}

/// Write the table with a header row; position is 1-based.
pub fn standings_to_csv<W: Write>(writer: W, standings: &[TeamStanding]) -> Result<(), CompetitionError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record([
            "position",
            "team",
            "played",
            "won",
            "drawn",
            "lost",
            "goals_for",
            "goals_against",
            "goal_difference",
            "points",
            "form",
        ])
        .map_err(csv_error)?;
    for (idx, row) in standings.iter().enumerate() {
        writer
            .write_record([
                (idx + 1).to_string(),
                row.name.clone(),
                row.played.to_string(),
                row.won.to_string(),
                row.drawn.to_string(),
                row.lost.to_string(),
                row.goals_for.to_string(),
                row.goals_against.to_string(),
                row.goal_difference.to_string(),
                row.points.to_string(),
                row.form_string(),
            ])
            .map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|e| CompetitionError::Csv(e.to_string()))
}
