//! Identifier assignment for new rows

use crate::document::TableRow;
use chrono::NaiveDate;
use everyday_core::{
    parse_date, parse_sequence, Identifier, IdentifierMode, SequencingError, TableConfig,
    DEFAULT_SEQUENCE_WIDTH,
};

/// Compute the identifier of the row about to be appended.
///
/// `timestamp` is the entry date; `forced` overrides the computed candidate.
/// Sequential identifiers keep the width of the last row and only grow when
/// the value needs more digits; earlier rows are never re-padded.
pub fn next_identifier(
    existing_rows: &[TableRow],
    timestamp: NaiveDate,
    forced: Option<&str>,
    config: &TableConfig,
) -> Result<Identifier, SequencingError> {
    match config.identifier_mode() {
        IdentifierMode::Sequential => next_sequential(existing_rows, timestamp, forced, config),
        IdentifierMode::Date => next_date(existing_rows, timestamp, forced),
    }
}

fn next_sequential(
    rows: &[TableRow],
    timestamp: NaiveDate,
    forced: Option<&str>,
    config: &TableConfig,
) -> Result<Identifier, SequencingError> {
    let last = match rows.last() {
        Some(row) => {
            let value = parse_sequence(row.identifier())
                .ok_or_else(|| malformed(row.identifier(), IdentifierMode::Sequential))?;
            Some((row.identifier(), value))
        }
        None => None,
    };
    let width = last.map_or(DEFAULT_SEQUENCE_WIDTH, |(text, _)| text.trim().len());

    let value = match (forced, config.project_start()) {
        (Some(text), _) => {
            parse_sequence(text).ok_or_else(|| malformed(text, IdentifierMode::Sequential))?
        }
        (None, Some(start)) => {
            let days = (timestamp - start).num_days();
            if days < 0 {
                return Err(SequencingError::BeforeProjectStart {
                    date: timestamp,
                    start,
                });
            }
            days as u64 + 1
        }
        (None, None) => match last {
            Some((text, value)) => value
                .checked_add(1)
                .ok_or_else(|| malformed(text, IdentifierMode::Sequential))?,
            None => 1,
        },
    };
    let next = Identifier::sequential(value, width);

    if rows
        .iter()
        .any(|row| parse_sequence(row.identifier()) == Some(value))
    {
        return Err(SequencingError::DuplicateIdentifier {
            identifier: next.to_string(),
        });
    }

    if let Some((text, last_value)) = last {
        if value <= last_value {
            return Err(SequencingError::NonMonotonicIdentifier {
                last: text.to_string(),
                next: next.to_string(),
            });
        }
        if !config.allow_gaps() && value != last_value + 1 {
            return Err(SequencingError::UnexpectedGap {
                last: text.to_string(),
                next: next.to_string(),
            });
        }
    }

    Ok(next)
}

fn next_date(
    rows: &[TableRow],
    timestamp: NaiveDate,
    forced: Option<&str>,
) -> Result<Identifier, SequencingError> {
    let date = match forced {
        Some(text) => parse_date(text).ok_or_else(|| malformed(text, IdentifierMode::Date))?,
        None => timestamp,
    };
    let next = Identifier::date(date);

    if let Some(row) = rows.last() {
        let last = parse_date(row.identifier())
            .ok_or_else(|| malformed(row.identifier(), IdentifierMode::Date))?;
        if date < last {
            return Err(SequencingError::NonMonotonicIdentifier {
                last: row.identifier().to_string(),
                next: next.to_string(),
            });
        }
    }

    Ok(next)
}

fn malformed(identifier: &str, mode: IdentifierMode) -> SequencingError {
    SequencingError::MalformedIdentifier {
        identifier: identifier.to_string(),
        mode,
    }
}
