use crate::*;
use std::path::Path;

/// Column of the first number in a tab-delimited history line.
const FIRST_FIELD: usize = 2;
/// Minimum fields per line (two leading metadata columns + six numbers).
const MIN_FIELDS: usize = FIRST_FIELD + DRAW_SIZE;

/// Chronological (oldest first) sequence of past draws.
///
/// Source files list the newest draw first, so [`History::parse`] reverses
/// once while reading. Anything built with `From<Vec<Draw>>` is taken to be
/// in chronological order already.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History(Vec<Draw>);

impl History {
    /// Read a newest-first, tab-delimited history file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let history = Self::parse(&text)?;
        if history.is_empty() {
            log::warn!("history file {} holds no draws", path.as_ref().display());
        }
        log::info!(
            "{:<32}{:<32}",
            "loaded history",
            format!("{} draws", history.len())
        );
        Ok(history)
    }

    /// Parse newest-first lines. Fields `2..8` of each line hold one draw.
    /// Blank lines are skipped; the numbers themselves are not range-checked.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut draws = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| Self::line(i + 1, line))
            .collect::<Result<Vec<Draw>, Error>>()?;
        draws.reverse();
        let history = Self(draws);
        history
            .iter()
            .filter(|d| !d.is_valid())
            .for_each(|d| log::warn!("history contains invalid draw {}", d));
        Ok(history)
    }

    fn line(line: usize, text: &str) -> Result<Draw, Error> {
        let fields = text.split('\t').collect::<Vec<&str>>();
        if fields.len() < MIN_FIELDS {
            return Err(Error::Malformed {
                line,
                reason: format!("expected {} fields, found {}", MIN_FIELDS, fields.len()),
            });
        }
        let mut balls = [0; DRAW_SIZE];
        for (ball, field) in balls.iter_mut().zip(&fields[FIRST_FIELD..MIN_FIELDS]) {
            *ball = field.trim().parse::<Ball>().map_err(|e| Error::Malformed {
                line,
                reason: format!("field {:?}: {}", field, e),
            })?;
        }
        Ok(Draw::from(balls))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Draw> {
        self.0.iter()
    }
}

impl From<Vec<Draw>> for History {
    fn from(draws: Vec<Draw>) -> Self {
        Self(draws)
    }
}

impl std::ops::Index<usize> for History {
    type Output = Draw;
    fn index(&self, i: usize) -> &Draw {
        &self.0[i]
    }
}
