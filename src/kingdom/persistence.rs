//! Save files - a line-oriented text format
//!
//! One value per line, in this order: turn, difficulty index, king name,
//! tax rate, the six resources (food, gold, wood, stone, iron, weapons),
//! happiness, peasants, total population. The army, bank, market and
//! buildings are not persisted; loading leaves them as they are.

use std::path::Path;
use std::str::FromStr;

use crate::core::error::{KingdomError, Result};
use crate::core::types::{Difficulty, ResourceType, Turn};
use crate::kingdom::leader::Leader;
use crate::kingdom::population::Population;
use crate::kingdom::Kingdom;

/// Conventional save file name
pub const DEFAULT_SAVE_FILE: &str = "savegame.txt";

/// The persisted subset of a kingdom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRecord {
    pub turn: Turn,
    pub difficulty: Difficulty,
    pub king: String,
    pub tax_rate: u32,
    /// Quantities in `ResourceType::ALL` order
    pub resources: [i64; 6],
    pub happiness: i32,
    pub peasants: u32,
    pub total_population: u32,
}

impl SaveRecord {
    pub fn from_kingdom(kingdom: &Kingdom) -> Self {
        Self {
            turn: kingdom.turn,
            difficulty: kingdom.difficulty,
            king: kingdom.ruler.name.clone(),
            tax_rate: kingdom.tax_rate(),
            resources: kingdom.stockpile.amounts(),
            happiness: kingdom.population.happiness(),
            peasants: kingdom.population.peasants(),
            total_population: kingdom.population.total(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![
            self.turn.to_string(),
            self.difficulty.index().to_string(),
            self.king.clone(),
            self.tax_rate.to_string(),
        ];
        lines.extend(self.resources.iter().map(i64::to_string));
        lines.push(self.happiness.to_string());
        lines.push(self.peasants.to_string());
        lines.push(self.total_population.to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = SaveLines::new(text);

        let turn = lines.number("turn")?;
        let difficulty_index: u8 = lines.number("difficulty")?;
        let difficulty = Difficulty::from_index(difficulty_index).ok_or_else(|| {
            lines.corrupt("difficulty", format!("unknown difficulty {difficulty_index}"))
        })?;
        let king = lines.next("king")?.to_string();
        if king.is_empty() {
            return Err(lines.corrupt("king", "empty name".into()));
        }
        let tax_rate = lines.number("tax rate")?;

        let mut resources = [0i64; 6];
        for (slot, resource) in resources.iter_mut().zip(ResourceType::ALL) {
            *slot = lines.number(resource.name())?;
        }

        let happiness = lines.number("happiness")?;
        let peasants = lines.number("peasants")?;
        let total_population: u32 = lines.number("total population")?;
        if peasants > total_population {
            return Err(lines.corrupt(
                "total population",
                format!("{peasants} peasants exceed a population of {total_population}"),
            ));
        }

        Ok(Self {
            turn,
            difficulty,
            king,
            tax_rate,
            resources,
            happiness,
            peasants,
            total_population,
        })
    }

    /// Overwrite the persisted parts of a kingdom
    ///
    /// An out-of-range tax rate is ignored and the new king keeps the
    /// default rate. A finished game becomes playable again.
    pub fn apply(&self, kingdom: &mut Kingdom) {
        kingdom.outcome = None;
        kingdom.turn = self.turn;
        kingdom.difficulty = self.difficulty;
        kingdom.ruler = Leader::king(self.king.clone());
        if let Err(e) = kingdom.ruler.set_tax_rate(self.tax_rate) {
            tracing::warn!(error = %e, "saved tax rate rejected, keeping default");
        }
        kingdom.stockpile.set_all(self.resources);
        kingdom.population = Population::from_total(self.peasants, self.total_population, self.happiness);
    }
}

/// Line cursor that reports the 1-based line of any failure
struct SaveLines<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> SaveLines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    fn next(&mut self, field: &'static str) -> Result<&'a str> {
        self.line += 1;
        self.lines
            .next()
            .map(str::trim)
            .ok_or_else(|| self.corrupt(field, "missing line".into()))
    }

    fn number<T: FromStr>(&mut self, field: &'static str) -> Result<T>
    where
        T::Err: std::fmt::Display,
    {
        let raw = self.next(field)?;
        raw.parse()
            .map_err(|e: T::Err| self.corrupt(field, format!("{raw:?}: {e}")))
    }

    fn corrupt(&self, field: &'static str, reason: String) -> KingdomError {
        KingdomError::CorruptSave {
            line: self.line,
            field,
            reason,
        }
    }
}

impl Kingdom {
    /// Write the kingdom to a save file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, SaveRecord::from_kingdom(self).to_text())?;
        tracing::info!(path = %path.display(), turn = self.turn, "game saved");
        Ok(())
    }

    /// Restore the kingdom from a save file
    ///
    /// On any failure the kingdom is left untouched.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => KingdomError::SaveNotFound(path.display().to_string()),
            _ => KingdomError::IoError(e),
        })?;
        let record = SaveRecord::parse(&text)?;
        record.apply(self);
        tracing::info!(path = %path.display(), turn = self.turn, king = %self.ruler.name, "game loaded");
        Ok(())
    }
}
