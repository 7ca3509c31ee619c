use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::config::TileSymbols;
use crate::direction::Direction;
use crate::grid::Grid;
use crate::tile::{TileData, TileType};

pub const UNNAMED_LEVEL: &str = "Unnamed level";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidLayoutError {
	#[error("{layout} row {row} is {found} wide, expected {expected}")]
	RaggedRow { layout: &'static str, row: usize, expected: usize, found: usize },
	#[error("direction layout is {direction_width}x{direction_height} but layout is {width}x{height}")]
	DimensionMismatch { width: usize, height: usize, direction_width: usize, direction_height: usize },
}

#[derive(Debug, Error)]
pub enum LevelLoadError {
	#[error("failed to read level '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse level: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("invalid level layout: {0}")]
	InvalidLayout(#[from] InvalidLayoutError),
}

/// Either `"XOP\nOOO"` or `["XOP", "OOO"]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LayoutText {
	Text(String),
	Rows(Vec<String>),
}

impl LayoutText {
	fn rows(&self) -> Vec<&str> {
		let rows: Vec<&str> = match self {
			LayoutText::Text(s) => s.lines().collect(),
			LayoutText::Rows(rows) => rows.iter().map(String::as_str).collect(),
		};
		rows.into_iter().map(str::trim).filter(|r| !r.is_empty()).collect()
	}
}

#[derive(Debug, Deserialize)]
struct LevelFile {
	name: Option<String>,
	pyscript_path: Option<PathBuf>,
	layout: Option<LayoutText>,
	direction_layout: Option<LayoutText>,
	#[serde(flatten)]
	extra: serde_json::Map<String, serde_json::Value>,
}

/// A loaded level. Immutable; reloading builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
	name: String,
	script_path: Option<PathBuf>,
	layout: Vec<Vec<TileType>>,
	direction_layout: Vec<Vec<Direction>>,
}

impl Level {
	pub fn new(
		name: impl Into<String>,
		script_path: Option<PathBuf>,
		layout: Vec<Vec<TileType>>,
		direction_layout: Vec<Vec<Direction>>,
	) -> Result<Self, InvalidLayoutError> {
		validate_shape(&layout, &direction_layout)?;
		Ok(Self { name: name.into(), script_path, layout, direction_layout })
	}

	/// Stand-in for a level that failed to load; `message` becomes its title.
	pub fn placeholder(message: impl Into<String>) -> Self {
		Self { name: message.into(), script_path: None, layout: Vec::new(), direction_layout: Vec::new() }
	}

	/// Loads a level, turning every failure into a logged placeholder level.
	pub fn load(path: &Path, symbols: &TileSymbols) -> Level {
		match Self::try_load(path, symbols) {
			Ok(level) => level,
			Err(e) => {
				error!("{}: {}", path.display(), e);
				Level::placeholder(e.to_string())
			}
		}
	}

	pub fn try_load(path: &Path, symbols: &TileSymbols) -> Result<Level, LevelLoadError> {
		debug!("loading level {}", path.display());
		let text = fs::read_to_string(path).map_err(|source| LevelLoadError::Io { path: path.to_path_buf(), source })?;
		Self::from_json_str(&text, path.parent(), symbols)
	}

	/// Parses level JSON. A relative `pyscript_path` is resolved against `base_dir`.
	pub fn from_json_str(text: &str, base_dir: Option<&Path>, symbols: &TileSymbols) -> Result<Level, LevelLoadError> {
		let file: LevelFile = serde_json::from_str(text)?;
		for key in file.extra.keys() {
			warn!("ignoring unexpected level field '{}'", key);
		}

		let name = file.name.unwrap_or_else(|| {
			warn!("level has no name");
			UNNAMED_LEVEL.to_string()
		});
		let script_path = file.pyscript_path.map(|p| match base_dir {
			Some(dir) if p.is_relative() => dir.join(p),
			_ => p,
		});

		let layout = file
			.layout
			.map(|l| parse_rows(&l, |c| symbols.parse(c).map_err(|e| e.to_string()), TileType::Empty))
			.unwrap_or_default();
		let direction_layout = file
			.direction_layout
			.map(|l| parse_rows(&l, |c| Direction::from_char(c).map_err(|e| e.to_string()), Direction::Right))
			.unwrap_or_default();

		Ok(Level::new(name, script_path, layout, direction_layout)?)
	}

	pub fn name(&self) -> &str {
		&self.name
	}
	pub fn script_path(&self) -> Option<&Path> {
		self.script_path.as_deref()
	}
	pub fn layout(&self) -> &[Vec<TileType>] {
		&self.layout
	}
	pub fn direction_layout(&self) -> &[Vec<Direction>] {
		&self.direction_layout
	}
	pub fn width(&self) -> usize {
		self.layout.first().map_or(0, Vec::len)
	}
	pub fn height(&self) -> usize {
		self.layout.len()
	}
	pub fn is_empty(&self) -> bool {
		self.width() == 0
	}

	/// Starting tiles; `None` for an empty (placeholder) level.
	pub fn initial_grid(&self) -> Option<Grid<TileData>> {
		if self.is_empty() {
			return None;
		}
		let mut cells = Vec::with_capacity(self.width() * self.height());
		for (y, row) in self.layout.iter().enumerate() {
			for (x, tile_type) in row.iter().enumerate() {
				let direction = self
					.direction_layout
					.get(y)
					.and_then(|r| r.get(x))
					.copied()
					.unwrap_or_default();
				cells.push(TileData::new(*tile_type, direction));
			}
		}
		Grid::from_cells(self.width() as i32, self.height() as i32, cells).ok()
	}
}

fn parse_rows<T: Copy>(text: &LayoutText, parse: impl Fn(char) -> Result<T, String>, fallback: T) -> Vec<Vec<T>> {
	text.rows()
		.into_iter()
		.map(|row| {
			row.chars()
				.map(|c| {
					parse(c).unwrap_or_else(|e| {
						warn!("{}, using default", e);
						fallback
					})
				})
				.collect()
		})
		.collect()
}

fn validate_shape(layout: &[Vec<TileType>], direction_layout: &[Vec<Direction>]) -> Result<(), InvalidLayoutError> {
	let width = layout.first().map_or(0, Vec::len);
	check_rows("layout", layout, width)?;
	if direction_layout.is_empty() {
		return Ok(());
	}
	let direction_width = direction_layout[0].len();
	check_rows("direction layout", direction_layout, direction_width)?;
	if direction_width != width || direction_layout.len() != layout.len() {
		return Err(InvalidLayoutError::DimensionMismatch {
			width,
			height: layout.len(),
			direction_width,
			direction_height: direction_layout.len(),
		});
	}
	Ok(())
}

fn check_rows<T>(layout: &'static str, rows: &[Vec<T>], expected: usize) -> Result<(), InvalidLayoutError> {
	match rows.iter().position(|r| r.len() != expected) {
		Some(row) => Err(InvalidLayoutError::RaggedRow { layout, row, expected, found: rows[row].len() }),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::coords::TileCoord;
	use serde_json::json;

	fn parse(v: serde_json::Value) -> Result<Level, LevelLoadError> {
		Level::from_json_str(&v.to_string(), Some(Path::new("levels")), &TileSymbols::default())
	}

	#[test]
	fn parses_full_level() {
		let level = parse(json!({
			"name": "Tutorial",
			"pyscript_path": "tutorial.pyscript",
			"layout": "XPO\nOOF\n",
			"direction_layout": ["RDR", "RRU"]
		}))
		.unwrap();
		assert_eq!(level.name(), "Tutorial");
		assert_eq!(level.script_path(), Some(Path::new("levels/tutorial.pyscript")));
		assert_eq!((level.width(), level.height()), (3, 2));
		let grid = level.initial_grid().unwrap();
		assert_eq!(grid.get(TileCoord::new(1, 0)).unwrap(), &TileData::new(TileType::Player, Direction::Down));
		assert_eq!(grid.get(TileCoord::new(2, 1)).unwrap(), &TileData::new(TileType::Flag, Direction::Up));
	}

	#[test]
	fn missing_fields_default() {
		let level = parse(json!({})).unwrap();
		assert_eq!(level.name(), UNNAMED_LEVEL);
		assert!(level.script_path().is_none());
		assert!(level.is_empty());
		assert!(level.initial_grid().is_none());
	}

	#[test]
	fn absolute_script_path_kept() {
		let level = parse(json!({ "pyscript_path": "/abs/a.pyscript" })).unwrap();
		assert_eq!(level.script_path(), Some(Path::new("/abs/a.pyscript")));
	}

	#[test]
	fn missing_direction_layout_defaults_right() {
		let level = parse(json!({ "name": "n", "layout": ["PO"], "extra_field": 3 })).unwrap();
		let grid = level.initial_grid().unwrap();
		assert!(grid.iter_xy().all(|(_, t)| t.tile_direction == Direction::Right));
	}

	#[test]
	fn unknown_chars_degrade() {
		let level = parse(json!({ "layout": "P?", "direction_layout": "UZ" })).unwrap();
		assert_eq!(level.layout()[0], vec![TileType::Player, TileType::Empty]);
		assert_eq!(level.direction_layout()[0], vec![Direction::Up, Direction::Right]);
	}

	#[test]
	fn mismatched_direction_layout_is_invalid() {
		let err = parse(json!({ "layout": "PO\nOO", "direction_layout": "RRR\nRRR" })).unwrap_err();
		assert!(matches!(
			err,
			LevelLoadError::InvalidLayout(InvalidLayoutError::DimensionMismatch { width: 2, direction_width: 3, .. })
		));
		let err = parse(json!({ "layout": "PO\nOO", "direction_layout": "RR" })).unwrap_err();
		assert!(matches!(err, LevelLoadError::InvalidLayout(InvalidLayoutError::DimensionMismatch { .. })));
	}

	#[test]
	fn ragged_layout_is_invalid() {
		let err = parse(json!({ "layout": ["PO", "O"] })).unwrap_err();
		assert!(matches!(
			err,
			LevelLoadError::InvalidLayout(InvalidLayoutError::RaggedRow { row: 1, expected: 2, found: 1, .. })
		));
	}

	#[test]
	fn malformed_json_becomes_placeholder() {
		let path = std::env::temp_dir().join(format!("pyscript-level-{}.json", std::process::id()));
		fs::write(&path, "{ not json").unwrap();
		let level = Level::load(&path, &TileSymbols::default());
		fs::remove_file(&path).unwrap();
		assert!(level.name().contains("failed to parse level"));
		assert!(level.is_empty());
	}

	#[test]
	fn missing_file_becomes_placeholder() {
		let level = Level::load(Path::new("no/such/level.json"), &TileSymbols::default());
		assert!(level.name().contains("no/such/level.json"));
		assert!(level.initial_grid().is_none());
	}

	#[test]
	fn constructor_validates() {
		assert!(Level::new("x", None, vec![vec![TileType::Empty]], vec![vec![Direction::Up; 2]]).is_err());
	}
}
