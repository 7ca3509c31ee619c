use std::path::PathBuf;
use std::sync::mpsc::Sender;

use log::debug;

use crate::level::Level;
use crate::tile::{TileAction, TileData};
use crate::token::Token;

/// Notifications for the view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
	LevelOpened(Level),
	LevelClosed,
	TileChanged { x: i32, y: i32, tile: TileData },
	TokenizingFinished(Vec<Token>),
}

/// Requests coming from the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
	Run(PathBuf),
	SelectLevel(PathBuf),
	CloseLevel,
	PlayerAction(TileAction),
	Cycle,
}

/// Receives events. Injected by whoever composes the session.
pub trait EventSink {
	fn emit(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
	fn emit(&mut self, event: Event) {
		self.push(event);
	}
}

impl EventSink for Sender<Event> {
	fn emit(&mut self, event: Event) {
		// A dropped receiver means nobody is watching any more.
		if self.send(event).is_err() {
			debug!("event receiver gone, dropping event");
		}
	}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
	fn emit(&mut self, _event: Event) {}
}
