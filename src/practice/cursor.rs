//! Navigation and flip state over a session's item sequence.

use serde::Serialize;

use super::PracticeError;

/// Current position plus whether the card's back side is showing.
///
/// Movement wraps in both directions and always hides the back side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Cursor {
  index: usize,
  revealed: bool,
  len: usize,
}

impl Cursor {
  pub fn new(len: usize) -> Self {
    Self {
      index: 0,
      revealed: false,
      len,
    }
  }

  pub fn index(&self) -> usize {
    self.index
  }

  pub fn revealed(&self) -> bool {
    self.revealed
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn next(&mut self) {
    if self.len == 0 {
      return;
    }
    self.index = (self.index + 1) % self.len;
    self.revealed = false;
  }

  pub fn previous(&mut self) {
    if self.len == 0 {
      return;
    }
    self.index = (self.index + self.len - 1) % self.len;
    self.revealed = false;
  }

  pub fn flip(&mut self) {
    self.revealed = !self.revealed;
  }

  pub fn jump_to(&mut self, index: usize) -> Result<(), PracticeError> {
    if index >= self.len {
      return Err(PracticeError::IndexOutOfRange {
        index,
        len: self.len,
      });
    }
    self.index = index;
    self.revealed = false;
    Ok(())
  }

  /// Back to the initial state for a session of `len` items.
  pub fn reset(&mut self, len: usize) {
    *self = Self::new(len);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_initial_state() {
    let cursor = Cursor::new(5);
    assert_eq!(cursor.index(), 0);
    assert!(!cursor.revealed());
  }

  #[test]
  fn test_next_wraps_and_hides() {
    let mut cursor = Cursor::new(3);
    cursor.jump_to(2).unwrap();
    cursor.flip();
    cursor.next();
    assert_eq!(cursor.index(), 0);
    assert!(!cursor.revealed());
  }

  #[test]
  fn test_previous_wraps_and_hides() {
    let mut cursor = Cursor::new(3);
    cursor.flip();
    cursor.previous();
    assert_eq!(cursor.index(), 2);
    assert!(!cursor.revealed());
  }

  #[test]
  fn test_flip_keeps_index() {
    let mut cursor = Cursor::new(4);
    cursor.next();
    cursor.flip();
    assert_eq!(cursor.index(), 1);
    assert!(cursor.revealed());
    cursor.flip();
    assert!(!cursor.revealed());
  }

  #[test]
  fn test_jump_to() {
    let mut cursor = Cursor::new(4);
    cursor.flip();
    cursor.jump_to(3).unwrap();
    assert_eq!(cursor.index(), 3);
    assert!(!cursor.revealed());

    let err = cursor.jump_to(4).unwrap_err();
    assert!(matches!(err, PracticeError::IndexOutOfRange { index: 4, len: 4 }));
    assert_eq!(cursor.index(), 3);
  }

  #[test]
  fn test_single_item_session() {
    let mut cursor = Cursor::new(1);
    cursor.next();
    assert_eq!(cursor.index(), 0);
    cursor.previous();
    assert_eq!(cursor.index(), 0);
  }

  #[test]
  fn test_empty_session_is_inert() {
    let mut cursor = Cursor::new(0);
    cursor.next();
    cursor.previous();
    assert_eq!(cursor.index(), 0);
    assert!(cursor.jump_to(0).is_err());
  }

  #[test]
  fn test_full_cycle_returns_to_start() {
    let mut cursor = Cursor::new(7);
    for _ in 0..7 {
      cursor.next();
    }
    assert_eq!(cursor.index(), 0);
  }

  #[test]
  fn test_reset() {
    let mut cursor = Cursor::new(3);
    cursor.next();
    cursor.flip();
    cursor.reset(8);
    assert_eq!(cursor, Cursor::new(8));
  }
}
