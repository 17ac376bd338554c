//! Global output layout.
//!
//! Maps the logical desktop space onto outputs. Each output occupies a
//! rectangle of its effective (logical) resolution. Automatic placement puts a
//! new output to the right of everything already laid out, so a single output
//! lands at the origin.

use kiosk_core::types::{Point, Rect, Size};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
struct LayoutEntry {
    name: String,
    geometry: Rect<i32>,
}

#[derive(Debug, Default)]
pub struct OutputLayout {
    entries: Vec<LayoutEntry>,
}

impl OutputLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `name` automatically and returns its position. An output that
    /// is already laid out is moved to the new position.
    pub fn add_auto(&mut self, name: &str, size: Size<i32>) -> Point<i32> {
        self.entries.retain(|e| e.name != name);
        let x = self.entries.iter().map(|e| e.geometry.right()).max().unwrap_or(0);
        let position = Point::new(x, 0);
        debug!(output = %name, x = position.x, y = position.y, "Output added to layout");
        self.entries.push(LayoutEntry {
            name: name.to_string(),
            geometry: Rect::new(position, size),
        });
        position
    }

    /// Returns whether `name` was laid out.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        before != self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<Rect<i32>> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.geometry)
    }

    /// Converts a layout coordinate into coordinates relative to the output's
    /// top-left corner. `None` if the output is not laid out.
    pub fn output_coords(&self, name: &str, layout_point: Point<f64>) -> Option<Point<f64>> {
        self.get(name)
            .map(|geometry| layout_point - geometry.origin.to_f64())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_output_at_origin() {
        let mut layout = OutputLayout::new();
        assert_eq!(layout.add_auto("HDMI-A-1", Size::new(1920, 1080)), Point::new(0, 0));
        assert_eq!(
            layout.output_coords("HDMI-A-1", Point::new(0.0, 0.0)),
            Some(Point::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_auto_placement_goes_right() {
        let mut layout = OutputLayout::new();
        layout.add_auto("A", Size::new(1920, 1080));
        assert_eq!(layout.add_auto("B", Size::new(1280, 720)), Point::new(1920, 0));
        assert_eq!(
            layout.output_coords("B", Point::new(0.0, 0.0)),
            Some(Point::new(-1920.0, 0.0))
        );
    }

    #[test]
    fn test_remove_and_unknown_output() {
        let mut layout = OutputLayout::new();
        layout.add_auto("A", Size::new(800, 600));
        assert!(layout.remove("A"));
        assert!(!layout.remove("A"));
        assert!(layout.is_empty());
        assert_eq!(layout.output_coords("A", Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_re_adding_replaces_entry() {
        let mut layout = OutputLayout::new();
        layout.add_auto("A", Size::new(800, 600));
        layout.add_auto("A", Size::new(1024, 768));
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.get("A"), Some(Rect::from_coords(0, 0, 1024, 768)));
    }
}
