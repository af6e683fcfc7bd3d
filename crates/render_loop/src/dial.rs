//! Analog dial for character terminals
//!
//! The tick ring is built once; each frame only the three hands are drawn on
//! a copy of the prebuilt face.

use contracts::{normalize_degrees, DisplayState};

/// One mark on the dial rim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Clockwise from 12 o'clock
    pub angle_deg: f64,
    /// Hour marks (every fifth tick)
    pub bold: bool,
}

/// The 60 rim marks of a clock face
#[derive(Debug, Clone)]
pub struct TickRing {
    ticks: Vec<Tick>,
}

impl TickRing {
    pub fn build() -> Self {
        let ticks = (0..60u32)
            .map(|i| Tick {
                angle_deg: f64::from(i) * 6.0,
                bold: i % 5 == 0,
            })
            .collect();
        Self { ticks }
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }
}

const BOLD_TICK: char = 'o';
const FINE_TICK: char = '.';
const HOUR_HAND: char = '#';
const MINUTE_HAND: char = '*';
const SECOND_HAND: char = '+';
const HUB: char = '@';

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// Character-grid clock face
#[derive(Debug, Clone)]
pub struct Dial {
    radius: usize,
    width: usize,
    height: usize,
    face: Vec<char>,
}

impl Dial {
    /// Build a face of `radius` rows from the center to the rim
    pub fn new(radius: usize, ring: &TickRing) -> Self {
        let radius = radius.max(2);
        let width = radius * 4 + 1;
        let height = radius * 2 + 1;
        let mut dial = Self {
            radius,
            width,
            height,
            face: Vec::new(),
        };

        let mut face = vec![' '; width * height];
        // Fine ticks first so hour marks win shared cells
        for tick in ring.ticks().iter().filter(|t| !t.bold) {
            face[dial.cell_index(tick.angle_deg, 1.0)] = FINE_TICK;
        }
        for tick in ring.ticks().iter().filter(|t| t.bold) {
            face[dial.cell_index(tick.angle_deg, 1.0)] = BOLD_TICK;
        }
        dial.face = face;
        dial
    }

    /// Draw the hands of `state` over the face, one string per row
    pub fn render(&self, state: &DisplayState) -> Vec<String> {
        let mut cells = self.face.clone();
        self.draw_hand(&mut cells, state.hour_angle_deg, 0.5, HOUR_HAND);
        self.draw_hand(&mut cells, state.minute_angle_deg, 0.75, MINUTE_HAND);
        self.draw_hand(&mut cells, state.second_angle_deg, 0.9, SECOND_HAND);
        cells[self.cell_index(0.0, 0.0)] = HUB;

        cells
            .chunks(self.width)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    fn draw_hand(&self, cells: &mut [char], angle_deg: f64, length: f64, ch: char) {
        let steps = (self.radius as f64 * length * 4.0).ceil() as usize;
        for step in 1..=steps {
            let r = length * step as f64 / steps as f64;
            cells[self.cell_index(angle_deg, r)] = ch;
        }
    }

    /// Cell of the point at `r` (fraction of the radius) along `angle_deg`
    fn cell_index(&self, angle_deg: f64, r: f64) -> usize {
        let theta = normalize_degrees(angle_deg).to_radians();
        let radius = self.radius as f64;
        let x = (radius * CELL_ASPECT + theta.sin() * r * radius * CELL_ASPECT).round();
        let y = (radius - theta.cos() * r * radius).round();
        let x = x.clamp(0.0, (self.width - 1) as f64) as usize;
        let y = y.clamp(0.0, (self.height - 1) as f64) as usize;
        y * self.width + x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(hour: f64, minute: f64, second: f64) -> DisplayState {
        DisplayState {
            frame_id: 0,
            zone: "UTC".into(),
            digital_text: String::new(),
            date_text: String::new(),
            second_angle_deg: second,
            minute_angle_deg: minute,
            hour_angle_deg: hour,
        }
    }

    #[test]
    fn test_tick_ring() {
        let ring = TickRing::build();
        assert_eq!(ring.ticks().len(), 60);
        assert_eq!(ring.ticks().iter().filter(|t| t.bold).count(), 12);
        assert_eq!(ring.ticks()[1].angle_deg, 6.0);
        assert!(ring.ticks()[55].bold);
    }

    #[test]
    fn test_dial_dimensions() {
        let dial = Dial::new(6, &TickRing::build());
        let rows = dial.render(&state(0.0, 0.0, 0.0));
        assert_eq!(rows.len(), 13);
        assert!(rows.iter().all(|r| r.chars().count() <= 25));
    }

    #[test]
    fn test_twelve_oclock_mark_on_top_row() {
        let dial = Dial::new(6, &TickRing::build());
        let rows = dial.render(&state(90.0, 90.0, 90.0));
        let top: Vec<char> = rows[0].chars().collect();
        assert_eq!(top.get(12), Some(&BOLD_TICK));
    }

    #[test]
    fn test_hands_point_where_expected() {
        let dial = Dial::new(6, &TickRing::build());
        // Minute hand at 3 o'clock, hour at 12
        let rows = dial.render(&state(0.0, 90.0, 180.0));
        assert!(rows[6].contains(MINUTE_HAND));
        assert_eq!(rows[6].chars().nth(12), Some(HUB));
        assert_eq!(rows[4].chars().nth(12), Some(HOUR_HAND));
        assert!(rows[10].contains(SECOND_HAND));
    }

    #[test]
    fn test_angles_outside_range_are_rotated() {
        let dial = Dial::new(6, &TickRing::build());
        assert_eq!(
            dial.render(&state(30.0, 90.0, 183.0)),
            dial.render(&state(390.0, 450.0, 543.0))
        );
    }
}
