//! Plain-text renders of a map for debugging.

use crate::NavMap;

impl NavMap {
    /// Render the obstacle layout with the endpoints of the last query.
    ///
    /// Cells are space-separated tokens, one text line per row: `*` for an
    /// obstacle, `S` and `E` for the query start and end, `.` for any other
    /// cell. Markers on the same cell are concatenated (`*S`, `SE`).
    pub fn dump(&self) -> String {
        self.render(|m, i| {
            let mut tok = String::new();
            if m.obstacles.contains(i) {
                tok.push('*');
            }
            if m.start == Some(i) {
                tok.push('S');
            }
            if m.end == Some(i) {
                tok.push('E');
            }
            if tok.is_empty() {
                tok.push('.');
            }
            tok
        })
    }

    /// Render connected-component IDs, `*` for cells in no component.
    pub fn dump_connected(&self) -> String {
        if !self.connectivity_marked {
            return "connectivity not marked".to_string();
        }
        self.render(|m, i| match m.components[i] {
            0 => "*".to_string(),
            id => id.to_string(),
        })
    }

    fn render(&self, token: impl Fn(&Self, usize) -> String) -> String {
        let mut out = String::with_capacity(self.len() * 2);
        for i in 0..self.len() {
            if i > 0 {
                out.push(if i % self.width == 0 { '\n' } else { ' ' });
            }
            out.push_str(&token(self, i));
        }
        out
    }
}
