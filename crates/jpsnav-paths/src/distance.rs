use jpsnav_core::Point;

/// Cost of one horizontal or vertical step.
pub const CARDINAL_COST: i32 = 5;

/// Cost of one diagonal step (7/5 approximates √2).
pub const DIAGONAL_COST: i32 = 7;

/// Octile distance between two cells: the cost of the cheapest obstacle-free
/// 8-way walk, diagonal steps first.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let diag = dx.min(dy);
    diag * DIAGONAL_COST + (dx.max(dy) - diag) * CARDINAL_COST
}
