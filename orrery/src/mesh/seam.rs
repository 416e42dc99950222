//! Triangle patterns that stitch adjacent rings together.
//!
//! All triangles wind counter-clockwise seen from outside the body. A pattern
//! checks the ring lengths before emitting anything, so a mismatched seam adds
//! no indices at all.

use super::LatLongVertex;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SeamPattern {
    PoleFan,
    Equal,
    Doubling,
    ReverseDoubling,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("Rings of {upper} and {lower} vertexes do not fit the {pattern:?} seam")]
pub struct SeamMismatch {
    pub pattern: SeamPattern,
    pub upper: usize,
    pub lower: usize,
}

/// Fan from the north pole to the first ring
pub fn north_pole_fan(
    pole: &LatLongVertex,
    ring: &[LatLongVertex],
    indices: &mut Vec<u32>,
) -> Result<(), SeamMismatch> {
    check(ring.len() >= 4, SeamPattern::PoleFan, 1, ring.len())?;
    let p = pole.graphics_index;
    for k in 0..3 {
        indices.extend([p, ring[k].graphics_index, ring[k + 1].graphics_index]);
    }
    Ok(())
}

/// Fan from the last ring to the south pole, mirrored so it still faces out
pub fn south_pole_fan(
    ring: &[LatLongVertex],
    pole: &LatLongVertex,
    indices: &mut Vec<u32>,
) -> Result<(), SeamMismatch> {
    check(ring.len() >= 4, SeamPattern::PoleFan, ring.len(), 1)?;
    let p = pole.graphics_index;
    for k in (0..3).rev() {
        indices.extend([p, ring[k + 1].graphics_index, ring[k].graphics_index]);
    }
    Ok(())
}

/// Two triangles per quad between rings of the same length
pub fn equal_rows(
    upper: &[LatLongVertex],
    lower: &[LatLongVertex],
    indices: &mut Vec<u32>,
) -> Result<(), SeamMismatch> {
    check(
        upper.len() == lower.len() && upper.len() >= 2,
        SeamPattern::Equal,
        upper.len(),
        lower.len(),
    )?;
    for i in 0..(upper.len() - 1) {
        let (r0, r1) = (upper[i].graphics_index, upper[i + 1].graphics_index);
        let (s0, s1) = (lower[i].graphics_index, lower[i + 1].graphics_index);
        indices.extend([r0, s0, s1]);
        indices.extend([s1, r1, r0]);
    }
    Ok(())
}

/// `row` above a ring `double` at least twice its length
pub fn doubling_rows(
    row: &[LatLongVertex],
    double: &[LatLongVertex],
    indices: &mut Vec<u32>,
) -> Result<(), SeamMismatch> {
    check(
        !row.is_empty() && row.len() * 2 <= double.len(),
        SeamPattern::Doubling,
        row.len(),
        double.len(),
    )?;
    let r = |i: usize| row[i].graphics_index;
    let d = |i: usize| double[i].graphics_index;

    indices.extend([r(0), d(0), d(1)]);
    for i in 1..row.len() {
        let k = 2 * i;
        indices.extend([r(i), d(k), d(k + 1)]);
        indices.extend([r(i), d(k - 1), d(k)]);
        indices.extend([d(k - 1), r(i), r(i - 1)]);
    }
    Ok(())
}

/// Mirror of [`doubling_rows`]: the longer ring `double` sits above `row`
pub fn reverse_doubling_rows(
    double: &[LatLongVertex],
    row: &[LatLongVertex],
    indices: &mut Vec<u32>,
) -> Result<(), SeamMismatch> {
    check(
        !row.is_empty() && row.len() * 2 <= double.len(),
        SeamPattern::ReverseDoubling,
        double.len(),
        row.len(),
    )?;
    let b = |i: usize| row[i].graphics_index;
    let d = |i: usize| double[i].graphics_index;

    indices.extend([b(0), d(1), d(0)]);
    for i in 1..row.len() {
        let k = 2 * i;
        indices.extend([b(i), d(k + 1), d(k)]);
        indices.extend([b(i), d(k), d(k - 1)]);
        indices.extend([d(k - 1), b(i - 1), b(i)]);
    }
    Ok(())
}

/// Pick the pattern from the ring lengths
pub fn stitch(
    upper: &[LatLongVertex],
    lower: &[LatLongVertex],
    indices: &mut Vec<u32>,
) -> Result<(), SeamMismatch> {
    use std::cmp::Ordering::*;
    match upper.len().cmp(&lower.len()) {
        Equal => equal_rows(upper, lower, indices),
        Less => doubling_rows(upper, lower, indices),
        Greater => reverse_doubling_rows(upper, lower, indices),
    }
}

fn check(ok: bool, pattern: SeamPattern, upper: usize, lower: usize) -> Result<(), SeamMismatch> {
    if ok {
        Ok(())
    } else {
        Err(SeamMismatch {
            pattern,
            upper,
            lower,
        })
    }
}
