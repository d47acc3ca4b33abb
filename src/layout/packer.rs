//! Guillotine rectangle packer with retry-on-overflow

use crate::config::Config;
use crate::error::{Result, ViewError};
use crate::geometry::Rect;

/// A block to place; `fit` is `None` until it has been placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub w: f64,
    pub h: f64,
    pub fit: Option<Rect>,
}

impl Block {
    pub fn square(side: f64) -> Self {
        Self {
            w: side,
            h: side,
            fit: None,
        }
    }
}

/// Places blocks into a fixed canvas, each in the smallest free rectangle
/// that holds it, splitting that rectangle into a right and a lower remainder
#[derive(Debug, Clone)]
pub struct Packer {
    free: Vec<Rect>,
}

impl Packer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            free: vec![Rect::new(0.0, 0.0, width, height)],
        }
    }

    /// Place blocks in order; returns how many could be placed
    pub fn fit(&mut self, blocks: &mut [Block]) -> usize {
        let mut placed = 0;
        for block in blocks.iter_mut() {
            block.fit = self.find(block.w, block.h).map(|idx| self.split(idx, block.w, block.h));
            if block.fit.is_some() {
                placed += 1;
            }
        }
        placed
    }

    fn find(&self, w: f64, h: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, rect) in self.free.iter().enumerate() {
            if !rect.can_hold(w, h) {
                continue;
            }
            let area = rect.area();
            if best.map_or(true, |(_, best_area)| area < best_area) {
                best = Some((idx, area));
            }
        }
        best.map(|(idx, _)| idx)
    }

    fn split(&mut self, idx: usize, w: f64, h: f64) -> Rect {
        let node = self.free.remove(idx);
        let right = Rect::new(node.x + w, node.y, node.w - w, h);
        let below = Rect::new(node.x, node.y + h, node.w, node.h - h);
        for rest in [right, below] {
            if rest.w > 0.0 && rest.h > 0.0 {
                self.free.push(rest);
            }
        }
        Rect::new(node.x, node.y, w, h)
    }
}

/// Result of packing a list of squares
#[derive(Debug, Clone, PartialEq)]
pub struct PackOutcome {
    /// Placed rectangle per input block, in input order
    pub rects: Vec<Rect>,

    /// Side of the square canvas that finally held every block
    pub canvas: f64,

    /// Number of pack attempts made
    pub attempts: usize,
}

impl PackOutcome {
    /// Side of the smallest square at the origin covering every placed block
    pub fn footprint(&self) -> f64 {
        self.rects
            .iter()
            .map(|r| r.right().max(r.bottom()))
            .fold(0.0, f64::max)
    }
}

/// Side length of the square block for a size metric
pub fn block_side(size_metric: f64, config: &Config) -> f64 {
    let units = size_metric.max(0.0).sqrt().round().max(1.0);
    config.block_unit * units
}

/// Pack squares of the given sides into the smallest square canvas found by
/// growing the canvas scale until every block fits
pub fn pack_squares(sides: &[f64], config: &Config) -> Result<PackOutcome> {
    if sides.is_empty() {
        return Ok(PackOutcome {
            rects: Vec::new(),
            canvas: 0.0,
            attempts: 0,
        });
    }

    let total: f64 = sides.iter().sum();
    let mut order: Vec<usize> = (0..sides.len()).collect();
    if config.sort_blocks_by_size {
        order.sort_by(|&a, &b| sides[b].total_cmp(&sides[a]));
    }

    let mut scale = config.initial_packing_scale;
    let mut unplaced = sides.len();
    for attempt in 1..=config.max_packing_retries {
        let canvas = total * scale;
        let mut blocks: Vec<Block> = order.iter().map(|&i| Block::square(sides[i])).collect();
        let placed = Packer::new(canvas, canvas).fit(&mut blocks);

        if placed == blocks.len() {
            let mut rects = vec![Rect::default(); sides.len()];
            for (block, &i) in blocks.iter().zip(&order) {
                if let Some(fit) = block.fit {
                    rects[i] = fit;
                }
            }
            log::debug!(
                "Packed {} blocks into canvas {:.1} after {} attempts",
                sides.len(),
                canvas,
                attempt
            );
            return Ok(PackOutcome {
                rects,
                canvas,
                attempts: attempt,
            });
        }

        unplaced = blocks.len() - placed;
        scale += config.packing_scale_increment;
    }

    log::warn!(
        "Giving up packing {} blocks after {} attempts",
        sides.len(),
        config.max_packing_retries
    );
    Err(ViewError::LayoutFailure {
        retries: config.max_packing_retries,
        items: unplaced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_disjoint(rects: &[Rect]) {
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn picks_smallest_fitting_free_rect() {
        let mut packer = Packer::new(10.0, 10.0);
        let mut blocks = vec![Block::square(6.0), Block::square(4.0), Block::square(3.0)];
        assert_eq!(packer.fit(&mut blocks), 3);

        assert_eq!(blocks[0].fit, Some(Rect::new(0.0, 0.0, 6.0, 6.0)));
        // Right remainder (4x6) is smaller than the lower one (10x4)
        assert_eq!(blocks[1].fit, Some(Rect::new(6.0, 0.0, 4.0, 4.0)));
        // Leftover 4x2 cannot hold 3x3, lower strip can
        assert_eq!(blocks[2].fit, Some(Rect::new(0.0, 6.0, 3.0, 3.0)));
    }

    #[test]
    fn oversized_block_is_left_unplaced() {
        let mut packer = Packer::new(5.0, 5.0);
        let mut blocks = vec![Block::square(6.0), Block::square(5.0)];
        assert_eq!(packer.fit(&mut blocks), 1);
        assert!(blocks[0].fit.is_none());
        assert!(blocks[1].fit.is_some());
    }

    #[test]
    fn three_blocks_pack_within_fifty_attempts() {
        let config = Config::default();
        let sides: Vec<f64> = [4.0, 9.0, 16.0].iter().map(|&s| block_side(s, &config)).collect();
        assert_eq!(sides, vec![30.0, 45.0, 60.0]);

        let outcome = pack_squares(&sides, &config).unwrap();
        assert!(outcome.attempts <= 50, "took {} attempts", outcome.attempts);
        assert_eq!(outcome.rects.len(), 3);
        assert_disjoint(&outcome.rects);
        for (rect, side) in outcome.rects.iter().zip(&sides) {
            assert_eq!(rect.w, *side);
            assert!(rect.right() <= outcome.canvas && rect.bottom() <= outcome.canvas);
        }
    }

    #[test]
    fn sorted_packing_reports_in_input_order() {
        let config = Config {
            sort_blocks_by_size: true,
            ..Config::default()
        };
        let outcome = pack_squares(&[15.0, 60.0, 30.0], &config).unwrap();
        assert_eq!(outcome.rects[0].w, 15.0);
        assert_eq!(outcome.rects[1].w, 60.0);
        assert_eq!(outcome.rects[1].x, 0.0);
        assert_eq!(outcome.rects[1].y, 0.0);
        assert_disjoint(&outcome.rects);
    }

    #[test]
    fn single_block_sits_at_origin() {
        let outcome = pack_squares(&[15.0], &Config::default()).unwrap();
        assert_eq!(outcome.rects, vec![Rect::new(0.0, 0.0, 15.0, 15.0)]);
        assert_eq!(outcome.footprint(), 15.0);
    }

    #[test]
    fn retry_cap_reports_layout_failure() {
        let config = Config {
            packing_scale_increment: 0.0,
            max_packing_retries: 5,
            ..Config::default()
        };
        let err = pack_squares(&[30.0, 30.0], &config).unwrap_err();
        assert_eq!(err, ViewError::LayoutFailure { retries: 5, items: 1 });
    }

    #[test]
    fn tiny_metrics_still_get_a_block() {
        let config = Config::default();
        assert_eq!(block_side(0.0, &config), 15.0);
        assert_eq!(block_side(2.0, &config), 15.0);
        assert_eq!(block_side(7.0, &config), 45.0);
    }
}
