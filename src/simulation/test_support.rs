use bevy::math::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{CardId, RenderedLayout, RepulsionSimulator, Viewport};
use crate::content::FilmContent;

pub fn film(title: &str) -> FilmContent {
    FilmContent {
        title: title.to_string(),
        img_url: format!("{title}.png"),
        description: format!("About {title}"),
        demo_url: None,
    }
}

pub fn films(count: usize) -> Vec<FilmContent> {
    (0..count).map(|i| film(&format!("film {i}"))).collect()
}

pub const VIEWPORT: Viewport = Viewport::new(2000.0, 2000.0);

/// Simulator with `placements.len()` cards, each set to the given top-left
/// corner and size. z-orders follow list order (1, 2, 3...).
pub fn simulator_with(placements: &[(Vec2, Vec2)]) -> (RepulsionSimulator, RenderedLayout) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut simulator = RepulsionSimulator::from_contents(&films(placements.len()), VIEWPORT, &mut rng);
    let mut sizes = RenderedLayout::default();

    for (i, &(position, size)) in placements.iter().enumerate() {
        simulator.set_position(CardId(i), position);
        sizes.insert(CardId(i), size);
    }

    (simulator, sizes)
}
