use bevy::prelude::*;
use bevy::text::TextBounds;

use crate::{
    camera::board_to_world,
    simulation::{CardId, CardRect, RenderedLayout, RepulsionSimulator, Viewport},
    visual::{
        overlay::SIDEBAR_FRACTION,
        utils::{card_tint, ease_out_cubic},
    },
};

/// Rendered size of every card, in logical pixels
pub const CARD_SIZE: Vec2 = Vec2::new(220.0, 150.0);

/// How much bigger the focused card is drawn
const FOCUS_SCALE: f32 = 1.8;

/// Focus zoom speed (1.0 / seconds for the full zoom)
const FOCUS_SPEED: f32 = 5.0;

/// Gap between the card edge and its poster
const POSTER_INSET: f32 = 8.0;

/// Strip along the bottom of the card that holds the title
const TITLE_STRIP: f32 = 36.0;

#[derive(Component, Debug)]
pub struct FilmCard {
    pub id: CardId,
}

/// Film image drawn over the card's tint once it has loaded
#[derive(Component, Debug)]
pub struct FilmPoster;

/// 0.0 = resting on the board, 1.0 = fully zoomed into the focus spot
#[derive(Component, Debug, Default)]
pub struct FocusZoom {
    pub progress: f32,
}

/// Where the focused card is drawn: centered in the area left of the
/// sidebar, enlarged.
pub fn focused_display_rect(size: Vec2, viewport: &Viewport) -> CardRect {
    let area_width = viewport.width * (1.0 - SIDEBAR_FRACTION);
    let center = Vec2::new(area_width * 0.5, viewport.height * 0.5);
    let scaled = size * FOCUS_SCALE;
    CardRect::from_position_size(center - scaled * 0.5, scaled)
}

/// Topmost z used by cards; the backdrop and focused card sit above it
pub fn card_layer_top(simulator: &RepulsionSimulator) -> f32 {
    simulator.registry().len() as f32
}

/// Asset path for a film image. Remote urls have no asset source, so those
/// cards keep their plain tint.
pub fn poster_path(img_url: &str) -> Option<&str> {
    let path = img_url.trim().trim_start_matches('/');
    if path.is_empty() || path.contains("://") {
        None
    } else {
        Some(path)
    }
}

pub fn spawn_cards(
    mut commands: Commands,
    simulator: Res<RepulsionSimulator>,
    asset_server: Res<AssetServer>,
) {
    if simulator.registry().is_empty() {
        warn!("No films to show");
        return;
    }

    let count = simulator.registry().len();
    let poster_size = Vec2::new(
        CARD_SIZE.x - POSTER_INSET * 2.0,
        CARD_SIZE.y - TITLE_STRIP - POSTER_INSET,
    );
    let poster_y = (CARD_SIZE.y - poster_size.y) * 0.5 - POSTER_INSET;
    let title_y = (TITLE_STRIP - CARD_SIZE.y) * 0.5;

    for card in simulator.registry().iter() {
        let id = card.id();
        let content = card.content();

        // The tint stays visible until (or if never) the poster loads
        let mut entity = commands.spawn((
            FilmCard { id },
            FocusZoom::default(),
            Sprite::from_color(card_tint(id.index(), count), CARD_SIZE),
            Transform::default(),
            children![(
                Text2d::new(content.title.clone()),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                TextBounds::new_horizontal(CARD_SIZE.x - 16.0),
                Transform::from_xyz(0.0, title_y, 0.5),
            )],
        ));

        match poster_path(&content.img_url) {
            Some(path) => {
                entity.with_child((
                    FilmPoster,
                    Sprite {
                        image: asset_server.load(path.to_owned()),
                        custom_size: Some(poster_size),
                        ..default()
                    },
                    Transform::from_xyz(0.0, poster_y, 0.25),
                ));
            }
            None => debug!("{} has no local poster ({})", id, content.img_url),
        }
    }

    info!("Spawned {} film cards", count);
}

/// System: tell the simulation where the focused card is drawn. Every other
/// card is drawn at its resting spot.
pub fn sync_focus_geometry(
    simulator: Res<RepulsionSimulator>,
    viewport: Res<Viewport>,
    mut layout: ResMut<RenderedLayout>,
) {
    layout.clear_displaced();

    let Some(id) = simulator.focused_id() else {
        return;
    };
    if let Some(size) = layout.size(id) {
        let rect = focused_display_rect(size, &viewport);
        layout.set_displaced(id, rect);
    }
}

/// System: report rendered card sizes to the simulation
pub fn sync_rendered_sizes(
    cards: Query<(&FilmCard, &Sprite), Changed<Sprite>>,
    mut layout: ResMut<RenderedLayout>,
) {
    for (card, sprite) in &cards {
        layout.insert(card.id, sprite.custom_size.unwrap_or(CARD_SIZE));
    }
}

/// System: paint card positions and stacking from the simulation
pub fn sync_card_transforms(
    time: Res<Time>,
    simulator: Res<RepulsionSimulator>,
    viewport: Res<Viewport>,
    mut cards: Query<(&FilmCard, &Sprite, &mut Transform, &mut FocusZoom)>,
) {
    let dt = time.delta_secs();
    let top = card_layer_top(&simulator);

    // Stack rank -> z: top card gets `top`, the one under it `top - 1`, ...
    let ranks = simulator.registry().ids_top_down();

    for (film, sprite, mut transform, mut zoom) in &mut cards {
        let Some(card) = simulator.card(film.id) else {
            continue;
        };
        let size = sprite.custom_size.unwrap_or(CARD_SIZE);

        let target = if simulator.is_focused(film.id) { 1.0 } else { 0.0 };
        if zoom.progress < target {
            zoom.progress = (zoom.progress + dt * FOCUS_SPEED).min(target);
        } else if zoom.progress > target {
            zoom.progress = (zoom.progress - dt * FOCUS_SPEED).max(target);
        }
        let t = ease_out_cubic(zoom.progress);

        let resting_center = card.position() + size * 0.5;
        let focus_center = focused_display_rect(size, &viewport).center();
        let center = resting_center.lerp(focus_center, t);

        let z = if zoom.progress > 0.0 {
            // Above the backdrop while zoomed in or on the way back
            top + 2.0
        } else {
            let rank = ranks.iter().position(|&id| id == film.id).unwrap_or(0);
            top - rank as f32
        };

        transform.translation = board_to_world(center, &viewport).extend(z);
        let scale = 1.0 + (FOCUS_SCALE - 1.0) * t;
        transform.scale = Vec3::new(scale, scale, 1.0);
    }
}
