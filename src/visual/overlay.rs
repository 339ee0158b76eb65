use bevy::prelude::*;

use crate::{
    simulation::{CardId, RepulsionSimulator, Viewport},
    visual::cards::card_layer_top,
};

/// Share of the window width taken by the detail panel
pub const SIDEBAR_FRACTION: f32 = 0.3;

/// Full-window dim layer shown behind the focused card
#[derive(Component)]
pub struct DimBackdrop;

/// Detail panel on the right
#[derive(Component)]
pub struct Sidebar;

/// Button around the demo link; hidden for films without a demo
#[derive(Component)]
pub struct DemoLink;

const LINK_IDLE: Color = Color::srgb(0.14, 0.18, 0.26);
const LINK_HOVERED: Color = Color::srgb(0.2, 0.27, 0.4);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarField {
    Title,
    Description,
    Link,
}

pub fn spawn_overlay(
    mut commands: Commands,
    simulator: Res<RepulsionSimulator>,
    viewport: Res<Viewport>,
) {
    let top = card_layer_top(&simulator);

    commands.spawn((
        DimBackdrop,
        Sprite::from_color(
            Color::srgba(0.0, 0.0, 0.0, 0.55),
            Vec2::new(viewport.width, viewport.height),
        ),
        Transform::from_xyz(0.0, 0.0, top + 1.0),
        Visibility::Hidden,
    ));

    commands.spawn((
        Sidebar,
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(SIDEBAR_FRACTION * 100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Val::Px(24.0)),
            row_gap: Val::Px(16.0),
            ..default()
        },
        BackgroundColor(Color::srgb(0.08, 0.08, 0.1)),
        Visibility::Hidden,
        children![
            (
                SidebarField::Title,
                Text::new(""),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ),
            (
                SidebarField::Description,
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ),
            (
                DemoLink,
                Button,
                Node {
                    align_self: AlignSelf::FlexStart,
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                    ..default()
                },
                BackgroundColor(LINK_IDLE),
                Visibility::Hidden,
                children![(
                    SidebarField::Link,
                    Text::new(""),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.45, 0.7, 1.0)),
                )],
            ),
        ],
    ));
}

/// System: show the backdrop and fill the panel while a card is focused
pub fn update_overlay(
    simulator: Res<RepulsionSimulator>,
    viewport: Res<Viewport>,
    mut shown: Local<Option<Option<CardId>>>,
    mut backdrop: Query<(&mut Sprite, &mut Visibility), (With<DimBackdrop>, Without<Sidebar>)>,
    mut sidebar: Query<&mut Visibility, (With<Sidebar>, Without<DimBackdrop>)>,
    mut links: Query<
        &mut Visibility,
        (With<DemoLink>, Without<Sidebar>, Without<DimBackdrop>),
    >,
    mut fields: Query<(&SidebarField, &mut Text)>,
) {
    let focused = simulator.focused_id();

    if viewport.is_changed() {
        for (mut sprite, _) in &mut backdrop {
            sprite.custom_size = Some(Vec2::new(viewport.width, viewport.height));
        }
    }

    // Only touch the panel when focus actually moved
    if *shown == Some(focused) {
        return;
    }
    *shown = Some(focused);

    let visibility = if focused.is_some() {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for (_, mut vis) in &mut backdrop {
        *vis = visibility;
    }
    for mut vis in &mut sidebar {
        *vis = visibility;
    }

    // Inherited, so the link hides with the panel
    let link_visibility = if focused_demo_url(&simulator).is_some() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut vis in &mut links {
        *vis = link_visibility;
    }

    let content = simulator.focused_content();
    for (field, mut text) in &mut fields {
        text.0 = match (field, content) {
            (_, None) => String::new(),
            (SidebarField::Title, Some(c)) => c.title.clone(),
            (SidebarField::Description, Some(c)) => c.description.clone(),
            (SidebarField::Link, Some(c)) => c
                .demo_url
                .as_ref()
                .map(|url| format!("Demo: {url}"))
                .unwrap_or_default(),
        };
    }

    match content {
        Some(c) => info!("Showing details for \"{}\"", c.title),
        None => info!("Details hidden"),
    }
}

/// Demo url of the focused film, if it has one
pub fn focused_demo_url(simulator: &RepulsionSimulator) -> Option<&str> {
    simulator.focused_content()?.demo_url.as_deref()
}

/// System: open the focused film's demo when its link is pressed
pub fn open_demo_link(
    simulator: Res<RepulsionSimulator>,
    mut links: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<DemoLink>)>,
) {
    for (interaction, mut background) in &mut links {
        match interaction {
            Interaction::Pressed => {
                let Some(url) = focused_demo_url(&simulator) else {
                    continue;
                };
                match webbrowser::open(url) {
                    Ok(()) => info!("Opened demo {}", url),
                    Err(e) => warn!("Failed to open demo {}: {}", url, e),
                }
            }
            Interaction::Hovered => background.0 = LINK_HOVERED,
            Interaction::None => background.0 = LINK_IDLE,
        }
    }
}
