//! Hover-revealed delete badges.
//!
//! Every sign, and every vertex of a path being edited, owns a small badge
//! entity. Badges stay invisible until the pointer hovers their owner, then
//! linger for a short grace period so the pointer can travel from the owner
//! onto the badge without it vanishing mid-way. Clicking a badge writes the
//! matching removal request; the badge never mutates the annotation itself.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::constants::{BADGE_GRACE_SECS, DELETE_BADGE_SIZE, PATH_VERTEX_SIZE, SIGN_GLYPH_SIZE};
use crate::geo::offset_by_meters;
use crate::theme;

use super::mode::CurrentMode;
use super::params::MapCursor;
use super::paths::hit_testing::point_near_path;
use super::paths::{RemoveVertexRequest, RoutePath};
use super::signs::{RemoveSignRequest, Sign};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTarget {
    Sign,
    Vertex(usize),
}

/// A delete affordance tied to one owner entity.
#[derive(Component)]
pub struct DeleteBadge {
    pub owner: Entity,
    pub target: BadgeTarget,
    /// Absolute time (in app seconds) until which the badge stays shown.
    /// Zero means hidden.
    pub visible_until: f64,
}

impl DeleteBadge {
    pub fn sign(owner: Entity) -> Self {
        Self {
            owner,
            target: BadgeTarget::Sign,
            visible_until: 0.0,
        }
    }

    pub fn vertex(owner: Entity, index: usize) -> Self {
        Self {
            owner,
            target: BadgeTarget::Vertex(index),
            visible_until: 0.0,
        }
    }
}

/// Gives every new sign a badge, and drops badges whose owner is gone.
pub fn sync_sign_badges(
    mut commands: Commands,
    new_signs: Query<Entity, Added<Sign>>,
    signs: Query<(), With<Sign>>,
    paths: Query<(), With<RoutePath>>,
    badges: Query<(Entity, &DeleteBadge)>,
) {
    for sign_entity in new_signs.iter() {
        commands.spawn(DeleteBadge::sign(sign_entity));
    }

    for (entity, badge) in badges.iter() {
        let owner_alive = match badge.target {
            BadgeTarget::Sign => signs.get(badge.owner).is_ok(),
            BadgeTarget::Vertex(_) => paths.get(badge.owner).is_ok(),
        };
        if !owner_alive {
            commands.entity(entity).despawn();
        }
    }
}

/// Keeps one badge per vertex of every path while the edit tool is active,
/// and clears them all when it is not.
pub fn sync_vertex_badges(
    mut commands: Commands,
    mode: Res<CurrentMode>,
    paths: Query<(Entity, &RoutePath)>,
    changed_paths: Query<Entity, Changed<RoutePath>>,
    badges: Query<(Entity, &DeleteBadge)>,
    mut was_editing: Local<bool>,
) {
    let editing = mode.is_editing();
    let entered = editing && !*was_editing;
    let left = !editing && *was_editing;
    *was_editing = editing;

    if left {
        for (entity, badge) in badges.iter() {
            if matches!(badge.target, BadgeTarget::Vertex(_)) {
                commands.entity(entity).despawn();
            }
        }
        return;
    }

    if !editing {
        return;
    }

    let rebuild: Vec<Entity> = if entered {
        paths.iter().map(|(entity, _)| entity).collect()
    } else {
        changed_paths.iter().collect()
    };

    for path_entity in rebuild {
        for (entity, badge) in badges.iter() {
            if badge.owner == path_entity && matches!(badge.target, BadgeTarget::Vertex(_)) {
                commands.entity(entity).despawn();
            }
        }
        if let Ok((_, path)) = paths.get(path_entity) {
            for index in 0..path.points.len() {
                commands.spawn(DeleteBadge::vertex(path_entity, index));
            }
        }
    }
}

/// World position of the point a badge is anchored to.
fn badge_anchor(
    badge: &DeleteBadge,
    signs: &Query<&Sign>,
    paths: &Query<&RoutePath>,
    cursor: &MapCursor,
) -> Option<Vec2> {
    match badge.target {
        BadgeTarget::Sign => {
            let sign = signs.get(badge.owner).ok()?;
            Some(cursor.origin.project(sign.position))
        }
        BadgeTarget::Vertex(index) => {
            let path = paths.get(badge.owner).ok()?;
            // A just-removed vertex may leave a stale badge for one frame
            let point = path.points.get(index)?;
            Some(cursor.origin.project(*point))
        }
    }
}

/// Reveals badges while the pointer hovers their owner. A locked session
/// keeps every badge hidden; deletion comes back with unlock.
pub fn update_badge_visibility(
    time: Res<Time>,
    mode: Res<CurrentMode>,
    cursor: MapCursor,
    signs: Query<&Sign>,
    paths: Query<&RoutePath>,
    mut badges: Query<&mut DeleteBadge>,
) {
    if mode.is_locked() {
        return;
    }
    let Some(cursor_world) = cursor.cursor_world_pos() else {
        return;
    };

    let now = time.elapsed_secs_f64();
    let meters_per_pixel = cursor.meters_per_pixel();

    for mut badge in badges.iter_mut() {
        let hovered = match badge.target {
            BadgeTarget::Sign => {
                let Some(anchor) = badge_anchor(&badge, &signs, &paths, &cursor) else {
                    continue;
                };
                cursor_world.distance(anchor) <= SIGN_GLYPH_SIZE * 0.75 * meters_per_pixel
            }
            // Hovering anywhere along the path reveals all its vertex badges
            BadgeTarget::Vertex(_) => {
                let Ok(path) = paths.get(badge.owner) else {
                    continue;
                };
                let stroke = path
                    .points
                    .iter()
                    .map(|point| cursor.origin.project(*point))
                    .collect::<Vec<_>>();
                point_near_path(cursor_world, &stroke, PATH_VERTEX_SIZE * 2.0 * meters_per_pixel)
            }
        };

        if hovered {
            badge.visible_until = now + BADGE_GRACE_SECS;
        }
    }
}

/// Draws visible badges as small egui buttons and translates clicks into
/// removal requests. Hovering the badge itself keeps it alive.
pub fn render_delete_badges(
    mut contexts: EguiContexts,
    time: Res<Time>,
    mode: Res<CurrentMode>,
    cursor: MapCursor,
    signs: Query<&Sign>,
    paths: Query<&RoutePath>,
    mut badges: Query<(Entity, &mut DeleteBadge)>,
    mut remove_signs: MessageWriter<RemoveSignRequest>,
    mut remove_vertices: MessageWriter<RemoveVertexRequest>,
) -> Result {
    if mode.is_locked() {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;
    let now = time.elapsed_secs_f64();

    for (badge_entity, mut badge) in badges.iter_mut() {
        if now >= badge.visible_until {
            continue;
        }
        let Some(anchor) = badge_anchor(&badge, &signs, &paths, &cursor) else {
            continue;
        };

        // Badge sits at the owner's upper-right, a glyph-scaled offset in
        // meters with the longitude correction applied at the owner's own
        // latitude
        let offset = match badge.target {
            BadgeTarget::Sign => SIGN_GLYPH_SIZE * 0.6,
            BadgeTarget::Vertex(_) => PATH_VERTEX_SIZE * 1.5,
        } * cursor.meters_per_pixel();
        let anchor_geo = offset_by_meters(
            cursor.origin.unproject(anchor),
            f64::from(offset),
            f64::from(offset),
        );
        let Some(screen) = cursor.geo_to_screen(anchor_geo) else {
            continue;
        };

        let response = egui::Area::new(egui::Id::new(("delete_badge", badge_entity)))
            .fixed_pos(egui::pos2(screen.x, screen.y))
            .pivot(egui::Align2::CENTER_CENTER)
            .show(ctx, |ui| {
                let button = egui::Button::new(
                    egui::RichText::new("✕")
                        .color(theme::ui::DELETE_BADGE_CROSS)
                        .size(DELETE_BADGE_SIZE - 4.0),
                )
                .fill(theme::ui::DELETE_BADGE)
                .min_size(egui::vec2(DELETE_BADGE_SIZE, DELETE_BADGE_SIZE));
                ui.add(button)
            })
            .inner;

        if response.hovered() {
            badge.visible_until = now + BADGE_GRACE_SECS;
        }

        if response.clicked() {
            match badge.target {
                BadgeTarget::Sign => {
                    remove_signs.write(RemoveSignRequest { sign: badge.owner });
                }
                BadgeTarget::Vertex(index) => {
                    remove_vertices.write(RemoveVertexRequest {
                        path: badge.owner,
                        index,
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_badges_start_hidden() {
        let badge = DeleteBadge::sign(Entity::PLACEHOLDER);
        assert_eq!(badge.visible_until, 0.0);
        assert_eq!(badge.target, BadgeTarget::Sign);

        let badge = DeleteBadge::vertex(Entity::PLACEHOLDER, 3);
        assert_eq!(badge.target, BadgeTarget::Vertex(3));
    }
}
