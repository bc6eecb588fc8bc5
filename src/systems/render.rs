use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::zindex::ZIndex;
use crate::resources::camera2d::{Camera2DRes, CameraViewport};
use crate::resources::debugmode::DebugMode;
use crate::resources::dragcontroller::DragControllerRes;
use crate::resources::input::PointerState;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;
use crate::systems::drag::Visuals;

/// Flat color used for sprites whose texture is not loaded.
const PLACEHOLDER_COLOR: Color = Color {
    r: 90,
    g: 140,
    b: 90,
    a: 255,
};

/// One sprite ready to draw, in world units.
struct DrawItem {
    tex_key: String,
    src: Rectangle,
    dest: Rectangle,
    origin: Vector2,
    z: ZIndex,
}

fn collect_draw_items(world: &mut World, view_min: Vector2, view_max: Vector2) -> Vec<DrawItem> {
    let mut state: SystemState<(
        Query<(Entity, &MapPosition, Option<&ZIndex>), Without<ChildOf>>,
        Visuals,
    )> = SystemState::new(world);
    let (roots, visuals) = state.get(world);

    roots
        .iter()
        .filter_map(|(entity, position, z)| {
            let visual = visuals.find(entity)?;
            let sprite = visual.sprite;
            let width = sprite.width * visual.scale.x;
            let height = sprite.height * visual.scale.y;
            let origin = Vector2 {
                x: sprite.origin.x * visual.scale.x,
                y: sprite.origin.y * visual.scale.y,
            };

            // Cull against camera's world rect; MapPosition is the pivot.
            let min_x = position.pos.x - origin.x;
            let min_y = position.pos.y - origin.y;
            if min_x + width < view_min.x
                || min_x > view_max.x
                || min_y + height < view_min.y
                || min_y > view_max.y
            {
                return None;
            }

            Some(DrawItem {
                tex_key: sprite.tex_key.clone(),
                src: Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: sprite.width,
                    height: sprite.height,
                },
                dest: Rectangle {
                    x: position.pos.x,
                    y: position.pos.y,
                    width,
                    height,
                },
                origin,
                z: z.copied().unwrap_or_default(),
            })
        })
        .collect()
}

/// Draw the world in 2D camera space: sprites sorted by z, then debug overlays.
pub fn render_pass(world: &mut World, d2: &mut RaylibMode2D<RaylibDrawHandle>) {
    let cam = *world.resource::<Camera2DRes>();
    let screen = *world.resource::<ScreenSize>();
    let (view_min, view_max) = CameraViewport::new(&cam, &screen).visible_world_rect();

    let mut to_draw = collect_draw_items(world, view_min, view_max);
    to_draw.sort_by_key(|item| item.z);

    if let Some(textures) = world.get_resource::<TextureStore>() {
        for item in &to_draw {
            match textures.get(&item.tex_key) {
                Some(tex) => {
                    d2.draw_texture_pro(tex, item.src, item.dest, item.origin, 0.0, Color::WHITE)
                }
                None => d2.draw_rectangle_pro(item.dest, item.origin, 0.0, PLACEHOLDER_COLOR),
            }
        }
    } else {
        for item in &to_draw {
            d2.draw_rectangle_pro(item.dest, item.origin, 0.0, PLACEHOLDER_COLOR);
        }
    }

    if world.contains_resource::<DebugMode>() {
        let mut colliders = world.query::<(&BoxCollider, &MapPosition)>();
        for (collider, position) in colliders.iter(world) {
            let (x, y, w, h) = collider.get_aabb(position.pos);
            d2.draw_rectangle_lines(x as i32, y as i32, w as i32, h as i32, Color::RED);
        }

        // Range the grabbed entity's pivot may move in.
        if let Some(session) = world
            .get_resource::<DragControllerRes>()
            .filter(|c| c.0.restrict_to_screen)
            .and_then(|c| c.0.session().copied())
        {
            let b = session.bounds;
            d2.draw_rectangle_lines(
                -b.x_bound as i32,
                -b.y_bound as i32,
                (b.x_bound * 2.0) as i32,
                (b.y_bound * 2.0) as i32,
                Color::BLUE,
            );
        }

        let mut positions = world.query::<&MapPosition>();
        for position in positions.iter(world) {
            let (px, py) = (position.pos.x as i32, position.pos.y as i32);
            d2.draw_line(px - 5, py, px + 5, py, Color::GREEN);
            d2.draw_line(px, py - 5, px, py + 5, Color::GREEN);
        }
    }
}

pub fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let screen = *world.resource::<ScreenSize>();

    let fps = d.get_fps();
    let text = format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps);
    d.draw_text(&text, 10, 10, 10, Color::BLACK);

    let entity_count = world.entity_count();
    d.draw_text(&format!("Entities: {}", entity_count), 10, 30, 10, Color::BLACK);

    if let Some(pointer) = world.get_resource::<PointerState>() {
        let mouse_text = format!(
            "Mouse screen: ({:.1}, {:.1}) World: ({:.1}, {:.1})",
            pointer.screen.x, pointer.screen.y, pointer.world.x, pointer.world.y
        );
        d.draw_text(&mouse_text, 10, 50, 10, Color::BLACK);
    }

    if let Some(controller) = world.get_resource::<DragControllerRes>() {
        let drag_text = match controller.0.session() {
            Some(s) => format!(
                "Dragging {:?} offset ({:.1}, {:.1}) bounds ±{:.1} x ±{:.1}",
                s.target, s.offset.x, s.offset.y, s.bounds.x_bound, s.bounds.y_bound
            ),
            None => "Idle".to_string(),
        };
        d.draw_text(&drag_text, 10, screen.h - 30, 10, Color::BLACK);
    }
}

/// Exclusive system: draws one frame.
///
/// Temporarily takes the raylib handle and thread out of the world so the
/// draw handle can borrow them while the passes query the world.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(th) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };
    let cam = world.resource::<Camera2DRes>().0;

    {
        let mut d = rl.begin_drawing(&th);
        d.clear_background(Color::RAYWHITE);
        {
            let mut d2 = d.begin_mode2D(cam);
            render_pass(world, &mut d2);
        }
        render_debug_ui(world, &mut d);
    }

    world.insert_non_send_resource(th);
    world.insert_non_send_resource(rl);
}
