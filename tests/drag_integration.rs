//! Drag integration tests.
//!
//! Build a headless world the way the binary does (minus raylib), feed
//! pointer samples through [`apply_pointer_sample`] and run the per-frame
//! schedule.
//!
//! ```sh
//! cargo test --test drag_integration
//! ```

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use mapdrag::components::boxcollider::BoxCollider;
use mapdrag::components::draggable::{Draggable, MapName};
use mapdrag::components::mapposition::MapPosition;
use mapdrag::components::scale::Scale;
use mapdrag::components::sprite::Sprite;
use mapdrag::components::zindex::ZIndex;
use mapdrag::events::drag::{DragEndedEvent, DragStartedEvent};
use mapdrag::game::{build_update_schedule, init_world, load_scene, resize_screen};
use mapdrag::resources::camera2d::{Camera2DRes, CameraViewport};
use mapdrag::resources::dragcontroller::DragControllerRes;
use mapdrag::resources::gameconfig::GameConfig;
use mapdrag::resources::input::PointerState;
use mapdrag::resources::screensize::ScreenSize;
use mapdrag::scene::SceneData;
use mapdrag::systems::input::apply_pointer_sample;
use mapdrag::systems::validation::{DragSetupError, validate_draggables};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// 10x10 window, zoom 1: world = screen - (5, 5), viewport top-right (5, 5).
fn make_world(restrict_to_screen: bool) -> World {
    let mut config = GameConfig::new();
    config.window_width = 10;
    config.window_height = 10;
    config.restrict_to_screen = restrict_to_screen;
    init_world(&config)
}

fn scene(json: &str) -> SceneData {
    serde_json::from_str(json).unwrap()
}

const ONE_MAP: &str = r#"{ "maps": [ { "name": "map", "width": 2, "height": 2 } ] }"#;

/// Sample the pointer at world position (x, y) and run one frame.
fn frame(world: &mut World, schedule: &mut Schedule, x: f32, y: f32, down: bool) {
    let viewport = CameraViewport::new(
        world.resource::<Camera2DRes>(),
        world.resource::<ScreenSize>(),
    );
    let screen = Vector2 { x: x + 5.0, y: y + 5.0 };
    {
        let mut pointer = world.resource_mut::<PointerState>();
        apply_pointer_sample(&mut pointer, screen, down, &viewport);
    }
    schedule.run(world);
}

fn position(world: &World, entity: Entity) -> Vector2 {
    world.get::<MapPosition>(entity).unwrap().pos
}

#[derive(Resource, Default)]
struct DragLog {
    started: Vec<Entity>,
    ended: Vec<Entity>,
}

fn record_drag_events(world: &mut World) {
    world.init_resource::<DragLog>();
    world.add_observer(|trigger: On<DragStartedEvent>, mut log: ResMut<DragLog>| {
        log.started.push(trigger.event().entity);
    });
    world.add_observer(|trigger: On<DragEndedEvent>, mut log: ResMut<DragLog>| {
        log.ended.push(trigger.event().entity);
    });
    world.flush();
}

// =============================================================================
// Grab, follow, release
// =============================================================================

#[test]
fn drag_past_viewport_is_clamped_to_bounds() {
    let mut world = make_world(true);
    let roots = load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();

    frame(&mut world, &mut schedule, 0.0, 0.0, true);
    let bounds = world
        .resource::<DragControllerRes>()
        .0
        .session()
        .expect("grabbed")
        .bounds;
    assert!(approx_eq(bounds.x_bound, 4.0));
    assert!(approx_eq(bounds.y_bound, 4.0));

    frame(&mut world, &mut schedule, 10.0, 10.0, true);
    let pos = position(&world, roots[0]);
    assert!(approx_eq(pos.x, 4.0));
    assert!(approx_eq(pos.y, 4.0));

    frame(&mut world, &mut schedule, -10.0, 1.5, true);
    let pos = position(&world, roots[0]);
    assert!(approx_eq(pos.x, -4.0));
    assert!(approx_eq(pos.y, 1.5));
}

#[test]
fn unrestricted_drag_is_never_clamped() {
    let mut world = make_world(false);
    let roots = load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();

    frame(&mut world, &mut schedule, 0.0, 0.0, true);
    frame(&mut world, &mut schedule, 37.0, -12.5, true);

    let pos = position(&world, roots[0]);
    assert!(approx_eq(pos.x, 37.0));
    assert!(approx_eq(pos.y, -12.5));
}

#[test]
fn grab_offset_is_kept_for_the_whole_drag() {
    let mut world = make_world(false);
    let roots = load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();

    // Grab 0.5 right and 0.25 below the pivot.
    frame(&mut world, &mut schedule, 0.5, 0.25, true);
    for (x, y) in [(1.0, 1.0), (2.5, -3.0), (-0.75, 0.5)] {
        frame(&mut world, &mut schedule, x, y, true);
        let pos = position(&world, roots[0]);
        assert!(approx_eq(pos.x, x - 0.5));
        assert!(approx_eq(pos.y, y - 0.25));
    }
}

#[test]
fn press_on_empty_space_does_not_move_the_map() {
    let mut world = make_world(true);
    let roots = load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();

    frame(&mut world, &mut schedule, 3.0, 3.0, true);
    assert!(!world.resource::<DragControllerRes>().0.is_dragging());

    frame(&mut world, &mut schedule, 4.0, -2.0, true);
    let pos = position(&world, roots[0]);
    assert!(approx_eq(pos.x, 0.0));
    assert!(approx_eq(pos.y, 0.0));
}

#[test]
fn release_without_drag_is_noop() {
    let mut world = make_world(true);
    record_drag_events(&mut world);
    load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();

    // Press on empty space, then release.
    frame(&mut world, &mut schedule, 4.5, 4.5, true);
    frame(&mut world, &mut schedule, 4.5, 4.5, false);

    assert!(!world.resource::<DragControllerRes>().0.is_dragging());
    assert!(world.resource::<DragLog>().ended.is_empty());
}

#[test]
fn release_stops_following_and_emits_events() {
    let mut world = make_world(false);
    record_drag_events(&mut world);
    let roots = load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();

    frame(&mut world, &mut schedule, 0.0, 0.0, true);
    frame(&mut world, &mut schedule, 2.0, 2.0, true);
    frame(&mut world, &mut schedule, 2.0, 2.0, false);
    frame(&mut world, &mut schedule, -3.0, -3.0, false);

    let pos = position(&world, roots[0]);
    assert!(approx_eq(pos.x, 2.0));
    assert!(approx_eq(pos.y, 2.0));

    let log = world.resource::<DragLog>();
    assert_eq!(log.started, vec![roots[0]]);
    assert_eq!(log.ended, vec![roots[0]]);
}

#[test]
fn topmost_map_wins_the_grab() {
    let mut world = make_world(false);
    let roots = load_scene(
        &mut world,
        &scene(
            r#"{ "maps": [
                { "name": "below", "width": 4, "height": 4, "z_index": 0 },
                { "name": "above", "width": 4, "height": 4, "z_index": 3 },
                { "name": "middle", "width": 4, "height": 4, "z_index": 1 }
            ] }"#,
        ),
    )
    .unwrap();
    let mut schedule = build_update_schedule();

    frame(&mut world, &mut schedule, 0.0, 0.0, true);
    let grabbed = world.resource::<DragControllerRes>().0.session().unwrap().target;
    assert_eq!(grabbed, roots[1]);
    assert_eq!(world.get::<MapName>(grabbed).unwrap().0, "above");
}

#[test]
fn visual_child_scale_shrinks_bounds() {
    let mut world = make_world(true);
    let roots = load_scene(
        &mut world,
        &scene(r#"{ "maps": [ { "name": "big", "width": 2, "height": 2, "scale": [2, 3] } ] }"#),
    )
    .unwrap();
    let mut schedule = build_update_schedule();

    // Collider covers the scaled sprite: 4 x 6 around the pivot.
    let collider = *world.get::<BoxCollider>(roots[0]).unwrap();
    assert!(approx_eq(collider.size.x, 4.0));
    assert!(approx_eq(collider.size.y, 6.0));

    frame(&mut world, &mut schedule, 1.5, 2.5, true);
    let bounds = world.resource::<DragControllerRes>().0.session().unwrap().bounds;
    assert!(approx_eq(bounds.x_bound, 3.0));
    assert!(approx_eq(bounds.y_bound, 2.0));
}

#[test]
fn oversized_map_keeps_covering_the_viewport() {
    let mut world = make_world(true);
    let roots = load_scene(
        &mut world,
        &scene(r#"{ "maps": [ { "name": "huge", "width": 30, "height": 20 } ] }"#),
    )
    .unwrap();
    let mut schedule = build_update_schedule();

    frame(&mut world, &mut schedule, 0.0, 0.0, true);
    frame(&mut world, &mut schedule, 100.0, -100.0, true);

    // Half extents 15 x 10 against a 5 x 5 half viewport: the pivot may move
    // 10 x 5, so the map edge never enters the window.
    let pos = position(&world, roots[0]);
    assert!(approx_eq(pos.x, 10.0));
    assert!(approx_eq(pos.y, -5.0));
}

#[test]
fn despawned_target_ends_the_drag() {
    let mut world = make_world(true);
    record_drag_events(&mut world);
    let roots = load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();

    frame(&mut world, &mut schedule, 0.0, 0.0, true);
    world.despawn(roots[0]);
    frame(&mut world, &mut schedule, 1.0, 1.0, true);

    assert!(!world.resource::<DragControllerRes>().0.is_dragging());
    assert_eq!(world.resource::<DragLog>().ended, vec![roots[0]]);
}

#[test]
fn resize_recenters_camera_and_bounds() {
    let mut world = make_world(true);
    load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();

    resize_screen(&mut world, 20, 30);
    assert_eq!(*world.resource::<ScreenSize>(), ScreenSize { w: 20, h: 30 });
    let cam = world.resource::<Camera2DRes>().0;
    assert!(approx_eq(cam.offset.x, 10.0));
    assert!(approx_eq(cam.offset.y, 15.0));

    // World origin now sits at screen (10, 15); `frame` still adds (5, 5).
    frame(&mut world, &mut schedule, 5.0, 10.0, true);
    let bounds = world.resource::<DragControllerRes>().0.session().unwrap().bounds;
    assert!(approx_eq(bounds.x_bound, 9.0));
    assert!(approx_eq(bounds.y_bound, 14.0));
}

// =============================================================================
// Colliders and validation
// =============================================================================

#[test]
fn collider_fit_is_idempotent() {
    let mut world = make_world(true);
    let roots = load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();

    let first = *world.get::<BoxCollider>(roots[0]).unwrap();
    frame(&mut world, &mut schedule, 4.0, 4.0, false);
    frame(&mut world, &mut schedule, 4.0, 4.0, false);
    let second = *world.get::<BoxCollider>(roots[0]).unwrap();

    assert_eq!(first, second);
    assert!(approx_eq(first.size.x, 2.0));
    assert!(approx_eq(first.offset.x, -1.0));
}

#[test]
fn collider_refits_after_visual_scale_change() {
    let mut world = make_world(true);
    let roots = load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();

    let mut children = world.query_filtered::<Entity, With<Sprite>>();
    let visual = children.single(&world).unwrap();
    assert_eq!(world.get::<ChildOf>(visual).unwrap().parent(), roots[0]);

    world.get_mut::<Scale>(visual).unwrap().scale = Vector2 { x: 3.0, y: 1.0 };
    frame(&mut world, &mut schedule, 4.0, 4.0, false);

    let collider = *world.get::<BoxCollider>(roots[0]).unwrap();
    assert!(approx_eq(collider.size.x, 6.0));
    assert!(approx_eq(collider.size.y, 2.0));
}

#[test]
fn collider_is_left_alone_while_the_visual_is_unchanged() {
    let mut world = make_world(true);
    let roots = load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();
    frame(&mut world, &mut schedule, 4.0, 4.0, false);

    let edited = BoxCollider::new(7.0, 7.0);
    *world.get_mut::<BoxCollider>(roots[0]).unwrap() = edited;
    frame(&mut world, &mut schedule, 4.0, 4.0, false);
    assert_eq!(*world.get::<BoxCollider>(roots[0]).unwrap(), edited);

    let mut sprites = world.query_filtered::<Entity, With<Sprite>>();
    let visual = sprites.single(&world).unwrap();
    world.get_mut::<Scale>(visual).unwrap().scale = Vector2 { x: 1.0, y: 1.0 };
    frame(&mut world, &mut schedule, 4.0, 4.0, false);
    assert_ne!(*world.get::<BoxCollider>(roots[0]).unwrap(), edited);
}

#[test]
fn draggable_without_sprite_is_a_setup_error() {
    let mut world = make_world(true);
    let orphan = world
        .spawn((Draggable, MapName("ghost".into()), MapPosition::new(0.0, 0.0)))
        .id();

    let err = validate_draggables(&mut world).unwrap_err();
    assert_eq!(
        err,
        DragSetupError::MissingSprite {
            entity: orphan,
            name: Some("ghost".into()),
        }
    );
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn non_identity_root_scale_is_reset() {
    let mut world = make_world(true);
    let root = world
        .spawn((
            Draggable,
            MapPosition::new(0.0, 0.0),
            Sprite::centered("map", 2.0, 2.0),
            Scale::new(2.0, 0.5),
            ZIndex(0),
        ))
        .id();

    assert_eq!(validate_draggables(&mut world), Ok(1));
    assert!(world.get::<Scale>(root).unwrap().is_identity());
}

#[test]
fn root_scale_changed_at_runtime_is_reset() {
    let mut world = make_world(true);
    let roots = load_scene(&mut world, &scene(ONE_MAP)).unwrap();
    let mut schedule = build_update_schedule();
    frame(&mut world, &mut schedule, 4.0, 4.0, false);
    world.clear_trackers();

    world.get_mut::<Scale>(roots[0]).unwrap().scale = Vector2 { x: 5.0, y: 5.0 };
    frame(&mut world, &mut schedule, 4.0, 4.0, false);

    assert!(world.get::<Scale>(roots[0]).unwrap().is_identity());
    let collider = *world.get::<BoxCollider>(roots[0]).unwrap();
    assert!(approx_eq(collider.size.x, 2.0));
}
