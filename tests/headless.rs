//! Headless integration tests for Mining Quest.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering/UI), and verify that the
//! mining loop works correctly: pointer rays in, rock state and reward
//! signals out.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use minequest::data::DataPlugin;
use minequest::mine::components::{MineRig, MineSceneEntity, Pickaxe};
use minequest::mine::debris::{self, Fragment};
use minequest::mine::pickaxe::{self, PickaxeSwing, PICKAXE_HOME_POSITION};
use minequest::mine::rocks::{self, RockField};
use minequest::mine::scroll;
use minequest::rewards;
use minequest::shared::*;
use minequest::ui::audio;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Collects this frame's cross-domain events so tests can count them.
#[derive(Resource, Default)]
struct Collected {
    swings: Vec<SwingEvent>,
    cracked: Vec<RockCrackedEvent>,
    bursts: Vec<FragmentBurstEvent>,
    gems: Vec<GemCollectedEvent>,
    sfx: Vec<PlaySfxEvent>,
}

fn collect_events(
    mut collected: ResMut<Collected>,
    mut swings: EventReader<SwingEvent>,
    mut cracked: EventReader<RockCrackedEvent>,
    mut bursts: EventReader<FragmentBurstEvent>,
    mut gems: EventReader<GemCollectedEvent>,
    mut sfx: EventReader<PlaySfxEvent>,
) {
    collected.swings.extend(swings.read().cloned());
    collected.cracked.extend(cracked.read().cloned());
    collected.bursts.extend(bursts.read().cloned());
    collected.gems.extend(gems.read().cloned());
    collected.sfx.extend(sfx.read().cloned());
}

/// Builds a minimal Bevy app with all shared resources and events
/// registered but NO rendering, windowing, or asset loading. The mining
/// systems run in the same Advance → Resolve → Observe phases as the
/// real app; ticks advance time by a fixed 16ms unless a test overrides
/// the update strategy.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)));

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<GameConfig>()
        .init_resource::<MineStats>()
        .init_resource::<RockField>()
        .init_resource::<PickaxeSwing>()
        .init_resource::<Collected>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<PointerMoveEvent>()
        .add_event::<PointerDownEvent>()
        .add_event::<SwingEvent>()
        .add_event::<RockCrackedEvent>()
        .add_event::<GemCollectedEvent>()
        .add_event::<FragmentBurstEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<PlayMusicEvent>();

    // ── Frame phases and pure-logic systems (mirrors main.rs) ────────────
    app.configure_sets(
        Update,
        (UpdateSet::Advance, UpdateSet::Resolve, UpdateSet::Observe).chain(),
    );
    app.add_systems(
        Update,
        (
            pickaxe::animate_pickaxe,
            debris::animate_fragments,
            debris::despawn_expired_fragments,
            scroll::advance_scroll,
        )
            .in_set(UpdateSet::Advance)
            .run_if(in_state(GameState::Playing)),
    );
    app.add_systems(
        Update,
        (
            (
                rocks::handle_pointer_down,
                pickaxe::cue_strike,
                debris::spawn_fragment_bursts,
            )
                .chain(),
            rocks::update_highlights,
        )
            .in_set(UpdateSet::Resolve)
            .run_if(in_state(GameState::Playing)),
    );
    app.add_systems(
        Update,
        (
            (rewards::classify_cracked_rocks, rewards::track_gems).chain(),
            rewards::track_swings,
            rewards::track_cracks,
            audio::play_swing_feedback,
        )
            .in_set(UpdateSet::Observe)
            .run_if(in_state(GameState::Playing)),
    );
    app.add_systems(PostUpdate, collect_events);

    app
}

/// Transitions the test app to Playing state and ticks once to process it.
fn enter_playing_state(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update(); // process state transition
}

/// Spawns the bare scene skeleton the logic systems address: the
/// scrolling rig and a pickaxe at its resting pose.
fn spawn_test_scene(app: &mut App) {
    app.world_mut().spawn((
        MineRig,
        MineSceneEntity,
        Transform::from_xyz(0.0, 0.0, -1.0),
        Visibility::default(),
    ));
    app.world_mut().spawn((
        Pickaxe,
        MineSceneEntity,
        Transform::from_translation(PICKAXE_HOME_POSITION),
    ));
}

/// A ray fired straight into the rock face at the given (x, y).
fn ray_at(x: f32, y: f32) -> Ray3d {
    Ray3d {
        origin: Vec3::new(x, y, 10.0),
        direction: Dir3::NEG_Z,
    }
}

fn press(app: &mut App, x: f32, y: f32) {
    app.world_mut().send_event(PointerDownEvent { ray: ray_at(x, y) });
}

fn fragment_count(app: &mut App) -> usize {
    let mut query = app.world_mut().query::<&Fragment>();
    query.iter(app.world()).len()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: Boot smoke — config resolves, state reaches MainMenu
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_reaches_main_menu() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);

    // First update enters Loading and resolves config; second applies NextState.
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        state.get(),
        &GameState::MainMenu,
        "Expected to reach MainMenu after config load"
    );
    assert!(app.world().contains_resource::<GameConfig>());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: The cell-5 scenario — two taps then a crack
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_three_hits_on_one_cell() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    // Hit 1: health 3 → 2, depth unchanged, one fragment.
    press(&mut app, -0.8, -0.8);
    app.update();
    {
        let field = app.world().resource::<RockField>();
        assert_eq!(field.healths[5], 2);
        assert_eq!(field.depths[5], 0);
    }

    // Hit 2: health 2 → 1.
    press(&mut app, -0.8, -0.8);
    app.update();
    {
        let field = app.world().resource::<RockField>();
        assert_eq!(field.healths[5], 1);
        assert_eq!(field.depths[5], 0);
    }

    // Hit 3: crack — health resets to 3, depth 1, five fragments.
    press(&mut app, -0.8, -0.8);
    app.update();
    {
        let field = app.world().resource::<RockField>();
        assert_eq!(field.healths[5], 3);
        assert_eq!(field.depths[5], 1);
    }

    let collected = app.world().resource::<Collected>();
    assert_eq!(collected.swings.len(), 3, "one combined signal per press");
    assert_eq!(collected.cracked.len(), 1, "exactly one crack");
    let burst_counts: Vec<u8> = collected.bursts.iter().map(|b| b.count).collect();
    assert_eq!(burst_counts, vec![1, 1, 5]);
    assert_eq!(collected.gems.len(), 1, "one reward per crack");
}

#[test]
fn test_health_invariant_over_many_presses() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    for _ in 0..9 {
        press(&mut app, -0.8, -0.8);
        app.update();
        let field = app.world().resource::<RockField>();
        for i in 0..ROCK_COUNT {
            assert!(
                (1..=3).contains(&field.healths[i]),
                "health[{}] = {} outside 1..=3",
                i,
                field.healths[i]
            );
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: A miss is a no-op
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_miss_changes_nothing_and_fires_nothing() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    let before = app.world().resource::<RockField>().clone();
    press(&mut app, 20.0, 20.0);
    app.update();

    let field = app.world().resource::<RockField>();
    assert_eq!(field.healths, before.healths);
    assert_eq!(field.depths, before.depths);

    let collected = app.world().resource::<Collected>();
    assert!(collected.swings.is_empty());
    assert!(collected.sfx.is_empty());
    assert!(collected.gems.is_empty());

    let stats = app.world().resource::<MineStats>();
    assert_eq!(stats.swings, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: A press straddling two cells — one combined signal
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_two_cell_press_fires_one_signal() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    // Midway between cells 5 and 6, both at full health.
    press(&mut app, -0.8, 0.0);
    app.update();

    let field = app.world().resource::<RockField>();
    assert_eq!(field.healths[5], 2);
    assert_eq!(field.healths[6], 2);
    assert_eq!(field.depths[5], 0);
    assert_eq!(field.depths[6], 0);

    let collected = app.world().resource::<Collected>();
    assert_eq!(collected.swings.len(), 1, "one signal, not two");
    assert_eq!(collected.swings[0].candidates, 2);
    assert!(!collected.swings[0].cracked);
    assert_eq!(collected.sfx.len(), 1, "one feedback sound");
    assert!(
        collected.sfx[0].sfx_id.starts_with("pickaxe-medium"),
        "two-cell glance uses the medium tier, got {}",
        collected.sfx[0].sfx_id
    );
}

#[test]
fn test_two_cell_crack_is_heavy_and_rewards_both() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    {
        let mut field = app.world_mut().resource_mut::<RockField>();
        field.healths[5] = 1;
        field.healths[6] = 1;
    }

    press(&mut app, -0.8, 0.0);
    app.update();

    let field = app.world().resource::<RockField>();
    assert_eq!(field.healths[5], 3);
    assert_eq!(field.healths[6], 3);
    assert_eq!(field.depths[5], 1);
    assert_eq!(field.depths[6], 1);

    let collected = app.world().resource::<Collected>();
    assert_eq!(collected.swings.len(), 1);
    assert!(collected.swings[0].cracked);
    assert_eq!(collected.cracked.len(), 2);
    assert_eq!(collected.gems.len(), 2, "one gem per cracked cell");
    assert_eq!(collected.sfx.len(), 1);
    assert!(collected.sfx[0].sfx_id.starts_with("pickaxe-heavy"));

    // Default parity rule: cell 6 → Sun, cell 5 → Moon.
    let kinds: Vec<GemKind> = collected.gems.iter().map(|g| g.kind).collect();
    assert!(kinds.contains(&GemKind::Sun));
    assert!(kinds.contains(&GemKind::Moon));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: Action scalar — exact reset, monotone decay
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_action_resets_to_one_on_hit() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    {
        let mut swing = app.world_mut().resource_mut::<PickaxeSwing>();
        swing.action = 0.37;
    }

    press(&mut app, -0.8, -0.8);
    app.update();

    let swing = app.world().resource::<PickaxeSwing>();
    assert_eq!(swing.action, 1.0, "action snaps to exactly 1.0 on a hit");
}

#[test]
fn test_action_decays_monotonically_to_zero() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    press(&mut app, -0.8, -0.8);
    app.update();

    let mut last = app.world().resource::<PickaxeSwing>().action;
    assert_eq!(last, 1.0);

    // 1.0 / (3.0 per second * 16ms) ≈ 21 frames to drain; run past that.
    for _ in 0..40 {
        app.update();
        let action = app.world().resource::<PickaxeSwing>().action;
        assert!(action <= last, "action may never rise between hits");
        assert!(action >= 0.0, "action is clamped at zero");
        last = action;
    }
    assert_eq!(last, 0.0);
}

#[test]
fn test_pickaxe_leaves_home_on_strike() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    press(&mut app, -0.8, -0.8);
    app.update();
    app.update(); // blend applied with the armed action

    let mut pickaxes = app.world_mut().query_filtered::<&Transform, With<Pickaxe>>();
    let transform = pickaxes.single(app.world());
    assert!(
        transform.translation.distance(PICKAXE_HOME_POSITION) > 0.5,
        "pickaxe should be at the strike pose right after a hit"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: Scroll offset — monotone, capped at min depth - 1
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_scroll_waits_until_every_cell_cracks() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    for _ in 0..10 {
        app.update();
    }
    let mut rigs = app.world_mut().query_filtered::<&Transform, With<MineRig>>();
    let z = rigs.single(app.world()).translation.z;
    assert_eq!(z, -1.0, "no scroll while any cell is at depth 0");
}

#[test]
fn test_scroll_advances_monotonically_and_caps() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    {
        let mut field = app.world_mut().resource_mut::<RockField>();
        field.depths = [1; ROCK_COUNT];
    }

    let mut last = -1.0_f32;
    for _ in 0..100 {
        app.update();
        let mut rigs = app.world_mut().query_filtered::<&Transform, With<MineRig>>();
        let z = rigs.single(app.world()).translation.z;
        assert!(z >= last, "scroll never decreases");
        assert!(z <= 0.0 + 1e-5, "scroll never exceeds min(depths) - 1");
        last = z;
    }
    assert!((last - 0.0).abs() < 1e-5, "scroll should reach the cap");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: Fragment lifetime — wall clock, stall-proof
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_fragments_survive_spawn_frame_then_expire() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    press(&mut app, -0.8, -0.8);
    app.update();
    assert_eq!(
        fragment_count(&mut app),
        1,
        "burst spawns exactly one fragment on a partial hit"
    );

    // Within the 500ms lifetime nothing expires.
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(fragment_count(&mut app), 1);

    // Stalled frame loop: one late frame sweeps the fragment out.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(600)));
    app.update();
    assert_eq!(
        fragment_count(&mut app),
        0,
        "fragment must be gone within 500ms + one frame, even after a stall"
    );
}

#[test]
fn test_crack_bursts_five_fragments() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    {
        let mut field = app.world_mut().resource_mut::<RockField>();
        field.healths[5] = 1;
    }

    press(&mut app, -0.8, -0.8);
    app.update();
    assert_eq!(fragment_count(&mut app), 5);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: Highlights derive from the latest pointer ray
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_highlights_follow_pointer() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    app.world_mut()
        .send_event(PointerMoveEvent { ray: ray_at(-0.8, -0.8) });
    app.update();
    {
        let field = app.world().resource::<RockField>();
        assert!(field.highlights[5]);
        assert_eq!(field.highlights.iter().filter(|h| **h).count(), 1);
    }

    app.world_mut()
        .send_event(PointerMoveEvent { ray: ray_at(20.0, 20.0) });
    app.update();
    {
        let field = app.world().resource::<RockField>();
        assert!(field.highlights.iter().all(|h| !h), "miss clears highlights");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 9: Stats accumulate across presses
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_stats_accumulate() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    enter_playing_state(&mut app);

    // Three presses crack cell 5 once.
    for _ in 0..3 {
        press(&mut app, -0.8, -0.8);
        app.update();
    }
    // One miss: no counters move.
    press(&mut app, 20.0, 20.0);
    app.update();

    let stats = app.world().resource::<MineStats>();
    assert_eq!(stats.swings, 3, "misses are not swings");
    assert_eq!(stats.rocks_cracked, 1);
    assert_eq!(stats.deepest_tier, 1);
    assert_eq!(stats.gems_total(), 1);
    // Cell 5 is odd: parity rule awards a Moon gem.
    assert_eq!(stats.gems_of(GemKind::Moon), 1);
}

#[test]
fn test_single_reward_rule_awards_only_sun() {
    let mut app = build_test_app();
    spawn_test_scene(&mut app);
    app.insert_resource(GameConfig {
        reward_rule: RewardRule::Single,
        ..default()
    });
    enter_playing_state(&mut app);

    {
        let mut field = app.world_mut().resource_mut::<RockField>();
        field.healths[5] = 1;
        field.healths[6] = 1;
    }
    press(&mut app, -0.8, 0.0);
    app.update();

    let stats = app.world().resource::<MineStats>();
    assert_eq!(stats.gems_of(GemKind::Sun), 2);
    assert_eq!(stats.gems_of(GemKind::Moon), 0);
}
