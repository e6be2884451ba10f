//! Property tests for the clearance oracle, planner and rendezvous solver.

use pixelnav::{
    octile_distance, ColorMap, Coordinate, ObstacleMap, Palette, PathPlanner, RendezvousSolver,
    Rgb,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

const WIDTH: u32 = 48;
const HEIGHT: u32 = 36;

/// A pixel grid of the given size where each pixel is open ground, obstacle
/// or scenery, weighted toward open ground.
fn pixel_grid(width: u32, height: u32) -> impl Strategy<Value = ColorMap> {
    let pixel = prop_oneof![
        12 => Just(Rgb::WHITE),
        3 => Just(Rgb::WALL_BROWN),
        1 => Just(Rgb::GRASS_GREEN),
    ];
    prop::collection::vec(pixel, (width * height) as usize)
        .prop_map(move |pixels| ColorMap::from_pixels(width, height, pixels).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_open_world_is_clear_everywhere(
        x in 0i32..40,
        y in 0i32..30,
        radius in 0u32..25,
    ) {
        let world = ColorMap::filled(40, 30, Rgb::WHITE).unwrap();
        let map = ObstacleMap::new(&world, Palette::default());
        prop_assert!(map.is_clear(Coordinate::new(x, y), radius));
    }

    #[test]
    fn prop_obstacle_within_buffer_blocks(
        ox in 0i32..30,
        oy in 0i32..30,
        dx in -6i32..=6,
        dy in -6i32..=6,
        extra in 0u32..4,
    ) {
        let mut world = ColorMap::filled(30, 30, Rgb::WHITE).unwrap();
        world.set(Coordinate::new(ox, oy), Rgb::WALL_BROWN).unwrap();
        let map = ObstacleMap::new(&world, Palette::default());

        let probe = Coordinate::new(ox + dx, oy + dy);
        let reach = dx.unsigned_abs().max(dy.unsigned_abs());
        prop_assert!(!map.is_clear(probe, reach + extra));
    }

    #[test]
    fn prop_path_to_self_is_single_cell(
        world in pixel_grid(WIDTH, HEIGHT),
        x in 0i32..WIDTH as i32,
        y in 0i32..HEIGHT as i32,
    ) {
        let map = ObstacleMap::new(&world, Palette::default());
        let point = Coordinate::new(x, y);

        let path = PathPlanner::default().find_path(&map, point, point).unwrap();
        prop_assert_eq!(path.into_vec(), vec![point]);
    }

    #[test]
    fn prop_meeting_point_in_bounds(
        world in pixel_grid(WIDTH, HEIGHT),
        seed in any::<u64>(),
        ax in -80.0f64..150.0,
        ay in -80.0f64..130.0,
        bx in -80.0f64..150.0,
        by in -80.0f64..130.0,
    ) {
        let map = ObstacleMap::new(&world, Palette::default());
        let mut rng = StdRng::seed_from_u64(seed);

        let meeting = RendezvousSolver::default().find_meeting_point(&map, (ax, ay), (bx, by), &mut rng);
        prop_assert!(map.in_bounds(meeting.coordinate));
        if !meeting.is_degraded() {
            prop_assert!(map.is_exactly_clear(meeting.coordinate));
        }
    }

    #[test]
    fn prop_planned_paths_respect_buffer(
        world in pixel_grid(WIDTH, HEIGHT),
        sx in 0i32..WIDTH as i32,
        sy in 0i32..HEIGHT as i32,
        gx in 0i32..WIDTH as i32,
        gy in 0i32..HEIGHT as i32,
    ) {
        let map = ObstacleMap::new(&world, Palette::default());
        let planner = PathPlanner::new(pixelnav::PlannerConfig::new(0));

        if let Ok(path) = planner.find_path(&map, (sx, sy), (gx, gy)) {
            prop_assert!(path.is_contiguous());
            prop_assert_eq!(path.start(), Some(Coordinate::new(sx, sy)));
            prop_assert_eq!(path.goal(), Some(Coordinate::new(gx, gy)));
            for &cell in path.coordinates().iter().skip(1) {
                prop_assert!(map.is_exactly_clear(cell));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_open_world_path_cost_is_octile(
        size in 16u32..40,
        sx in 0i32..40,
        sy in 0i32..40,
        gx in 0i32..40,
        gy in 0i32..40,
    ) {
        let world = ColorMap::filled(size, size, Rgb::WHITE).unwrap();
        let map = ObstacleMap::new(&world, Palette::default());
        let last = size as i32 - 1;
        let start = Coordinate::new(sx.min(last), sy.min(last));
        let goal = Coordinate::new(gx.min(last), gy.min(last));

        let path = PathPlanner::default().find_path(&map, start, goal).unwrap();
        prop_assert!(path.is_contiguous());
        prop_assert_eq!(path.start(), Some(start));
        prop_assert_eq!(path.goal(), Some(goal));
        prop_assert!((path.cost() - octile_distance(start, goal)).abs() < 1e-9);
    }

    #[test]
    fn prop_midpoint_wins_when_clear(
        ax in 0i32..50,
        ay in 0i32..50,
        bx in 0i32..50,
        by in 0i32..50,
    ) {
        let mut world = ColorMap::filled(50, 50, Rgb::WHITE).unwrap();
        // Obstacles in the corners keep some midpoints from qualifying.
        world.fill_rect(Coordinate::new(0, 0), 4, 4, Rgb::WALL_BROWN);
        world.fill_rect(Coordinate::new(46, 46), 4, 4, Rgb::WALL_BROWN);
        let map = ObstacleMap::new(&world, Palette::default());
        let mut rng = StdRng::seed_from_u64(0);

        let midpoint = Coordinate::truncate((ax + bx) as f64 / 2.0, (ay + by) as f64 / 2.0);
        let meeting = RendezvousSolver::default().find_meeting_point(&map, (ax, ay), (bx, by), &mut rng);
        if map.is_clear(midpoint, 5) {
            prop_assert_eq!(meeting.coordinate, midpoint);
        } else {
            prop_assert_ne!(meeting.coordinate, midpoint);
        }
    }
}
