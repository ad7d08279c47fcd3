use cave_drift_core::{Tile, TileCoord};
use cave_drift_system_generation::{generate, Config};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const TILE_LENGTH: f32 = 32.0;

#[test]
fn identical_seeds_produce_identical_grids() {
    let config = Config::new(0.45, 5, 4);

    let mut first_rng = ChaCha8Rng::seed_from_u64(0x5eed_cafe);
    let mut second_rng = ChaCha8Rng::seed_from_u64(0x5eed_cafe);

    let first = generate(&config, 50, 50, TILE_LENGTH, &mut first_rng);
    let second = generate(&config, 50, 50, TILE_LENGTH, &mut second_rng);

    assert_eq!(first, second);
}

#[test]
fn output_dimensions_match_the_request() {
    let config = Config::new(0.45, 3, 4);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for (columns, rows) in [(1, 1), (50, 50), (12, 7), (3, 40)] {
        let grid = generate(&config, columns, rows, TILE_LENGTH, &mut rng);
        assert_eq!(grid.columns(), columns);
        assert_eq!(grid.rows(), rows);
        assert_eq!(grid.tile_length(), TILE_LENGTH);
    }
}

#[test]
fn open_seed_closes_exactly_the_corners_after_one_pass() {
    // fill probability zero seeds an all-floor grid; corners carry five
    // out-of-bounds wall neighbors and close, every other cell stays open.
    let config = Config::new(0.0, 1, 4);
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let grid = generate(&config, 8, 6, TILE_LENGTH, &mut rng);

    for (coord, tile) in grid.iter() {
        let edge_column = coord.column() == 0 || coord.column() == 7;
        let edge_row = coord.row() == 0 || coord.row() == 5;
        if edge_column && edge_row {
            assert_eq!(tile, Tile::Wall, "corner {coord:?} stayed open");
        } else {
            assert_eq!(tile, Tile::Floor, "cell {coord:?} closed unexpectedly");
        }
    }
}

#[test]
fn saturated_seed_stays_solid_through_every_pass() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);

    for passes in [0, 1, 5] {
        let config = Config::new(1.0, passes, 4);
        let grid = generate(&config, 10, 10, TILE_LENGTH, &mut rng);
        assert!(
            grid.iter().all(|(_, tile)| tile.is_wall()),
            "{passes} passes opened a saturated grid"
        );
    }
}

#[test]
fn zero_passes_return_the_raw_seed() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let open = generate(&Config::new(0.0, 0, 4), 5, 5, TILE_LENGTH, &mut rng);
    assert!(open.iter().all(|(_, tile)| tile == Tile::Floor));

    let solid = generate(&Config::new(1.0, 0, 4), 5, 5, TILE_LENGTH, &mut rng);
    assert!(solid.iter().all(|(_, tile)| tile.is_wall()));
}

#[test]
fn regeneration_with_fresh_draws_keeps_structural_properties() {
    // Two grids from one RNG stream differ in content but share dimensions,
    // and each independently honors the boundary rules.
    let config = Config::new(0.45, 5, 4);
    let mut rng = ChaCha8Rng::seed_from_u64(0xd1ce);

    let first = generate(&config, 30, 30, TILE_LENGTH, &mut rng);
    let second = generate(&config, 30, 30, TILE_LENGTH, &mut rng);

    assert_eq!(first.columns(), second.columns());
    assert_eq!(first.rows(), second.rows());

    for grid in [&first, &second] {
        for corner in [
            TileCoord::new(0, 0),
            TileCoord::new(29, 0),
            TileCoord::new(0, 29),
            TileCoord::new(29, 29),
        ] {
            // Corner cells see five out-of-bounds walls, so five smoothing
            // passes at threshold four always close them.
            assert_eq!(grid.tile(corner), Some(Tile::Wall));
        }
    }
}
