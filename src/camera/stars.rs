use bevy::prelude::*;
use bevy::transform::TransformSystems;
use bevy_panorbit_camera::PanOrbitCameraSystemSet;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::cameras::ViewerCamera;
use super::config::StarConfig;

pub struct StarsPlugin;

impl Plugin for StarsPlugin {
    fn build(&self, app: &mut App) {
        // resource_changed is also true on the first frame, which spawns the
        // initial field
        app.add_systems(
            Update,
            (despawn_stars, spawn_stars)
                .chain()
                .run_if(resource_changed::<StarConfig>),
        )
        .add_systems(
            PostUpdate,
            follow_camera
                .after(PanOrbitCameraSystemSet)
                .before(TransformSystems::Propagate),
        );
    }
}

/// Root of the star field. It sits on the camera so the stars can never be
/// reached or outrun.
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct Starfield;

#[derive(Reflect, Component, Default, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct Star {
    pub position: Vec3,
    pub radius:   f32,
    pub emissive: Vec4,
}

fn despawn_stars(mut commands: Commands, starfield: Query<Entity, With<Starfield>>) {
    for entity in &starfield {
        debug!("despawning star field");
        commands.entity(entity).despawn();
    }
}

/// Spawn stars with all components at once to avoid archetype changes after spawn
fn spawn_stars(
    mut commands: Commands,
    config: Res<StarConfig>,
    camera: Option<Single<&Transform, With<ViewerCamera>>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let stars = generate_stars(&config);
    debug!("spawning {} stars", stars.len());

    let origin = camera.map_or(Vec3::ZERO, |transform| transform.translation);
    let starfield = commands
        .spawn((
            Name::new("Starfield"),
            Starfield,
            Transform::from_translation(origin),
            Visibility::default(),
        ))
        .id();

    let mesh = meshes.add(Sphere::new(1.));
    for star in stars {
        let material = materials.add(StandardMaterial {
            base_color: Color::BLACK,
            emissive: LinearRgba::new(
                star.emissive.x,
                star.emissive.y,
                star.emissive.z,
                star.emissive.w,
            ),
            ..default()
        });

        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(star.position).with_scale(Vec3::splat(star.radius)),
            ChildOf(starfield),
            star,
        ));
    }
}

fn follow_camera(
    camera: Single<&Transform, (With<ViewerCamera>, Without<Starfield>)>,
    mut starfield: Single<&mut Transform, With<Starfield>>,
) {
    starfield.translation = camera.translation;
}

/// Deterministic star catalogue for the configured seed. An inconsistent
/// config (empty ranges) yields no stars.
pub fn generate_stars(config: &StarConfig) -> Vec<Star> {
    if config.inner_radius >= config.outer_radius
        || config.star_radius_min >= config.star_radius_max
        || config.star_color.is_empty()
    {
        warn!("star config has an empty range, not generating stars: {config:?}");
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..config.star_count)
        .map(|_| {
            let position =
                get_star_position(config.inner_radius, config.outer_radius, &mut rng);
            let radius = rng.random_range(config.star_radius_min..config.star_radius_max);
            let emissive = get_star_color(config, &mut rng);
            Star {
                position,
                radius,
                emissive,
            }
        })
        .collect()
}

fn get_star_position(
    inner_sphere_radius: f32,
    outer_sphere_radius: f32,
    rng: &mut impl Rng,
) -> Vec3 {
    // Generate uniform random points on spherical shell using spherical coordinates
    let azimuth_norm: f32 = rng.random_range(0.0..1.0);
    let polar_norm: f32 = rng.random_range(0.0..1.0);

    let theta = azimuth_norm * std::f32::consts::TAU;
    // 2.0 * polar_norm - 1.0
    let phi = 2.0f32.mul_add(polar_norm, -1.0).acos();
    let radius = rng.random_range(inner_sphere_radius..outer_sphere_radius);

    Vec3::new(
        radius * theta.cos() * phi.sin(),
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
    )
}

fn get_star_color(config: &StarConfig, rng: &mut impl Rng) -> Vec4 {
    let end = config.star_color.end;
    let color_start = config.star_color.start;
    let white_start = end * config.star_color_white_start_ratio;

    let start = if rng.random::<f32>() < config.star_color_white_probability {
        white_start
    } else {
        color_start
    };

    let mut r = rng.random_range(start..end);
    let mut g = rng.random_range(start..end);
    let mut b = rng.random_range(start..end);

    // Ensure minimum brightness, 20% above start
    let min_brightness = (end - start).mul_add(0.2, start);
    let current_brightness = r.max(g).max(b);

    if current_brightness < min_brightness && current_brightness > 0.0 {
        let scale = min_brightness / current_brightness;
        r *= scale;
        g *= scale;
        b *= scale;
    }

    let a = rng.random_range(start..end);

    Vec4::new(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> StarConfig {
        StarConfig {
            star_count: 500,
            ..default()
        }
    }

    #[test]
    fn stars_lie_within_the_shell() {
        let config = small_config();
        let stars = generate_stars(&config);

        assert_eq!(stars.len(), 500);
        for star in &stars {
            let distance = star.position.length();
            // allow for rounding in the spherical to cartesian conversion
            assert!(distance >= config.inner_radius - 1e-3, "{distance} too close");
            assert!(distance <= config.outer_radius + 1e-3, "{distance} too far");
            assert!((config.star_radius_min..config.star_radius_max).contains(&star.radius));
        }
    }

    fn fly_camera(mut camera: Single<&mut Transform, (With<ViewerCamera>, Without<Starfield>)>) {
        camera.translation.x += 5.0;
    }

    #[test]
    fn starfield_is_centred_on_this_frames_camera_pose() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .insert_resource(StarConfig {
                star_count: 10,
                ..default()
            })
            .add_plugins(StarsPlugin)
            // stands in for the orbit camera writing its transform
            .add_systems(PostUpdate, fly_camera.in_set(PanOrbitCameraSystemSet));
        app.world_mut()
            .spawn((ViewerCamera, Transform::default()));

        for _ in 0..3 {
            app.update();
        }

        let world = app.world_mut();
        let camera = world
            .query_filtered::<&Transform, With<ViewerCamera>>()
            .single(world)
            .unwrap()
            .translation;
        let starfield = world
            .query_filtered::<&Transform, With<Starfield>>()
            .single(world)
            .unwrap()
            .translation;

        assert_eq!(camera, Vec3::new(15.0, 0.0, 0.0));
        assert_eq!(starfield, camera);
    }

    #[test]
    fn same_seed_gives_the_same_field() {
        let config = small_config();
        assert_eq!(generate_stars(&config), generate_stars(&config));
    }

    #[test]
    fn different_seeds_give_different_fields() {
        let config = small_config();
        let other = StarConfig {
            seed: config.seed + 1,
            ..config.clone()
        };
        assert_ne!(generate_stars(&config), generate_stars(&other));
    }

    #[test]
    fn stars_surround_the_origin() {
        let stars = generate_stars(&small_config());
        let centroid = stars.iter().map(|star| star.position).sum::<Vec3>() / stars.len() as f32;

        // a uniform shell averages out near its centre
        assert!(centroid.length() < 5.0, "centroid {centroid} is lopsided");
    }

    #[test]
    fn empty_ranges_produce_no_stars() {
        let config = StarConfig {
            inner_radius: 50.0,
            outer_radius: 25.0,
            ..small_config()
        };
        assert!(generate_stars(&config).is_empty());
    }

    #[test]
    fn star_colors_stay_within_the_configured_range() {
        let config = small_config();
        for star in generate_stars(&config) {
            let brightest = star.emissive.x.max(star.emissive.y).max(star.emissive.z);
            assert!(brightest <= config.star_color.end);
            assert!(brightest >= config.star_color.start);
        }
    }
}
