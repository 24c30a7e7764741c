/// Render orchestrator: turns orbital and navigation output into draw
/// calls against the engine's `Renderer`.
///
/// Placement uses explicit `Transform` values derived from the view
/// transform; nothing is pushed or popped.

use glam::{Mat4, Vec3};
use flyby_engine::{
    mesh, EngineResult, GeometryHandle, ProgramHandle, Renderer, TextureHandle, TextureSet,
    Transform,
};

use crate::bodies::{Catalog, DisplayScale, SKYDOME_TEXTURE, STAR_TEXTURE, SUN_TEXTURE};
use crate::navigation::{FrameOutput, Stage};
use crate::orbit;

const SUN_SPIN: f32 = 0.5;
const MOON_SPIN: f32 = 0.4;
/// Sun radius in navigation mode.
const NAV_SUN_SIZE: f32 = 2.0;
const SKYDOME_SCALE: f32 = 4800.0;

// ── Shooting star ────────────────────────────────────────────────────

const STAR_HEAD_SCALE: f32 = 0.3;
const TRAIL_SEGMENTS: u32 = 15;
const TRAIL_SPACING: f32 = 0.15;
const TRAIL_SIZE: f32 = 0.2;
const TRAIL_MIN_SIZE: f32 = 0.001;

// ── Resources ────────────────────────────────────────────────────────

/// Geometry uploaded once at startup.
#[derive(Debug, Clone, Copy)]
pub struct SceneMeshes {
    pub sphere: GeometryHandle,
    pub quad: GeometryHandle,
    /// Unit circle, scaled per orbit.
    pub ring: GeometryHandle,
}

impl SceneMeshes {
    pub fn upload(renderer: &mut dyn Renderer, sphere_precision: u32) -> Self {
        Self {
            sphere: renderer.upload_geometry(&mesh::sphere(sphere_precision)),
            quad: renderer.upload_geometry(&mesh::unit_quad()),
            ring: renderer.upload_geometry(&mesh::circle(mesh::ORBIT_SEGMENTS)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BodySkin {
    pub body: TextureHandle,
    pub moons: Vec<TextureHandle>,
}

/// Texture handles in catalog order.
#[derive(Debug, Clone)]
pub struct SceneTextures {
    pub sun: TextureHandle,
    pub star: TextureHandle,
    pub skydome: Option<TextureHandle>,
    pub bodies: Vec<BodySkin>,
}

impl SceneTextures {
    pub fn resolve(catalog: &Catalog, set: &TextureSet, skydome: bool) -> EngineResult<Self> {
        let bodies = catalog
            .bodies()
            .iter()
            .map(|body| {
                Ok(BodySkin {
                    body: set.require(body.texture)?,
                    moons: body
                        .moons
                        .iter()
                        .map(|m| set.require(m.texture))
                        .collect::<EngineResult<_>>()?,
                })
            })
            .collect::<EngineResult<_>>()?;
        Ok(Self {
            sun: set.require(SUN_TEXTURE)?,
            star: set.require(STAR_TEXTURE)?,
            skydome: if skydome { Some(set.require(SKYDOME_TEXTURE)?) } else { None },
            bodies,
        })
    }
}

/// Everything a frame needs besides per-frame state.
pub struct Scene<'a> {
    pub catalog: &'a Catalog,
    pub meshes: &'a SceneMeshes,
    pub textures: &'a SceneTextures,
    pub program: ProgramHandle,
}

/// Per-frame camera and clock sample.
#[derive(Debug, Clone, Copy)]
pub struct FrameView {
    pub view: Transform,
    pub projection: Mat4,
    pub global_time: f64,
    pub viewport: (u32, u32),
}

// ── Helpers ──────────────────────────────────────────────────────────

/// In navigation mode body `i` is shown from the transition toward it
/// until the transition toward the next body ends.
pub fn body_visible(stage: Stage, index: usize) -> bool {
    let s = stage.value() as usize;
    (2 * index + 1..=2 * index + 3).contains(&s)
}

/// Rotations that turn a +Z-facing quad toward `to_camera`.
pub fn billboard(to_camera: Vec3) -> (f32, f32) {
    let dir = to_camera.try_normalize().unwrap_or(Vec3::Z);
    (dir.x.atan2(dir.z), (-dir.y).clamp(-1.0, 1.0).asin())
}

fn begin(r: &mut dyn Renderer, scene: &Scene, frame: &FrameView) {
    r.set_viewport(frame.viewport.0, frame.viewport.1);
    r.use_program(scene.program);
    r.set_blend(false);
    r.set_depth_write(true);
    r.set_face_culling(true);
}

fn draw_sphere(r: &mut dyn Renderer, scene: &Scene, frame: &FrameView, pos: Vec3, size: f32, spin: f32, texture: TextureHandle) {
    let model_view = frame.view.translated(pos).rotated_y(spin).scaled(size);
    r.set_transform(model_view.matrix(), frame.projection);
    r.bind_texture(texture);
    r.draw_triangles(scene.meshes.sphere);
}

/// Inside-out background sphere; drawn without depth writes or culling.
fn draw_skydome(r: &mut dyn Renderer, scene: &Scene, frame: &FrameView) {
    let Some(texture) = scene.textures.skydome else {
        return;
    };
    r.set_depth_write(false);
    r.set_face_culling(false);
    r.set_transform(frame.view.scaled(SKYDOME_SCALE).matrix(), frame.projection);
    r.bind_texture(texture);
    r.draw_triangles(scene.meshes.sphere);
    r.set_depth_write(true);
    r.set_face_culling(true);
}

fn draw_moons(r: &mut dyn Renderer, scene: &Scene, frame: &FrameView, index: usize, parent: Vec3, display: Option<&DisplayScale>) {
    let (Ok(body), Some(skin)) = (scene.catalog.body(index), scene.textures.bodies.get(index)) else {
        return;
    };
    let orbit_scale = display.map_or(1.0, |d| d.moon_orbit_scale);
    for (moon, &texture) in body.moons.iter().zip(&skin.moons) {
        let pos = orbit::moon_position(parent, moon, orbit_scale, frame.global_time);
        let size = display.map_or(moon.size, |d| d.moon_size);
        draw_sphere(r, scene, frame, pos, size, orbit::spin(frame.global_time, MOON_SPIN), texture);
    }
}

// ── Top-down overview ────────────────────────────────────────────────

pub fn draw_overview(r: &mut dyn Renderer, scene: &Scene, frame: &FrameView, display: &DisplayScale) {
    begin(r, scene, frame);
    let gt = frame.global_time;

    for (i, body) in scene.catalog.bodies().iter().enumerate() {
        let ring = frame.view.scaled(display.orbit_radius(i, body));
        r.set_transform(ring.matrix(), frame.projection);
        r.draw_line_loop(scene.meshes.ring);
    }

    draw_skydome(r, scene, frame);
    draw_sphere(r, scene, frame, Vec3::ZERO, display.sun_size, orbit::spin(gt, SUN_SPIN), scene.textures.sun);

    for (i, (body, skin)) in scene.catalog.bodies().iter().zip(&scene.textures.bodies).enumerate() {
        let pos = orbit::body_position_at_radius(body, display.orbit_radius(i, body), gt);
        let size = display.body_size(i, body);
        draw_sphere(r, scene, frame, pos, size, orbit::spin(gt, body.rotation_speed), skin.body);
        draw_moons(r, scene, frame, i, pos, Some(display));
    }
}

// ── Navigation ───────────────────────────────────────────────────────

pub fn draw_navigation(r: &mut dyn Renderer, scene: &Scene, frame: &FrameView, out: &FrameOutput, stage: Stage) {
    begin(r, scene, frame);
    let gt = frame.global_time;

    draw_skydome(r, scene, frame);

    if stage.value() <= 1 {
        draw_sphere(r, scene, frame, Vec3::ZERO, NAV_SUN_SIZE, orbit::spin(gt, SUN_SPIN), scene.textures.sun);
    }

    if out.nav.draw_star {
        draw_shooting_star(r, scene, frame, out);
    }

    for (i, (body, skin)) in scene.catalog.bodies().iter().zip(&scene.textures.bodies).enumerate() {
        if !body_visible(stage, i) {
            continue;
        }
        let pos = orbit::body_position(body, gt);
        draw_sphere(r, scene, frame, pos, body.size, orbit::spin(gt, body.rotation_speed), skin.body);
        draw_moons(r, scene, frame, i, pos, None);
    }
}

/// Camera-facing head plus a trail of shrinking quads behind it.
fn draw_shooting_star(r: &mut dyn Renderer, scene: &Scene, frame: &FrameView, out: &FrameOutput) {
    let star = out.nav.star;
    let (yaw, pitch) = billboard(out.eye - star);
    let back = -out.star_heading().unwrap_or(Vec3::ZERO);

    r.set_blend(true);
    r.set_depth_write(false);
    r.bind_texture(scene.textures.star);

    let mut quad = |pos: Vec3, size: f32| {
        let model_view = frame.view.translated(pos).rotated_y(yaw).rotated_x(pitch).scaled(size);
        r.set_transform(model_view.matrix(), frame.projection);
        r.draw_triangles(scene.meshes.quad);
    };

    quad(star, STAR_HEAD_SCALE);
    for i in 1..=TRAIL_SEGMENTS {
        let t = i as f32 / TRAIL_SEGMENTS as f32;
        let size = TRAIL_SIZE * (1.0 - t * t);
        if size < TRAIL_MIN_SIZE {
            continue;
        }
        quad(star + back * (i as f32 * TRAIL_SPACING), size);
    }

    r.set_depth_write(true);
    r.set_blend(false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyby_engine::{look_at, overhead_view, CommandBuffer, DrawCommand};
    use crate::bodies::{REALISTIC, SCALED};
    use crate::navigation::NavigationState;

    struct Fixture {
        catalog: Catalog,
        meshes: SceneMeshes,
        textures: SceneTextures,
        buffer: CommandBuffer,
    }

    impl Fixture {
        fn new() -> Self {
            let catalog = Catalog::solar_system();
            let mut buffer = CommandBuffer::with_capacity(4096);
            let meshes = SceneMeshes::upload(&mut buffer, 8);
            let mut next = 0u32;
            let mut tex = || {
                next += 1;
                TextureHandle(next)
            };
            let textures = SceneTextures {
                sun: tex(),
                star: tex(),
                skydome: Some(tex()),
                bodies: catalog
                    .bodies()
                    .iter()
                    .map(|b| BodySkin { body: tex(), moons: b.moons.iter().map(|_| tex()).collect() })
                    .collect(),
            };
            Self { catalog, meshes, textures, buffer }
        }

        fn scene(&self) -> Scene<'_> {
            Scene {
                catalog: &self.catalog,
                meshes: &self.meshes,
                textures: &self.textures,
                program: ProgramHandle(0),
            }
        }
    }

    fn frame(view: Mat4) -> FrameView {
        FrameView {
            view: Transform::from(view),
            projection: Mat4::IDENTITY,
            global_time: 12.0,
            viewport: (800, 600),
        }
    }

    fn sphere_draws(cmds: &[DrawCommand], sphere: GeometryHandle) -> usize {
        cmds.iter().filter(|c| **c == DrawCommand::Triangles(sphere)).count()
    }

    fn star_output(draw_star: bool) -> FrameOutput {
        FrameOutput {
            eye: Vec3::new(0.0, 2.0, 20.0),
            nav: NavigationState {
                look_at: Vec3::ZERO,
                star: Vec3::new(0.0, 0.0, 10.0),
                prev_star: Vec3::new(0.0, 0.0, 9.0),
                draw_star,
            },
        }
    }

    #[test]
    fn visibility_window() {
        assert!(!body_visible(Stage::IDLE, 0));
        assert!(body_visible(Stage::transitioning(0), 0));
        assert!(body_visible(Stage::resting(0), 0));
        assert!(body_visible(Stage::transitioning(1), 0));
        assert!(!body_visible(Stage::resting(1), 0));
        assert!(!body_visible(Stage::resting(4), 2));
        assert!(body_visible(Stage::resting(4), 4));
    }

    #[test]
    fn billboard_faces_the_camera() {
        for to_cam in [Vec3::new(3.0, 1.0, -2.0), Vec3::new(0.0, -5.0, 0.1), Vec3::X] {
            let (yaw, pitch) = billboard(to_cam);
            let normal = Transform::IDENTITY.rotated_y(yaw).rotated_x(pitch).matrix().transform_vector3(Vec3::Z);
            assert!((normal - to_cam.normalize()).length() < 1e-4, "{to_cam} -> {normal}");
        }
        assert_eq!(billboard(Vec3::ZERO), (0.0, 0.0));
    }

    #[test]
    fn overview_draws_rings_sun_bodies_and_moons() {
        let mut fx = Fixture::new();
        let mut buf = std::mem::take(&mut fx.buffer);
        let scene = fx.scene();
        draw_overview(&mut buf, &scene, &frame(overhead_view()), &REALISTIC);
        let cmds = buf.commands();

        let rings = cmds.iter().filter(|c| **c == DrawCommand::LineLoop(fx.meshes.ring)).count();
        assert_eq!(rings, 9);
        // skydome + sun + 9 bodies + 5 moons
        assert_eq!(sphere_draws(cmds, fx.meshes.sphere), 1 + 1 + 9 + 5);
        assert_eq!(cmds[0], DrawCommand::Viewport { width: 800, height: 600 });
        assert_eq!(cmds[1], DrawCommand::UseProgram(ProgramHandle(0)));
    }

    #[test]
    fn scaled_overview_uses_fixed_radii() {
        let mut fx = Fixture::new();
        let mut buf = std::mem::take(&mut fx.buffer);
        let scene = fx.scene();
        draw_overview(&mut buf, &scene, &frame(Mat4::IDENTITY), &SCALED);
        let ring_scales: Vec<f32> = buf
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Transform { model_view, .. } => Some(model_view.x_axis.x),
                _ => None,
            })
            .take(9)
            .collect();
        assert_eq!(ring_scales, vec![8.0, 12.0, 16.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
    }

    #[test]
    fn navigation_shows_only_nearby_bodies() {
        let mut fx = Fixture::new();
        let mut buf = std::mem::take(&mut fx.buffer);
        let scene = fx.scene();
        let view = look_at(Vec3::new(0.0, 0.0, 8.0), Vec3::ZERO, Vec3::Y);
        // Resting at Jupiter: Jupiter and its four moons, no sun.
        draw_navigation(&mut buf, &scene, &frame(view), &star_output(false), Stage::resting(4));
        assert_eq!(sphere_draws(buf.commands(), fx.meshes.sphere), 1 + 1 + 4);
        assert!(!buf.commands().contains(&DrawCommand::Triangles(fx.meshes.quad)));

        buf.clear();
        // Heading for Mercury: sun, Mercury and the star.
        draw_navigation(&mut buf, &scene, &frame(view), &star_output(true), Stage::transitioning(0));
        assert_eq!(sphere_draws(buf.commands(), fx.meshes.sphere), 1 + 1 + 1);
        let quads = buf.commands().iter().filter(|c| **c == DrawCommand::Triangles(fx.meshes.quad)).count();
        assert_eq!(quads as u32, 1 + TRAIL_SEGMENTS - 1);
    }

    #[test]
    fn star_pass_restores_depth_and_blend() {
        let mut fx = Fixture::new();
        let mut buf = std::mem::take(&mut fx.buffer);
        let scene = fx.scene();
        draw_navigation(&mut buf, &scene, &frame(Mat4::IDENTITY), &star_output(true), Stage::transitioning(2));
        let cmds = buf.commands();
        let first_quad = cmds.iter().position(|c| *c == DrawCommand::Triangles(fx.meshes.quad)).unwrap();
        let before = &cmds[..first_quad];
        assert!(before.contains(&DrawCommand::Blend(true)));
        let last_quad = cmds.iter().rposition(|c| *c == DrawCommand::Triangles(fx.meshes.quad)).unwrap();
        let after = &cmds[last_quad..];
        assert!(after.contains(&DrawCommand::DepthWrite(true)));
        assert!(after.contains(&DrawCommand::Blend(false)));
    }

    #[test]
    fn trail_extends_behind_the_star() {
        let mut fx = Fixture::new();
        let mut buf = std::mem::take(&mut fx.buffer);
        let scene = fx.scene();
        draw_navigation(&mut buf, &scene, &frame(Mat4::IDENTITY), &star_output(true), Stage::transitioning(0));
        let origins: Vec<Vec3> = buf
            .commands()
            .windows(2)
            .filter_map(|w| match (w[0], w[1]) {
                (DrawCommand::Transform { model_view, .. }, DrawCommand::Triangles(g)) if g == fx.meshes.quad => {
                    Some(model_view.transform_point3(Vec3::ZERO))
                }
                _ => None,
            })
            .collect();
        // Heading is +Z, so the trail steps toward -Z from the head at z=10.
        assert_eq!(origins[0], Vec3::new(0.0, 0.0, 10.0));
        assert!(origins[1..].iter().all(|p| p.z < 10.0));
        assert!(origins.windows(2).all(|w| w[1].z < w[0].z));
    }

    #[test]
    fn missing_textures_fail_resolution() {
        let catalog = Catalog::solar_system();
        assert!(SceneTextures::resolve(&catalog, &TextureSet::default(), false).is_err());
    }
}
