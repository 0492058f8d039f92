//! Thumbnail export for host persistence.

use crate::renderer::{RenderContext, RenderResult, Renderer};
use crate::skia::SkiaRenderer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sketchpark_core::camera::Camera;
use sketchpark_core::scene::Scene;
use sketchpark_core::shapes::SerializableColor;

/// Render the committed scene at the neutral transform and capture it as a
/// `data:image/png;base64,...` URL.
///
/// Uses the existing interactive surface, then re-renders with the live
/// camera so the user never sees the neutral view — the export is
/// side-effect-free from their perspective.
pub fn export_thumbnail(
    renderer: &mut SkiaRenderer,
    scene: &Scene,
    live_camera: &Camera,
    background: SerializableColor,
) -> RenderResult<String> {
    let neutral = Camera::new();
    renderer.render(&RenderContext::new(scene, &neutral).with_background(background))?;
    let png = renderer.encode_png()?;
    let data_url = format!("data:image/png;base64,{}", STANDARD.encode(&png));

    // Restore the interactive view.
    renderer.render(&RenderContext::new(scene, live_camera).with_background(background))?;

    log::debug!("exported {} byte thumbnail", png.len());
    Ok(data_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Vec2};
    use sketchpark_core::shapes::{Path, Shape, ShapeStyle};

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.push(Shape::Path(Path::from_points(
            vec![Point::new(5.0, 25.0), Point::new(45.0, 25.0)],
            ShapeStyle::default(),
        )));
        scene
    }

    #[test]
    fn test_data_url_shape() {
        let mut renderer = SkiaRenderer::new(50.0, 50.0, 1.0);
        let scene = sample_scene();
        let camera = Camera::new();

        let url =
            export_thumbnail(&mut renderer, &scene, &camera, SerializableColor::white()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > "data:image/png;base64,".len());
    }

    #[test]
    fn test_restores_live_view() {
        let mut renderer = SkiaRenderer::new(50.0, 50.0, 1.0);
        let scene = sample_scene();
        let mut camera = Camera::new();
        camera.offset = Vec2::new(20.0, 0.0);
        camera.zoom = 2.0;

        // Draw the live view and remember its pixels.
        renderer
            .render(&RenderContext::new(&scene, &camera))
            .unwrap();
        let before = renderer.pixmap().unwrap().data().to_vec();

        export_thumbnail(&mut renderer, &scene, &camera, SerializableColor::white()).unwrap();

        // After export the surface shows the live view again, not the
        // neutral one.
        let after = renderer.pixmap().unwrap().data().to_vec();
        assert_eq!(before, after);
    }

    #[test]
    fn test_thumbnail_uses_neutral_transform() {
        // A shape visible only without the pan must appear in the thumbnail.
        let mut renderer = SkiaRenderer::new(50.0, 50.0, 1.0);
        let scene = sample_scene();
        let mut camera = Camera::new();
        camera.offset = Vec2::new(1000.0, 1000.0); // shape far off-screen live

        let url =
            export_thumbnail(&mut renderer, &scene, &camera, SerializableColor::white()).unwrap();

        // Compare against an export of an empty scene: the stroke must make
        // the payloads differ, proving the neutral transform was used.
        let empty = Scene::new();
        let empty_url =
            export_thumbnail(&mut renderer, &empty, &camera, SerializableColor::white()).unwrap();
        assert_ne!(url, empty_url);
    }
}
