//! Drive the shape component headlessly and write SVG renders of each shape.
//!
//! Usage: `render_shapes [OUT_DIR] [VIEWER_CONFIG.json]`

use std::fs;
use std::path::{Path, PathBuf};

use geometry_ui::{GeometryUi, RedrawOutcome, UiError};
use shape_kernel::TruckKernel;
use shape_types::{ParamUpdate, ShapeKind};
use shape_viewer::{DecorationGraphic, Frame, Theme, ViewManager, ViewerConfig, ViewerError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum RenderError {
    #[error(transparent)]
    Ui(#[from] UiError),

    #[error(transparent)]
    Viewer(#[from] ViewerError),

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Isometric view of a model-space point, screen Y pointing down.
fn project(x: f64, y: f64, z: f64) -> (f64, f64) {
    let angle_x: f64 = 0.6;
    let angle_z: f64 = 0.8;
    let rx = x * angle_z.cos() - y * angle_z.sin();
    let ry = x * angle_z.sin() + y * angle_z.cos();
    let pz = ry * angle_x.sin() + z * angle_x.cos();
    (rx, -pz)
}

struct Tri {
    pts: [(f64, f64); 3],
    depth: f64,
    brightness: f64,
}

fn collect_tris(graphic: &DecorationGraphic) -> Vec<Tri> {
    let light = (0.3_f64, -0.5_f64, 0.8_f64);
    let light_len = (light.0 * light.0 + light.1 * light.1 + light.2 * light.2).sqrt();

    let mut tris = Vec::new();
    for pf in &graphic.polyfaces {
        for t in pf.indices.chunks_exact(3) {
            let Some(p) = t
                .iter()
                .map(|&i| pf.point(i as usize))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            let v = |k: usize| [p[k][0] as f64, p[k][1] as f64, p[k][2] as f64];
            let (a, b, c) = (v(0), v(1), v(2));

            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let nlen = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt().max(1e-12);
            let dot = (n[0] * light.0 + n[1] * light.1 + n[2] * light.2) / (nlen * light_len);

            tris.push(Tri {
                pts: [
                    project(a[0], a[1], a[2]),
                    project(b[0], b[1], b[2]),
                    project(c[0], c[1], c[2]),
                ],
                depth: (a[2] + b[2] + c[2]) / 3.0,
                brightness: 0.3 + 0.7 * dot.abs().min(1.0),
            });
        }
    }
    tris
}

fn frame_to_svg(frame: &Frame, width: f64, height: f64, title: &str) -> String {
    let background = match frame.theme {
        Theme::Light => "#f4f4f8",
        Theme::Dark | Theme::Inherit => "#1a1a2e",
    };
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" style=\"background:{background}\">\n\
         <text x=\"{}\" y=\"20\" font-family=\"monospace\" font-size=\"13\" fill=\"#8892b0\" text-anchor=\"middle\">{title}</text>\n",
        width / 2.0
    );

    let mut layers: Vec<(&DecorationGraphic, Vec<Tri>)> = frame
        .graphics
        .iter()
        .map(|g| (g, collect_tris(g)))
        .collect();

    let all = layers.iter().flat_map(|(_, t)| t.iter()).flat_map(|t| t.pts.iter());
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for &(x, y) in all {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_x <= max_x {
        let padding = 40.0;
        let avail_w = width - 2.0 * padding;
        let avail_h = height - 2.0 * padding - 25.0;
        let data_w = (max_x - min_x).max(0.001);
        let data_h = (max_y - min_y).max(0.001);
        let scale = (avail_w / data_w).min(avail_h / data_h);
        let offset_x = padding + (avail_w - data_w * scale) / 2.0;
        let offset_y = padding + 25.0 + (avail_h - data_h * scale) / 2.0;
        let tx = |(px, py): (f64, f64)| ((px - min_x) * scale + offset_x, (py - min_y) * scale + offset_y);

        for (graphic, tris) in layers.iter_mut() {
            tris.sort_by(|a, b| a.depth.total_cmp(&b.depth));
            let color = graphic.color;
            let opacity = color.alpha() as f64 / 255.0;
            let stroke_width = if tris.len() > 200 { 0.2 } else { 0.5 };

            for tri in tris.iter() {
                let [(x0, y0), (x1, y1), (x2, y2)] = tri.pts.map(tx);
                let b = tri.brightness;
                let (r, g, bl) = (
                    (color.r as f64 * b) as u8,
                    (color.g as f64 * b) as u8,
                    (color.b as f64 * b) as u8,
                );
                svg.push_str(&format!(
                    "  <polygon points=\"{x0:.1},{y0:.1} {x1:.1},{y1:.1} {x2:.1},{y2:.1}\" \
                     fill=\"rgb({r},{g},{bl})\" fill-opacity=\"{opacity:.2}\" stroke=\"#2a2a4a\" stroke-width=\"{stroke_width}\"/>\n"
                ));
            }
        }
    }

    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-family=\"monospace\" font-size=\"10\" fill=\"#5a6080\" \
         text-anchor=\"middle\">frame {}, {} triangles</text>\n",
        width / 2.0,
        height - 8.0,
        frame.number,
        frame.triangle_count()
    ));
    svg.push_str("</svg>\n");
    svg
}

fn render_kind(kind: ShapeKind, config: &ViewerConfig, out_dir: &Path) -> Result<(), RenderError> {
    let mut ui = GeometryUi::new(TruckKernel::new(), ViewManager::new(config.clone()));
    ui.mount()?;
    let outcome = ui
        .on_params_changed(ParamUpdate::Kind(kind))?
        .or_else(|| ui.last_outcome().cloned());

    match &outcome {
        Some(RedrawOutcome::Drawn { triangles, .. }) => info!(%kind, triangles, "drew shape"),
        Some(other) => warn!(%kind, ?other, "shape not drawn"),
        None => warn!(%kind, "viewer never became ready"),
    }

    let frame = ui.viewer_mut().render_frame()?;
    let svg = frame_to_svg(&frame, 400.0, 360.0, kind.label());
    let file = kind.label().to_lowercase().replace(' ', "_");
    let path = out_dir.join(format!("{file}.svg"));
    fs::write(&path, svg).map_err(|source| RenderError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "wrote render");

    ui.on_unmount()?;
    Ok(())
}

fn main() -> Result<(), RenderError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "renders".to_string()));
    let config = match args.next() {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    fs::create_dir_all(&out_dir).map_err(|source| RenderError::Write {
        path: out_dir.clone(),
        source,
    })?;

    for kind in ShapeKind::ALL {
        render_kind(kind, &config, &out_dir)?;
    }
    Ok(())
}
