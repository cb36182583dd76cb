//! Part scene demo
//!
//! Builds the Part mesh, assembles the scene around it and logs what a
//! renderer would receive. No window is opened.
//!
//! Run with:
//!   cargo run --example part_scene
//!   cargo run --example part_scene -- --scale 1.5 --angle 40 --dump

use clap::Parser;
use glam::Vec3;
use part_mesh::resources::AttributeKind;
use part_mesh::scene::{Projection, SceneConfig};
use part_mesh::PartScene;

/// Part scene demo arguments.
#[derive(Parser, Debug)]
#[command(name = "part_scene", about = "Build the Part scene and print its buffers")]
struct Args {
    /// Uniform scale applied to the Part.
    #[arg(long, default_value_t = 2.0)]
    scale: f32,

    /// Rotation of the Part about +Y, in degrees.
    #[arg(long, default_value_t = 25.0)]
    angle: f32,

    /// Vertical field of view, in degrees.
    #[arg(long, default_value_t = 45.0)]
    fov: f32,

    /// Print the vertex and index buffers as hex.
    #[arg(long)]
    dump: bool,
}

impl Args {
    fn scene_config(&self) -> SceneConfig {
        let mut config = SceneConfig {
            part_scale: self.scale,
            part_rotation_axis: Vec3::Y,
            part_rotation_degrees: self.angle,
            ..Default::default()
        };
        config.camera.projection = Projection::perspective(self.fov, 16.0 / 9.0, 0.1, 1000.0);
        config
    }
}

fn hex(bytes: &[u8], row: usize) -> String {
    bytes
        .chunks(row)
        .map(|chunk| {
            chunk
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut scene = match PartScene::new(&args.scene_config()) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to build Part scene: {}", e);
            std::process::exit(1);
        }
    };

    let view_proj = scene
        .camera()
        .map(|camera| camera.view_projection_matrix())
        .unwrap_or_default();
    for item in scene.draw_list() {
        log::info!("draw {:?} with model matrix {}", item.mesh, item.model);
        log::info!("  clip-space matrix {}", view_proj * item.model);
    }

    let Some(mesh) = scene.part_mesh() else {
        log::error!("Part entity has no mesh");
        std::process::exit(1);
    };

    log::info!(
        "{}: {} vertices / {} bytes, {} indices / {} bytes",
        mesh.label().unwrap_or("mesh"),
        mesh.vertex_count(),
        mesh.vertex_buffer().len(),
        mesh.index_count(),
        mesh.index_buffer().len()
    );

    for attr in mesh.attributes() {
        match attr.kind {
            AttributeKind::Vertex {
                semantic,
                byte_offset,
                byte_stride,
            } => log::info!(
                "  {:<16} {:?} {:?} x{} offset={} stride={} count={}",
                attr.name.unwrap_or("-"),
                semantic,
                attr.base_type,
                attr.vertex_size,
                byte_offset,
                byte_stride,
                attr.count
            ),
            AttributeKind::Index => log::info!(
                "  {:<16} {:?} count={}",
                "index",
                attr.base_type,
                attr.count
            ),
        }
    }

    if args.dump {
        match mesh.read_vertices() {
            Ok(vertices) => {
                for (i, vertex) in vertices.iter().enumerate() {
                    println!("vertex {}: {:?}", i, vertex.components());
                }
            }
            Err(e) => log::error!("Failed to decode vertex buffer: {}", e),
        }
        println!("vertex buffer:\n{}", hex(mesh.vertex_buffer().as_bytes(), 48));
        println!("index buffer:\n{}", hex(mesh.index_buffer().as_bytes(), 6));
    }
}
