// SPDX-License-Identifier: Apache-2.0
//! `scn` — export authoring scenes to engine-loadable documents.
//!
//! The heavy lifting lives in the library crates; this binary parses
//! arguments, loads the scene JSON, wires up the registry and reports the
//! outcome.

#![allow(clippy::print_stdout)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use scn_export::{
    builtins, descriptors_from_dir, export_scene, EntitySchema, ExportConfig, Registry,
    SchemaComponent,
};
use scn_scene::Scene;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scene exporter: JSON scenes to engine-loadable documents")]
struct Args {
    /// Command to execute
    #[command(subcommand)]
    cmd: Command,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Export a scene document and its binary assets
    Export(ExportArgs),
    /// Decode a binary mesh asset and print its counts
    InspectMesh {
        /// Path to a `.mesh` file
        file: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct ExportArgs {
    /// Scene description (JSON)
    #[arg(long)]
    scene: PathBuf,

    /// Output document path
    #[arg(long)]
    output: PathBuf,

    /// Directory of JSON component descriptors to register
    #[arg(long)]
    components: Option<PathBuf>,

    /// Subfolder for mesh assets
    #[arg(long, default_value = "meshes")]
    mesh_folder: String,

    /// Subfolder for material assets
    #[arg(long, default_value = "materials")]
    material_folder: String,

    /// Subfolder for texture assets
    #[arg(long, default_value = "textures")]
    texture_folder: String,

    /// Prefix rewritten onto asset reference paths
    #[arg(long, default_value = "scenes")]
    asset_path_prefix: String,

    /// Use the flat `(id, [...])` entity schema instead of the named one
    #[arg(long)]
    flat_entities: bool,

    /// Render the document on a single line
    #[arg(long)]
    compact: bool,

    /// Keep instanced duplicates as instances instead of realizing them
    #[arg(long)]
    keep_instances: bool,
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_target(false)
        .init();
    Ok(())
}

fn run_export(args: &ExportArgs) -> Result<()> {
    let text = fs::read_to_string(&args.scene)
        .with_context(|| format!("reading scene {}", args.scene.display()))?;
    let scene: Scene = serde_json::from_str(&text)
        .with_context(|| format!("parsing scene {}", args.scene.display()))?;

    let mut components = builtins();
    if let Some(dir) = &args.components {
        let descriptors = descriptors_from_dir(dir)
            .with_context(|| format!("loading component descriptors from {}", dir.display()))?;
        for descriptor in descriptors {
            components.push(Box::new(SchemaComponent::new(descriptor)));
        }
    }
    let registry = Registry::new(components).context("building component registry")?;

    let mut config = ExportConfig::new(&args.output);
    config.mesh_folder.clone_from(&args.mesh_folder);
    config.material_folder.clone_from(&args.material_folder);
    config.texture_folder.clone_from(&args.texture_folder);
    config
        .asset_path_prefix
        .clone_from(&args.asset_path_prefix);
    config.make_duplicates_real = !args.keep_instances;
    if args.flat_entities {
        config.entity_schema = EntitySchema::Flat;
    }
    if args.compact {
        config.indent_unit = String::new();
    }

    let stats = export_scene(&scene, &registry, &config)
        .with_context(|| format!("exporting {}", args.scene.display()))?;

    println!(
        "exported {} entities ({} components) to {}",
        stats.entities,
        stats.components,
        args.output.display()
    );
    Ok(())
}

fn inspect_mesh(file: &Path) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("reading mesh {}", file.display()))?;
    let buffers = scn_mesh_codec::decode(&bytes)
        .with_context(|| format!("decoding mesh {}", file.display()))?;
    println!(
        "{}: {} vertices, {} triangles",
        file.display(),
        buffers.vertex_count(),
        buffers.triangle_count()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    match &args.cmd {
        Command::Export(export_args) => run_export(export_args),
        Command::InspectMesh { file } => inspect_mesh(file),
    }
}
