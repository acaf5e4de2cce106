use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const TOKEN_KEYS: &[&str] = &[
    "WELL_FINDER_MAPBOX_TOKEN",
    "MAPBOX_TOKEN",
    "TRUNK_PUBLIC_MAPBOX_TOKEN",
];
const TOKEN_OUT_KEY: &str = "WELL_FINDER_MAPBOX_TOKEN";
const MAX_ZOOM: f64 = 24.0;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ViewerFile {
    title: String,
    data_src: String,
    map_style: String,
    fly_to_zoom: f64,
    initial_view: InitialViewFile,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InitialViewFile {
    longitude: f64,
    latitude: f64,
    zoom: f64,
}

fn main() {
    let workspace_root =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let env_path = workspace_root.join(".env");
    let env_local_path = workspace_root.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-env-changed=VIEWER_CONFIG_PATH");
    for key in TOKEN_KEYS {
        println!("cargo:rerun-if-env-changed={key}");
    }
    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    if let Some(token) = resolve_token() {
        println!("cargo:rustc-env={TOKEN_OUT_KEY}={token}");
    } else {
        println!("cargo:warning=no Mapbox access token configured; the viewer will show a configuration error");
    }

    let config_path = resolve_config_path(&workspace_root);
    println!("cargo:rerun-if-changed={}", config_path.display());

    let contents = fs::read_to_string(&config_path).unwrap_or_else(|err| {
        panic!(
            "failed to read viewer config at {}: {err}",
            config_path.display()
        )
    });
    let config: ViewerFile = toml::from_str(&contents).unwrap_or_else(|err| {
        panic!(
            "failed to parse viewer config at {}: {err}",
            config_path.display()
        )
    });
    validate(&config, &config_path);

    let mut output = String::new();
    writeln!(&mut output, "pub(crate) const TITLE: &str = {};", rust_string(&config.title)).unwrap();
    writeln!(
        &mut output,
        "pub(crate) const DATA_SRC: &str = {};",
        rust_string(&config.data_src)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub(crate) const MAP_STYLE: &str = {};",
        rust_string(&config.map_style)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub(crate) const INITIAL_LONGITUDE: f64 = {:?};",
        config.initial_view.longitude
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub(crate) const INITIAL_LATITUDE: f64 = {:?};",
        config.initial_view.latitude
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub(crate) const INITIAL_ZOOM: f64 = {:?};",
        config.initial_view.zoom
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub(crate) const FLY_TO_ZOOM: f64 = {:?};",
        config.fly_to_zoom
    )
    .unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("viewer_config.rs");
    fs::write(&out_path, output)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_path.display()));
}

fn resolve_token() -> Option<String> {
    TOKEN_KEYS.iter().find_map(|key| {
        let value = env::var(key).ok()?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn resolve_config_path(workspace_root: &Path) -> PathBuf {
    let raw_path = match env::var("VIEWER_CONFIG_PATH").ok() {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => workspace_root.join("viewer.toml"),
    };
    if raw_path.is_relative() {
        workspace_root.join(raw_path)
    } else {
        raw_path
    }
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

fn validate(config: &ViewerFile, config_path: &Path) {
    if config.title.trim().is_empty() {
        panic!("viewer title cannot be empty in {}", config_path.display());
    }
    if config.data_src.trim().is_empty() {
        panic!("viewer data_src cannot be empty in {}", config_path.display());
    }
    if config.data_src.starts_with("data:") {
        panic!(
            "viewer data_src cannot be a data URL in {}",
            config_path.display()
        );
    }
    if config.map_style.trim().is_empty() {
        panic!("viewer map_style cannot be empty in {}", config_path.display());
    }
    let view = &config.initial_view;
    if !view.longitude.is_finite() || !(-180.0..=180.0).contains(&view.longitude) {
        panic!(
            "initial_view.longitude {} out of range in {}",
            view.longitude,
            config_path.display()
        );
    }
    if !view.latitude.is_finite() || !(-90.0..=90.0).contains(&view.latitude) {
        panic!(
            "initial_view.latitude {} out of range in {}",
            view.latitude,
            config_path.display()
        );
    }
    for (label, zoom) in [("initial_view.zoom", view.zoom), ("fly_to_zoom", config.fly_to_zoom)] {
        if !zoom.is_finite() || !(0.0..=MAX_ZOOM).contains(&zoom) {
            panic!(
                "{label} {zoom} must be within 0..={MAX_ZOOM} in {}",
                config_path.display()
            );
        }
    }
}
