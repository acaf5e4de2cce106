mod app_builder;
mod boot;
mod config;
mod loader;
mod map_runtime;
mod map_surface;
mod mapbox;
mod runtime;
mod viewer_core;
mod yew_app;

fn main() {
    app_builder::run();
}
