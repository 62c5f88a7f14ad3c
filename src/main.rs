//! Camera overlay: trace a translucent reference image over a live camera feed.
//! Built for the browser with trunk (`trunk serve`).

mod camera;
mod components;
mod config;
mod error;
mod model;
mod render;
mod session;
mod state;
mod util;

use components::app::App;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

fn main() {
    console_error_panic_hook::set_once();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(EnvFilter::new("info"));
    tracing_subscriber::registry().with(fmt_layer).init();

    yew::Renderer::<App>::new().render();
}
