mod app;
mod render;
mod scroll;
mod sim;
mod street;
mod ui;

use app::App;
use street::config::ScrollerConfig;
use winit::event_loop::EventLoop;

fn main() {
    env_logger::init();

    let config = ScrollerConfig::load();
    log::info!(
        "street scroller: {:.0}px tiles over a {:.0}px backing surface",
        config.strip.tile_width,
        config.strip.total_width
    );

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("event loop error");
}
