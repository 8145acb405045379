mod app;
mod config;
mod error;
mod launcher;
mod logging;
mod menu;
mod model;
mod profiles;
mod ui;

use app::App;
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tracing::{error, info};
use tray_icon::menu::MenuEvent;
use tray_icon::TrayIconEvent;

enum UserEvent {
    Tray(TrayIconEvent),
    Menu(MenuEvent),
}

fn main() {
    logging::init();

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();

    let proxy = event_loop.create_proxy();
    TrayIconEvent::set_event_handler(Some(move |event| {
        let _ = proxy.send_event(UserEvent::Tray(event));
    }));
    let proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event| {
        let _ = proxy.send_event(UserEvent::Menu(event));
    }));

    let mut app = App::new();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                if let Err(e) = app.start() {
                    error!("{e:#}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::UserEvent(UserEvent::Tray(event)) => app.handle_tray_event(&event),
            Event::UserEvent(UserEvent::Menu(event)) => {
                if app.handle_menu_event(&event) {
                    info!("quit requested");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}
