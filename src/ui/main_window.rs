use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use gtk::gio;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::app::Settings;
use crate::events::{self, Controller, Dialogs, Frontend, UiEvent};

struct GtkFrontend {
    app: Application,
    window: adw::ApplicationWindow,
    image_label: gtk::Label,
}

impl GtkFrontend {
    fn message(&self, kind: gtk::MessageType, title: &str, message: &str) {
        let dialog = gtk::MessageDialog::builder()
            .transient_for(&self.window)
            .modal(true)
            .message_type(kind)
            .buttons(gtk::ButtonsType::Ok)
            .text(title)
            .secondary_text(message)
            .build();
        let answered = Rc::new(Cell::new(false));
        {
            let answered = answered.clone();
            dialog.connect_response(move |dlg, _| {
                answered.set(true);
                dlg.close();
            });
        }
        dialog.present();

        // Returns only once the user dismissed the dialog, so a running batch
        // shows each failure before it moves on to the next contact.
        let ctx = glib::MainContext::default();
        while !answered.get() && dialog.is_visible() {
            ctx.iteration(true);
        }
    }
}

impl Dialogs for GtkFrontend {
    fn show_error(&self, title: &str, message: &str) {
        self.message(gtk::MessageType::Error, title, message);
    }

    fn show_info(&self, title: &str, message: &str) {
        self.message(gtk::MessageType::Info, title, message);
    }
}

impl Frontend for GtkFrontend {
    fn request_image(&self, start_dir: &Path, on_pick: Box<dyn FnOnce(PathBuf)>) {
        let chooser = gtk::FileChooserNative::new(
            Some("Open file"),
            Some(&self.window),
            gtk::FileChooserAction::Open,
            Some("_Open"),
            Some("_Cancel"),
        );
        if let Err(e) = chooser.set_current_folder(Some(&gio::File::for_path(start_dir))) {
            log::debug!("could not set chooser folder: {}", e);
        }

        // The native dialog is not owned by any widget; hold it until it answers.
        let keep_alive = RefCell::new(Some(chooser.clone()));
        let on_pick = RefCell::new(Some(on_pick));
        chooser.connect_response(move |dialog, response| {
            if response == gtk::ResponseType::Accept {
                if let Some(path) = dialog.file().and_then(|f| f.path()) {
                    if let Some(pick) = on_pick.borrow_mut().take() {
                        pick(path);
                    }
                }
            }
            dialog.destroy();
            keep_alive.borrow_mut().take();
        });
        chooser.show();
    }

    fn set_image_label(&self, text: &str) {
        self.image_label.set_label(text);
    }

    fn quit(&self) {
        self.app.quit();
    }
}

fn event_button(event: UiEvent) -> gtk::Button {
    gtk::Button::builder()
        .label(event.label())
        .action_name(format!("win.{}", event.action_name()))
        .build()
}

pub fn show_main_window(app: &Application, settings: Settings) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("WhatsApp Message Sender")
        .default_width(400)
        .default_height(200)
        .build();

    let grid = gtk::Grid::builder()
        .row_spacing(10)
        .column_spacing(6)
        .margin_top(12)
        .margin_bottom(12)
        .margin_start(12)
        .margin_end(12)
        .halign(gtk::Align::Center)
        .build();

    grid.attach(&event_button(UiEvent::OpenContacts), 0, 0, 1, 1);
    grid.attach(&event_button(UiEvent::OpenTemplate), 1, 0, 1, 1);
    grid.attach(&event_button(UiEvent::ChooseImage), 2, 0, 1, 1);

    let image_label = gtk::Label::new(None);
    image_label.add_css_class("dim-label");
    grid.attach(&image_label, 0, 1, 3, 1);

    let send_btn = event_button(UiEvent::Send);
    send_btn.add_css_class("suggested-action");
    grid.attach(&send_btn, 1, 2, 1, 1);
    grid.attach(&event_button(UiEvent::Exit), 1, 3, 1, 1);

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    container.append(&adw::HeaderBar::new());
    container.append(&grid);
    window.set_content(Some(&container));

    let sender = Box::new(settings.sender.clone());
    let controller = Rc::new(RefCell::new(Controller::new(settings, sender)));
    let frontend: Rc<dyn Frontend> = Rc::new(GtkFrontend {
        app: app.clone(),
        window: window.clone(),
        image_label,
    });

    // Handlers run on the main loop; a send blocks the window until it returns.
    for (event, _) in events::DISPATCH {
        let action = gio::SimpleAction::new(event.action_name(), None);
        let controller = controller.clone();
        let frontend = frontend.clone();
        action.connect_activate(move |_, _| events::dispatch(event, &controller, &frontend));
        window.add_action(&action);
    }

    window.present();
}
