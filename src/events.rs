//! Named window events and the table that routes them to handlers.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::app::{AppState, Settings};
use crate::batch;
use crate::opener;
use crate::sender::Sender;

/// Message boxes shown to the user.
pub trait Dialogs {
    fn show_error(&self, title: &str, message: &str);
    fn show_info(&self, title: &str, message: &str);
}

/// Everything the handlers need from the toolkit.
pub trait Frontend: Dialogs {
    /// Ask the user for an image. `on_pick` runs only if a file was chosen.
    fn request_image(&self, start_dir: &Path, on_pick: Box<dyn FnOnce(PathBuf)>);
    fn set_image_label(&self, text: &str);
    fn quit(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEvent {
    OpenContacts,
    OpenTemplate,
    ChooseImage,
    Send,
    Exit,
}

impl UiEvent {
    pub fn action_name(self) -> &'static str {
        match self {
            UiEvent::OpenContacts => "open-contacts",
            UiEvent::OpenTemplate => "open-template",
            UiEvent::ChooseImage => "choose-image",
            UiEvent::Send => "send",
            UiEvent::Exit => "exit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UiEvent::OpenContacts => "Contacts",
            UiEvent::OpenTemplate => "Text",
            UiEvent::ChooseImage => "Image",
            UiEvent::Send => "Send",
            UiEvent::Exit => "Exit",
        }
    }
}

pub struct Controller {
    settings: Settings,
    state: AppState,
    sender: Box<dyn Sender>,
}

impl Controller {
    pub fn new(settings: Settings, sender: Box<dyn Sender>) -> Self {
        Self {
            settings,
            state: AppState::default(),
            sender,
        }
    }
}

pub type Handler = fn(&Rc<RefCell<Controller>>, &Rc<dyn Frontend>);

pub const DISPATCH: [(UiEvent, Handler); 5] = [
    (UiEvent::OpenContacts, open_contacts),
    (UiEvent::OpenTemplate, open_template),
    (UiEvent::ChooseImage, choose_image),
    (UiEvent::Send, send),
    (UiEvent::Exit, exit),
];

pub fn dispatch(event: UiEvent, controller: &Rc<RefCell<Controller>>, ui: &Rc<dyn Frontend>) {
    log::debug!("event {}", event.action_name());
    if let Some((_, handler)) = DISPATCH.iter().find(|(e, _)| *e == event) {
        handler(controller, ui);
    }
}

fn open_file(path: &Path, ui: &dyn Frontend) {
    if let Err(e) = opener::open_path(path) {
        log::warn!("could not open {}: {}", path.display(), e);
        ui.show_error("Error", &format!("Failed to open {}: {}", path.display(), e));
    }
}

fn open_contacts(controller: &Rc<RefCell<Controller>>, ui: &Rc<dyn Frontend>) {
    let path = controller.borrow().settings.contacts_path.clone();
    open_file(&path, ui.as_ref());
}

fn open_template(controller: &Rc<RefCell<Controller>>, ui: &Rc<dyn Frontend>) {
    let path = controller.borrow().settings.template_path.clone();
    open_file(&path, ui.as_ref());
}

fn choose_image(controller: &Rc<RefCell<Controller>>, ui: &Rc<dyn Frontend>) {
    let start_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let controller = Rc::clone(controller);
    let label_ui = Rc::clone(ui);
    ui.request_image(
        &start_dir,
        Box::new(move |path| {
            let label = controller.borrow_mut().state.select_image(path);
            label_ui.set_image_label(&label);
        }),
    );
}

// Runs on the caller's thread until every contact has been tried.
fn send(controller: &Rc<RefCell<Controller>>, ui: &Rc<dyn Frontend>) {
    let ctl = controller.borrow();
    batch::send_all(
        &ctl.settings,
        ctl.state.selected_image.as_deref(),
        ctl.sender.as_ref(),
        ui.as_ref(),
    );
}

fn exit(_controller: &Rc<RefCell<Controller>>, ui: &Rc<dyn Frontend>) {
    ui.quit();
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    struct Harness {
        _dir: tempfile::TempDir,
        controller: Rc<RefCell<Controller>>,
        fake: Rc<FakeFrontend>,
        ui: Rc<dyn Frontend>,
        sender: FakeSender,
    }

    fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            contacts_path: dir.path().join("contacts.txt"),
            template_path: dir.path().join("text.txt"),
            ..Settings::default()
        };
        fs::write(&settings.contacts_path, "Alice:111\nBob:222\n").unwrap();
        fs::write(&settings.template_path, "Привет, имя!").unwrap();
        let sender = FakeSender::default();
        let controller = Rc::new(RefCell::new(Controller::new(settings, Box::new(sender.clone()))));
        let fake = Rc::new(FakeFrontend::default());
        let ui: Rc<dyn Frontend> = fake.clone();
        Harness { _dir: dir, controller, fake, ui, sender }
    }

    #[test]
    fn every_event_has_one_handler_and_distinct_action() {
        let events: HashSet<_> = DISPATCH.iter().map(|(e, _)| *e).collect();
        assert_eq!(events.len(), DISPATCH.len());
        let names: HashSet<_> = DISPATCH.iter().map(|(e, _)| e.action_name()).collect();
        assert_eq!(names.len(), DISPATCH.len());
    }

    #[test]
    fn send_without_image_shows_error_and_sends_nothing() {
        let h = harness();
        dispatch(UiEvent::Send, &h.controller, &h.ui);
        assert!(h.sender.calls().is_empty());
        assert_eq!(h.fake.dialogs.errors(), vec!["No image selected!".to_string()]);
    }

    #[test]
    fn chosen_image_is_used_by_send() {
        let h = harness();
        *h.fake.next_pick.borrow_mut() = Some(PathBuf::from("/tmp/card.png"));

        dispatch(UiEvent::ChooseImage, &h.controller, &h.ui);
        assert_eq!(*h.fake.label.borrow(), "Image selected: card.png");

        dispatch(UiEvent::Send, &h.controller, &h.ui);
        let calls = h.sender.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("111".into(), PathBuf::from("/tmp/card.png"), "Привет, Alice!".into()));
        assert_eq!(calls[1].2, "Привет, Bob!");
        assert_eq!(h.fake.dialogs.infos(), vec!["Messages sent!".to_string()]);
    }

    #[test]
    fn cancelled_pick_keeps_previous_image() {
        let h = harness();
        *h.fake.next_pick.borrow_mut() = Some(PathBuf::from("first.png"));
        dispatch(UiEvent::ChooseImage, &h.controller, &h.ui);

        dispatch(UiEvent::ChooseImage, &h.controller, &h.ui);

        assert_eq!(
            h.controller.borrow().state.selected_image,
            Some(PathBuf::from("first.png"))
        );
        assert_eq!(*h.fake.label.borrow(), "Image selected: first.png");
    }

    #[test]
    fn opening_missing_file_reports_error() {
        let h = harness();
        let path = h.controller.borrow().settings.template_path.clone();
        fs::remove_file(&path).unwrap();

        dispatch(UiEvent::OpenTemplate, &h.controller, &h.ui);

        let errors = h.fake.dialogs.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with(&format!("Failed to open {}", path.display())));
    }

    #[test]
    fn exit_quits() {
        let h = harness();
        dispatch(UiEvent::Exit, &h.controller, &h.ui);
        assert!(*h.fake.quit.borrow());
    }
}
