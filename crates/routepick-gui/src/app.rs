//! Application state, messages and widgets.

use iced::widget::{
    button, center, column, container, horizontal_space, mouse_area, opaque, pick_list, row,
    scrollable, stack, text, text_input, tooltip,
};
use iced::{Alignment, Color, Element, Length, Task};
use tracing::{debug, warn};

use routepick_core::prelude::*;
use routepick_core::view::ids;

#[derive(Debug, Clone)]
pub enum Message {
    LatChanged(String),
    LngChanged(String),
    AddressChanged(String),
    /// Treat the typed coordinate as a map click.
    DropPin,
    /// Treat the typed coordinate and address as a search result.
    UseSearchResult,
    SkillPicked(SkillOption),
    DialogConfirm,
    DialogCancel,
    RowHover(LocationId),
    RowLeave(LocationId),
    RowSkill(LocationId, SkillTag),
    RowRemove(LocationId),
    DemoPicked(&'static str),
    Clear,
}

pub struct RoutepickGui {
    coordinator: EditingCoordinator<InMemoryStore>,
    lat: String,
    lng: String,
    address: String,
    input_error: Option<String>,
    demo: Option<&'static str>,
}

impl RoutepickGui {
    pub fn new(coordinator: EditingCoordinator<InMemoryStore>) -> Self {
        Self {
            coordinator,
            lat: String::new(),
            lng: String::new(),
            address: String::new(),
            input_error: None,
            demo: None,
        }
    }

    pub fn coordinator(&self) -> &EditingCoordinator<InMemoryStore> {
        &self.coordinator
    }

    fn typed_coordinate(&self) -> Result<Coordinates, String> {
        format!("{},{}", self.lat.trim(), self.lng.trim())
            .parse()
            .map_err(|err: CoreError| err.to_string())
    }

    fn open_with(&mut self, event: impl FnOnce(Coordinates) -> InteractionEvent) {
        match self.typed_coordinate() {
            Ok(coordinate) => {
                self.input_error = None;
                self.coordinator.handle_interaction(event(coordinate));
            }
            Err(err) => self.input_error = Some(err),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LatChanged(value) => self.lat = value,
            Message::LngChanged(value) => self.lng = value,
            Message::AddressChanged(value) => self.address = value,
            Message::DropPin => {
                self.open_with(|coordinate| InteractionEvent::Map(MapClick { coordinate }))
            }
            Message::UseSearchResult => {
                let address = self.address.clone();
                self.open_with(|coordinate| {
                    InteractionEvent::Search(SearchResult {
                        coordinate,
                        address,
                    })
                })
            }
            Message::SkillPicked(option) => {
                if !self.coordinator.choose_skill(option.value) {
                    warn!(skill = %option.value, "Skill not selectable");
                }
            }
            Message::DialogConfirm => {
                let outcome = self.coordinator.handle_dialog_confirm();
                debug!(?outcome, "Dialog confirmed");
                if outcome == ConfirmOutcome::Committed {
                    self.address.clear();
                }
            }
            Message::DialogCancel => self.coordinator.handle_dialog_cancel(),
            Message::RowHover(id) => self.coordinator.hover_row(id),
            Message::RowLeave(id) => self.coordinator.leave_row(id),
            Message::RowSkill(id, skill) => self.coordinator.change_row_skill(id, skill),
            Message::RowRemove(id) => self.coordinator.click_remove(id),
            Message::DemoPicked(name) => match self.coordinator.load_demo(name) {
                Ok(()) => self.demo = Some(name),
                Err(err) => self.input_error = Some(err.to_string()),
            },
            Message::Clear => {
                self.coordinator.clear();
                self.demo = None;
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content = column![
            text("Routepick").size(24),
            self.view_controls(),
            self.view_list(),
        ]
        .padding(20)
        .spacing(16);

        if self.coordinator.dialog().is_open() {
            modal(content, self.view_dialog(), Message::DialogCancel)
        } else {
            content.into()
        }
    }

    fn view_controls(&self) -> Element<'_, Message> {
        let mut controls = column![
            row![
                text_input("Latitude", &self.lat).on_input(Message::LatChanged),
                text_input("Longitude", &self.lng).on_input(Message::LngChanged),
            ]
            .spacing(8),
            text_input("Address", &self.address).on_input(Message::AddressChanged),
            row![
                button("Drop pin").on_press(Message::DropPin),
                button("Use search result").on_press(Message::UseSearchResult),
                horizontal_space(),
                pick_list(DemoCatalog.names(), self.demo, Message::DemoPicked)
                    .placeholder("Load demo"),
                button("Clear").on_press(Message::Clear).style(button::danger),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        ]
        .spacing(8);

        if let Some(err) = &self.input_error {
            controls = controls.push(text(err.as_str()).style(text::danger));
        }
        controls.into()
    }

    fn view_list(&self) -> Element<'_, Message> {
        let collection = self.coordinator.collection();
        match collection.view() {
            CollectionView::Empty => container(text(LocationCollection::EMPTY_TEXT))
                .id(container::Id::new(ids::LOCATION_LIST_EMPTY))
                .padding(10)
                .into(),
            CollectionView::Rows(rows) => {
                let rows = rows.into_iter().map(|entry| self.view_row(entry));
                container(scrollable(column(rows).spacing(4)))
                    .id(container::Id::new(ids::LOCATION_LIST))
                    .height(Length::Fill)
                    .into()
            }
        }
    }

    fn view_row<'a>(&'a self, entry: &'a LocationEntry) -> Element<'a, Message> {
        let id = entry.id();
        let label = entry.label();
        let title: Element<'a, Message> = match label.hover {
            Some(full) => tooltip(
                text(label.text),
                container(text(full)).padding(6).style(container::rounded_box),
                tooltip::Position::Bottom,
            )
            .into(),
            None => text(label.text).into(),
        };

        let catalog = self.coordinator.catalog();
        let skills: Vec<SkillOption> = catalog.selectable().copied().collect();
        let current = catalog.get(entry.required_skill()).copied();
        let skill = pick_list(skills, current, move |option: SkillOption| {
            Message::RowSkill(id, option.value)
        });

        let remove = button("Remove")
            .style(button::danger)
            .on_press_maybe(entry.remove_enabled().then_some(Message::RowRemove(id)));

        let highlighted = self.coordinator.selected_id() == Some(id);
        let body = row![
            title,
            horizontal_space(),
            text(entry.coordinate_text()).size(12),
            skill,
            remove,
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        mouse_area(
            container(body)
                .id(container::Id::new(entry.test_id()))
                .padding(6)
                .style(if highlighted {
                    container::rounded_box
                } else {
                    container::transparent
                }),
        )
        .on_enter(Message::RowHover(id))
        .on_exit(Message::RowLeave(id))
        .into()
    }

    fn view_dialog(&self) -> Element<'_, Message> {
        let dialog = self.coordinator.dialog();
        let catalog = self.coordinator.catalog();

        let mut body = column![text(SelectionDialog::TITLE).size(20)].spacing(8);
        if let Some([lat, lng]) = dialog.coordinate_lines() {
            body = body.push(text(lat)).push(text(lng));
        }
        if let Some(address) = dialog.address_line() {
            body = body.push(text(address));
        }

        let skills: Vec<SkillOption> = catalog.selectable().copied().collect();
        let chosen = dialog
            .chosen_skill()
            .and_then(|skill| catalog.get(skill).copied());
        body = body.push(
            pick_list(skills, chosen, Message::SkillPicked)
                .placeholder("Select a skill")
                .width(Length::Fill),
        );

        if let Some(error) = self.coordinator.validation_error() {
            body = body.push(text(error.to_string()).style(text::danger));
        }

        body = body.push(
            row![
                horizontal_space(),
                container(
                    button("Cancel")
                        .style(button::secondary)
                        .on_press(Message::DialogCancel)
                )
                .id(container::Id::new(ids::SELECTION_DIALOG_CANCEL)),
                container(button("Confirm").on_press(Message::DialogConfirm))
                    .id(container::Id::new(ids::SELECTION_DIALOG_CONFIRM)),
            ]
            .spacing(8),
        );

        container(body)
            .id(container::Id::new(ids::SELECTION_DIALOG))
            .width(360)
            .padding(16)
            .style(container::rounded_box)
            .into()
    }
}

fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gui() -> RoutepickGui {
        RoutepickGui::new(EditingCoordinator::with_defaults(InMemoryStore::new()))
    }

    fn type_coordinate(gui: &mut RoutepickGui, lat: &str, lng: &str) {
        let _ = gui.update(Message::LatChanged(lat.to_string()));
        let _ = gui.update(Message::LngChanged(lng.to_string()));
    }

    fn option(skill: SkillTag) -> SkillOption {
        *SkillCatalog::standard().get(skill).unwrap()
    }

    #[test]
    fn drop_pin_opens_dialog_without_address() {
        let mut gui = gui();
        type_coordinate(&mut gui, "1.5", "2.5");

        let _ = gui.update(Message::DropPin);

        let dialog = gui.coordinator().dialog();
        assert!(dialog.is_open());
        assert!(dialog.address_line().is_none());
    }

    #[test]
    fn invalid_coordinate_reports_error() {
        let mut gui = gui();
        type_coordinate(&mut gui, "north", "2.5");

        let _ = gui.update(Message::DropPin);

        assert!(!gui.coordinator().dialog().is_open());
        assert!(gui.input_error.is_some());
    }

    #[test]
    fn search_result_commits_with_description() {
        let mut gui = gui();
        type_coordinate(&mut gui, "3", "4");
        let _ = gui.update(Message::AddressChanged("5 Oak Ave".to_string()));

        let _ = gui.update(Message::UseSearchResult);
        let _ = gui.update(Message::SkillPicked(option(SkillTag::Testkit)));
        let _ = gui.update(Message::DialogConfirm);

        let plan = gui.coordinator().plan();
        let depot = plan.depot.as_ref().unwrap();
        assert_eq!(depot.description.as_deref(), Some("5 Oak Ave"));
        assert!(gui.address.is_empty());
    }

    #[test]
    fn confirm_without_skill_shows_validation() {
        let mut gui = gui();
        type_coordinate(&mut gui, "3", "4");
        let _ = gui.update(Message::DropPin);

        let _ = gui.update(Message::DialogConfirm);

        assert!(gui.coordinator().dialog().is_open());
        assert_eq!(
            gui.coordinator().validation_error(),
            Some(ValidationError::SkillRequired)
        );
    }

    #[test]
    fn row_messages_reach_the_store() {
        let mut gui = gui();
        let _ = gui.update(Message::DemoPicked("clinics"));
        let visit = gui.coordinator().plan().visits[0].id;

        let _ = gui.update(Message::RowHover(visit));
        assert_eq!(gui.coordinator().selected_id(), Some(visit));

        let _ = gui.update(Message::RowSkill(visit, SkillTag::BloodTransfusion));
        assert_eq!(
            gui.coordinator().plan().visits[0].required_skill,
            SkillTag::BloodTransfusion
        );

        let _ = gui.update(Message::RowRemove(visit));
        assert!(gui.coordinator().plan().find(visit).is_none());
        assert_eq!(gui.coordinator().selected_id(), None);
    }

    #[test]
    fn clear_empties_plan() {
        let mut gui = gui();
        let _ = gui.update(Message::DemoPicked("sample"));

        let _ = gui.update(Message::Clear);

        assert!(gui.coordinator().collection().is_empty());
        assert!(gui.demo.is_none());
    }
}
