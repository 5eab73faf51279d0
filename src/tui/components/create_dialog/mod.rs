//! # Container Create Dialog
//!
//! A five-page form for `podman container create`. The dialog owns its
//! fields, pages and focus pointer; it never talks to the engine. The
//! enclosing view fetches reference data before `display()` and turns the
//! returned `CreateDialogEvent::Create` into a payload via
//! `create_options()`.
//!
//! ```text
//! ┌──────────────── PODMAN CONTAINER CREATE ────────────────┐
//! │┌────────────────────┐┌─────────────────────────────────┐│
//! ││-> Basic Information││name:         ________________  ││
//! ││   Network Settings ││                                 ││
//! ││   Ports Settings   ││select image:  ▼                 ││
//! ││   ...              ││...                              ││
//! │└────────────────────┘└─────────────────────────────────┘│
//! │                                      [ Cancel ] [ Create ]
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod field;
pub mod focus;
pub mod pages;

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::core::payload::{CreateOptions, parse_labels, pick_option, split_tokens};
use crate::engine::ReferenceData;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::style::DialogStyle;

use field::{Field, FieldId, FieldRegistry};
use focus::{ActionButton, FocusPointer, Transition};
use pages::{CategoryPages, PageItem};

pub const DIALOG_MAX_WIDTH: u16 = 80;
pub const DIALOG_HEIGHT: u16 = 17;
const BUTTON_ROW_HEIGHT: u16 = 3;

pub const BASIC_INFO_PAGE: &str = "Basic Information";
pub const NETWORK_PAGE: &str = "Network Settings";
pub const PORTS_PAGE: &str = "Ports Settings";
pub const DNS_PAGE: &str = "DNS Settings";
pub const VOLUMES_PAGE: &str = "Volumes Settings";

pub const IMAGE_VOLUME_MODES: [&str; 3] = ["ignore", "tmpfs", "anonymous"];

/// What the enclosing view should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateDialogEvent {
    Cancel,
    Create,
}

pub struct ContainerCreateDialog {
    style: DialogStyle,
    display: bool,
    fields: FieldRegistry,
    pages: CategoryPages,
    focus: FocusPointer,
    /// Lists the drop-downs were built from, for index → item mapping.
    references: ReferenceData,
}

impl ContainerCreateDialog {
    pub fn new(style: DialogStyle) -> Self {
        let mut fields = FieldRegistry::new();
        fields.register(FieldId::Name, Field::text("name:"));
        fields.register(FieldId::Image, Field::select("select image:"));
        fields.register(FieldId::Pod, Field::select("select pod:"));
        fields.register(FieldId::Labels, Field::text("labels:"));
        fields.register(FieldId::Remove, Field::toggle("remove container after exit "));
        fields.register(FieldId::Hostname, Field::text("hostname:"));
        fields.register(FieldId::IpAddress, Field::text("IP address:"));
        fields.register(FieldId::MacAddress, Field::text("MAC address:"));
        fields.register(FieldId::Network, Field::select("network:"));
        fields.register(FieldId::Publish, Field::text("publish ports:"));
        fields.register(FieldId::PublishAll, Field::toggle("publish all "));
        fields.register(FieldId::Expose, Field::text("expose ports:"));
        fields.register(FieldId::DnsServers, Field::text("DNS servers:"));
        fields.register(FieldId::DnsOptions, Field::text("DNS options:"));
        fields.register(FieldId::DnsSearch, Field::text("DNS search:"));
        fields.register(FieldId::Volume, Field::select("Volume:"));
        fields.register(FieldId::VolumeDest, Field::text("Volume Dest:"));
        fields.register(FieldId::ImageVolume, Field::select("Image volume:"));

        let mut pages = CategoryPages::new(style.accent);
        pages.add_page(
            BASIC_INFO_PAGE,
            spaced(&[
                FieldId::Name,
                FieldId::Image,
                FieldId::Pod,
                FieldId::Labels,
                FieldId::Remove,
            ]),
            14,
        );
        pages.add_page(
            NETWORK_PAGE,
            spaced(&[
                FieldId::Hostname,
                FieldId::IpAddress,
                FieldId::MacAddress,
                FieldId::Network,
            ]),
            13,
        );
        pages.add_page(
            PORTS_PAGE,
            spaced(&[FieldId::Publish, FieldId::PublishAll, FieldId::Expose]),
            15,
        );
        pages.add_page(
            DNS_PAGE,
            spaced(&[FieldId::DnsServers, FieldId::DnsOptions, FieldId::DnsSearch]),
            13,
        );
        pages.add_page(
            VOLUMES_PAGE,
            spaced(&[FieldId::Volume, FieldId::VolumeDest, FieldId::ImageVolume]),
            14,
        );

        let mut dialog = Self {
            style,
            display: false,
            fields,
            pages,
            focus: FocusPointer::Pages,
            references: ReferenceData::default(),
        };
        dialog.sync_enabled();
        dialog
    }

    /// Shows the dialog with every field re-initialized from `references`.
    pub fn display(&mut self, references: ReferenceData) {
        debug!(
            "Create dialog: {} images, {} pods, {} networks, {} volumes",
            references.images.len(),
            references.pods.len(),
            references.networks.len(),
            references.volumes.len()
        );
        for field in self.fields.iter_mut() {
            field.reset();
        }
        self.fields.set_options(
            FieldId::Image,
            references.images.iter().map(|i| i.display_name()),
        );
        self.fields
            .set_options(FieldId::Pod, references.pods.iter().map(|p| p.name.clone()));
        self.fields.set_options(
            FieldId::Network,
            references.networks.iter().map(|n| n.name.clone()),
        );
        self.fields.set_options(
            FieldId::Volume,
            references.volumes.iter().map(|v| v.name.clone()),
        );
        self.fields.set_options(
            FieldId::ImageVolume,
            IMAGE_VOLUME_MODES.iter().map(|m| m.to_string()),
        );
        self.references = references;
        self.sync_enabled();

        self.pages.set_active_index(0);
        self.focus = FocusPointer::Pages;
        self.display = true;
    }

    /// Hides the dialog. Field values stay until the next `display()`.
    pub fn hide(&mut self) {
        self.display = false;
    }

    pub fn is_display(&self) -> bool {
        self.display
    }

    pub fn focus(&self) -> FocusPointer {
        self.focus
    }

    pub fn active_category(&self) -> usize {
        self.pages.active_index()
    }

    /// Switches the visible page. A focused field on another page hands
    /// focus back to the category list.
    pub fn set_active_category(&mut self, index: usize) {
        self.pages.set_active_index(index);
        self.release_hidden_field();
    }

    pub fn next_category(&mut self) {
        self.pages.next();
        self.release_hidden_field();
    }

    pub fn previous_category(&mut self) {
        self.pages.previous();
        self.release_hidden_field();
    }

    fn release_hidden_field(&mut self) {
        if let FocusPointer::Field(id) = self.focus
            && self.pages.page_of(id) != Some(self.pages.active_index())
        {
            self.focus = FocusPointer::Categories;
        }
    }

    /// Snapshot of the form as a create payload. Does not validate.
    pub fn create_options(&self) -> CreateOptions {
        let fields = &self.fields;
        let refs = &self.references;

        let volume = pick_option(&refs.volumes, fields.selected(FieldId::Volume))
            .map(|v| v.name.clone());
        let volume_dest = if volume.is_some() {
            fields.text(FieldId::VolumeDest).to_string()
        } else {
            String::new()
        };

        CreateOptions {
            name: fields.text(FieldId::Name).to_string(),
            image: pick_option(&refs.images, fields.selected(FieldId::Image))
                .map(|i| i.id.clone()),
            pod: pick_option(&refs.pods, fields.selected(FieldId::Pod)).map(|p| p.id.clone()),
            labels: parse_labels(fields.text(FieldId::Labels)),
            remove: fields.checked(FieldId::Remove),
            hostname: fields.text(FieldId::Hostname).to_string(),
            ip_address: fields.text(FieldId::IpAddress).to_string(),
            mac_address: fields.text(FieldId::MacAddress).to_string(),
            network: pick_option(&refs.networks, fields.selected(FieldId::Network))
                .map(|n| n.name.clone()),
            publish: split_tokens(fields.text(FieldId::Publish)),
            expose: split_tokens(fields.text(FieldId::Expose)),
            publish_all: fields.checked(FieldId::PublishAll),
            dns_servers: split_tokens(fields.text(FieldId::DnsServers)),
            dns_options: split_tokens(fields.text(FieldId::DnsOptions)),
            dns_search: split_tokens(fields.text(FieldId::DnsSearch)),
            volume,
            volume_dest,
            image_volume: pick_option(&IMAGE_VOLUME_MODES, fields.selected(FieldId::ImageVolume))
                .map(|m| m.to_string()),
        }
    }

    /// The dialog's rect inside `outer`: at most 80×17, centered.
    pub fn dialog_area(outer: Rect) -> Rect {
        let width = outer.width.min(DIALOG_MAX_WIDTH);
        let height = outer.height.min(DIALOG_HEIGHT);
        Rect {
            x: outer.x + (outer.width - width) / 2,
            y: outer.y + (outer.height - height) / 2,
            width,
            height,
        }
    }

    /// Volume destination only makes sense once a volume is picked.
    fn sync_enabled(&mut self) {
        let has_volume = self.fields.selected(FieldId::Volume) > 0;
        if let Some(dest) = self.fields.get_mut(FieldId::VolumeDest) {
            dest.enabled = has_volume;
        }
    }

    fn render_categories(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FocusPointer::Categories;
        let block = self.section_block(focused);
        let lines = self.pages.category_lines().to_vec();
        frame.render_widget(Paragraph::new(lines).style(self.style.base()).block(block), area);
    }

    fn render_page(&self, frame: &mut Frame, area: Rect) {
        let block = self.section_block(self.focus == FocusPointer::Pages);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(page) = self.pages.active() else {
            return;
        };
        for (row, item) in page.items.iter().enumerate() {
            let y = inner.y + row as u16;
            if y >= inner.bottom() {
                break;
            }
            let PageItem::Field(id) = item else {
                continue;
            };
            if let Some(field) = self.fields.get(*id) {
                let row_area = Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1);
                let focused = self.focus == FocusPointer::Field(*id);
                field.render(frame, row_area, page.label_width, focused, &self.style);
            }
        }
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect) {
        let button = |label: &'static str, which: ActionButton| {
            let style = if self.focus == FocusPointer::Buttons(which) {
                self.style.accent
            } else {
                Style::default().fg(self.style.text).bg(self.style.muted)
            };
            Span::styled(format!(" {label} "), style)
        };
        let line = Line::from(vec![
            button("Cancel", ActionButton::Cancel),
            Span::raw("  "),
            button("Create", ActionButton::Create),
            Span::raw(" "),
        ])
        .right_aligned();
        let [_, row, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);
        frame.render_widget(Paragraph::new(line).style(self.style.base()), row);
    }

    fn section_block(&self, focused: bool) -> Block<'static> {
        let border = if focused {
            Style::default().fg(self.style.text).bg(self.style.background)
        } else {
            self.style.border_style()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .style(self.style.base())
    }
}

/// Fields separated by one empty row each.
fn spaced(ids: &[FieldId]) -> Vec<PageItem> {
    let mut items = Vec::with_capacity(ids.len() * 2);
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            items.push(PageItem::Spacer);
        }
        items.push(PageItem::Field(*id));
    }
    items
}

impl EventHandler for ContainerCreateDialog {
    type Event = CreateDialogEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<CreateDialogEvent> {
        if !self.display {
            return None;
        }
        match focus::transition(self.focus, event, &self.pages, &self.fields) {
            Transition::Focus(next) => {
                self.focus = next;
                None
            }
            Transition::NextCategory => {
                self.next_category();
                None
            }
            Transition::PreviousCategory => {
                self.previous_category();
                None
            }
            Transition::Forward(id) => {
                self.focus = FocusPointer::Field(id);
                if let Some(field) = self.fields.get_mut(id) {
                    field.handle_event(event);
                }
                self.sync_enabled();
                None
            }
            Transition::Submit => Some(CreateDialogEvent::Create),
            Transition::Cancel => Some(CreateDialogEvent::Cancel),
            Transition::Ignore => None,
        }
    }
}

impl Component for ContainerCreateDialog {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.display {
            return;
        }
        let area = Self::dialog_area(area);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.style.border_style())
            .title(" PODMAN CONTAINER CREATE ")
            .title_alignment(ratatui::layout::Alignment::Center)
            .style(self.style.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [_, body, buttons] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(BUTTON_ROW_HEIGHT),
        ])
        .areas(inner);
        let [categories, page] = Layout::horizontal([
            Constraint::Length(self.pages.category_width() + 2),
            Constraint::Min(0),
        ])
        .areas(body);

        self.render_categories(frame, categories);
        self.render_page(frame, page);
        self.render_buttons(frame, buttons);
    }
}
